//! Field tag grammar.
//!
//! Two tags drive schema generation for a field:
//!
//! - the wire tag (`name,omitempty`), which names the serialized key and
//!   marks it optional;
//! - the schema tag (`required,minLength=1,enum=a|b|c`), a comma separated
//!   list of directives. A directive is a bare flag or a `name=value` pair.
//!
//! A leading `-` in either tag removes the field from the schema.

/// A single schema tag directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub value: Option<String>,
}

impl Directive {
    fn parse(raw: &str) -> Self {
        match raw.split_once('=') {
            Some((name, value)) => Directive {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
            None => Directive {
                name: raw.to_string(),
                value: None,
            },
        }
    }

    /// True for a bare flag with the given name.
    pub fn is_flag(&self, name: &str) -> bool {
        self.value.is_none() && self.name == name
    }
}

/// Parsed schema tag, directives in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    directives: Vec<Directive>,
}

impl Tags {
    pub fn parse(raw: &str) -> Self {
        let directives = raw
            .split(',')
            .filter(|part| !part.is_empty())
            .map(Directive::parse)
            .collect();
        Self { directives }
    }

    /// `-` as the first directive.
    pub fn is_ignored(&self) -> bool {
        self.directives.first().is_some_and(|d| d.is_flag("-"))
    }

    pub fn is_required(&self) -> bool {
        !self.is_ignored() && self.has_flag("required")
    }

    pub fn is_optional(&self) -> bool {
        self.has_flag("optional")
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.is_flag(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Split an `enum=` value into its literals.
pub fn enum_literals(value: &str) -> impl Iterator<Item = &str> {
    value.split('|')
}

/// Parsed wire tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireTag<'a> {
    name: &'a str,
    options: Vec<&'a str>,
}

impl<'a> WireTag<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split(',');
        let name = parts.next().unwrap_or_default();
        Self {
            name,
            options: parts.collect(),
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.name == "-"
    }

    /// Serialized name, if the tag declares one.
    pub fn name(&self) -> Option<&'a str> {
        if self.name.is_empty() || self.is_ignored() {
            None
        } else {
            Some(self.name)
        }
    }

    pub fn omit_empty(&self) -> bool {
        self.options.iter().any(|opt| *opt == "omitempty")
    }
}
