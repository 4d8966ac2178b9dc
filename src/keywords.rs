//! Constraint compiler: schema tag directives to JSON Schema keywords.
//!
//! Which directives apply depends on the kind of node they land on. Nodes with
//! no `type` (references, inline combinators) take the string directives.

use std::mem;

use serde_json::Value;

use crate::diagnostic::{DiagnosticCode, Diagnostics};
use crate::schema::{InstanceType, Schema};
use crate::tags::{enum_literals, Directive, Tags};

/// Formats accepted by `format=`.
pub const STRING_FORMATS: &[&str] = &["date-time", "email", "hostname", "ipv4", "ipv6", "uri"];

/// Pattern written by `notEmpty`.
pub const NOT_EMPTY_PATTERN: &str = r"^\S";

/// Apply `tags` to `node`. Unparseable values are reported to `diags` and skipped.
pub(crate) fn apply(node: &mut Schema, tags: &Tags, diags: &mut Diagnostics, path: &str) {
    let mut compiler = Compiler {
        node,
        diags,
        path,
        allow_null: false,
        exclusive_min: false,
        exclusive_max: false,
    };

    for directive in tags.iter() {
        if compiler.annotation(directive) {
            continue;
        }
        match compiler.node.instance_type {
            Some(InstanceType::String) | None => compiler.string(directive),
            Some(InstanceType::Integer) => compiler.integer(directive),
            Some(InstanceType::Number) => compiler.number(directive),
            Some(InstanceType::Array) => compiler.array(directive),
            _ => {}
        }
    }

    compiler.finish();
}

struct Compiler<'a> {
    node: &'a mut Schema,
    diags: &'a mut Diagnostics,
    path: &'a str,
    allow_null: bool,
    exclusive_min: bool,
    exclusive_max: bool,
}

impl Compiler<'_> {
    /// Directives valid on every kind. Returns true when consumed.
    fn annotation(&mut self, directive: &Directive) -> bool {
        match (directive.name.as_str(), directive.value.as_deref()) {
            ("title", Some(value)) => self.node.title = Some(value.to_string()),
            ("description", Some(value)) => self.node.description = Some(value.to_string()),
            _ => return false,
        }
        true
    }

    fn string(&mut self, directive: &Directive) {
        match (directive.name.as_str(), directive.value.as_deref()) {
            ("minLength", Some(value)) => self.node.min_length = self.unsigned(directive, value),
            ("maxLength", Some(value)) => self.node.max_length = self.unsigned(directive, value),
            ("enum", Some(value)) => {
                self.node.enum_values = enum_literals(value)
                    .map(|literal| Value::String(literal.to_string()))
                    .collect();
            }
            ("format", Some(value)) => {
                if STRING_FORMATS.contains(&value) {
                    self.node.format = Some(value.to_string());
                } else {
                    self.diags.push(
                        DiagnosticCode::UnknownFormat,
                        self.path,
                        format!("format \"{}\" is not supported", value),
                    );
                }
            }
            ("pattern", Some(value)) => self.node.pattern = Some(value.to_string()),
            ("notEmpty", None) => self.node.pattern = Some(NOT_EMPTY_PATTERN.to_string()),
            ("allowNull", None) => self.allow_null = true,
            _ => {}
        }
    }

    fn integer(&mut self, directive: &Directive) {
        match (directive.name.as_str(), directive.value.as_deref()) {
            ("multipleOf", Some(value)) => self.node.multiple_of = self.positive(directive, value),
            ("minimum", Some(value)) => self.node.minimum = self.signed(directive, value),
            ("maximum", Some(value)) => self.node.maximum = self.signed(directive, value),
            ("exclusiveMinimum", Some(value)) => {
                if let Some(flag) = self.boolean(directive, value) {
                    self.exclusive_min = flag;
                }
            }
            ("exclusiveMaximum", Some(value)) => {
                if let Some(flag) = self.boolean(directive, value) {
                    self.exclusive_max = flag;
                }
            }
            ("enum", Some(value)) => {
                let mut values = Vec::new();
                for literal in enum_literals(value) {
                    if let Some(n) = self.signed(directive, literal) {
                        values.push(Value::from(n));
                    }
                }
                self.node.enum_values = values;
            }
            ("allowNull", None) => self.allow_null = true,
            _ => {}
        }
    }

    fn number(&mut self, directive: &Directive) {
        match (directive.name.as_str(), directive.value.as_deref()) {
            ("enum", Some(value)) => {
                let mut values = Vec::new();
                for literal in enum_literals(value) {
                    let parsed = literal
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64);
                    match parsed {
                        Some(n) => values.push(Value::Number(n)),
                        None => self.malformed(directive, literal, "number"),
                    }
                }
                self.node.enum_values = values;
            }
            ("allowNull", None) => self.allow_null = true,
            _ => {}
        }
    }

    fn array(&mut self, directive: &Directive) {
        match (directive.name.as_str(), directive.value.as_deref()) {
            ("minItems", Some(value)) => self.node.min_items = self.unsigned(directive, value),
            ("maxItems", Some(value)) => self.node.max_items = self.unsigned(directive, value),
            ("uniqueItems", None) => self.node.unique_items = true,
            ("uniqueItems", Some(value)) => {
                if let Some(flag) = self.boolean(directive, value) {
                    self.node.unique_items = flag;
                }
            }
            _ => {}
        }
    }

    fn finish(self) {
        let Compiler {
            node,
            diags,
            path,
            allow_null,
            exclusive_min,
            exclusive_max,
        } = self;

        // draft-07 spells exclusive bounds as numbers, not flags.
        if exclusive_min {
            match node.minimum.take() {
                Some(bound) => node.exclusive_minimum = Some(bound),
                None => diags.push(
                    DiagnosticCode::DanglingExclusiveBound,
                    path,
                    "exclusiveMinimum requires minimum",
                ),
            }
        }
        if exclusive_max {
            match node.maximum.take() {
                Some(bound) => node.exclusive_maximum = Some(bound),
                None => diags.push(
                    DiagnosticCode::DanglingExclusiveBound,
                    path,
                    "exclusiveMaximum requires maximum",
                ),
            }
        }

        if allow_null {
            make_nullable(node);
        }
    }

    fn unsigned(&mut self, directive: &Directive, value: &str) -> Option<u64> {
        let parsed = value.trim().parse().ok();
        if parsed.is_none() {
            self.malformed(directive, value, "non-negative integer");
        }
        parsed
    }

    fn signed(&mut self, directive: &Directive, value: &str) -> Option<i64> {
        let parsed = value.trim().parse().ok();
        if parsed.is_none() {
            self.malformed(directive, value, "integer");
        }
        parsed
    }

    /// `multipleOf` must be strictly greater than zero.
    fn positive(&mut self, directive: &Directive, value: &str) -> Option<i64> {
        let parsed = value.trim().parse().ok().filter(|n: &i64| *n > 0);
        if parsed.is_none() {
            self.malformed(directive, value, "positive integer");
        }
        parsed
    }

    fn boolean(&mut self, directive: &Directive, value: &str) -> Option<bool> {
        match value.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            other => {
                self.malformed(directive, other, "boolean");
                None
            }
        }
    }

    fn malformed(&mut self, directive: &Directive, value: &str, expected: &str) {
        self.diags.push(
            DiagnosticCode::MalformedDirective,
            self.path,
            format!("{}: invalid {} \"{}\"", directive.name, expected, value),
        );
    }
}

/// Accept `null` in addition to what `node` already accepts.
///
/// Typed nodes keep their keywords and move only `type` into the first branch.
/// Untyped nodes move entirely into the first branch.
fn make_nullable(node: &mut Schema) {
    match node.instance_type.take() {
        Some(kind) => {
            node.one_of = vec![Schema::of_type(kind), Schema::null()];
        }
        None => {
            let inner = mem::take(node);
            node.one_of = vec![inner, Schema::null()];
        }
    }
}
