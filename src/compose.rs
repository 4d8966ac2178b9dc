//! Subschema composition hooks.
//!
//! A record can opt into extra schema generation by declaring
//! [`Composition`] roles on its [`TypeInfo`]:
//!
//! | Role | Effect |
//! |------|--------|
//! | `AnyOf` / `OneOf` / `AllOf` | Replace the record schema with a combinator over the branches; fields are not walked |
//! | `AndAnyOf` / `AndOneOf` / `AndAllOf` | Keep properties and add the combinator alongside |
//! | `IfThenElse` | `if` on one field's constraint, `then`/`else` on two other types |
//! | `Switch` | `oneOf` of `if`/`then`/`else` branches keyed by a field's literal value |
//!
//! When several replacing roles are declared, `AnyOf` wins over `OneOf`,
//! which wins over `AllOf`.
//!
//! # Switch example
//!
//! A switch on `type` with cases `apple` and `bacon` produces:
//!
//! ```json
//! {
//!   "oneOf": [
//!     { "if":   { "properties": { "type": { "enum": ["apple"] } } },
//!       "then": { "$ref": "#/definitions/food.Apple" },
//!       "else": { "properties": { "type": { "enum": ["apple"] } } } },
//!     { "if":   { "properties": { "type": { "enum": ["bacon"] } } },
//!       "then": { "$ref": "#/definitions/food.Bacon" },
//!       "else": { "properties": { "type": { "enum": ["bacon"] } } } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::diagnostic::DiagnosticCode;
use crate::error::ReflectError;
use crate::keywords;
use crate::schema::Schema;
use crate::tags::WireTag;
use crate::types::{Field, Reflect, TypeInfo, TypeRef};
use crate::walker::Walker;

/// One alternative of a combinator.
#[derive(Debug, Clone, Copy)]
pub enum Branch {
    Type(TypeRef),
    /// Matches JSON `null`.
    Null,
}

impl Branch {
    pub fn of<T: Reflect + ?Sized>() -> Self {
        Branch::Type(TypeRef::of::<T>())
    }
}

/// If/then/else keyed on one field.
///
/// The `if` clause holds the field's schema tag compiled as a constraint,
/// e.g. a field tagged `enum=web` yields `{"properties": {"type": {"enum": ["web"]}}}`.
#[derive(Debug, Clone)]
pub struct SchemaCondition {
    /// Trigger field; its wire name and schema tag build the `if` clause.
    pub field: Field,
    pub then: Option<TypeRef>,
    pub otherwise: Option<TypeRef>,
}

impl SchemaCondition {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            then: None,
            otherwise: None,
        }
    }

    pub fn then<T: Reflect + ?Sized>(mut self) -> Self {
        self.then = Some(TypeRef::of::<T>());
        self
    }

    pub fn otherwise<T: Reflect + ?Sized>(mut self) -> Self {
        self.otherwise = Some(TypeRef::of::<T>());
        self
    }
}

/// Switch over the literal value of one field.
#[derive(Debug, Clone)]
pub struct SchemaSwitch {
    /// Wire name of the discriminator field.
    pub by_field: String,
    /// Literal value to the type validated when the field has that value.
    pub cases: BTreeMap<String, TypeRef>,
    /// Branch order. When empty, cases are emitted in ascending key order.
    pub order: Vec<String>,
}

impl SchemaSwitch {
    pub fn new(by_field: impl Into<String>) -> Self {
        Self {
            by_field: by_field.into(),
            cases: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    pub fn case<T: Reflect + ?Sized>(mut self, value: impl Into<String>) -> Self {
        self.cases.insert(value.into(), TypeRef::of::<T>());
        self
    }

    pub fn order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Values in the order their branches are emitted.
    pub fn branch_order(&self) -> Vec<&str> {
        if self.order.is_empty() {
            self.cases.keys().map(String::as_str).collect()
        } else {
            self.order.iter().map(String::as_str).collect()
        }
    }
}

/// A composition role declared by a record type.
#[derive(Debug, Clone)]
pub enum Composition {
    AnyOf(Vec<Branch>),
    OneOf(Vec<Branch>),
    AllOf(Vec<Branch>),
    AndAnyOf(Vec<Branch>),
    AndOneOf(Vec<Branch>),
    AndAllOf(Vec<Branch>),
    IfThenElse(SchemaCondition),
    Switch(SchemaSwitch),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    AnyOf,
    OneOf,
    AllOf,
}

impl Combinator {
    fn keyword(self, schema: &mut Schema) -> &mut Vec<Schema> {
        match self {
            Combinator::AnyOf => &mut schema.any_of,
            Combinator::OneOf => &mut schema.one_of,
            Combinator::AllOf => &mut schema.all_of,
        }
    }
}

/// Roles of one record, resolved once before its schema is built.
#[derive(Debug, Default)]
pub(crate) struct Hooks<'a> {
    pub(crate) exclusive: Option<(Combinator, &'a [Branch])>,
    augmenting: Vec<(Combinator, &'a [Branch])>,
    condition: Option<&'a SchemaCondition>,
    switch: Option<&'a SchemaSwitch>,
}

impl<'a> Hooks<'a> {
    pub(crate) fn resolve(compositions: &'a [Composition]) -> Self {
        let mut hooks = Hooks::default();
        let mut any_of = None;
        let mut one_of = None;
        let mut all_of = None;

        for composition in compositions {
            match composition {
                Composition::AnyOf(b) => any_of = any_of.or(Some(b.as_slice())),
                Composition::OneOf(b) => one_of = one_of.or(Some(b.as_slice())),
                Composition::AllOf(b) => all_of = all_of.or(Some(b.as_slice())),
                Composition::AndAnyOf(b) => hooks.augmenting.push((Combinator::AnyOf, b.as_slice())),
                Composition::AndOneOf(b) => hooks.augmenting.push((Combinator::OneOf, b.as_slice())),
                Composition::AndAllOf(b) => hooks.augmenting.push((Combinator::AllOf, b.as_slice())),
                Composition::IfThenElse(c) => hooks.condition = hooks.condition.or(Some(c)),
                Composition::Switch(s) => hooks.switch = hooks.switch.or(Some(s)),
            }
        }

        hooks.exclusive = any_of
            .map(|b| (Combinator::AnyOf, b))
            .or(one_of.map(|b| (Combinator::OneOf, b)))
            .or(all_of.map(|b| (Combinator::AllOf, b)));
        hooks
    }
}

impl Walker<'_> {
    /// Schema for a record whose replacing hook supplants its fields.
    ///
    /// The result is inlined. A record that reaches itself through its own
    /// branches is moved into the definitions table and referenced instead.
    pub(crate) fn exclusive_subschema(
        &mut self,
        info: &TypeInfo,
        (combinator, branches): (Combinator, &[Branch]),
    ) -> Result<Schema, ReflectError> {
        let key = info.qualified_name();
        self.inline_named(info, |walker| {
            let mut schema = Schema::default();
            *combinator.keyword(&mut schema) = walker.branch_schemas(branches, &key)?;
            Ok(schema)
        })
    }

    /// Merge augmenting, conditional and switch hooks into a record's object schema.
    pub(crate) fn add_subschemas(
        &mut self,
        object: &mut Schema,
        info: &TypeInfo,
        hooks: &Hooks<'_>,
        path: &str,
    ) -> Result<(), ReflectError> {
        for (combinator, branches) in &hooks.augmenting {
            *combinator.keyword(object) = self.branch_schemas(branches, path)?;
        }

        if let Some(switch) = hooks.switch {
            let cases = self.switch_cases(switch, path)?;
            if !object.one_of.is_empty() {
                self.diagnostics.push(
                    DiagnosticCode::ConflictingOneOf,
                    path,
                    "switch cases replace the oneOf declared alongside them",
                );
            }
            object.one_of = cases;
        }

        if let Some(condition) = hooks.condition {
            self.add_condition(object, info, condition, path)?;
        }

        Ok(())
    }

    fn branch_schemas(
        &mut self,
        branches: &[Branch],
        path: &str,
    ) -> Result<Vec<Schema>, ReflectError> {
        branches
            .iter()
            .map(|branch| match branch {
                Branch::Type(ty) => self.expand(*ty, path),
                Branch::Null => Ok(Schema::null()),
            })
            .collect()
    }

    fn add_condition(
        &mut self,
        object: &mut Schema,
        owner: &TypeInfo,
        condition: &SchemaCondition,
        path: &str,
    ) -> Result<(), ReflectError> {
        let field = &condition.field;
        let name = WireTag::parse(&field.wire_tag)
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| field.resolved_ident().into_owned());
        let field_path = format!("{}.{}", path, name);

        let tags = self.reflector.field_tags(&owner.qualified_name(), field);
        let mut constraint = Schema::default();
        keywords::apply(&mut constraint, &tags, &mut self.diagnostics, &field_path);
        object.if_schema = Some(Box::new(Schema::with_property(name, constraint)));

        if let Some(then) = condition.then {
            object.then_schema = Some(Box::new(self.expand(then, path)?));
        }
        if let Some(otherwise) = condition.otherwise {
            object.else_schema = Some(Box::new(self.expand(otherwise, path)?));
        }
        Ok(())
    }

    fn switch_cases(
        &mut self,
        switch: &SchemaSwitch,
        path: &str,
    ) -> Result<Vec<Schema>, ReflectError> {
        let mut cases = Vec::new();

        for value in switch.branch_order() {
            let case_path = format!("{}.{}", path, switch.by_field);
            let Some(ty) = switch.cases.get(value) else {
                self.diagnostics.push(
                    DiagnosticCode::MissingSwitchCase,
                    &case_path,
                    format!("no case declared for \"{}\"", value),
                );
                continue;
            };

            let matches_value = Schema::with_property(
                switch.by_field.clone(),
                Schema {
                    enum_values: vec![Value::String(value.to_string())],
                    ..Schema::default()
                },
            );
            cases.push(Schema {
                if_schema: Some(Box::new(matches_value.clone())),
                then_schema: Some(Box::new(self.expand(*ty, &case_path)?)),
                else_schema: Some(Box::new(matches_value)),
                ..Schema::default()
            });
        }

        if !switch.order.is_empty() {
            for value in switch.cases.keys() {
                if !switch.order.contains(value) {
                    self.diagnostics.push(
                        DiagnosticCode::UnorderedSwitchCase,
                        &format!("{}.{}", path, switch.by_field),
                        format!("case \"{}\" is missing from the explicit order", value),
                    );
                }
            }
        }

        Ok(cases)
    }
}
