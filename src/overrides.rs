//! Schema tag overrides.
//!
//! A shared record is often validated more strictly by one consumer than by
//! another. Overrides replace a field's schema tag at generation time without
//! touching the type: a `Species` field tagged `enum=Human|Dog|Alien` can be
//! generated as `required,enum=Dog` for one document only.
//!
//! Overrides are keyed by the declaring type's qualified name
//! (`<package-qualifier>.<TypeName>`) and the field's declared identifier.
//! An override replaces the declared tag; it is never merged with it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Reflect;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides {
    tags: BTreeMap<String, BTreeMap<String, String>>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tag of `field` on `T`.
    pub fn set<T: Reflect + ?Sized>(
        &mut self,
        field: impl Into<String>,
        tag: impl Into<String>,
    ) -> &mut Self {
        let type_name = T::type_info().qualified_name();
        self.insert(type_name, field, tag)
    }

    /// Builder form of [`Overrides::set`].
    pub fn with<T: Reflect + ?Sized>(
        mut self,
        field: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        self.set::<T>(field, tag);
        self
    }

    /// Override by qualified type name, for types only known by name.
    pub fn insert(
        &mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.tags
            .entry(type_name.into())
            .or_default()
            .insert(field.into(), tag.into());
        self
    }

    /// Replacement tag for `field` on the type named `type_name`.
    ///
    /// Unknown types and fields yield `None`.
    pub fn get(&self, type_name: &str, field: &str) -> Option<&str> {
        self.tags
            .get(type_name)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.values().all(BTreeMap::is_empty)
    }
}
