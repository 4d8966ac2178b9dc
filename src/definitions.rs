//! Definitions table for a single generation run.
//!
//! Records are registered under their qualified name *before* their fields
//! are walked. Any later encounter of the same name, including one from
//! inside the record itself, becomes a `$ref` instead of another expansion.

use std::collections::BTreeMap;

use crate::schema::{Definitions, Schema};

#[derive(Debug)]
enum Slot {
    /// Registered, fields still being walked.
    Pending,
    Ready(Schema),
    /// The inlined top-level record of an expanded document.
    Root,
}

#[derive(Debug)]
struct Entry {
    /// Full module path of the type that claimed the key.
    origin: String,
    slot: Slot,
}

#[derive(Debug, Default)]
pub(crate) struct DefinitionsTable {
    entries: BTreeMap<String, Entry>,
}

impl DefinitionsTable {
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Module path of the type registered under `key`.
    pub(crate) fn origin(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.origin.as_str())
    }

    pub(crate) fn is_pending(&self, key: &str) -> bool {
        matches!(
            self.entries.get(key),
            Some(Entry {
                slot: Slot::Pending,
                ..
            })
        )
    }

    /// Claim `key` for a record about to be expanded.
    pub(crate) fn reserve(&mut self, key: &str, origin: &str) {
        self.insert(key, origin, Slot::Pending);
    }

    /// Claim `key` for the inlined root of an expanded document.
    pub(crate) fn reserve_root(&mut self, key: &str, origin: &str) {
        self.insert(key, origin, Slot::Root);
    }

    fn insert(&mut self, key: &str, origin: &str, slot: Slot) {
        self.entries.insert(
            key.to_string(),
            Entry {
                origin: origin.to_string(),
                slot,
            },
        );
    }

    /// Store the finished schema for a reserved key.
    pub(crate) fn fill(&mut self, key: &str, schema: Schema) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.slot = Slot::Ready(schema);
        }
    }

    /// `$ref` target for `key`.
    pub(crate) fn reference_to(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(Entry {
                slot: Slot::Root, ..
            }) => "#".to_string(),
            _ => format!("#/definitions/{}", key),
        }
    }

    pub(crate) fn reference(&self, key: &str) -> Schema {
        Schema::reference(self.reference_to(key))
    }

    /// Finished definitions. The expanded root is left out.
    pub(crate) fn into_definitions(self) -> Definitions {
        self.entries
            .into_iter()
            .filter_map(|(key, entry)| match entry.slot {
                Slot::Ready(schema) => Some((key, schema)),
                Slot::Pending | Slot::Root => None,
            })
            .collect()
    }
}
