//! Generation entry point and its configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ReflectError};
use crate::overrides::Overrides;
use crate::schema::{Document, DRAFT_07};
use crate::tags::{Tags, WireTag};
use crate::types::{Field, Reflect, TypeRef};
use crate::walker::Walker;

/// Options for schema generation.
///
/// A configuration can also be read from JSON, using camelCase keys:
///
/// ```json
/// {
///   "allowAdditionalProperties": false,
///   "requiredFromTagsMode": true,
///   "expandedTopLevel": false,
///   "overrides": { "v1.Hardware": { "Brand": "required,enum=apple|dell" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Reflector {
    /// When true, record objects accept unknown properties.
    pub allow_additional_properties: bool,
    /// When true, a field is required only if its schema tag says `required`.
    /// Otherwise every field without `omitempty` is required.
    pub required_from_tags_mode: bool,
    /// When true, the root record is inlined instead of referenced.
    pub expanded_top_level: bool,
    /// Per-field schema tag replacements.
    pub overrides: Option<Overrides>,
}

impl Reflector {
    /// Reflector with every option off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_additional_properties(mut self, allow: bool) -> Self {
        self.allow_additional_properties = allow;
        self
    }

    pub fn required_from_tags_mode(mut self, enabled: bool) -> Self {
        self.required_from_tags_mode = enabled;
        self
    }

    pub fn expanded_top_level(mut self, expanded: bool) -> Self {
        self.expanded_top_level = expanded;
        self
    }

    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidJson` for malformed JSON or unknown keys.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::InvalidJson { source })
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` if the file doesn't exist,
    /// `ConfigError::ReadError` if it can't be read,
    /// or `ConfigError::InvalidJson` if it isn't a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Generate the document for `T`.
    ///
    /// # Errors
    ///
    /// Returns `ReflectError::UnsupportedType` if a function or channel is
    /// reachable from `T`.
    pub fn reflect<T: Reflect + ?Sized>(&self) -> Result<Document, ReflectError> {
        self.reflect_type(TypeRef::of::<T>())
    }

    /// Generate the document for a type known only through its [`TypeRef`].
    pub fn reflect_type(&self, ty: TypeRef) -> Result<Document, ReflectError> {
        let info = ty.info().into_pointee();
        let span = tracing::debug_span!("reflect", root = %info.display_name());
        let _enter = span.enter();

        let mut walker = Walker::new(self);
        let mut schema = if self.expanded_top_level {
            walker.expand_root(info)?
        } else {
            let path = info.name.to_string();
            walker.expand_info(info, &path)?
        };
        schema.version = Some(DRAFT_07.to_string());

        let (definitions, diagnostics) = walker.finish();
        debug!(
            definitions = definitions.len(),
            diagnostics = diagnostics.len(),
            "generated schema"
        );

        Ok(Document {
            schema,
            definitions,
            diagnostics,
        })
    }

    /// Schema tag for `field` on the record named `owner`, after overrides.
    pub(crate) fn field_tags(&self, owner: &str, field: &Field) -> Tags {
        let ident = field.resolved_ident();
        let replaced = self
            .overrides
            .as_ref()
            .and_then(|overrides| overrides.get(owner, &ident));
        Tags::parse(replaced.unwrap_or(&*field.schema_tag))
    }

    pub(crate) fn is_required(&self, wire: &WireTag<'_>, tags: &Tags) -> bool {
        let required = if self.required_from_tags_mode {
            tags.is_required()
        } else {
            !wire.omit_empty()
        };
        required && !tags.is_optional()
    }
}

/// Generate the document for `T` with default options.
///
/// # Errors
///
/// See [`Reflector::reflect`].
pub fn reflect<T: Reflect + ?Sized>() -> Result<Document, ReflectError> {
    Reflector::default().reflect::<T>()
}
