//! Schema Reflect
//!
//! JSON Schema (draft-07) generation from Rust type descriptions.
//!
//! Types describe themselves through [`Reflect`]; a [`Reflector`] walks that
//! description and produces a [`Document`]: a root schema plus a
//! `definitions` block with one entry per record type reached.
//!
//! # Example
//!
//! ```
//! use schema_reflect::{reflect, Field, Reflect, TypeInfo};
//! use serde_json::json;
//!
//! struct User {
//!     id: u64,
//!     email: String,
//!     nickname: Option<String>,
//! }
//!
//! impl Reflect for User {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::record("app::models", "User")
//!             .field(Field::of::<u64>("ID").wire("id"))
//!             .field(Field::of::<String>("Email").wire("email").tag("format=email"))
//!             .field(Field::of::<Option<String>>("Nickname").wire("nickname,omitempty"))
//!     }
//! }
//!
//! let doc = reflect::<User>().unwrap();
//! assert_eq!(
//!     doc.to_value().unwrap(),
//!     json!({
//!         "$schema": "http://json-schema.org/draft-07/schema#",
//!         "$ref": "#/definitions/models.User",
//!         "definitions": {
//!             "models.User": {
//!                 "type": "object",
//!                 "properties": {
//!                     "email": { "type": "string", "format": "email" },
//!                     "id": { "type": "integer" },
//!                     "nickname": { "type": "string" }
//!                 },
//!                 "required": ["id", "email"],
//!                 "additionalProperties": false
//!             }
//!         }
//!     })
//! );
//! ```
//!
//! # Type Mapping
//!
//! | Rust | Schema |
//! |------|--------|
//! | `bool` | `{"type": "boolean"}` |
//! | integers | `{"type": "integer"}` |
//! | `f32`, `f64` | `{"type": "number"}` |
//! | `String`, `str`, `char` | `{"type": "string"}` |
//! | `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>` | schema of `T` |
//! | `Vec<u8>` | base64 string |
//! | `Vec<T>`, sets | `{"type": "array", "items": ...}` |
//! | `[T; N]` | array with `minItems` = `maxItems` = `N` |
//! | `HashMap<K, V>` | `{"type": "object", "patternProperties": {".*": ...}}` |
//! | `serde_json::Value` | `{"type": "object", "additionalProperties": true}` |
//! | records | `{"$ref": "#/definitions/<pkg>.<Name>"}` |
//!
//! # Schema Tags
//!
//! A field's schema tag is a comma-separated list of directives:
//!
//! | Directive | Applies to |
//! |-----------|------------|
//! | `required`, `optional`, `-` | any field |
//! | `title=`, `description=` | any field |
//! | `minLength=`, `maxLength=`, `pattern=`, `format=`, `notEmpty`, `enum=a\|b` | strings |
//! | `minimum=`, `maximum=`, `exclusiveMinimum=`, `exclusiveMaximum=`, `multipleOf=`, `enum=` | integers |
//! | `enum=` | floats |
//! | `minItems=`, `maxItems=`, `uniqueItems` | arrays |
//! | `allowNull` | strings and numbers |

mod compose;
mod definitions;
mod diagnostic;
mod error;
mod impls;
mod keywords;
mod overrides;
mod reflector;
mod schema;
mod tags;
mod types;
mod walker;

pub use compose::{Branch, Composition, SchemaCondition, SchemaSwitch};
pub use diagnostic::{Diagnostic, DiagnosticCode};
pub use error::{ConfigError, ReflectError};
pub use keywords::{NOT_EMPTY_PATTERN, STRING_FORMATS};
pub use overrides::Overrides;
pub use reflector::{reflect, Reflector};
pub use schema::{Definitions, Document, InstanceType, Schema, DRAFT_07};
pub use tags::{enum_literals, Directive, Tags, WireTag};
pub use types::{Capabilities, Field, Kind, Reflect, TypeInfo, TypeRef};
