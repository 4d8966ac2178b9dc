//! Type graph walk.
//!
//! Turns one [`TypeInfo`] into a [`Schema`] node, registering every record it
//! meets in the definitions table. Records are always emitted as `$ref`s;
//! everything else is inlined.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::compose::Hooks;
use crate::definitions::DefinitionsTable;
use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::error::ReflectError;
use crate::keywords;
use crate::reflector::Reflector;
use crate::schema::{Definitions, InstanceType, Schema};
use crate::tags::{Tags, WireTag};
use crate::types::{Kind, TypeInfo, TypeRef};

/// Types with a fixed schema, matched by module path and name.
struct WellKnown {
    package: &'static str,
    name: &'static str,
    schema: fn() -> Schema,
}

const WELL_KNOWN: &[WellKnown] = &[
    WellKnown {
        package: "chrono",
        name: "DateTime",
        schema: date_time,
    },
    WellKnown {
        package: "std::net",
        name: "IpAddr",
        schema: ipv4,
    },
    WellKnown {
        package: "std::net",
        name: "Ipv4Addr",
        schema: ipv4,
    },
    WellKnown {
        package: "std::net",
        name: "Ipv6Addr",
        schema: ipv6,
    },
    WellKnown {
        package: "url",
        name: "Url",
        schema: uri,
    },
    WellKnown {
        package: "serde_json::value",
        name: "RawValue",
        schema: raw_json,
    },
];

fn date_time() -> Schema {
    Schema::with_format(InstanceType::String, "date-time")
}

fn ipv4() -> Schema {
    Schema::with_format(InstanceType::String, "ipv4")
}

fn ipv6() -> Schema {
    Schema::with_format(InstanceType::String, "ipv6")
}

fn uri() -> Schema {
    Schema::with_format(InstanceType::String, "uri")
}

fn raw_json() -> Schema {
    Schema::of_type(InstanceType::Object)
}

fn well_known(info: &TypeInfo) -> Option<Schema> {
    WELL_KNOWN
        .iter()
        .find(|w| w.package == info.package && w.name == info.name)
        .map(|w| (w.schema)())
}

/// A sequence, array or map declared under its own name. Only these can
/// contain themselves; the builtin containers are structural.
fn is_named_container(info: &TypeInfo) -> bool {
    !info.package.is_empty()
        && matches!(
            info.kind,
            Kind::Sequence(_) | Kind::Array { .. } | Kind::Map { .. }
        )
}

/// A byte sequence, carried as base64 text.
fn byte_blob() -> Schema {
    Schema {
        media: Some(Box::new(Schema {
            binary_encoding: Some("base64".to_string()),
            ..Schema::default()
        })),
        ..Schema::of_type(InstanceType::String)
    }
}

/// An enumeration accepted by name or by number.
fn wire_enum() -> Schema {
    Schema {
        one_of: vec![
            Schema::of_type(InstanceType::String),
            Schema::of_type(InstanceType::Integer),
        ],
        ..Schema::default()
    }
}

/// A field that survived visibility and embedding rules.
struct FieldSlot {
    name: String,
    ty: TypeRef,
    tags: Tags,
    required: bool,
    depth: usize,
}

pub(crate) struct Walker<'r> {
    pub(crate) reflector: &'r Reflector,
    pub(crate) definitions: DefinitionsTable,
    pub(crate) diagnostics: Diagnostics,
    /// Qualified names of named types currently being inlined.
    inline_stack: Vec<String>,
}

impl<'r> Walker<'r> {
    pub(crate) fn new(reflector: &'r Reflector) -> Self {
        Self {
            reflector,
            definitions: DefinitionsTable::default(),
            diagnostics: Diagnostics::default(),
            inline_stack: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> (Definitions, Vec<Diagnostic>) {
        (
            self.definitions.into_definitions(),
            self.diagnostics.into_vec(),
        )
    }

    pub(crate) fn expand(&mut self, ty: TypeRef, path: &str) -> Result<Schema, ReflectError> {
        self.expand_info(ty.info(), path)
    }

    pub(crate) fn expand_info(
        &mut self,
        info: TypeInfo,
        path: &str,
    ) -> Result<Schema, ReflectError> {
        let info = info.into_pointee();
        trace!(ty = %info.display_name(), path, "expanding");

        if info.is_record() || is_named_container(&info) {
            let key = info.qualified_name();
            if self.definitions.contains(&key) {
                self.check_collision(&key, &info, path);
                return Ok(self.definitions.reference(&key));
            }
        }

        if info.capabilities.wire_enum {
            return Ok(wire_enum());
        }

        if let Some(schema) = well_known(&info) {
            return Ok(schema);
        }

        match &info.kind {
            Kind::Bool => Ok(Schema::of_type(InstanceType::Boolean)),
            Kind::Int | Kind::Uint | Kind::Byte => Ok(Schema::of_type(InstanceType::Integer)),
            Kind::Float => Ok(Schema::of_type(InstanceType::Number)),
            Kind::String => Ok(Schema::of_type(InstanceType::String)),
            Kind::Any => Ok(Schema {
                additional_properties: Some(true),
                ..Schema::of_type(InstanceType::Object)
            }),
            Kind::Sequence(_) | Kind::Array { .. } | Kind::Map { .. } => {
                if is_named_container(&info) {
                    self.inline_named(&info, |walker| walker.container(&info, path))
                } else {
                    self.container(&info, path)
                }
            }
            Kind::Record(_) => self.expand_record(&info),
            Kind::Function | Kind::Channel => Err(ReflectError::UnsupportedType {
                path: path.to_string(),
                type_name: info.display_name(),
                kind: info.kind.name(),
            }),
            Kind::Pointer(inner) => self.expand(*inner, path),
        }
    }

    fn container(&mut self, info: &TypeInfo, path: &str) -> Result<Schema, ReflectError> {
        match &info.kind {
            Kind::Sequence(elem) => {
                let elem = elem.info();
                if matches!(elem.kind, Kind::Byte) {
                    return Ok(byte_blob());
                }
                let mut schema = Schema::of_type(InstanceType::Array);
                schema.min_items = info.capabilities.min_items;
                schema.max_items = info.capabilities.max_items;
                schema.items = Some(Box::new(self.expand_info(elem, path)?));
                Ok(schema)
            }
            Kind::Array { elem, len } => {
                let len = *len as u64;
                let mut schema = Schema::of_type(InstanceType::Array);
                schema.min_items = Some(len);
                schema.max_items = Some(len);
                schema.items = Some(Box::new(self.expand(*elem, path)?));
                Ok(schema)
            }
            Kind::Map { value, .. } => {
                let value = value.info().into_pointee();
                let mut schema = Schema::of_type(InstanceType::Object);
                if !matches!(value.kind, Kind::Any) {
                    let values = self.expand_info(value, path)?;
                    schema.pattern_properties.insert(".*".to_string(), values);
                }
                Ok(schema)
            }
            _ => self.expand_info(info.clone(), path),
        }
    }

    /// Inline the schema produced by `build`.
    ///
    /// A type that reaches itself while being inlined is moved into the
    /// definitions table, and every occurrence becomes a `$ref` to it.
    pub(crate) fn inline_named<F>(
        &mut self,
        info: &TypeInfo,
        build: F,
    ) -> Result<Schema, ReflectError>
    where
        F: FnOnce(&mut Self) -> Result<Schema, ReflectError>,
    {
        let key = info.qualified_name();
        if self.inline_stack.contains(&key) {
            debug!(definition = %key, "promoting recursive type to definition");
            self.definitions.reserve(&key, &info.display_name());
            return Ok(self.definitions.reference(&key));
        }

        self.inline_stack.push(key.clone());
        let built = build(self);
        self.inline_stack.pop();
        let schema = built?;

        if self.definitions.is_pending(&key) {
            self.definitions.fill(&key, schema);
            return Ok(self.definitions.reference(&key));
        }
        Ok(schema)
    }

    /// Root of an expanded document: the record's schema is inlined and any
    /// reference back to it points at `#`.
    pub(crate) fn expand_root(&mut self, info: TypeInfo) -> Result<Schema, ReflectError> {
        let info = info.into_pointee();
        if !info.is_record() || info.capabilities.wire_enum || well_known(&info).is_some() {
            let path = info.name.to_string();
            return self.expand_info(info, &path);
        }

        let key = info.qualified_name();
        self.definitions.reserve_root(&key, &info.display_name());
        debug!(definition = %key, "inlining expanded root");

        let hooks = Hooks::resolve(&info.capabilities.compositions);
        if let Some(exclusive) = hooks.exclusive {
            return self.exclusive_subschema(&info, exclusive);
        }
        self.record_object(&info, &hooks)
    }

    fn expand_record(&mut self, info: &TypeInfo) -> Result<Schema, ReflectError> {
        let hooks = Hooks::resolve(&info.capabilities.compositions);
        if let Some(exclusive) = hooks.exclusive {
            return self.exclusive_subschema(info, exclusive);
        }

        let key = info.qualified_name();
        self.definitions.reserve(&key, &info.display_name());
        debug!(definition = %key, "registered definition");

        let object = self.record_object(info, &hooks)?;
        self.definitions.fill(&key, object);
        Ok(self.definitions.reference(&key))
    }

    fn record_object(&mut self, info: &TypeInfo, hooks: &Hooks<'_>) -> Result<Schema, ReflectError> {
        let path = info.qualified_name();
        let mut object = Schema {
            additional_properties: Some(self.reflector.allow_additional_properties),
            description: info.description.as_ref().map(|d| d.to_string()),
            ..Schema::of_type(InstanceType::Object)
        };

        self.reflect_fields(&mut object, info, &path)?;
        self.add_subschemas(&mut object, info, hooks, &path)?;
        Ok(object)
    }

    fn reflect_fields(
        &mut self,
        object: &mut Schema,
        info: &TypeInfo,
        path: &str,
    ) -> Result<(), ReflectError> {
        let mut collected = Vec::new();
        let mut chain = vec![info.display_name()];
        self.collect_fields(info, 0, &mut chain, &mut collected);

        for field in dominant_fields(collected) {
            let field_path = format!("{}.{}", path, field.name);
            let mut property = self.expand(field.ty, &field_path)?;
            keywords::apply(&mut property, &field.tags, &mut self.diagnostics, &field_path);

            if field.required {
                object.required.push(field.name.clone());
            }
            object.properties.insert(field.name, property);
        }
        Ok(())
    }

    /// Gather the visible fields of `info`, flattening embedded records in place.
    ///
    /// `chain` holds the records currently being flattened; an embedding that
    /// leads back into it is skipped.
    fn collect_fields(
        &self,
        info: &TypeInfo,
        depth: usize,
        chain: &mut Vec<String>,
        out: &mut Vec<FieldSlot>,
    ) {
        let Kind::Record(fields) = &info.kind else {
            return;
        };
        let owner = info.qualified_name();

        for field in fields {
            if !field.exported {
                continue;
            }
            let wire = WireTag::parse(&field.wire_tag);
            if wire.is_ignored() {
                continue;
            }

            if field.embedded && wire.name().is_none() {
                let embedded = field.ty.info().into_pointee();
                if embedded.is_record() {
                    let origin = embedded.display_name();
                    if chain.contains(&origin) {
                        debug!(ty = %origin, "skipping cyclic embedding");
                        continue;
                    }
                    chain.push(origin);
                    self.collect_fields(&embedded, depth + 1, chain, out);
                    chain.pop();
                    continue;
                }
            }

            let tags = self.reflector.field_tags(&owner, field);
            if tags.is_ignored() {
                continue;
            }

            let name = wire
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| field.resolved_ident().into_owned());
            let required = self.reflector.is_required(&wire, &tags);

            out.push(FieldSlot {
                name,
                ty: field.ty,
                tags,
                required,
                depth,
            });
        }
    }

    fn check_collision(&mut self, key: &str, info: &TypeInfo, path: &str) {
        let origin = info.display_name();
        if let Some(existing) = self.definitions.origin(key) {
            if existing != origin {
                let message = format!(
                    "{} and {} share the definition name \"{}\"",
                    existing, origin, key
                );
                self.diagnostics
                    .push(DiagnosticCode::DefinitionCollision, path, message);
            }
        }
    }
}

/// Resolve name clashes between fields: the shallowest wins, then the first declared.
fn dominant_fields(fields: Vec<FieldSlot>) -> Vec<FieldSlot> {
    let mut winners: BTreeMap<String, usize> = BTreeMap::new();
    for (index, field) in fields.iter().enumerate() {
        match winners.get(&field.name) {
            Some(&best) if fields[best].depth <= field.depth => {}
            _ => {
                winners.insert(field.name.clone(), index);
            }
        }
    }

    fields
        .into_iter()
        .enumerate()
        .filter(|(index, field)| winners.get(&field.name) == Some(index))
        .map(|(_, field)| field)
        .collect()
}
