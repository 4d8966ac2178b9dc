//! Type descriptions consumed by the schema walker.
//!
//! Rust has no runtime reflection, so every type that takes part in schema
//! generation describes itself through [`Reflect`]. A description is a
//! [`TypeInfo`]: where the type lives, what [`Kind`] of value it is, and which
//! optional [`Capabilities`] it exposes (wire enums, item bounds, composition
//! hooks).
//!
//! Field types are stored as [`TypeRef`]s, which are evaluated lazily. That is
//! what allows a record to mention itself (directly or through another record)
//! without building an infinite description.

use std::borrow::Cow;
use std::fmt;

use crate::compose::{Branch, Composition, SchemaCondition, SchemaSwitch};

/// Implemented by every type that can be turned into a JSON Schema.
///
/// # Example
///
/// ```
/// use schema_reflect::{Field, Reflect, TypeInfo};
///
/// struct Pet {
///     name: String,
///     age: Option<u32>,
/// }
///
/// impl Reflect for Pet {
///     fn type_info() -> TypeInfo {
///         TypeInfo::record(module_path!(), "Pet")
///             .field(Field::of::<String>("name").tag("minLength=1"))
///             .field(Field::of::<Option<u32>>("age").wire("age,omitempty"))
///     }
/// }
/// ```
pub trait Reflect {
    /// Describe this type.
    fn type_info() -> TypeInfo;
}

/// A lazily evaluated reference to a type description.
#[derive(Clone, Copy)]
pub struct TypeRef(fn() -> TypeInfo);

impl TypeRef {
    /// Reference the description of `T`.
    pub fn of<T: Reflect + ?Sized>() -> Self {
        TypeRef(T::type_info)
    }

    /// Evaluate the description.
    pub fn info(&self) -> TypeInfo {
        (self.0)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef")
            .field(&self.info().display_name())
            .finish()
    }
}

/// The shape of a described type.
#[derive(Debug, Clone)]
pub enum Kind {
    Bool,
    /// Signed integer of any width.
    Int,
    /// Unsigned integer wider than a byte.
    Uint,
    /// An unsigned 8-bit integer. A sequence of these is a byte blob.
    Byte,
    Float,
    String,
    /// Any JSON value (`serde_json::Value`).
    Any,
    /// A transparent wrapper: `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>`, `&T`.
    Pointer(TypeRef),
    /// A variable-length sequence.
    Sequence(TypeRef),
    /// A fixed-length array.
    Array { elem: TypeRef, len: usize },
    /// A keyed mapping. Keys are always serialized as strings.
    Map { key: TypeRef, value: TypeRef },
    /// A structured type with named fields, in declaration order.
    Record(Vec<Field>),
    Function,
    Channel,
}

impl Kind {
    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Byte => "byte",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Any => "any",
            Kind::Pointer(_) => "pointer",
            Kind::Sequence(_) => "sequence",
            Kind::Array { .. } => "array",
            Kind::Map { .. } => "map",
            Kind::Record(_) => "record",
            Kind::Function => "function",
            Kind::Channel => "channel",
        }
    }
}

/// Optional behaviour a type opts into.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// The type is a closed enumeration carried either by name or by number.
    pub wire_enum: bool,
    /// Lower item bound reported by a sequence type.
    pub min_items: Option<u64>,
    /// Upper item bound reported by a sequence type.
    pub max_items: Option<u64>,
    /// Composition hooks declared by a record type.
    pub compositions: Vec<Composition>,
}

/// Description of one type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Module path of the declaring module (e.g. `my_crate::models::v1`).
    pub package: Cow<'static, str>,
    /// Type name without the module path.
    pub name: Cow<'static, str>,
    pub kind: Kind,
    pub capabilities: Capabilities,
    /// Emitted as the `description` of a record's definition.
    pub description: Option<Cow<'static, str>>,
}

impl TypeInfo {
    pub fn new(
        package: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        kind: Kind,
    ) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            kind,
            capabilities: Capabilities::default(),
            description: None,
        }
    }

    /// A builtin type with no module path.
    pub fn primitive(name: &'static str, kind: Kind) -> Self {
        Self::new("", name, kind)
    }

    /// A record with no fields yet; add them with [`TypeInfo::field`].
    pub fn record(
        package: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(package, name, Kind::Record(Vec::new()))
    }

    /// A named sequence type, typically a newtype over `Vec<T>`.
    pub fn sequence(
        package: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        elem: TypeRef,
    ) -> Self {
        Self::new(package, name, Kind::Sequence(elem))
    }

    /// Append a field. Ignored for anything that is not a record.
    pub fn field(mut self, field: Field) -> Self {
        if let Kind::Record(fields) = &mut self.kind {
            fields.push(field);
        }
        self
    }

    pub fn describe(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the type as an enumeration accepted both as a string and as an integer.
    pub fn wire_enum(mut self) -> Self {
        self.capabilities.wire_enum = true;
        self
    }

    pub fn min_items(mut self, min: u64) -> Self {
        self.capabilities.min_items = Some(min);
        self
    }

    pub fn max_items(mut self, max: u64) -> Self {
        self.capabilities.max_items = Some(max);
        self
    }

    /// Replace the generated schema with `anyOf` over `branches`.
    pub fn any_of(self, branches: impl IntoIterator<Item = Branch>) -> Self {
        self.compose(Composition::AnyOf(branches.into_iter().collect()))
    }

    /// Replace the generated schema with `oneOf` over `branches`.
    pub fn one_of(self, branches: impl IntoIterator<Item = Branch>) -> Self {
        self.compose(Composition::OneOf(branches.into_iter().collect()))
    }

    /// Replace the generated schema with `allOf` over `branches`.
    pub fn all_of(self, branches: impl IntoIterator<Item = Branch>) -> Self {
        self.compose(Composition::AllOf(branches.into_iter().collect()))
    }

    /// Keep the generated schema and add `anyOf` over `branches`.
    pub fn and_any_of(self, branches: impl IntoIterator<Item = Branch>) -> Self {
        self.compose(Composition::AndAnyOf(branches.into_iter().collect()))
    }

    /// Keep the generated schema and add `oneOf` over `branches`.
    pub fn and_one_of(self, branches: impl IntoIterator<Item = Branch>) -> Self {
        self.compose(Composition::AndOneOf(branches.into_iter().collect()))
    }

    /// Keep the generated schema and add `allOf` over `branches`.
    pub fn and_all_of(self, branches: impl IntoIterator<Item = Branch>) -> Self {
        self.compose(Composition::AndAllOf(branches.into_iter().collect()))
    }

    pub fn if_then_else(self, condition: SchemaCondition) -> Self {
        self.compose(Composition::IfThenElse(condition))
    }

    pub fn switch(self, switch: SchemaSwitch) -> Self {
        self.compose(Composition::Switch(switch))
    }

    pub fn compose(mut self, composition: Composition) -> Self {
        self.capabilities.compositions.push(composition);
        self
    }

    /// Last segment of the module path.
    pub fn package_qualifier(&self) -> &str {
        let path = self.package.as_ref();
        let path = path.rsplit("::").next().unwrap_or(path);
        path.rsplit('/').next().unwrap_or(path)
    }

    /// Key used in the `definitions` block: `<qualifier>.<name>`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package_qualifier(), self.name)
    }

    /// Full module path plus name, unique per declared type.
    pub fn display_name(&self) -> String {
        if self.package.is_empty() {
            self.name.to_string()
        } else {
            format!("{}::{}", self.package, self.name)
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self.kind, Kind::Record(_))
    }

    /// Follow pointer wrappers down to the pointee description.
    pub fn into_pointee(self) -> TypeInfo {
        let mut info = self;
        while let Kind::Pointer(inner) = info.kind {
            info = inner.info();
        }
        info
    }
}

/// One field of a record, as the host type system reports it.
#[derive(Debug, Clone)]
pub struct Field {
    /// Declared identifier. Empty for embedded fields, which take the type's name.
    pub ident: Cow<'static, str>,
    pub ty: TypeRef,
    /// Whether the field is visible outside its declaring scope.
    pub exported: bool,
    /// Whether the field's record type is flattened into the parent.
    pub embedded: bool,
    /// Serialization tag: `name,omitempty`.
    pub wire_tag: Cow<'static, str>,
    /// Schema metadata tag: `required,minLength=1,enum=a|b`.
    pub schema_tag: Cow<'static, str>,
}

impl Field {
    pub fn new(ident: impl Into<Cow<'static, str>>, ty: TypeRef) -> Self {
        Self {
            ident: ident.into(),
            ty,
            exported: true,
            embedded: false,
            wire_tag: Cow::Borrowed(""),
            schema_tag: Cow::Borrowed(""),
        }
    }

    /// An exported field of type `T`.
    pub fn of<T: Reflect + ?Sized>(ident: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ident, TypeRef::of::<T>())
    }

    /// An embedded field whose record fields are flattened into the parent.
    ///
    /// Only the fields are flattened. Composition hooks declared on the
    /// embedded type (`one_of`, `switch`, `if_then_else`, ...) are not
    /// inherited; declare them on the parent if it needs them.
    pub fn embedded<T: Reflect + ?Sized>() -> Self {
        Self {
            embedded: true,
            ..Self::new("", TypeRef::of::<T>())
        }
    }

    pub fn wire(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.wire_tag = tag.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.schema_tag = tag.into();
        self
    }

    /// Hide the field from schema generation.
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Declared identifier, falling back to the type name for embedded fields.
    pub fn resolved_ident(&self) -> Cow<'static, str> {
        if self.ident.is_empty() {
            self.ty.info().into_pointee().name
        } else {
            self.ident.clone()
        }
    }
}
