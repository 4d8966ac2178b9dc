//! Type descriptions shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::net::{IpAddr, Ipv6Addr};
use std::sync::mpsc::Sender;

use schema_reflect::{
    Branch, Field, Kind, Reflect, SchemaCondition, SchemaSwitch, TypeInfo, TypeRef,
};
use serde_json::Value;

pub const PKG: &str = "acme::models";


// === Users ===

pub struct GrandfatherType;

impl Reflect for GrandfatherType {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "GrandfatherType")
            .field(Field::of::<String>("FamilyName").wire("family_name").tag("required"))
    }
}

pub struct SomeBaseType;

impl Reflect for SomeBaseType {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "SomeBaseType")
            .field(Field::of::<i64>("SomeBaseProperty").wire("some_base_property"))
            .field(Field::of::<String>("somePrivateBaseProperty").wire("i_am_private").private())
            .field(Field::of::<String>("SomeIgnoredBaseProperty").wire("-"))
            .field(Field::of::<String>("SomeSchemaIgnoredProperty").tag("-"))
            .field(Field::of::<GrandfatherType>("Grandfather").wire("grand"))
            .field(Field::of::<bool>("SomeUntaggedBaseProperty").tag("required"))
    }
}

/// An enumeration carried by name or by number.
pub struct Feeling;

impl Reflect for Feeling {
    fn type_info() -> TypeInfo {
        TypeInfo::new(PKG, "Feeling", Kind::Int).wire_enum()
    }
}

pub struct TestUser;

impl Reflect for TestUser {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "TestUser")
            .field(Field::embedded::<SomeBaseType>())
            .field(Field::of::<i64>("ID").wire("id").tag("required"))
            .field(Field::of::<String>("Name").wire("name").tag(
                "required,minLength=1,maxLength=20,pattern=.*,description=this is a property,title=the name",
            ))
            .field(
                Field::of::<Vec<i64>>("Friends")
                    .wire("friends,omitempty")
                    .tag("description=list of IDs omitted when empty"),
            )
            .field(Field::of::<HashMap<String, Value>>("Tags").wire("tags,omitempty"))
            .field(Field::of::<bool>("TestFlag"))
            .field(Field::of::<i64>("IgnoredCounter").wire("-"))
            .field(
                Field::of::<chrono::DateTime<chrono::Utc>>("BirthDate")
                    .wire("birth_date,omitempty"),
            )
            .field(Field::of::<url::Url>("Website").wire("website,omitempty"))
            .field(Field::of::<IpAddr>("IPAddress").wire("network_address,omitempty"))
            .field(Field::of::<Vec<u8>>("Photo").wire("photo,omitempty").tag("required"))
            .field(Field::of::<Feeling>("Feeling").wire("feeling,omitempty"))
            .field(Field::of::<i64>("Age").wire("age").tag(
                "minimum=18,maximum=120,exclusiveMaximum=true,exclusiveMinimum=true",
            ))
            .field(Field::of::<String>("Email").wire("email").tag("format=email"))
            .field(
                Field::of::<Option<String>>("Nickname")
                    .wire("nickname,omitempty")
                    .tag("allowNull"),
            )
            .field(Field::of::<BTreeMap<String, f64>>("Scores").wire("scores,omitempty"))
    }
}

// === Combinators ===

/// A string that may also be sent as `null`.
pub struct StringOrNull;

impl Reflect for StringOrNull {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "StringOrNull")
            .field(Field::of::<String>("String"))
            .field(Field::of::<bool>("IsNull"))
            .one_of([Branch::of::<String>(), Branch::Null])
    }
}

pub struct Tester;

impl Reflect for Tester {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Tester")
            .field(Field::of::<StringOrNull>("Experience").wire("experience"))
    }
}

pub struct Developer;

impl Reflect for Developer {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Developer")
            .field(
                Field::of::<StringOrNull>("Experience")
                    .wire("experience")
                    .tag("minLength=1"),
            )
            .field(
                Field::of::<StringOrNull>("Language")
                    .wire("language")
                    .tag(r"pattern=\S+"),
            )
            .field(Field::of::<Hardware>("HardwareChoice").wire("hardware"))
    }
}

pub struct Hardware;

impl Reflect for Hardware {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Hardware")
            .field(Field::of::<String>("Brand").wire("brand").tag("notEmpty"))
            .field(Field::of::<i64>("Memory").wire("memory"))
            .and_one_of([Branch::of::<Laptop>(), Branch::of::<Desktop>()])
    }
}

pub struct Laptop;

impl Reflect for Laptop {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Laptop")
            .field(
                Field::of::<String>("Brand")
                    .wire("brand")
                    .tag("pattern=^(apple|lenovo|dell)$"),
            )
            .field(Field::of::<bool>("NeedTouchScreen").wire("need_touchscreen"))
    }
}

pub struct Desktop;

impl Reflect for Desktop {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Desktop")
            .field(
                Field::of::<String>("FormFactor")
                    .wire("form_factor")
                    .tag("pattern=^(standard|micro|mini|nano)"),
            )
            .field(Field::of::<bool>("NeedKeyboard").wire("need_keyboard"))
    }
}

pub struct TestUserOneOf;

impl Reflect for TestUserOneOf {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "TestUserOneOf")
            .field(Field::of::<Tester>("Tester").wire("tester"))
            .field(Field::of::<Developer>("Developer").wire("developer"))
            .one_of([Branch::of::<Tester>(), Branch::of::<Developer>()])
    }
}

pub struct TestVersionedPackages;

impl Reflect for TestVersionedPackages {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "TestVersionedPackages")
            .field(Field::of::<TesterPackage>("Tester").wire("tester"))
            .field(Field::of::<DeveloperPackage>("Developer").wire("developer"))
            .one_of([Branch::of::<TesterPackage>(), Branch::of::<DeveloperPackage>()])
    }
}

pub struct TesterPackage;

impl Reflect for TesterPackage {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "TesterPackage")
            .field(Field::of::<StringOrNull>("Experience").wire("experience"))
    }
}

pub struct DeveloperPackage;

impl Reflect for DeveloperPackage {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "DeveloperPackage")
            .field(Field::of::<v1::Hardware>("HardwareChoice").wire("hardware"))
            .field(Field::of::<v2::Hardware>("HardwareChoic").wire("hardware1"))
    }
}

/// Either one shape or a list of further expressions.
pub struct Expr;

impl Reflect for Expr {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Expr").any_of([Branch::of::<i64>(), Branch::of::<Vec<Expr>>()])
    }
}

// === Conditionals and switches ===

pub struct Application;

impl Reflect for Application {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Application")
            .field(Field::of::<String>("Type").wire("type"))
            .if_then_else(
                SchemaCondition::new(Field::of::<String>("Type").wire("type").tag("enum=web"))
                    .then::<WebApp>()
                    .otherwise::<MobileApp>(),
            )
    }
}

pub struct WebApp;

impl Reflect for WebApp {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "WebApp").field(Field::of::<String>("Browser").wire("browser"))
    }
}

pub struct MobileApp;

impl Reflect for MobileApp {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "MobileApp").field(Field::of::<String>("Device").wire("device"))
    }
}

pub struct IntPayload;

impl Reflect for IntPayload {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "IntPayload").field(Field::of::<i64>("Payload").wire("payload"))
    }
}

pub struct StringPayload;

impl Reflect for StringPayload {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "StringPayload")
            .field(Field::of::<String>("Payload").wire("payload"))
    }
}

pub struct BoolPayload;

impl Reflect for BoolPayload {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "BoolPayload").field(Field::of::<bool>("Payload").wire("payload"))
    }
}

fn payload_switch() -> SchemaSwitch {
    SchemaSwitch::new("type")
        .case::<BoolPayload>("bool")
        .case::<IntPayload>("int")
        .case::<StringPayload>("string")
}

pub struct ExampleCase;

impl Reflect for ExampleCase {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "ExampleCase")
            .field(Field::of::<String>("Type").wire("type").tag("optional"))
            .switch(payload_switch())
    }
}

pub struct ExampleCaseOrdered;

impl Reflect for ExampleCaseOrdered {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "ExampleCaseOrdered")
            .field(Field::of::<String>("Type").wire("type").tag("optional"))
            .switch(payload_switch().order(["string", "bool", "int"]))
    }
}

/// Order names a value with no case and leaves out `int`.
pub struct ExampleCaseMisordered;

impl Reflect for ExampleCaseMisordered {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "ExampleCaseMisordered")
            .field(Field::of::<String>("Type").wire("type"))
            .switch(payload_switch().order(["bool", "float", "string"]))
    }
}

/// Declares both an augmenting `oneOf` and a switch.
pub struct ExampleCaseConflict;

impl Reflect for ExampleCaseConflict {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "ExampleCaseConflict")
            .field(Field::of::<String>("Type").wire("type"))
            .and_one_of([Branch::of::<Laptop>(), Branch::of::<Desktop>()])
            .switch(SchemaSwitch::new("type").case::<IntPayload>("int"))
    }
}

// === Arrays ===

/// Between one and three tags.
pub struct BoundedTags;

impl Reflect for BoundedTags {
    fn type_info() -> TypeInfo {
        TypeInfo::sequence(PKG, "BoundedTags", TypeRef::of::<String>())
            .min_items(1)
            .max_items(3)
    }
}

pub struct SliceTestType;

impl Reflect for SliceTestType {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "SliceTestType")
            .field(Field::of::<BoundedTags>("Tags").wire("tags"))
            .field(Field::of::<BoundedTags>("Labels").wire("labels").tag("maxItems=2,uniqueItems"))
            .field(Field::of::<[f64; 2]>("Point").wire("point"))
    }
}

// === Recursion ===

pub struct Node;

impl Reflect for Node {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Node")
            .describe("A tree node.")
            .field(Field::of::<i64>("Value").wire("value"))
            .field(Field::of::<Option<Box<Node>>>("Next").wire("next,omitempty"))
            .field(Field::of::<Vec<Node>>("Children").wire("children,omitempty"))
    }
}

pub struct Parent;

impl Reflect for Parent {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Parent").field(Field::of::<Vec<Child>>("Children").wire("children"))
    }
}

pub struct Child;

impl Reflect for Child {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Child")
            .field(Field::of::<Option<Box<Parent>>>("Parent").wire("parent,omitempty"))
    }
}

pub struct Pet;

impl Reflect for Pet {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Pet")
            .field(Field::of::<String>("Name").wire("name").tag("minLength=2,allowNull"))
            .field(Field::of::<Option<Box<Pet>>>("Friend").wire("friend,omitempty").tag("allowNull"))
    }
}

// === Errors and diagnostics ===

pub struct Job;

impl Reflect for Job {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Job")
            .field(Field::of::<String>("Name").wire("name"))
            .field(Field::of::<Sender<bool>>("Done").wire("done"))
    }
}

pub struct Callback;

impl Reflect for Callback {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Callback").field(Field::of::<fn(i64) -> bool>("Hook").wire("hook"))
    }
}

pub struct Sloppy;

impl Reflect for Sloppy {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Sloppy")
            .field(Field::of::<i64>("Count").wire("count").tag("minimum=abc,maximum=10"))
            .field(Field::of::<String>("Code").wire("code").tag("format=uuid"))
            .field(Field::of::<i64>("Level").wire("level").tag("exclusiveMinimum=true"))
    }
}

pub struct SharedThingA;

impl Reflect for SharedThingA {
    fn type_info() -> TypeInfo {
        TypeInfo::record("acme::alpha::shared", "Thing")
            .field(Field::of::<String>("Name").wire("name"))
    }
}

pub struct SharedThingB;

impl Reflect for SharedThingB {
    fn type_info() -> TypeInfo {
        TypeInfo::record("acme::beta::shared", "Thing")
            .field(Field::of::<i64>("Size").wire("size"))
    }
}

pub struct Holder;

impl Reflect for Holder {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Holder")
            .field(Field::of::<SharedThingA>("Left").wire("left"))
            .field(Field::of::<SharedThingB>("Right").wire("right"))
    }
}

// === Mapped types and combinator variants ===

/// Raw JSON and addresses, all mapped by name.
pub struct Envelope;

impl Reflect for Envelope {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Envelope")
            .field(Field::of::<Box<serde_json::value::RawValue>>("Body").wire("body"))
            .field(Field::of::<Ipv6Addr>("Peer").wire("peer"))
    }
}

/// Keeps its fields and adds `anyOf` and `allOf`.
pub struct Workstation;

impl Reflect for Workstation {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Workstation")
            .field(Field::of::<String>("Owner").wire("owner"))
            .and_any_of([Branch::of::<Laptop>(), Branch::of::<Desktop>()])
            .and_all_of([Branch::of::<Hardware>()])
    }
}

/// Accepted as a number or as a string.
pub struct Identifier;

impl Reflect for Identifier {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Identifier")
            .field(Field::of::<String>("Text"))
            .any_of([Branch::of::<i64>(), Branch::of::<String>()])
    }
}

/// Must satisfy both machine shapes at once.
pub struct Convertible;

impl Reflect for Convertible {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Convertible")
            .field(Field::of::<String>("Model"))
            .all_of([Branch::of::<Laptop>(), Branch::of::<Desktop>()])
    }
}

pub struct Inventory;

impl Reflect for Inventory {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Inventory")
            .field(Field::of::<Identifier>("ID").wire("id"))
            .field(Field::of::<Convertible>("Item").wire("item"))
    }
}

/// A sequence of itself.
pub struct Forest;

impl Reflect for Forest {
    fn type_info() -> TypeInfo {
        TypeInfo::sequence(PKG, "Forest", TypeRef::of::<Forest>())
    }
}

/// A map whose values are itself.
pub struct Directory;

impl Reflect for Directory {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            PKG,
            "Directory",
            Kind::Map {
                key: TypeRef::of::<String>(),
                value: TypeRef::of::<Directory>(),
            },
        )
    }
}

pub struct Park;

impl Reflect for Park {
    fn type_info() -> TypeInfo {
        TypeInfo::record(PKG, "Park")
            .field(Field::of::<Forest>("Trees").wire("trees"))
            .field(Field::of::<Directory>("Paths").wire("paths"))
    }
}

// === Embedding ===

pub mod duplicate {
    use schema_reflect::{Field, Reflect, TypeInfo};

    const PKG: &str = "acme::models::duplicate";

    pub struct MostInner;

    impl Reflect for MostInner {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "MostInner")
                .field(Field::of::<String>("Foo").wire("foo,omitempty"))
                .field(Field::of::<String>("Bar").wire("bar,omitempty"))
                .field(Field::of::<String>("Baz").wire("bazDifferent,omitempty"))
        }
    }

    pub struct Inner;

    impl Reflect for Inner {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "Inner")
                .field(Field::embedded::<MostInner>())
                .field(Field::of::<String>("Foo").wire("foo,omitempty"))
                .field(Field::of::<String>("Bar").wire("bar,omitempty"))
                .field(Field::of::<String>("Baz").wire("baz,omitempty"))
        }
    }

    pub struct Root;

    impl Reflect for Root {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "Root")
                .field(Field::embedded::<Inner>())
                .field(Field::of::<String>("Foo").wire("foo"))
                .field(Field::of::<String>("Bar").wire("bar"))
                .field(Field::of::<String>("Baz").wire("baz"))
        }
    }
}

pub mod precedence {
    use schema_reflect::{Field, Reflect, TypeInfo};

    const PKG: &str = "acme::models::precedence";

    pub struct MostInner;

    impl Reflect for MostInner {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "MostInner")
                .field(Field::of::<String>("Foo").wire("foo,omitempty"))
                .field(Field::of::<String>("Bar").wire("bar"))
        }
    }

    pub struct Inner;

    impl Reflect for Inner {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "Inner")
                .field(Field::of::<String>("Foo").wire("foo"))
                .field(Field::of::<String>("Bar").wire("bar,omitempty"))
                .field(Field::embedded::<MostInner>())
        }
    }

    pub struct Root;

    impl Reflect for Root {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "Root")
                .field(Field::of::<String>("Foo").wire("foo"))
                .field(Field::of::<String>("Bar").wire("bar"))
                .field(Field::embedded::<Inner>())
        }
    }

    /// Embeds `Loop`, which embeds this type back.
    pub struct Cycle;

    impl Reflect for Cycle {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "Cycle")
                .field(Field::of::<String>("X").wire("x"))
                .field(Field::embedded::<Loop>())
        }
    }

    pub struct Loop;

    impl Reflect for Loop {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "Loop")
                .field(Field::of::<String>("Y").wire("y"))
                .field(Field::embedded::<Cycle>())
        }
    }

    /// Embedded with an explicit wire name, so kept as a nested property.
    pub struct Named;

    impl Reflect for Named {
        fn type_info() -> TypeInfo {
            TypeInfo::record(PKG, "Named")
                .field(Field::embedded::<MostInner>().wire("inner"))
        }
    }
}
