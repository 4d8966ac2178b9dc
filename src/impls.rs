//! [`Reflect`] implementations for standard library and ecosystem types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;

use crate::types::{Kind, Reflect, TypeInfo, TypeRef};

macro_rules! primitive {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::primitive(stringify!($ty), Kind::$kind)
                }
            }
        )+
    };
}

primitive!(Bool => bool);
primitive!(Int => i8, i16, i32, i64, i128, isize);
primitive!(Uint => u16, u32, u64, u128, usize);
primitive!(Byte => u8);
primitive!(Float => f32, f64);
primitive!(String => String, str, char);

macro_rules! pointer {
    ($($name:literal => $ty:ident),+) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::primitive($name, Kind::Pointer(TypeRef::of::<T>()))
                }
            }
        )+
    };
}

pointer!("Box" => Box, "Rc" => Rc, "Arc" => Arc);

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive("Option", Kind::Pointer(TypeRef::of::<T>()))
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive("&", Kind::Pointer(TypeRef::of::<T>()))
    }
}

impl<T: Reflect + ToOwned + ?Sized> Reflect for Cow<'_, T> {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive("Cow", Kind::Pointer(TypeRef::of::<T>()))
    }
}

macro_rules! sequence {
    ($($name:literal => $ty:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::primitive($name, Kind::Sequence(TypeRef::of::<T>()))
                }
            }
        )+
    };
}

sequence!(
    "Vec" => Vec,
    "VecDeque" => VecDeque,
    "LinkedList" => LinkedList,
    "BTreeSet" => BTreeSet
);

impl<T: Reflect, S> Reflect for HashSet<T, S> {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive("HashSet", Kind::Sequence(TypeRef::of::<T>()))
    }
}

impl<T: Reflect> Reflect for [T] {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive("slice", Kind::Sequence(TypeRef::of::<T>()))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive(
            "array",
            Kind::Array {
                elem: TypeRef::of::<T>(),
                len: N,
            },
        )
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive(
            "HashMap",
            Kind::Map {
                key: TypeRef::of::<K>(),
                value: TypeRef::of::<V>(),
            },
        )
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive(
            "BTreeMap",
            Kind::Map {
                key: TypeRef::of::<K>(),
                value: TypeRef::of::<V>(),
            },
        )
    }
}

macro_rules! channel {
    ($($name:literal => $ty:ident),+) => {
        $(
            impl<T> Reflect for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::new("std::sync::mpsc", $name, Kind::Channel)
                }
            }
        )+
    };
}

channel!("Sender" => Sender, "SyncSender" => SyncSender, "Receiver" => Receiver);

impl<R> Reflect for fn() -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive("fn", Kind::Function)
    }
}

impl<A, R> Reflect for fn(A) -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive("fn", Kind::Function)
    }
}

// Address types are opaque records; the walker maps them by name.
macro_rules! opaque {
    ($package:literal => $($ty:ident),+) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::record($package, stringify!($ty))
                }
            }
        )+
    };
}

opaque!("std::net" => IpAddr, Ipv4Addr, Ipv6Addr);

impl Reflect for serde_json::Value {
    fn type_info() -> TypeInfo {
        TypeInfo::new("serde_json", "Value", Kind::Any)
    }
}

impl Reflect for serde_json::Map<String, serde_json::Value> {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            "serde_json",
            "Map",
            Kind::Map {
                key: TypeRef::of::<String>(),
                value: TypeRef::of::<serde_json::Value>(),
            },
        )
    }
}

impl Reflect for serde_json::value::RawValue {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            "serde_json::value",
            "RawValue",
            Kind::Sequence(TypeRef::of::<u8>()),
        )
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Reflect for chrono::DateTime<Tz> {
    fn type_info() -> TypeInfo {
        TypeInfo::record("chrono", "DateTime")
    }
}

#[cfg(feature = "url")]
impl Reflect for url::Url {
    fn type_info() -> TypeInfo {
        TypeInfo::record("url", "Url")
    }
}
