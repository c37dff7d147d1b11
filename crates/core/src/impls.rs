//! `Reflect` for std, chrono and serde_json types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use crate::shape::{DateFormat, FieldShape, Primitive, Reflect, Shape, ShapeKind, StructShape};

macro_rules! impl_scalar {
    ($prim:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::of::<$ty>(ShapeKind::Scalar(Primitive::$prim))
                }
            }
        )+
    };
}

impl_scalar!(Number => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
impl_scalar!(String => String, char, &'static str, Cow<'static, str>, PathBuf);
impl_scalar!(Boolean => bool);

// =============================================================================
// Indirection
// =============================================================================

macro_rules! impl_indirect {
    ($nullable:literal => $($wrapper:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $wrapper<T> {
                fn shape() -> Shape {
                    Shape::of::<$wrapper<T>>(ShapeKind::Indirect {
                        target: T::shape,
                        nullable: $nullable,
                    })
                }
            }
        )+
    };
}

impl_indirect!(true => Option);
impl_indirect!(false => Box, Rc, Arc);

// =============================================================================
// Sequences and maps
// =============================================================================

macro_rules! impl_sequence {
    ($($seq:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $seq<T> {
                fn shape() -> Shape {
                    Shape::of::<$seq<T>>(ShapeKind::Sequence {
                        elem: T::shape,
                        fixed: false,
                    })
                }
            }
        )+
    };
}

impl_sequence!(Vec, VecDeque, BTreeSet, HashSet);

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape::of::<[T; N]>(ShapeKind::Sequence {
            elem: T::shape,
            fixed: true,
        })
    }
}

macro_rules! impl_map {
    ($($map:ident),+) => {
        $(
            impl<K: Reflect, V: Reflect> Reflect for $map<K, V> {
                fn shape() -> Shape {
                    Shape::of::<$map<K, V>>(ShapeKind::Map {
                        key: K::shape,
                        value: V::shape,
                    })
                }
            }
        )+
    };
}

impl_map!(HashMap, BTreeMap);

// =============================================================================
// Time
// =============================================================================

/// Serde writes `SystemTime` as a struct, not as an instant.
impl Reflect for SystemTime {
    fn shape() -> Shape {
        Shape::structure::<SystemTime>(
            "SystemTime",
            StructShape {
                rename_all: None,
                fields: vec![
                    FieldShape::new("secs_since_epoch", u64::shape),
                    FieldShape::new("nanos_since_epoch", u32::shape),
                ],
            },
        )
    }
}

impl<Tz: chrono::TimeZone + 'static> Reflect for chrono::DateTime<Tz> {
    fn shape() -> Shape {
        Shape::of::<chrono::DateTime<Tz>>(ShapeKind::Time {
            format: DateFormat::DateTime,
        })
    }
}

impl Reflect for chrono::NaiveDateTime {
    fn shape() -> Shape {
        Shape::of::<chrono::NaiveDateTime>(ShapeKind::Time {
            format: DateFormat::DateTime,
        })
    }
}

impl Reflect for chrono::NaiveDate {
    fn shape() -> Shape {
        Shape::of::<chrono::NaiveDate>(ShapeKind::Time {
            format: DateFormat::Date,
        })
    }
}

// =============================================================================
// Dynamic values
// =============================================================================

impl Reflect for serde_json::Value {
    fn shape() -> Shape {
        Shape::of::<serde_json::Value>(ShapeKind::Dynamic)
    }
}

impl Reflect for serde_json::Map<String, serde_json::Value> {
    fn shape() -> Shape {
        Shape::of::<serde_json::Map<String, serde_json::Value>>(ShapeKind::Map {
            key: String::shape,
            value: serde_json::Value::shape,
        })
    }
}
