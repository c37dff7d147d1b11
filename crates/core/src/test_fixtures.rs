//! Hand-written `Reflect` impls for unit tests (the derive lives downstream).

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;
use std::io;

use crate::shape::{
    BoxError, FieldAttrs, FieldShape, Reflect, Rendering, Shape, ShapeKind, StructShape,
};

fn body(fields: Vec<FieldShape>) -> StructShape {
    StructShape {
        rename_all: None,
        fields,
    }
}

pub struct Leaf;

impl Reflect for Leaf {
    fn shape() -> Shape {
        Shape::structure::<Leaf>("Leaf", body(vec![FieldShape::new("value", String::shape)]))
    }
}

pub struct Node;

impl Reflect for Node {
    fn shape() -> Shape {
        Shape::structure::<Node>(
            "Node",
            body(vec![
                FieldShape::new("value", i32::shape),
                FieldShape::new("next", Option::<Box<Node>>::shape),
            ]),
        )
    }
}

pub struct Outer;

impl Reflect for Outer {
    fn shape() -> Shape {
        Shape::structure::<Outer>(
            "Outer",
            body(vec![
                FieldShape::new("leaf", Leaf::shape),
                FieldShape::new("leaves", Vec::<Leaf>::shape),
            ]),
        )
    }
}

struct Holder;

pub fn holder_of_leaves() -> Shape {
    Shape::structure::<Holder>("Holder", body(vec![FieldShape::new("items", Vec::<Leaf>::shape)]))
}

struct Lower;

pub fn lower_shape() -> Shape {
    Shape::structure::<Lower>("lower_case", StructShape::default())
}

/// A type with no TypeScript mapping.
pub struct Opaque;

impl Reflect for Opaque {
    fn shape() -> Shape {
        Shape::of::<Opaque>(ShapeKind::Opaque)
    }
}

pub struct Stamped;

impl Reflect for Stamped {
    fn shape() -> Shape {
        let date = FieldAttrs {
            date: true,
            ..FieldAttrs::default()
        };
        Shape::structure::<Stamped>(
            "Stamped",
            body(vec![
                FieldShape::new("updatedTS", i64::shape),
                FieldShape::new("count_ts", u32::shape),
                FieldShape::new("seen", Option::<String>::shape).with_attrs(date),
                FieldShape::new("flag", bool::shape).with_attrs(date),
            ]),
        )
    }
}

pub struct Named;

impl Reflect for Named {
    fn shape() -> Shape {
        Shape::structure::<Named>("Named", body(vec![FieldShape::new("name", String::shape)]))
    }
}

pub struct MaybeNamed;

impl Reflect for MaybeNamed {
    fn shape() -> Shape {
        Shape::structure::<MaybeNamed>(
            "MaybeNamed",
            body(vec![FieldShape::new("optionalName", String::shape)]),
        )
    }
}

pub struct Flattened;

impl Reflect for Flattened {
    fn shape() -> Shape {
        Shape::structure::<Flattened>(
            "Flattened",
            body(vec![
                FieldShape::new("id", u64::shape),
                FieldShape::new("named", Named::shape).flattened(),
                FieldShape::new("maybe", Option::<MaybeNamed>::shape).flattened(),
                FieldShape::new("extra", HashMap::<String, serde_json::Value>::shape).flattened(),
                FieldShape::new("tail", bool::shape),
            ]),
        )
    }
}

/// Mirrors a typical API payload: dates, nested objects, maps.
pub struct Other;

impl Reflect for Other {
    fn shape() -> Shape {
        Shape::structure::<Other>(
            "Other",
            body(vec![
                FieldShape::new("t", chrono::DateTime::<chrono::Utc>::shape).with_attrs(
                    FieldAttrs {
                        omittable: true,
                        ..FieldAttrs::default()
                    },
                ),
            ]),
        )
    }
}

pub struct Complex;

impl Reflect for Complex {
    fn shape() -> Shape {
        let omittable = FieldAttrs {
            omittable: true,
            ..FieldAttrs::default()
        };
        Shape::structure::<Complex>(
            "Complex",
            body(vec![
                FieldShape::new("s", String::shape).with_attrs(omittable),
                FieldShape::new("i", i32::shape).with_attrs(omittable),
                FieldShape::new("f", f64::shape).with_attrs(omittable),
                FieldShape::new("ts", Option::<i64>::shape).with_attrs(FieldAttrs {
                    date: true,
                    nullable: Some(true),
                    omittable: true,
                    ..FieldAttrs::default()
                }),
                FieldShape::new("t", chrono::DateTime::<chrono::Utc>::shape)
                    .with_attrs(omittable),
                FieldShape::new("o", Option::<Box<Other>>::shape).with_attrs(omittable),
                FieldShape::new("nno", Option::<Other>::shape).with_attrs(FieldAttrs {
                    nullable: Some(false),
                    omittable: true,
                    ..FieldAttrs::default()
                }),
                FieldShape::new("d", HashMap::<String, serde_json::Value>::shape),
                FieldShape::new("dp", Option::<HashMap<String, serde_json::Value>>::shape),
            ]),
        )
    }
}

/// Nested containers that need per-element construction.
pub struct Collections;

impl Reflect for Collections {
    fn shape() -> Shape {
        Shape::structure::<Collections>(
            "Collections",
            body(vec![
                FieldShape::new("tags", Vec::<String>::shape),
                FieldShape::new("others", Vec::<Other>::shape),
                FieldShape::new("grid", Vec::<Vec<Option<Other>>>::shape),
                FieldShape::new("byName", HashMap::<String, Other>::shape),
                FieldShape::new("maybeOthers", Option::<Vec<Other>>::shape),
                FieldShape::new("scores", Vec::<f32>::shape),
            ]),
        )
    }
}

/// Dates below containers, in every wire format.
pub struct Calendar;

impl Reflect for Calendar {
    fn shape() -> Shape {
        Shape::structure::<Calendar>(
            "Calendar",
            body(vec![
                FieldShape::new("byKey", HashMap::<String, chrono::DateTime<chrono::Utc>>::shape),
                FieldShape::new("days", Vec::<chrono::NaiveDate>::shape),
                FieldShape::new("born", chrono::NaiveDate::shape),
                FieldShape::new("counts", BTreeMap::<String, Vec<u32>>::shape),
                FieldShape::new("touched", SystemTime::shape),
            ]),
        )
    }
}

fn custom_comment(out: &mut dyn io::Write) -> Result<(), BoxError> {
    out.write_all(b"// custom line one\n// custom line two")?;
    Ok(())
}

fn line_comment(out: &mut dyn io::Write) -> Result<(), BoxError> {
    out.write_all(b"// custom line\n")?;
    Ok(())
}

fn invalid_utf8(out: &mut dyn io::Write) -> Result<(), BoxError> {
    out.write_all(b"// \xff")?;
    Ok(())
}

fn failing_hook(out: &mut dyn io::Write) -> Result<(), BoxError> {
    out.write_all(b"// partial")?;
    Err("hook exploded".into())
}

pub struct Extended;

impl Reflect for Extended {
    fn shape() -> Shape {
        Shape::structure::<Extended>("Extended", body(vec![FieldShape::new("n", u8::shape)]))
            .with_rendering(Rendering::Extend(custom_comment))
    }
}

pub struct Replaced;

impl Reflect for Replaced {
    fn shape() -> Shape {
        Shape::structure::<Replaced>("Replaced", body(vec![FieldShape::new("n", u8::shape)]))
            .with_rendering(Rendering::Replace(custom_comment))
    }
}

pub struct Failing;

impl Reflect for Failing {
    fn shape() -> Shape {
        Shape::structure::<Failing>("Failing", body(vec![FieldShape::new("n", u8::shape)]))
            .with_rendering(Rendering::Extend(failing_hook))
    }
}

pub struct Trailing;

impl Reflect for Trailing {
    fn shape() -> Shape {
        Shape::structure::<Trailing>("Trailing", body(vec![FieldShape::new("n", u8::shape)]))
            .with_rendering(Rendering::Extend(line_comment))
    }
}

pub struct Garbled;

impl Reflect for Garbled {
    fn shape() -> Shape {
        Shape::structure::<Garbled>("Garbled", body(vec![FieldShape::new("n", u8::shape)]))
            .with_rendering(Rendering::Replace(invalid_utf8))
    }
}
