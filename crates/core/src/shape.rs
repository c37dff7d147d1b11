//! Runtime description of Rust types.
//!
//! A [`Shape`] is what the registry walks instead of reflection: every type
//! that can appear in generated TypeScript implements [`Reflect`] and hands
//! back its identity, origin, and a [`ShapeKind`] describing how it is built.
//! Struct shapes are usually produced by `#[derive(Reflect)]`.

use std::any::{TypeId, type_name};
use std::io;

use crate::naming::RenameRule;

/// Boxed error returned by custom render hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Lazily produced shape of a nested type.
///
/// Fields store a function pointer rather than a `Shape` so that recursive
/// types (`struct Node { next: Option<Box<Node>> }`) can be described.
pub type ShapeFn = fn() -> Shape;

/// Hook writing caller-supplied source into a class or interface body.
pub type CustomRenderFn = fn(&mut dyn io::Write) -> Result<(), BoxError>;

/// Types that can describe themselves to the registry.
pub trait Reflect: 'static {
    /// Describe `Self`.
    fn shape() -> Shape;
}

/// Optional capability: contribute hand-written members to the emitted body.
///
/// Opt in with `#[ts(custom_render)]` (appended after generated members) or
/// `#[ts(custom_render = "replace")]` (replaces them).
pub trait CustomRender {
    /// Write members into the body; continuation lines are indented for you.
    fn render_custom(out: &mut dyn io::Write) -> Result<(), BoxError>;
}

/// Primitive kinds a TypeScript value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
}

/// How an instant is written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// Seconds since the unix epoch.
    UnixSeconds,
    /// ISO 8601 date and time.
    DateTime,
    /// ISO 8601 calendar date, `YYYY-MM-DD`.
    Date,
}

impl DateFormat {
    /// Primitive the value is serialized as.
    pub const fn raw(self) -> Primitive {
        match self {
            DateFormat::UnixSeconds => Primitive::Number,
            DateFormat::DateTime | DateFormat::Date => Primitive::String,
        }
    }
}

/// How a type is put together.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    /// `bool`, numbers, `String`, `char`.
    Scalar(Primitive),
    /// An instant or calendar date.
    Time {
        /// How the value is serialized.
        format: DateFormat,
    },
    /// A wrapper that serializes as its target (`Option`, `Box`, newtypes).
    Indirect {
        /// The wrapped type.
        target: ShapeFn,
        /// Set for `Option`.
        nullable: bool,
    },
    /// `Vec<T>`, `[T; N]`, sets.
    Sequence {
        /// Element type.
        elem: ShapeFn,
        /// Set for `[T; N]`.
        fixed: bool,
    },
    /// `HashMap<K, V>` and `BTreeMap<K, V>`.
    Map {
        /// Key type.
        key: ShapeFn,
        /// Value type.
        value: ShapeFn,
    },
    /// A struct with named fields.
    Struct(StructShape),
    /// `serde_json::Value` and friends.
    Dynamic,
    /// A type with no TypeScript mapping.
    Opaque,
}

/// Field list of a struct plus container-level serde settings.
#[derive(Debug, Clone, Default)]
pub struct StructShape {
    /// `#[serde(rename_all = "...")]`
    pub rename_all: Option<RenameRule>,
    /// Fields in declaration order.
    pub fields: Vec<FieldShape>,
}

/// One declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldShape {
    /// Declared identifier (raw identifiers already stripped).
    pub name: &'static str,
    /// Declared `pub`; private fields are not emitted.
    pub public: bool,
    /// `#[serde(flatten)]`
    pub flatten: bool,
    /// Type of the field.
    pub shape: ShapeFn,
    /// Field annotations.
    pub attrs: FieldAttrs,
}

impl FieldShape {
    /// A public field without annotations.
    pub fn new(name: &'static str, shape: ShapeFn) -> Self {
        Self {
            name,
            public: true,
            flatten: false,
            shape,
            attrs: FieldAttrs::default(),
        }
    }

    /// Mark the field private.
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Mark the field `#[serde(flatten)]`.
    pub fn flattened(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// Replace the field's annotations.
    pub fn with_attrs(mut self, attrs: FieldAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Annotations collected from `#[ts(...)]` and `#[serde(...)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldAttrs {
    /// `#[ts(rename = "...")]`
    pub rename: Option<&'static str>,
    /// `#[serde(rename = "...")]`
    pub serde_rename: Option<&'static str>,
    /// `#[ts(skip)]`, `#[serde(skip)]` or `#[serde(skip_serializing)]`
    pub skip: bool,
    /// `#[serde(skip_serializing_if = "...")]`
    pub omittable: bool,
    /// `#[ts(date)]`
    pub date: bool,
    /// `#[ts(null)]` / `#[ts(no_null)]`
    pub nullable: Option<bool>,
    /// `#[ts(optional)]`
    pub optional: bool,
}

/// Whether a type contributes custom output to its body.
#[derive(Debug, Clone, Copy, Default)]
pub enum Rendering {
    /// Generated members only.
    #[default]
    Default,
    /// Hook output follows the generated members.
    Extend(CustomRenderFn),
    /// Hook output replaces the generated members.
    Replace(CustomRenderFn),
}

impl Rendering {
    /// The hook to run, if any.
    pub fn hook(&self) -> Option<CustomRenderFn> {
        match self {
            Rendering::Default => None,
            Rendering::Extend(f) | Rendering::Replace(f) => Some(*f),
        }
    }

    /// Whether generated members are left out.
    pub fn replaces_members(&self) -> bool {
        matches!(self, Rendering::Replace(_))
    }
}

/// Runtime description of one Rust type.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Identity used for deduplication.
    pub id: TypeId,
    /// Fully-qualified origin, e.g. `my_app::model::User`.
    pub type_name: &'static str,
    /// Declared name; empty for anonymous shapes.
    pub name: &'static str,
    /// How the type is built.
    pub kind: ShapeKind,
    /// Custom render hook for struct shapes.
    pub rendering: Rendering,
}

impl Shape {
    /// Anonymous shape of `T`.
    pub fn of<T: ?Sized + 'static>(kind: ShapeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            name: "",
            kind,
            rendering: Rendering::Default,
        }
    }

    /// Set the declared name.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Attach a custom render hook.
    pub fn with_rendering(mut self, rendering: Rendering) -> Self {
        self.rendering = rendering;
        self
    }

    /// Shape of a field the generator never looks at (private or skipped).
    pub fn skipped() -> Self {
        Shape::of::<()>(ShapeKind::Opaque)
    }

    /// Struct shape for `T` with the given fields.
    pub fn structure<T: ?Sized + 'static>(name: &'static str, body: StructShape) -> Self {
        Shape::of::<T>(ShapeKind::Struct(body)).named(name)
    }

    /// Last path segment of the origin with generic arguments removed.
    pub fn short_name(&self) -> &'static str {
        let base = self.type_name.split('<').next().unwrap_or(self.type_name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Follow indirections down to the serialized type.
    ///
    /// Returns the innermost shape and whether any layer was nullable.
    pub fn peel(self) -> (Shape, bool) {
        let mut shape = self;
        let mut nullable = false;
        while let ShapeKind::Indirect {
            target,
            nullable: layer,
        } = shape.kind
        {
            nullable |= layer;
            shape = target();
        }
        (shape, nullable)
    }
}
