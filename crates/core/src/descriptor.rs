//! Canonical classification of field types.
//!
//! The resolver turns a field's [`Shape`] into a [`TypeDescriptor`]: wrappers
//! are peeled (recording nullability), containers are resolved recursively,
//! and nested structs are registered on the fly so the descriptor can point
//! at them by [`StructId`].

use tracing::trace;

use crate::error::DiagnosticKind;
use crate::registry::{Registry, StructId};
use crate::shape::{DateFormat, Primitive, Shape, ShapeKind};

/// What a value looks like on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// `string`, `number` or `boolean`.
    Primitive(Primitive),
    /// `T[]`.
    Array {
        /// Element type.
        elem: Box<TypeDescriptor>,
        /// Set for `[T; N]`.
        fixed: bool,
    },
    /// `{ [key: K]: V }`.
    Map {
        /// Key type as it appears in the index signature.
        key: Primitive,
        /// Value type.
        value: Box<TypeDescriptor>,
    },
    /// A registered struct.
    Object(StructId),
    /// An instant read into a JavaScript `Date`.
    Date {
        /// How the instant is serialized.
        format: DateFormat,
    },
    /// Arbitrary JSON.
    Dynamic,
    /// Fallback for types with no mapping: the Rust type's short name.
    Native(String),
}

/// A resolved type plus whether it was reached through `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// The resolved type.
    pub kind: TypeKind,
    /// Reached through `Option`.
    pub nullable: bool,
}

impl TypeDescriptor {
    /// A non-nullable descriptor.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Same descriptor with nullability replaced.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Innermost descriptor below any number of array and map layers.
    pub fn leaf(&self) -> &TypeDescriptor {
        let mut leaf = self;
        while let TypeKind::Array { elem: inner, .. } | TypeKind::Map { value: inner, .. } =
            &leaf.kind
        {
            leaf = inner;
        }
        leaf
    }
}

/// Where a type is being resolved, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site<'a> {
    pub owner: &'a str,
    pub field: &'a str,
}

impl Registry {
    /// Resolve one field shape, registering any struct it mentions.
    pub(crate) fn resolve(&mut self, shape: Shape, site: &Site<'_>) -> TypeDescriptor {
        let (shape, nullable) = shape.peel();

        let kind = match &shape.kind {
            ShapeKind::Scalar(primitive) => TypeKind::Primitive(*primitive),
            ShapeKind::Time { format } => TypeKind::Date { format: *format },
            ShapeKind::Sequence { elem, fixed } => TypeKind::Array {
                elem: Box::new(self.resolve(elem(), site)),
                fixed: *fixed,
            },
            ShapeKind::Map { key, value } => TypeKind::Map {
                key: self.resolve_key(key(), site),
                value: Box::new(self.resolve(value(), site)),
            },
            ShapeKind::Struct(body) => TypeKind::Object(self.register(&shape, body, None)),
            ShapeKind::Dynamic => TypeKind::Dynamic,
            ShapeKind::Indirect { .. } | ShapeKind::Opaque => {
                let fallback = shape.short_name();
                self.diagnose(
                    DiagnosticKind::UnsupportedFieldKind,
                    site,
                    format!(
                        "{} has no TypeScript mapping, emitted as {fallback}",
                        shape.type_name
                    ),
                );
                TypeKind::Native(fallback.to_string())
            }
        };

        trace!(owner = site.owner, field = site.field, ?kind, nullable, "Resolved field type.");
        TypeDescriptor { kind, nullable }
    }

    /// Object keys are strings on the wire; booleans are stringified and
    /// anything non-primitive degrades to `string`.
    fn resolve_key(&mut self, shape: Shape, site: &Site<'_>) -> Primitive {
        let (shape, _) = shape.peel();
        match shape.kind {
            ShapeKind::Scalar(Primitive::Boolean) => Primitive::String,
            ShapeKind::Scalar(primitive) => primitive,
            _ => {
                self.diagnose(
                    DiagnosticKind::UnsupportedFieldKind,
                    site,
                    format!(
                        "map key {} is not a primitive, emitted as string",
                        shape.type_name
                    ),
                );
                Primitive::String
            }
        }
    }
}
