//! Core of shapets: the type model, registry, and TypeScript emitter.
//!
//! Most users depend on the `shapets` crate, which re-exports everything
//! here together with `#[derive(Reflect)]`.

pub mod config;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod field;
mod impls;
pub mod naming;
pub mod registry;
pub mod shape;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use config::{DEFAULT_INDENT, Options};
pub use descriptor::{TypeDescriptor, TypeKind};
pub use emit::{Emitter, HELPER_NAMES};
pub use error::{ConfigError, Diagnostic, DiagnosticKind, RegistryError, RenderError};
pub use field::FieldSpec;
pub use naming::RenameRule;
pub use registry::{Registry, StructId, StructType};
pub use shape::{
    BoxError, CustomRender, CustomRenderFn, DateFormat, FieldAttrs, FieldShape, Primitive, Reflect,
    Rendering, Shape, ShapeFn, ShapeKind, StructShape,
};
