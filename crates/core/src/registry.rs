//! Type registry.
//!
//! Holds every struct reachable from the registered roots, deduplicated by
//! `TypeId` and kept in first-seen order. Entries live in an arena and are
//! inserted before their fields are built, so a field that refers back to
//! its own struct (or to any struct still being built) resolves to the
//! existing entry.

use std::any::TypeId;
use std::collections::HashMap;
use std::io;

use tracing::{debug, warn};

use crate::config::Options;
use crate::descriptor::Site;
use crate::emit::Emitter;
use crate::error::{Diagnostic, DiagnosticKind, RegistryError, RenderError};
use crate::field::FieldSpec;
use crate::naming::capitalize;
use crate::shape::{Reflect, Rendering, Shape, ShapeKind, StructShape};

/// Handle to a registered struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructId(usize);

impl StructId {
    /// Position in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One registered struct.
#[derive(Debug, Clone)]
pub struct StructType {
    /// Handle of this entry.
    pub id: StructId,
    /// Emitted TypeScript name; fixed at first registration.
    pub name: String,
    /// Fully-qualified Rust origin.
    pub type_name: &'static str,
    /// Identity used for deduplication.
    pub type_id: TypeId,
    /// Emitted fields in declaration order, flattened fields spliced in.
    pub fields: Vec<FieldSpec>,
    /// Custom render hook, if any.
    pub rendering: Rendering,
}

/// Accumulates struct types for one generation run.
#[derive(Debug, Default)]
pub struct Registry {
    options: Options,
    structs: Vec<StructType>,
    seen: HashMap<TypeId, StructId>,
    anonymous_count: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Registry {
    /// Empty registry; `options` also control how names are assigned.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Options the registry was created with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register `T` under its declared name.
    pub fn add<T: Reflect>(&mut self) -> Result<StructId, RegistryError> {
        self.add_root(T::shape(), None)
    }

    /// Register `T` under `name` unless it is already registered.
    pub fn add_with_name<T: Reflect>(&mut self, name: &str) -> Result<StructId, RegistryError> {
        self.add_root(T::shape(), Some(name))
    }

    /// Register the type of `value`.
    pub fn add_value<T: Reflect>(&mut self, _value: &T) -> Result<StructId, RegistryError> {
        self.add::<T>()
    }

    /// Register the type of `value` under `name`.
    pub fn add_value_with_name<T: Reflect>(
        &mut self,
        _value: &T,
        name: &str,
    ) -> Result<StructId, RegistryError> {
        self.add_with_name::<T>(name)
    }

    /// Register a shape obtained elsewhere (e.g. built by hand).
    pub fn add_shape(&mut self, shape: Shape) -> Result<StructId, RegistryError> {
        self.add_root(shape, None)
    }

    /// Register a shape under `name`.
    pub fn add_shape_with_name(
        &mut self,
        shape: Shape,
        name: &str,
    ) -> Result<StructId, RegistryError> {
        self.add_root(shape, Some(name))
    }

    fn add_root(&mut self, shape: Shape, name: Option<&str>) -> Result<StructId, RegistryError> {
        let (shape, _) = shape.peel();
        let ShapeKind::Struct(body) = &shape.kind else {
            return Err(RegistryError::InvalidRootType {
                type_name: shape.type_name.to_string(),
            });
        };
        Ok(self.register(&shape, body, name))
    }

    /// Insert `shape` (or find it) and build its fields.
    pub(crate) fn register(
        &mut self,
        shape: &Shape,
        body: &StructShape,
        name: Option<&str>,
    ) -> StructId {
        if let Some(id) = self.seen.get(&shape.id).copied() {
            return id;
        }

        let name = self.assign_name(shape, name);
        let id = StructId(self.structs.len());
        self.structs.push(StructType {
            id,
            name: name.clone(),
            type_name: shape.type_name,
            type_id: shape.id,
            fields: Vec::new(),
            rendering: shape.rendering,
        });
        self.seen.insert(shape.id, id);

        let mut fields = Vec::with_capacity(body.fields.len());
        let mut flattening = vec![shape.id];
        self.build_fields(&name, body, &mut fields, &mut flattening);

        debug!(
            name = %name,
            origin = shape.type_name,
            fields = fields.len(),
            "Registered struct."
        );
        if let Some(entry) = self.structs.get_mut(id.0) {
            entry.fields = fields;
        }
        id
    }

    fn assign_name(&mut self, shape: &Shape, name: Option<&str>) -> String {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        if !shape.name.is_empty() {
            return if self.options.no_capitalize {
                shape.name.to_string()
            } else {
                capitalize(shape.name)
            };
        }
        self.anonymous_count += 1;
        format!("Anonymous{}", self.anonymous_count)
    }

    pub(crate) fn diagnose(&mut self, kind: DiagnosticKind, site: &Site<'_>, message: String) {
        let diagnostic = Diagnostic {
            kind,
            owner: site.owner.to_string(),
            field: site.field.to_string(),
            message,
        };
        warn!(
            kind = %diagnostic.kind,
            owner = site.owner,
            field = site.field,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Entry for `id`.
    pub fn get(&self, id: StructId) -> Option<&StructType> {
        self.structs.get(id.0)
    }

    /// Find the entry registered for `T` (wrappers are looked through).
    pub fn lookup<T: Reflect>(&self) -> Option<&StructType> {
        let (shape, _) = T::shape().peel();
        let id = self.seen.get(&shape.id)?;
        self.get(*id)
    }

    /// Registered structs in registration order.
    pub fn structs(&self) -> &[StructType] {
        &self.structs
    }

    /// Number of registered structs.
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Non-fatal problems found while registering.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render everything with the registry's options.
    pub fn render_to<W: io::Write>(&self, out: &mut W) -> Result<(), RenderError> {
        Emitter::new(self, &self.options).render_to(out)
    }

    /// Render everything into a string; custom output must be valid UTF-8.
    pub fn render_to_string(&self) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.render_to(&mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Names a module rendered with the registry's options exports.
    pub fn exported_symbols(&self) -> Vec<String> {
        Emitter::new(self, &self.options).exported_symbols()
    }
}
