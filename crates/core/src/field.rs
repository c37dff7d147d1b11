//! Per-field metadata.
//!
//! Precedence, highest first:
//! 1. private fields and `skip` annotations drop the field;
//! 2. `#[serde(flatten)]` splices the inner struct's fields in place;
//! 3. the name comes from `#[ts(rename)]`, then `#[serde(rename)]`, then the
//!    container's `rename_all` rule, then the declared identifier;
//! 4. date, optional and nullable flags are derived from the resolved type
//!    and may be forced by annotations.

use std::any::TypeId;

use tracing::trace;

use crate::descriptor::{Site, TypeDescriptor, TypeKind};
use crate::error::DiagnosticKind;
use crate::naming::RenameRule;
use crate::registry::Registry;
use crate::shape::{DateFormat, FieldShape, Primitive, ShapeKind, StructShape};

/// Suffixes that mark an `i64` field as a unix timestamp.
const TIMESTAMP_SUFFIXES: [&str; 2] = ["TS", "_ts"];

/// A field as it will be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// External (serialized) name.
    pub name: String,
    /// Resolved type.
    pub descriptor: TypeDescriptor,
    /// May be absent from the serialized object.
    pub optional: bool,
    /// May be `null`; wins over `descriptor.nullable`.
    pub nullable: bool,
    /// Hydrated into a `Date`.
    pub is_date: bool,
}

/// External name of a field.
pub fn external_name(field: &FieldShape, rule: Option<RenameRule>) -> String {
    if let Some(name) = field.attrs.rename.or(field.attrs.serde_rename) {
        return name.to_string();
    }
    match rule {
        Some(rule) => rule.apply_to_field(field.name),
        None => field.name.to_string(),
    }
}

impl Registry {
    /// Build the emitted fields of `body` into `out`.
    ///
    /// `flattening` holds the structs currently being spliced so that a
    /// flatten cycle is reported instead of recursing forever.
    pub(crate) fn build_fields(
        &mut self,
        owner: &str,
        body: &StructShape,
        out: &mut Vec<FieldSpec>,
        flattening: &mut Vec<TypeId>,
    ) {
        for field in &body.fields {
            if !field.public || field.attrs.skip {
                trace!(owner, field = field.name, "Skipping field.");
                continue;
            }

            if field.flatten {
                let site = Site {
                    owner,
                    field: field.name,
                };
                self.flatten_into(field, &site, out, flattening);
                continue;
            }

            let name = external_name(field, body.rename_all);
            let site = Site {
                owner,
                field: &name,
            };
            let spec = self.build_field(field, &site);
            out.push(spec);
        }
    }

    fn build_field(&mut self, field: &FieldShape, site: &Site<'_>) -> FieldSpec {
        let shape = (field.shape)();
        let timestamp_like = shape.clone().peel().0.id == TypeId::of::<i64>()
            && TIMESTAMP_SUFFIXES
                .iter()
                .any(|suffix| site.field.ends_with(suffix));

        let mut descriptor = self.resolve(shape, site);

        let mut is_date = field.attrs.date
            || timestamp_like
            || matches!(descriptor.kind, TypeKind::Date { .. });
        if is_date {
            let format = match &descriptor.kind {
                TypeKind::Date { format } => Some(*format),
                TypeKind::Primitive(Primitive::Number) => Some(DateFormat::UnixSeconds),
                TypeKind::Primitive(Primitive::String) => Some(DateFormat::DateTime),
                _ => None,
            };
            match format {
                Some(format) => descriptor.kind = TypeKind::Date { format },
                None => {
                    is_date = false;
                    self.diagnose(
                        DiagnosticKind::UnsupportedFieldKind,
                        site,
                        "only numbers and strings can be read as dates".to_string(),
                    );
                }
            }
        }

        FieldSpec {
            name: site.field.to_string(),
            optional: field.attrs.optional || field.attrs.omittable,
            nullable: field.attrs.nullable.unwrap_or(descriptor.nullable),
            is_date,
            descriptor,
        }
    }

    fn flatten_into(
        &mut self,
        field: &FieldShape,
        site: &Site<'_>,
        out: &mut Vec<FieldSpec>,
        flattening: &mut Vec<TypeId>,
    ) {
        let (shape, nullable) = (field.shape)().peel();

        let ShapeKind::Struct(inner) = &shape.kind else {
            self.diagnose(
                DiagnosticKind::UnsupportedEmbedding,
                site,
                format!("{} is not a struct and cannot be flattened", shape.type_name),
            );
            return;
        };

        if flattening.contains(&shape.id) {
            self.diagnose(
                DiagnosticKind::UnsupportedEmbedding,
                site,
                format!("{} is already being flattened here", shape.type_name),
            );
            return;
        }

        flattening.push(shape.id);
        let start = out.len();
        self.build_fields(site.owner, inner, out, flattening);
        flattening.pop();

        // Every field of an absent flattened struct is absent too.
        if nullable {
            for spec in &mut out[start..] {
                spec.optional = true;
            }
        }
    }
}
