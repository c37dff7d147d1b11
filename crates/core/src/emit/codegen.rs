//! Code generation from registered structs to the TypeScript IR.
//!
//! Each [`StructType`] becomes one [`TsDecl`]: an interface, or a class with
//! typed fields, a constructor that hydrates nested values from plain data,
//! and a `toObject()` serializer.

use super::types::{
    BinOp, TsClass, TsClassField, TsDecl, TsDeclKind, TsExpr, TsLiteral, TsMethod, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType,
};
use crate::config::Options;
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::field::FieldSpec;
use crate::registry::{Registry, StructId, StructType};
use crate::shape::{DateFormat, Primitive};

/// Generate the declaration for one registered struct.
pub fn codegen_decl(registry: &Registry, options: &Options, st: &StructType) -> TsDecl {
    Codegen { registry, options }.decl(st)
}

struct Codegen<'a> {
    registry: &'a Registry,
    options: &'a Options,
}

fn primitive(p: Primitive) -> TsType {
    TsType::Primitive(match p {
        Primitive::String => TsPrimitive::String,
        Primitive::Number => TsPrimitive::Number,
        Primitive::Boolean => TsPrimitive::Boolean,
    })
}

fn zero_of(p: Primitive) -> TsExpr {
    match p {
        Primitive::String => TsExpr::string(""),
        Primitive::Number => TsExpr::Literal(TsLiteral::Int(0)),
        Primitive::Boolean => TsExpr::Literal(TsLiteral::Bool(false)),
    }
}

fn any() -> TsType {
    TsType::Primitive(TsPrimitive::Any)
}

/// `v`, `v1`, `v2`, ... for nested arrow parameters.
fn var_name(base: &str, depth: usize) -> String {
    if depth == 0 {
        base.to_string()
    } else {
        format!("{base}{depth}")
    }
}

/// `('name' in d)`
fn present(name: &str) -> TsExpr {
    TsExpr::string(name)
        .bin(BinOp::In, TsExpr::ident("d"))
        .paren()
}

/// `Array.isArray(value)`
fn is_array(value: TsExpr) -> TsExpr {
    TsExpr::ident("Array").method("isArray", vec![value])
}

/// `(value && typeof value === 'object')`
fn is_object(value: TsExpr) -> TsExpr {
    let kind = TsExpr::TypeOf(Box::new(value.clone()))
        .bin(BinOp::StrictEq, TsExpr::string("object"));
    value.bin(BinOp::And, kind).paren()
}

impl Codegen<'_> {
    fn typed(&self) -> bool {
        !self.options.es6
    }

    fn dates(&self) -> bool {
        !self.options.no_date
    }

    fn class_name(&self, id: StructId) -> String {
        self.registry
            .get(id)
            .map_or_else(|| "any".to_string(), |st| st.name.clone())
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn base_type(&self, desc: &TypeDescriptor) -> TsType {
        match &desc.kind {
            TypeKind::Primitive(p) => primitive(*p),
            TypeKind::Date { format } => {
                if self.dates() {
                    TsType::Ref("Date".to_string())
                } else {
                    primitive(format.raw())
                }
            }
            TypeKind::Array { elem, .. } => TsType::Array(Box::new(self.ts_type(elem))),
            TypeKind::Map { key, value } => TsType::Index {
                key: Box::new(primitive(*key)),
                value: Box::new(self.ts_type(value)),
            },
            TypeKind::Object(id) => TsType::Ref(self.class_name(*id)),
            TypeKind::Dynamic => any(),
            TypeKind::Native(name) => TsType::Ref(name.clone()),
        }
    }

    fn ts_type(&self, desc: &TypeDescriptor) -> TsType {
        let ty = self.base_type(desc);
        if desc.nullable { ty.nullable() } else { ty }
    }

    fn field_type(&self, field: &FieldSpec) -> TsType {
        let ty = self.base_type(&field.descriptor);
        if field.nullable { ty.nullable() } else { ty }
    }

    fn prop(&self, field: &FieldSpec) -> TsProp {
        TsProp {
            name: field.name.clone(),
            ty: self.field_type(field),
            optional: field.optional && self.options.mark_optional,
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Value of a present-but-empty field of this type.
    fn zero_value(&self, desc: &TypeDescriptor) -> TsExpr {
        match &desc.kind {
            TypeKind::Primitive(p) => zero_of(*p),
            TypeKind::Date { format } => {
                if self.dates() {
                    TsExpr::new_instance("Date", vec![])
                } else {
                    zero_of(format.raw())
                }
            }
            TypeKind::Array { .. } => TsExpr::Array(vec![]),
            TypeKind::Map { .. } => TsExpr::EmptyObject,
            TypeKind::Object(id) => TsExpr::new_instance(&self.class_name(*id), vec![]),
            TypeKind::Dynamic | TypeKind::Native(_) => TsExpr::null(),
        }
    }

    fn default_value(&self, field: &FieldSpec) -> TsExpr {
        if field.nullable {
            TsExpr::null()
        } else {
            self.zero_value(&field.descriptor)
        }
    }

    /// Conversion of a present `value` into the runtime representation of
    /// `desc`, or `None` when the plain value can be used as is.
    fn hydrate(&self, desc: &TypeDescriptor, value: TsExpr, depth: usize) -> Option<TsExpr> {
        match &desc.kind {
            TypeKind::Date { .. } if self.dates() => Some(TsExpr::call("ParseDate", vec![value])),
            TypeKind::Object(id) => Some(TsExpr::new_instance(&self.class_name(*id), vec![value])),
            TypeKind::Array { elem, .. } => {
                let param = var_name("v", depth);
                let inner = self.convert(elem, TsExpr::ident(&param), depth + 1)?;
                let arrow = TsExpr::Arrow {
                    params: vec![TsParam::new(&param, self.typed().then(any))],
                    body: Box::new(inner),
                };
                Some(value.method("map", vec![arrow]))
            }
            TypeKind::Map { value: elem, .. } => {
                let key = var_name("k", depth);
                let param = var_name("v", depth);
                let inner = self.convert(elem, TsExpr::ident(&param), depth + 1)?;
                let pair_type = TsType::Tuple(vec![TsType::Primitive(TsPrimitive::String), any()]);
                let arrow = TsExpr::Arrow {
                    params: vec![TsParam::new(
                        &format!("[{key}, {param}]"),
                        self.typed().then_some(pair_type),
                    )],
                    body: Box::new(TsExpr::Array(vec![TsExpr::ident(&key), inner])),
                };
                let entries = TsExpr::ident("Object")
                    .method("entries", vec![value])
                    .method("map", vec![arrow]);
                Some(TsExpr::ident("Object").method("fromEntries", vec![entries]))
            }
            _ => None,
        }
    }

    /// Element conversion, guarded against missing or malformed input.
    fn convert(&self, desc: &TypeDescriptor, value: TsExpr, depth: usize) -> Option<TsExpr> {
        let converted = self.hydrate(desc, value.clone(), depth)?;
        let fallback = if desc.nullable {
            TsExpr::null()
        } else {
            self.zero_value(desc)
        };
        Some(match &desc.kind {
            TypeKind::Array { .. } => is_array(value).ternary(converted, fallback),
            TypeKind::Map { .. } => is_object(value).ternary(converted, fallback),
            _ if desc.nullable => value
                .bin(BinOp::LooseEq, TsExpr::null())
                .ternary(TsExpr::null(), converted),
            _ => converted,
        })
    }

    // =========================================================================
    // Class members
    // =========================================================================

    fn assignment(&self, field: &FieldSpec) -> TsStmt {
        let access = TsExpr::ident("d").member(&field.name);
        let target = TsExpr::ident("this").member(&field.name);
        let desc = &field.descriptor;

        // Non-null nested objects are always constructed.
        if let TypeKind::Object(id) = desc.kind
            && !field.nullable
        {
            return TsStmt::Assign {
                target,
                value: TsExpr::new_instance(&self.class_name(id), vec![access]),
            };
        }

        let (cond, value) = match self.hydrate(desc, access.clone(), 0) {
            Some(converted) => {
                let cond = match desc.kind {
                    TypeKind::Array { .. } => is_array(access),
                    TypeKind::Map { .. } => is_object(access),
                    _ => present(&field.name),
                };
                (cond, converted)
            }
            None => {
                let value = if self.typed() {
                    TsExpr::Cast {
                        expr: Box::new(access),
                        ty: self.base_type(desc),
                    }
                } else {
                    access
                };
                (present(&field.name), value)
            }
        };

        if self.options.no_assign_defaults {
            TsStmt::If {
                cond,
                then: Box::new(TsStmt::Assign { target, value }),
            }
        } else {
            TsStmt::Assign {
                target,
                value: cond.ternary(value, self.default_value(field)),
            }
        }
    }

    fn constructor(&self, st: &StructType) -> TsMethod {
        let data = TsExpr::ident("data");
        let init = is_object(data.clone()).ternary(
            TsExpr::call("ToObject", vec![data]),
            TsExpr::EmptyObject,
        );
        let param = if self.typed() {
            TsParam {
                optional: true,
                ..TsParam::new("data", Some(any()))
            }
        } else {
            TsParam {
                default: Some(TsExpr::null()),
                ..TsParam::new("data", None)
            }
        };

        let mut body = vec![TsStmt::VarDecl {
            name: "d".to_string(),
            ty: self.typed().then(any),
            init,
        }];
        body.extend(st.fields.iter().map(|f| self.assignment(f)));

        TsMethod {
            name: "constructor".to_string(),
            params: vec![param],
            return_type: None,
            body,
        }
    }

    /// How `ToObject` should serialize a field, when the default is wrong.
    ///
    /// The hint applies to every element of arrays and every value of maps.
    fn serialize_hint(&self, desc: &TypeDescriptor) -> Option<&'static str> {
        match desc.leaf().kind {
            TypeKind::Date { format } if self.dates() => match format {
                DateFormat::UnixSeconds => None,
                DateFormat::DateTime => Some("string"),
                DateFormat::Date => Some("date"),
            },
            TypeKind::Date {
                format: DateFormat::UnixSeconds,
            }
            | TypeKind::Primitive(Primitive::Number) => Some("number"),
            _ => None,
        }
    }

    fn to_object(&self, st: &StructType) -> TsMethod {
        let cfg = TsExpr::ident("cfg");
        let mut body = vec![TsStmt::VarDecl {
            name: "cfg".to_string(),
            ty: self.typed().then(any),
            init: TsExpr::EmptyObject,
        }];
        for field in &st.fields {
            if let Some(hint) = self.serialize_hint(&field.descriptor) {
                body.push(TsStmt::Assign {
                    target: cfg.clone().member(&field.name),
                    value: TsExpr::string(hint),
                });
            }
        }
        body.push(TsStmt::Return(TsExpr::call(
            "ToObject",
            vec![TsExpr::ident("this"), cfg],
        )));

        TsMethod {
            name: "toObject".to_string(),
            params: vec![],
            return_type: self.typed().then(any),
            body,
        }
    }

    fn class(&self, st: &StructType) -> TsClass {
        if st.rendering.replaces_members() {
            return TsClass::default();
        }

        let opts = self.options;
        let fields = if self.typed() {
            let assign_inline = opts.no_constructor && !opts.no_assign_defaults;
            st.fields
                .iter()
                .map(|f| TsClassField {
                    prop: self.prop(f),
                    init: assign_inline.then(|| self.default_value(f)),
                })
                .collect()
        } else {
            Vec::new()
        };
        let constructor = (!opts.no_constructor).then(|| self.constructor(st));
        let methods = if opts.no_to_object {
            Vec::new()
        } else {
            vec![self.to_object(st)]
        };

        TsClass {
            fields,
            constructor,
            methods,
        }
    }

    fn decl(&self, st: &StructType) -> TsDecl {
        let kind = if self.options.emits_classes() {
            TsDeclKind::Class(self.class(st))
        } else if self.options.es6 {
            TsDeclKind::Omitted
        } else if st.rendering.replaces_members() {
            TsDeclKind::Interface {
                properties: Vec::new(),
            }
        } else {
            TsDeclKind::Interface {
                properties: st.fields.iter().map(|f| self.prop(f)).collect(),
            }
        };

        TsDecl {
            name: st.name.clone(),
            origin: st.type_name.to_string(),
            exported: !self.options.no_exports,
            kind,
        }
    }
}
