//! TypeScript code emission via the Emit trait.
//!
//! Types and expressions print on a single line through [`Emit`]. Statements
//! and declarations take the indentation unit explicitly since it is
//! configurable.

use super::types::{
    BinOp, TsClass, TsDecl, TsDeclKind, TsExpr, TsLiteral, TsMethod, TsParam, TsPrimitive,
    TsProp, TsStmt, TsType,
};
use crate::naming::{member_access, quote_if_needed, string_literal};

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn join<T: Emit>(items: &[T], sep: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(sep)
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Null => "null".to_string(),
            TsPrimitive::Any => "any".to_string(),
        }
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => string_literal(s),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap unions in parentheses
                if matches!(**inner, TsType::Union(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => join(types, " | "),
            TsType::Index { key, value } => {
                format!("{{ [key: {}]: {} }}", key.emit(), value.emit())
            }
            TsType::Tuple(types) => format!("[{}]", join(types, ", ")),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {}", self.ty.emit())
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::And => "&&".to_string(),
            BinOp::In => "in".to_string(),
            BinOp::LooseEq => "==".to_string(),
            BinOp::StrictEq => "===".to_string(),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call { callee, args } => {
                format!("{}({})", callee.emit(), join(args, ", "))
            }
            TsExpr::Arrow { params, body } => {
                format!("({}) => {}", join(params, ", "), body.emit())
            }
            TsExpr::EmptyObject => "{}".to_string(),
            TsExpr::Member { object, prop } => member_access(&object.emit(), prop),
            TsExpr::New { callee, args } => {
                format!("new {}({})", callee.emit(), join(args, ", "))
            }
            TsExpr::BinOp { left, op, right } => {
                format!("{} {} {}", left.emit(), op.emit(), right.emit())
            }
            TsExpr::TypeOf(expr) => format!("typeof {}", expr.emit()),
            TsExpr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                format!("{} ? {} : {}", cond.emit(), then_expr.emit(), else_expr.emit())
            }
            TsExpr::Paren(expr) => format!("({})", expr.emit()),
            TsExpr::Array(items) => format!("[{}]", join(items, ", ")),
            TsExpr::Cast { expr, ty } => format!("{} as {}", expr.emit(), ty.emit()),
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        let mut out = match &self.ty {
            Some(ty) => format!("{}{opt}: {}", self.name, ty.emit()),
            None => format!("{}{opt}", self.name),
        };
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(&default.emit());
        }
        out
    }
}

// =============================================================================
// Statements
// =============================================================================

impl TsStmt {
    /// Emit at `depth` levels of `unit`, newline-terminated.
    pub fn emit_indented(&self, unit: &str, depth: usize) -> String {
        let prefix = unit.repeat(depth);
        match self {
            TsStmt::VarDecl { name, ty, init } => {
                let ty_str = ty
                    .as_ref()
                    .map(|t| format!(": {}", t.emit()))
                    .unwrap_or_default();
                format!("{prefix}const {name}{ty_str} = {};\n", init.emit())
            }
            TsStmt::Assign { target, value } => {
                format!("{prefix}{} = {};\n", target.emit(), value.emit())
            }
            TsStmt::Return(expr) => format!("{prefix}return {};\n", expr.emit()),
            TsStmt::If { cond, then } => {
                // The statement supplies its own parentheses.
                let cond = match cond {
                    TsExpr::Paren(inner) => inner.emit(),
                    other => other.emit(),
                };
                format!("{prefix}if ({cond}) {}", then.emit_indented(unit, 0))
            }
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl TsMethod {
    /// Emit as a class member at one level of `unit`.
    pub fn emit_member(&self, unit: &str) -> String {
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();
        let mut output = format!(
            "{unit}{}({}){return_type_str} {{\n",
            self.name,
            join(&self.params, ", "),
        );
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(unit, 2));
        }
        output.push_str(&format!("{unit}}}\n"));
        output
    }
}

impl TsClass {
    fn emit_members(&self, unit: &str) -> String {
        let mut output = String::new();
        for field in &self.fields {
            output.push_str(unit);
            output.push_str(&field.prop.emit());
            if let Some(init) = &field.init {
                output.push_str(" = ");
                output.push_str(&init.emit());
            }
            output.push_str(";\n");
        }

        let members = self.constructor.iter().chain(&self.methods);
        for member in members {
            // Blank line between member groups
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&member.emit_member(unit));
        }
        output
    }
}

impl TsDecl {
    /// Origin comment, opening line and members; the closing brace is left
    /// to the caller so custom output can be appended to the body.
    pub fn emit_open(&self, unit: &str) -> String {
        let mut output = format!("// shapets:{}\n", self.origin);
        let export = if self.exported { "export " } else { "" };
        match &self.kind {
            TsDeclKind::Interface { properties } => {
                output.push_str(&format!("{export}interface {} {{\n", self.name));
                for prop in properties {
                    output.push_str(&format!("{unit}{};\n", prop.emit()));
                }
            }
            TsDeclKind::Class(class) => {
                output.push_str(&format!("class {} {{\n", self.name));
                output.push_str(&class.emit_members(unit));
            }
            TsDeclKind::Omitted => {}
        }
        output
    }

    /// Whether a body is printed at all.
    pub fn has_body(&self) -> bool {
        !matches!(self.kind, TsDeclKind::Omitted)
    }

    /// The complete declaration.
    pub fn emit_with(&self, unit: &str) -> String {
        let mut output = self.emit_open(unit);
        if self.has_body() {
            output.push_str("}\n");
        }
        output
    }
}

// =============================================================================
// Tests
// =============================================================================
