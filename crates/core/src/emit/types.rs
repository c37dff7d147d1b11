//! TypeScript IR for code generation.
//!
//! Registered structs are lowered into these nodes (see `codegen`) and then
//! printed through the `Emit` trait (see `print`):
//! - TsType: types (primitives, arrays, unions, index signatures, ...)
//! - TsExpr: expressions (identifiers, calls, arrows, ...)
//! - TsStmt: statements inside constructors and methods
//! - TsDecl: one interface or class

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, any
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B
    Union(Vec<TsType>),
    /// Index signature: { [key: K]: V }
    Index {
        /// Key type
        key: Box<TsType>,
        /// Value type
        value: Box<TsType>,
    },
    /// Tuple type: [A, B]
    Tuple(Vec<TsType>),
    /// Named type reference: Date, User
    Ref(String),
}

impl TsType {
    /// `T | null`
    pub fn nullable(self) -> Self {
        TsType::Union(vec![self, TsType::Primitive(TsPrimitive::Null)])
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Any,
}

/// Property of an interface or class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    /// Property key, quoted on output when needed
    pub name: String,
    /// Property type
    pub ty: TsType,
    /// Printed with `?`
    pub optional: bool,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsLiteral {
    /// Printed single-quoted
    String(String),
    /// Integer literal
    Int(i64),
    /// true / false
    Bool(bool),
    /// null
    Null,
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: 'bar', 42
    Literal(TsLiteral),
    /// Function call: foo(a, b)
    #[allow(missing_docs)]
    Call { callee: Box<TsExpr>, args: Vec<TsExpr> },
    /// Arrow function: (v) => new Foo(v)
    #[allow(missing_docs)]
    Arrow {
        params: Vec<TsParam>,
        body: Box<TsExpr>,
    },
    /// Empty object literal: {}
    EmptyObject,
    /// Member access: foo.bar, or foo['bar-baz'] when needed
    #[allow(missing_docs)]
    Member { object: Box<TsExpr>, prop: String },
    /// new Foo(...)
    #[allow(missing_docs)]
    New { callee: Box<TsExpr>, args: Vec<TsExpr> },
    /// Binary operation: a && b
    #[allow(missing_docs)]
    BinOp {
        left: Box<TsExpr>,
        op: BinOp,
        right: Box<TsExpr>,
    },
    /// typeof x
    TypeOf(Box<TsExpr>),
    /// Ternary/conditional: cond ? a : b
    #[allow(missing_docs)]
    Ternary {
        cond: Box<TsExpr>,
        then_expr: Box<TsExpr>,
        else_expr: Box<TsExpr>,
    },
    /// Parenthesized expression
    Paren(Box<TsExpr>),
    /// Array literal: [a, b]
    Array(Vec<TsExpr>),
    /// Type cast: expr as Type
    #[allow(missing_docs)]
    Cast { expr: Box<TsExpr>, ty: TsType },
}

impl TsExpr {
    /// `name`
    pub fn ident(name: &str) -> Self {
        TsExpr::Ident(name.to_string())
    }

    /// `'value'`
    pub fn string(value: &str) -> Self {
        TsExpr::Literal(TsLiteral::String(value.to_string()))
    }

    /// `null`
    pub fn null() -> Self {
        TsExpr::Literal(TsLiteral::Null)
    }

    /// `self.prop`
    pub fn member(self, prop: &str) -> Self {
        TsExpr::Member {
            object: Box::new(self),
            prop: prop.to_string(),
        }
    }

    /// `callee(args)`
    pub fn call(callee: &str, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(TsExpr::ident(callee)),
            args,
        }
    }

    /// `self.name(args)`
    pub fn method(self, name: &str, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(self.member(name)),
            args,
        }
    }

    /// `new class(args)`
    pub fn new_instance(class: &str, args: Vec<TsExpr>) -> Self {
        TsExpr::New {
            callee: Box::new(TsExpr::ident(class)),
            args,
        }
    }

    /// `self op right`
    pub fn bin(self, op: BinOp, right: TsExpr) -> Self {
        TsExpr::BinOp {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// `(self)`
    pub fn paren(self) -> Self {
        TsExpr::Paren(Box::new(self))
    }

    /// `self ? then_expr : else_expr`
    pub fn ternary(self, then_expr: TsExpr, else_expr: TsExpr) -> Self {
        TsExpr::Ternary {
            cond: Box::new(self),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// &&
    And,
    /// in
    In,
    /// ==
    LooseEq,
    /// ===
    StrictEq,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    /// Name or destructuring pattern
    pub name: String,
    /// Annotation; none in untyped output
    pub ty: Option<TsType>,
    /// Printed with `?`
    pub optional: bool,
    /// Default value
    pub default: Option<TsExpr>,
}

impl TsParam {
    /// Required parameter without a default.
    pub fn new(name: &str, ty: Option<TsType>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            optional: false,
            default: None,
        }
    }
}

// =============================================================================
// Statements and declarations
// =============================================================================

/// Statement in a constructor or method body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsStmt {
    /// const declaration
    #[allow(missing_docs)]
    VarDecl {
        name: String,
        ty: Option<TsType>,
        init: TsExpr,
    },
    /// target = value;
    #[allow(missing_docs)]
    Assign { target: TsExpr, value: TsExpr },
    /// return value;
    Return(TsExpr),
    /// if (cond) stmt, on one line
    #[allow(missing_docs)]
    If { cond: TsExpr, then: Box<TsStmt> },
}

/// Constructor or method of a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsMethod {
    /// Method name; `constructor` for the constructor
    pub name: String,
    /// Parameters
    pub params: Vec<TsParam>,
    /// Return annotation
    pub return_type: Option<TsType>,
    /// Statements
    pub body: Vec<TsStmt>,
}

/// Field declaration of a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsClassField {
    /// Name and type
    pub prop: TsProp,
    /// Inline initializer
    pub init: Option<TsExpr>,
}

/// Class members
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsClass {
    /// Field declarations
    pub fields: Vec<TsClassField>,
    /// Constructor, printed before the methods
    pub constructor: Option<TsMethod>,
    /// Other methods
    pub methods: Vec<TsMethod>,
}

/// Declaration kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsDeclKind {
    /// interface Foo { ... }
    #[allow(missing_docs)]
    Interface { properties: Vec<TsProp> },
    /// class Foo { ... }
    Class(TsClass),
    /// Nothing but the origin comment (interfaces in plain JavaScript)
    Omitted,
}

/// One emitted type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsDecl {
    /// Emitted type name
    pub name: String,
    /// Fully-qualified Rust type, printed as a traceability comment
    pub origin: String,
    /// Interface printed with `export`
    pub exported: bool,
    /// Declaration body
    pub kind: TsDeclKind,
}
