// crates/parser/src/ast.rs

use std::ops::Range;

pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Imaginary(f64),
    String(String),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    LogicalAnd,
    LogicalOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Plus,
    Not,
}

/// Type annotation as written: `int`, `list[float]`, `Matrix`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub name: String,
    pub args: Vec<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),

    Identifier(String),

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },

    List(Vec<Expr>),

    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },

    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        kwargs: Vec<(String, Expr)>,
    },

    Attribute {
        target: Box<Expr>,
        name: String,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Expression without a meaningful source position (tests, desugaring)
    pub fn dummy(kind: ExprKind) -> Self {
        Self { kind, span: 0..0 }
    }

    /// Name of the called function when this is a call of a plain identifier
    pub fn callee_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Call { func, .. } => match &func.kind {
                ExprKind::Identifier(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_hint: Option<TypeExpr>,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `from module import a, b` (`*` is kept as a name) or `import module`
    Import {
        module: String,
        names: Vec<String>,
    },

    FunctionDef {
        name: String,
        params: Vec<Param>,
        return_type: Option<TypeExpr>,
        body: Vec<Stmt>,
    },

    /// `x: T = value` or bare `x: T`
    VariableDecl {
        name: String,
        type_hint: TypeExpr,
        value: Option<Expr>,
    },

    Assignment {
        target: Expr,
        value: Expr,
    },

    If {
        condition: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
    },

    While {
        condition: Expr,
        body: Vec<Stmt>,
    },

    For {
        var_name: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },

    Return {
        value: Option<Expr>,
    },

    Pass,

    Expr(Expr),
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn dummy(kind: StmtKind) -> Self {
        Self { kind, span: 0..0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}
