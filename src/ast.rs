/// A line/column pair pointing into the source text (both 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

/// Binary operators. Operand domains (int vs float comparison) are a
/// documentation contract, not a checked property: a tag operand that
/// evaluates outside the operator's domain is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Integer comparisons
    Lt,
    Lte,
    Gt,
    Gte,
    // Float comparisons (<: and >:)
    LtF,
    GtF,
    Eq,
    Neq,
    // Boolean
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal, kept verbatim as lexed.
    Num(String),
    /// Engine tag (`#...#`) or the reserved constants `pi` / `e`.
    Tag(String),
    Ident(String),
    Call(String, Vec<Expr>),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `if(cond ? then)`
    If2(Box<Expr>, Box<Expr>),
    /// `if(cond ? then : else)`
    If3(Box<Expr>, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Pos,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Pos) -> Self {
        Expr { kind, pos }
    }
}

/// Node identity is structural; positions are diagnostics only.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub name: String,
    pub pos: Pos,
    pub params: Vec<String>,
    /// Constant bindings in declaration order; a binding may reference
    /// parameters and earlier bindings only.
    pub consts: Vec<(String, Expr)>,
    pub body: Expr,
}
