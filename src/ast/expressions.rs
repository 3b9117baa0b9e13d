use super::Expr;
use crate::lexer::token::Token;

// Literals
#[derive(Debug, Clone)]
pub struct IntLiteralExpr {
    pub value: i32,
}

#[derive(Debug, Clone)]
pub struct LongLiteralExpr {
    pub value: i64,
}

/// Float and double literals keep their source spelling so emission does
/// not reformat the digits.
#[derive(Debug, Clone)]
pub struct FloatLiteralExpr {
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct DoubleLiteralExpr {
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct BoolLiteralExpr {
    pub value: bool,
}

#[derive(Debug, Clone)]
pub struct StringLiteralExpr {
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
}

// Complex
#[derive(Debug, Clone)]
pub struct ArrayLiteralExpr {
    pub elements: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct AddressOfExpr {
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct DereferenceExpr {
    pub operand: Box<Expr>,
}

/// A plain call; the callee is always a bare identifier in this language.
#[derive(Debug, Clone)]
pub struct FunctionCallExpr {
    pub name: String,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct FieldAccessExpr {
    pub base: Box<Expr>,
    pub field: String,
}

#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    pub receiver: Box<Expr>,
    pub method: String,
    pub arguments: Vec<Expr>,
}

/// One entry of a struct initializer; `name` is `None` for positional
/// entries.
#[derive(Debug, Clone)]
pub struct StructInitField {
    pub name: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone)]
pub struct StructInitExpr {
    pub name: String,
    pub fields: Vec<StructInitField>,
}

#[derive(Debug, Clone)]
pub struct UnionInitExpr {
    pub name: String,
    pub member: String,
    pub value: Box<Expr>,
}
