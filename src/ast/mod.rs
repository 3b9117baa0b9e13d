pub mod expressions;
pub mod statements;
pub mod types;

use crate::ast::{expressions::*, statements::*, types::*};

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntLiteral(IntLiteralExpr),
    LongLiteral(LongLiteralExpr),
    FloatLiteral(FloatLiteralExpr),
    DoubleLiteral(DoubleLiteralExpr),
    BoolLiteral(BoolLiteralExpr),
    StringLiteral(StringLiteralExpr),
    Symbol(SymbolExpr),
    ArrayLiteral(ArrayLiteralExpr),
    Index(IndexExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    AddressOf(AddressOfExpr),
    Dereference(DereferenceExpr),
    FunctionCall(FunctionCallExpr),
    FieldAccess(FieldAccessExpr),
    MethodCall(MethodCallExpr),
    StructInit(StructInitExpr),
    UnionInit(UnionInitExpr),
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    VarDecl(VarDeclStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
}

#[derive(Debug, Clone)]
pub struct Type {
    pub kind: TypeKind,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Basic(BasicType),
    Pointer(PointerType),
    Array(ArrayType),
    Named(NamedType),
}

/// A named parameter of a function or method.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub explicit_type: Type,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: Stmt,
}

#[derive(Debug, Clone)]
pub struct StructField {
    pub name: String,
    pub explicit_type: Type,
}

#[derive(Debug, Clone)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone)]
pub struct UnionDef {
    pub name: String,
    pub members: Vec<StructField>,
}

/// How the `self` value of an impl block is taken. `Pointer` and
/// `Reference` lower identically; the distinction is purely syntactic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    Value,
    Pointer,
    Reference,
}

impl ReceiverKind {
    pub fn is_pointer(&self) -> bool {
        matches!(self, ReceiverKind::Pointer | ReceiverKind::Reference)
    }
}

#[derive(Debug, Clone)]
pub struct ImplBlock {
    pub receiver: ReceiverKind,
    pub struct_name: String,
    pub methods: Vec<Function>,
}

/// A whole translation unit in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub functions: Vec<Function>,
    pub globals: Vec<Stmt>,
    pub structs: Vec<StructDef>,
    pub unions: Vec<UnionDef>,
    pub impls: Vec<ImplBlock>,
}
