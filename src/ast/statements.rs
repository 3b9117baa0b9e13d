use super::{Expr, Stmt, Type};

#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub is_constant: bool,
    pub variable_name: String,
    pub explicit_type: Option<Type>,
    pub assigned_value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// `for (iterator <- collection) body`; the collection is either a
/// `range(...)` call or an expression naming an array.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub iterator: String,
    pub collection: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}
