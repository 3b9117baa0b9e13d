use super::{Expr, Type};

#[derive(Debug, Clone)]
pub struct BasicType {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct PointerType {
    pub pointee: Box<Type>,
}

/// `[N]T`; `size` is `None` when the length is inferred from the
/// initializer.
#[derive(Debug, Clone)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub size: Option<Box<Expr>>,
}

/// A user-defined struct or union name used in type position.
#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: String,
}
