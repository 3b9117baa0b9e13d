use crate::{
    ast::{types::ArrayType, Expr, ExprKind, Type, TypeKind},
    codegen::registry::TypeRegistry,
};

/// Maps an L type to the C type spelling used in declarations. Array
/// types yield only the element type; the `[N]` suffix belongs at the
/// variable position and is produced by [`array_declaration`].
pub fn c_type(ty: &Type, registry: &TypeRegistry) -> String {
    match &ty.kind {
        TypeKind::Basic(basic) => match basic.name.as_str() {
            "bool" => "int".to_string(),
            "string" => "char*".to_string(),
            other => other.to_string(),
        },
        TypeKind::Pointer(pointer) => format!("{}*", c_type(&pointer.pointee, registry)),
        TypeKind::Array(array) => c_type(&array.element, registry),
        TypeKind::Named(named) => {
            if registry.is_union(&named.name) {
                format!("union {}", named.name)
            } else {
                format!("struct {}", named.name)
            }
        }
    }
}

/// The type string recorded for variables and parameters. Arrays keep
/// their element count (`int[5]`) so collection loops can recover the
/// bound later; everything else matches [`c_type`].
pub fn declared_type_string(ty: &Type, registry: &TypeRegistry) -> String {
    match &ty.kind {
        TypeKind::Array(array) => {
            let element = c_type(&array.element, registry);
            match array.size.as_deref().and_then(int_literal_value) {
                Some(n) => format!("{element}[{n}]"),
                None => format!("{element}[]"),
            }
        }
        _ => c_type(ty, registry),
    }
}

/// Builds `T name[N]...` for an array-typed variable. A missing size is
/// taken from an array-literal initializer; a size that is not an integer
/// literal falls back to `[1]`.
pub fn array_declaration(
    array: &ArrayType,
    var_name: &str,
    initializer: Option<&Expr>,
    registry: &TypeRegistry,
) -> String {
    let base = c_type(&array.element, registry);
    let mut result = format!("{base} {var_name}");

    let mut dimensions: Vec<String> = Vec::new();

    if array.size.is_none() {
        match initializer.map(|e| &e.kind) {
            Some(ExprKind::ArrayLiteral(literal)) => {
                dimensions.push(format!("[{}]", literal.elements.len()));
            }
            _ => dimensions.push("[]".to_string()),
        }
    } else {
        collect_array_dimensions(array, &mut dimensions);
    }

    for dim in &dimensions {
        result.push_str(dim);
    }

    result
}

fn collect_array_dimensions(array: &ArrayType, dimensions: &mut Vec<String>) {
    let mut current = Some(array);
    while let Some(arr) = current {
        match arr.size.as_deref().and_then(int_literal_value) {
            Some(n) => dimensions.push(format!("[{n}]")),
            None if arr.size.is_some() => dimensions.push("[1]".to_string()),
            None => dimensions.push("[]".to_string()),
        }
        current = match &arr.element.kind {
            TypeKind::Array(inner) => Some(inner),
            _ => None,
        };
    }
}

pub fn int_literal_value(expr: &Expr) -> Option<i64> {
    match &expr.kind {
        ExprKind::IntLiteral(lit) => Some(lit.value as i64),
        ExprKind::LongLiteral(lit) => Some(lit.value),
        _ => None,
    }
}

/// Reads the element count back out of a recorded array type string like
/// `int[5]`.
pub fn recorded_array_size(type_string: &str) -> Option<i64> {
    let open = type_string.find('[')?;
    let close = type_string.rfind(']')?;
    type_string.get(open + 1..close)?.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        expressions::IntLiteralExpr,
        types::{BasicType, NamedType, PointerType},
    };

    fn int_type() -> Type {
        Type::new(TypeKind::Basic(BasicType {
            name: "int".to_string(),
        }))
    }

    #[test]
    fn test_basic_mapping() {
        let registry = TypeRegistry::new();
        let bool_ty = Type::new(TypeKind::Basic(BasicType {
            name: "bool".to_string(),
        }));
        let string_ty = Type::new(TypeKind::Basic(BasicType {
            name: "string".to_string(),
        }));
        assert_eq!(c_type(&bool_ty, &registry), "int");
        assert_eq!(c_type(&string_ty, &registry), "char*");
        assert_eq!(c_type(&int_type(), &registry), "int");
    }

    #[test]
    fn test_pointer_and_named_mapping() {
        let mut registry = TypeRegistry::new();
        registry.register_struct("P");
        registry.register_union("V");

        let ptr = Type::new(TypeKind::Pointer(PointerType {
            pointee: Box::new(int_type()),
        }));
        assert_eq!(c_type(&ptr, &registry), "int*");

        let named = Type::new(TypeKind::Named(NamedType {
            name: "P".to_string(),
        }));
        assert_eq!(c_type(&named, &registry), "struct P");

        let union_ty = Type::new(TypeKind::Named(NamedType {
            name: "V".to_string(),
        }));
        assert_eq!(c_type(&union_ty, &registry), "union V");
    }

    #[test]
    fn test_array_declaration_with_size() {
        let registry = TypeRegistry::new();
        let array = ArrayType {
            element: Box::new(int_type()),
            size: Some(Box::new(Expr::new(ExprKind::IntLiteral(IntLiteralExpr {
                value: 5,
            })))),
        };
        assert_eq!(array_declaration(&array, "a", None, &registry), "int a[5]");
    }

    #[test]
    fn test_recorded_array_size() {
        assert_eq!(recorded_array_size("int[5]"), Some(5));
        assert_eq!(recorded_array_size("int[]"), None);
        assert_eq!(recorded_array_size("int*"), None);
    }
}
