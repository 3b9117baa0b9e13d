use crate::{
    ast::{Expr, ExprKind, Function, Stmt, StmtKind},
    codegen::{
        registry::{SymbolTable, TypeRegistry},
        types::declared_type_string,
    },
    lexer::token::TokenKind,
};

/// Local type inference over an expression, yielding a C type string.
/// Everything unknown degrades to `int`.
pub fn infer_type(expr: &Expr, symbols: &SymbolTable, registry: &TypeRegistry) -> String {
    match &expr.kind {
        ExprKind::IntLiteral(_) => "int".to_string(),
        ExprKind::LongLiteral(_) => "long".to_string(),
        ExprKind::FloatLiteral(_) => "float".to_string(),
        ExprKind::DoubleLiteral(_) => "double".to_string(),
        ExprKind::StringLiteral(_) => "const char*".to_string(),
        ExprKind::BoolLiteral(_) => "int".to_string(),

        ExprKind::ArrayLiteral(literal) => match literal.elements.first() {
            Some(first) => infer_type(first, symbols, registry),
            None => "int".to_string(),
        },

        ExprKind::Dereference(deref) => {
            let operand = infer_type(&deref.operand, symbols, registry);
            match operand.strip_suffix('*') {
                Some(stripped) if !stripped.is_empty() => stripped.trim_end().to_string(),
                _ => "int".to_string(),
            }
        }

        ExprKind::AddressOf(addr) => {
            format!("{}*", infer_type(&addr.operand, symbols, registry))
        }

        ExprKind::Binary(binary) => {
            if binary.operator.kind == TokenKind::Assign {
                return infer_type(&binary.left, symbols, registry);
            }
            let left = infer_type(&binary.left, symbols, registry);
            let right = infer_type(&binary.right, symbols, registry);
            promote(&left, &right)
        }

        ExprKind::Prefix(prefix) => match prefix.operator.kind {
            TokenKind::Not => "int".to_string(),
            _ => infer_type(&prefix.right, symbols, registry),
        },

        ExprKind::Symbol(symbol) => {
            let from_table = symbols.symbol_type(&symbol.value);
            if !from_table.is_empty() {
                return from_table;
            }
            let from_registry = registry.variable_type(&symbol.value);
            if !from_registry.is_empty() {
                return from_registry;
            }
            "int".to_string()
        }

        ExprKind::Index(index) => {
            let array_type = infer_type(&index.array, symbols, registry);
            if let Some(open) = array_type.find('[') {
                return array_type[..open].trim_end().to_string();
            }
            match array_type.strip_suffix('*') {
                Some(stripped) if !stripped.is_empty() => stripped.trim_end().to_string(),
                _ => "int".to_string(),
            }
        }

        ExprKind::MethodCall(call) => {
            match resolve_struct_name(&call.receiver, symbols, registry) {
                Some(struct_name) => {
                    let ret = registry.method_return_type(&struct_name, &call.method);
                    if ret.is_empty() {
                        "int".to_string()
                    } else {
                        ret
                    }
                }
                None => "int".to_string(),
            }
        }

        ExprKind::StructInit(init) => {
            if registry.is_union(&init.name) {
                format!("union {}", init.name)
            } else {
                format!("struct {}", init.name)
            }
        }

        ExprKind::UnionInit(init) => format!("union {}", init.name),

        ExprKind::FieldAccess(access) => {
            match resolve_struct_name(&access.base, symbols, registry) {
                Some(base_name) => {
                    let field = registry.field_type(&base_name, &access.field);
                    if field.is_empty() {
                        "int".to_string()
                    } else {
                        field
                    }
                }
                None => "int".to_string(),
            }
        }

        // No function return-type table is maintained; plain calls
        // default to int.
        ExprKind::FunctionCall(_) => "int".to_string(),
    }
}

/// Standard numeric promotion: `double > float > long > int`. Any
/// occurrence in either operand wins.
fn promote(left: &str, right: &str) -> String {
    fn rank(ty: &str) -> u8 {
        match ty {
            "double" => 4,
            "float" => 3,
            "long" => 2,
            _ => 1,
        }
    }

    let winner = if rank(right) > rank(left) { right } else { left };
    match rank(winner) {
        1 => "int".to_string(),
        _ => winner.to_string(),
    }
}

/// Resolves the struct (or union) name behind a method-call receiver or
/// field-access base. Returns `None` when the type cannot be determined.
pub fn resolve_struct_name(
    expr: &Expr,
    symbols: &SymbolTable,
    registry: &TypeRegistry,
) -> Option<String> {
    match &expr.kind {
        ExprKind::Symbol(symbol) => {
            let mut var_type = symbols.symbol_type(&symbol.value);
            if var_type.is_empty() {
                var_type = registry.variable_type(&symbol.value);
            }
            type_string_to_name(&var_type, registry)
        }
        ExprKind::FieldAccess(access) => {
            let base_name = resolve_struct_name(&access.base, symbols, registry)?;
            let field_type = registry.field_type(&base_name, &access.field);
            type_string_to_name(&field_type, registry)
        }
        ExprKind::StructInit(init) => Some(init.name.clone()),
        ExprKind::UnionInit(init) => Some(init.name.clone()),
        ExprKind::AddressOf(addr) => resolve_struct_name(&addr.operand, symbols, registry),
        ExprKind::Dereference(deref) => resolve_struct_name(&deref.operand, symbols, registry),
        _ => None,
    }
}

/// Extracts the bare type name from a recorded string like `struct P`,
/// `union V` or `struct P*`.
fn type_string_to_name(type_string: &str, registry: &TypeRegistry) -> Option<String> {
    let trimmed = type_string.trim_end_matches('*').trim();

    for prefix in ["struct ", "union "] {
        if let Some(name) = trimmed.strip_prefix(prefix) {
            return Some(name.trim().to_string());
        }
    }

    if registry.is_known_type(trimmed) {
        return Some(trimmed.to_string());
    }

    None
}

/// Infers a function's return type from its body: single-expression
/// bodies use the expression's type, block bodies use the first `return`
/// found while recursing into nested blocks and both branches of `if`.
/// Parameters are installed first so expressions over them infer
/// correctly.
pub fn infer_return_type(function: &Function, registry: &TypeRegistry) -> Option<String> {
    let mut symbols = SymbolTable::new();
    for param in &function.parameters {
        symbols.add_symbol(&param.name, &declared_type_string(&param.explicit_type, registry));
    }

    infer_return_type_with(function, &mut symbols, registry)
}

/// Same as [`infer_return_type`], but on a caller-prepared symbol table
/// (used for methods, where `self` is pre-installed).
pub fn infer_return_type_with(
    function: &Function,
    symbols: &mut SymbolTable,
    registry: &TypeRegistry,
) -> Option<String> {
    for param in &function.parameters {
        if !symbols.has_symbol(&param.name) {
            symbols.add_symbol(&param.name, &declared_type_string(&param.explicit_type, registry));
        }
    }

    match &function.body.kind {
        StmtKind::Expression(stmt) => Some(infer_type(&stmt.expression, symbols, registry)),
        StmtKind::Block(block) => scan_for_return(&block.body, symbols, registry),
        _ => None,
    }
}

fn scan_for_return(
    stmts: &[Stmt],
    symbols: &SymbolTable,
    registry: &TypeRegistry,
) -> Option<String> {
    for stmt in stmts {
        match &stmt.kind {
            StmtKind::Return(ret) => {
                if let Some(value) = &ret.value {
                    return Some(infer_type(value, symbols, registry));
                }
            }
            StmtKind::Block(block) => {
                if let Some(found) = scan_for_return(&block.body, symbols, registry) {
                    return Some(found);
                }
            }
            StmtKind::If(if_stmt) => {
                let branch = std::slice::from_ref(if_stmt.then_branch.as_ref());
                if let Some(found) = scan_for_return(branch, symbols, registry) {
                    return Some(found);
                }
                if let Some(else_branch) = &if_stmt.else_branch {
                    let branch = std::slice::from_ref(else_branch.as_ref());
                    if let Some(found) = scan_for_return(branch, symbols, registry) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::parse};

    fn program_for(source: &str) -> crate::ast::Program {
        parse(tokenize(source).unwrap()).unwrap()
    }

    #[test]
    fn test_literal_inference() {
        let registry = TypeRegistry::new();
        let symbols = SymbolTable::new();
        let program = program_for(r#"def f() = { val a = 1; val b = 2L; val c = 1.5; val d = "x"; val e = true }"#);
        let StmtKind::Block(block) = &program.functions[0].body.kind else {
            panic!("expected block");
        };
        let expected = ["int", "long", "float", "const char*", "int"];
        for (stmt, want) in block.body.iter().zip(expected) {
            let StmtKind::VarDecl(decl) = &stmt.kind else {
                panic!("expected var decl");
            };
            let got = infer_type(decl.assigned_value.as_ref().unwrap(), &symbols, &registry);
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_numeric_promotion() {
        let registry = TypeRegistry::new();
        let mut symbols = SymbolTable::new();
        symbols.add_symbol("d", "double");
        symbols.add_symbol("i", "int");

        let program = program_for("def f() = { var x = d + i }");
        let StmtKind::Block(block) = &program.functions[0].body.kind else {
            panic!("expected block");
        };
        let StmtKind::VarDecl(decl) = &block.body[0].kind else {
            panic!("expected var decl");
        };
        assert_eq!(
            infer_type(decl.assigned_value.as_ref().unwrap(), &symbols, &registry),
            "double"
        );
    }

    #[test]
    fn test_return_type_inference_from_block() {
        let registry = TypeRegistry::new();
        let program = program_for("def f(x: long) = { if (x > 0L) { return x } return 0L }");
        assert_eq!(
            infer_return_type(&program.functions[0], &registry),
            Some("long".to_string())
        );
    }

    #[test]
    fn test_expression_body_inference() {
        let registry = TypeRegistry::new();
        let program = program_for("def f(x: double) = x * 2.0");
        assert_eq!(
            infer_return_type(&program.functions[0], &registry),
            Some("double".to_string())
        );
    }

    #[test]
    fn test_resolve_struct_name_through_field() {
        let mut registry = TypeRegistry::new();
        registry.register_struct("Outer");
        registry.register_struct("Inner");
        registry.add_field("Outer", "inner", "struct Inner");
        let mut symbols = SymbolTable::new();
        symbols.add_symbol("o", "struct Outer");

        let program = program_for("def f() = { o.inner.touch() }");
        let StmtKind::Block(block) = &program.functions[0].body.kind else {
            panic!("expected block");
        };
        let StmtKind::Expression(stmt) = &block.body[0].kind else {
            panic!("expected expression");
        };
        let ExprKind::MethodCall(call) = &stmt.expression.kind else {
            panic!("expected method call");
        };
        assert_eq!(
            resolve_struct_name(&call.receiver, &symbols, &registry),
            Some("Inner".to_string())
        );
    }
}
