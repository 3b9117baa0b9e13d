mod builtin;
mod expr;
mod func;
mod infer;
mod registry;
mod stmt;
mod types;
mod usage;

pub use registry::{MethodInfo, SymbolTable, TypeRegistry};
pub use usage::UsageTracker;

use crate::{
    ast::{
        Expr, ExprKind, Program, Stmt, StmtKind, Type, TypeKind,
    },
    codegen::{
        infer::infer_return_type_with,
        types::{array_declaration, c_type, declared_type_string},
    },
};

/// Drives the two passes over a program: a usage/registry pre-pass and
/// the C emission pass. Owns the output buffer, the indent level, the
/// usage tracker, the type registry and the per-function symbol table;
/// everything is reset at the start of each `generate` call.
pub struct CodeGenerator {
    output: String,
    indent_level: usize,
    usage: UsageTracker,
    registry: TypeRegistry,
    symbols: SymbolTable,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            usage: UsageTracker::new(),
            registry: TypeRegistry::new(),
            symbols: SymbolTable::new(),
        }
    }

    pub fn generate(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.usage = UsageTracker::new();
        self.registry.clear();
        self.symbols.clear();

        self.analyze_program(program);

        self.generate_builtins();
        self.generate_struct_defs(program);
        self.generate_union_defs(program);
        self.generate_globals(program);
        self.generate_impl_blocks(program);
        self.generate_functions(program);

        std::mem::take(&mut self.output)
    }

    // ---- emission helpers ----

    pub(crate) fn emit(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub(crate) fn emit_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str("    ");
        }
    }

    pub(crate) fn emit_line(&mut self, text: &str) {
        self.emit_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Renders an expression to a string without disturbing the main
    /// buffer's final content.
    pub(crate) fn expr_text(&mut self, expr: &Expr) -> String {
        let start = self.output.len();
        self.generate_expr(expr);
        self.output.split_off(start)
    }

    // ---- pre-pass ----

    fn analyze_program(&mut self, program: &Program) {
        // Names first so field types can refer to any struct or union
        // regardless of definition order.
        for struct_def in &program.structs {
            self.registry.register_struct(&struct_def.name);
        }
        for union_def in &program.unions {
            self.registry.register_union(&union_def.name);
        }

        for struct_def in &program.structs {
            for field in &struct_def.fields {
                let field_type = declared_type_string(&field.explicit_type, &self.registry);
                self.registry.add_field(&struct_def.name, &field.name, &field_type);
            }
        }
        for union_def in &program.unions {
            for member in &union_def.members {
                let member_type = declared_type_string(&member.explicit_type, &self.registry);
                self.registry.add_field(&union_def.name, &member.name, &member_type);
            }
        }

        for impl_block in &program.impls {
            for method in &impl_block.methods {
                let is_pointer = impl_block.receiver.is_pointer();

                let mut symbols = SymbolTable::new();
                let self_type = if is_pointer {
                    format!("struct {}*", impl_block.struct_name)
                } else {
                    format!("struct {}", impl_block.struct_name)
                };
                symbols.add_symbol("self", &self_type);

                let return_type = match &method.return_type {
                    Some(ty) => c_type(ty, &self.registry),
                    None => infer_return_type_with(method, &mut symbols, &self.registry)
                        .unwrap_or_else(|| "void".to_string()),
                };

                let parameter_types = method
                    .parameters
                    .iter()
                    .filter(|p| p.name != "self")
                    .map(|p| c_type(&p.explicit_type, &self.registry))
                    .collect();

                self.registry.add_method(
                    &impl_block.struct_name,
                    MethodInfo {
                        name: method.name.clone(),
                        return_type,
                        parameter_types,
                        is_pointer_receiver: is_pointer,
                    },
                );
            }
        }

        for global in &program.globals {
            self.analyze_stmt(global);
            self.register_global(global);
        }

        for impl_block in &program.impls {
            for method in &impl_block.methods {
                self.analyze_stmt(&method.body);
            }
        }

        for function in &program.functions {
            self.analyze_stmt(&function.body);
        }
    }

    fn register_global(&mut self, stmt: &Stmt) {
        if let StmtKind::VarDecl(decl) = &stmt.kind {
            let recorded = match &decl.explicit_type {
                Some(ty) => declared_type_string(ty, &self.registry),
                None => match &decl.assigned_value {
                    Some(init) => {
                        infer::infer_type(init, &self.symbols, &self.registry)
                    }
                    None => "int".to_string(),
                },
            };
            self.registry.register_variable(&decl.variable_name, &recorded);
        }
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => {
                if let Some(init) = &decl.assigned_value {
                    self.analyze_expr(init);
                }
                if let Some(ty) = &decl.explicit_type {
                    self.track_type_usage(ty);
                }
            }
            StmtKind::Expression(expr_stmt) => self.analyze_expr(&expr_stmt.expression),
            StmtKind::Block(block) => {
                for inner in &block.body {
                    self.analyze_stmt(inner);
                }
            }
            StmtKind::If(if_stmt) => {
                self.analyze_expr(&if_stmt.condition);
                self.analyze_stmt(&if_stmt.then_branch);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.analyze_stmt(else_branch);
                }
            }
            StmtKind::While(while_stmt) => {
                self.analyze_expr(&while_stmt.condition);
                self.analyze_stmt(&while_stmt.body);
            }
            StmtKind::For(for_stmt) => {
                self.analyze_expr(&for_stmt.collection);
                self.analyze_stmt(&for_stmt.body);
            }
            StmtKind::Return(ret) => {
                if let Some(value) = &ret.value {
                    self.analyze_expr(value);
                }
            }
        }
    }

    fn track_type_usage(&mut self, ty: &Type) {
        if let TypeKind::Basic(basic) = &ty.kind {
            self.usage.track_type(&basic.name);
        }
    }

    fn analyze_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::FunctionCall(call) => {
                self.usage.track_function(&call.name);
                for arg in &call.arguments {
                    self.analyze_expr(arg);
                }
            }
            ExprKind::MethodCall(call) => {
                self.analyze_expr(&call.receiver);
                for arg in &call.arguments {
                    self.analyze_expr(arg);
                }
            }
            ExprKind::Binary(binary) => {
                self.analyze_expr(&binary.left);
                self.analyze_expr(&binary.right);
            }
            ExprKind::Prefix(prefix) => self.analyze_expr(&prefix.right),
            ExprKind::Index(index) => {
                self.analyze_expr(&index.array);
                self.analyze_expr(&index.index);
            }
            ExprKind::AddressOf(addr) => self.analyze_expr(&addr.operand),
            ExprKind::Dereference(deref) => self.analyze_expr(&deref.operand),
            ExprKind::ArrayLiteral(literal) => {
                for element in &literal.elements {
                    self.analyze_expr(element);
                }
            }
            ExprKind::FieldAccess(access) => self.analyze_expr(&access.base),
            ExprKind::StructInit(init) => {
                for field in &init.fields {
                    self.analyze_expr(&field.value);
                }
            }
            ExprKind::UnionInit(init) => self.analyze_expr(&init.value),
            // Literals and bare symbols carry no usage information.
            _ => {}
        }
    }

    // ---- emission pass ----

    fn generate_struct_defs(&mut self, program: &Program) {
        for struct_def in &program.structs {
            self.emit_line(&format!("struct {} {{", struct_def.name));
            self.indent_level += 1;
            for field in &struct_def.fields {
                self.emit_field(&field.name, &field.explicit_type);
            }
            self.indent_level -= 1;
            self.emit_line("};");
            self.emit("\n");
        }
    }

    fn generate_union_defs(&mut self, program: &Program) {
        for union_def in &program.unions {
            self.emit_line(&format!("union {} {{", union_def.name));
            self.indent_level += 1;
            for member in &union_def.members {
                self.emit_field(&member.name, &member.explicit_type);
            }
            self.indent_level -= 1;
            self.emit_line("};");
            self.emit("\n");
        }
    }

    fn emit_field(&mut self, name: &str, ty: &Type) {
        match &ty.kind {
            TypeKind::Array(array) => {
                let decl = array_declaration(array, name, None, &self.registry);
                self.emit_line(&format!("{decl};"));
            }
            _ => {
                let field_type = c_type(ty, &self.registry);
                self.emit_line(&format!("{field_type} {name};"));
            }
        }
    }

    fn generate_globals(&mut self, program: &Program) {
        for global in &program.globals {
            self.generate_stmt(global);
        }

        if !program.globals.is_empty() {
            self.emit("\n");
        }
    }

    fn generate_impl_blocks(&mut self, program: &Program) {
        for impl_block in &program.impls {
            for method in &impl_block.methods {
                self.generate_method(impl_block, method);
                self.emit("\n");
            }
        }
    }

    fn generate_functions(&mut self, program: &Program) {
        for function in &program.functions {
            self.generate_function(function);
            self.emit("\n");
        }
    }
}

/// Convenience wrapper: one fresh generator per program.
pub fn generate(program: &Program) -> String {
    CodeGenerator::new().generate(program)
}
