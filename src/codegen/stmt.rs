use crate::{
    ast::{
        expressions::FunctionCallExpr,
        statements::{ForStmt, IfStmt, VarDeclStmt, WhileStmt},
        ExprKind, Stmt, StmtKind, TypeKind,
    },
    codegen::{
        infer::infer_type,
        types::{array_declaration, c_type, declared_type_string, recorded_array_size},
        CodeGenerator,
    },
};

impl CodeGenerator {
    pub(crate) fn generate_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.generate_var_decl(decl),
            StmtKind::Block(block) => {
                self.emit_line("{");
                self.indent_level += 1;
                for inner in &block.body {
                    self.generate_stmt(inner);
                }
                self.indent_level -= 1;
                self.emit_line("}");
            }
            StmtKind::If(if_stmt) => self.generate_if(if_stmt),
            StmtKind::While(while_stmt) => self.generate_while(while_stmt),
            StmtKind::For(for_stmt) => self.generate_for(for_stmt),
            StmtKind::Return(ret) => {
                self.emit_indent();
                self.emit("return");
                if let Some(value) = &ret.value {
                    self.emit(" ");
                    self.generate_expr(value);
                }
                self.emit(";\n");
            }
            StmtKind::Expression(expr_stmt) => {
                self.emit_indent();
                self.generate_expr(&expr_stmt.expression);
                self.emit(";\n");
            }
        }
    }

    fn generate_var_decl(&mut self, decl: &VarDeclStmt) {
        self.emit_indent();

        // The type string recorded for later lookups; arrays keep their
        // element count.
        let recorded: String;

        if let Some(ty) = &decl.explicit_type {
            if let TypeKind::Array(array) = &ty.kind {
                // const arrays break when passed to pointer parameters,
                // so the qualifier is dropped for them.
                let text = array_declaration(
                    array,
                    &decl.variable_name,
                    decl.assigned_value.as_ref(),
                    &self.registry,
                );
                self.emit(&text);

                recorded = match decl.assigned_value.as_ref().map(|e| &e.kind) {
                    Some(ExprKind::ArrayLiteral(lit)) if array.size.is_none() => {
                        let element = c_type(&array.element, &self.registry);
                        format!("{element}[{}]", lit.elements.len())
                    }
                    _ => declared_type_string(ty, &self.registry),
                };
            } else {
                if decl.is_constant {
                    self.emit("const ");
                }
                let declared = c_type(ty, &self.registry);
                self.emit(&format!("{declared} {}", decl.variable_name));
                recorded = declared;
            }
        } else if let Some(init) = &decl.assigned_value {
            if let ExprKind::ArrayLiteral(literal) = &init.kind {
                let element = infer_type(init, &self.symbols, &self.registry);
                let len = literal.elements.len();
                self.emit(&format!("{element} {}[{len}]", decl.variable_name));
                recorded = format!("{element}[{len}]");
            } else {
                let inferred = infer_type(init, &self.symbols, &self.registry);
                if decl.is_constant {
                    self.emit("const ");
                }
                self.emit(&format!("{inferred} {}", decl.variable_name));
                recorded = inferred;
            }
        } else {
            self.emit(&format!("int {}", decl.variable_name));
            recorded = "int".to_string();
        }

        if let Some(init) = &decl.assigned_value {
            self.emit(" = ");
            self.generate_expr(init);
        }
        self.emit(";\n");

        self.symbols.add_symbol(&decl.variable_name, &recorded);
        self.registry.register_variable(&decl.variable_name, &recorded);
    }

    fn generate_if(&mut self, node: &IfStmt) {
        self.emit_indent();
        self.emit("if (");
        self.generate_expr(&node.condition);
        self.emit(") ");
        self.generate_branch(&node.then_branch);

        if let Some(else_branch) = &node.else_branch {
            self.emit_indent();
            self.emit("else ");
            if matches!(else_branch.kind, StmtKind::Block(_) | StmtKind::If(_)) {
                self.emit("\n");
                self.generate_stmt(else_branch);
            } else {
                self.wrap_in_braces(else_branch);
            }
        }
    }

    fn generate_while(&mut self, node: &WhileStmt) {
        self.emit_indent();
        self.emit("while (");
        self.generate_expr(&node.condition);
        self.emit(") ");
        self.generate_branch(&node.body);
    }

    /// A block body is emitted as-is; anything else gets braces so the
    /// emitted C always has a compound statement.
    fn generate_branch(&mut self, body: &Stmt) {
        if matches!(body.kind, StmtKind::Block(_)) {
            self.emit("\n");
            self.generate_stmt(body);
        } else {
            self.wrap_in_braces(body);
        }
    }

    fn wrap_in_braces(&mut self, body: &Stmt) {
        self.emit("{\n");
        self.indent_level += 1;
        self.generate_stmt(body);
        self.indent_level -= 1;
        self.emit_line("}");
    }

    fn generate_for(&mut self, node: &ForStmt) {
        if let ExprKind::FunctionCall(call) = &node.collection.kind {
            if call.name == "range" && (1..=3).contains(&call.arguments.len()) {
                self.generate_for_range(node, call);
                return;
            }
        }

        self.generate_for_array(node);
    }

    fn generate_for_range(&mut self, node: &ForStmt, range_call: &FunctionCallExpr) {
        self.emit_indent();

        let iter = &node.iterator;
        match range_call.arguments.len() {
            1 => {
                self.emit(&format!("for (int {iter} = 0; {iter} < "));
                self.generate_expr(&range_call.arguments[0]);
                self.emit(&format!("; {iter}++)"));
            }
            2 => {
                self.emit(&format!("for (int {iter} = "));
                self.generate_expr(&range_call.arguments[0]);
                self.emit(&format!("; {iter} < "));
                self.generate_expr(&range_call.arguments[1]);
                self.emit(&format!("; {iter}++)"));
            }
            _ => {
                self.emit(&format!("for (int {iter} = "));
                self.generate_expr(&range_call.arguments[0]);
                self.emit(&format!("; {iter} < "));
                self.generate_expr(&range_call.arguments[1]);
                self.emit(&format!("; {iter} += "));
                self.generate_expr(&range_call.arguments[2]);
                self.emit(")");
            }
        }

        self.emit(" ");
        self.symbols.add_symbol(&node.iterator, "int");
        self.generate_branch(&node.body);
    }

    /// Array iteration: the bound comes from the declared element count
    /// when the collection's type is known, otherwise from a
    /// `sizeof` quotient that only works for locally declared arrays.
    /// Pointer-typed collections have no recoverable length.
    fn generate_for_array(&mut self, node: &ForStmt) {
        let collection_type = match &node.collection.kind {
            ExprKind::Symbol(symbol) => {
                let mut ty = self.symbols.symbol_type(&symbol.value);
                if ty.is_empty() {
                    ty = self.registry.variable_type(&symbol.value);
                }
                ty
            }
            _ => String::new(),
        };

        if collection_type.ends_with('*') {
            let name = self.expr_text(&node.collection);
            self.emit_indent();
            self.emit(&format!(
                "/* ERROR: Cannot iterate over pointer '{name}' without a known size */\n"
            ));
            self.emit_indent();
            self.emit("for (int _i = 0; _i < 0; _i++) {\n");
        } else if let Some(count) = recorded_array_size(&collection_type) {
            self.emit_indent();
            self.emit(&format!("for (int _i = 0; _i < {count}; _i++) {{\n"));
        } else {
            let name = self.expr_text(&node.collection);
            self.emit_indent();
            self.emit(&format!(
                "for (int _i = 0; _i < sizeof({name})/sizeof({name}[0]); _i++) {{\n"
            ));
        }

        self.indent_level += 1;
        self.emit_indent();
        self.emit(&format!("int {} = ", node.iterator));
        self.generate_expr(&node.collection);
        self.emit("[_i];\n");
        self.symbols.add_symbol(&node.iterator, "int");

        // A block body is flattened into the loop so the iterator
        // binding shares its scope.
        if let StmtKind::Block(block) = &node.body.kind {
            for inner in &block.body {
                self.generate_stmt(inner);
            }
        } else {
            self.generate_stmt(&node.body);
        }

        self.indent_level -= 1;
        self.emit_line("}");
    }
}
