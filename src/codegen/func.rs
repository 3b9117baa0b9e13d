use crate::{
    ast::{Function, ImplBlock, StmtKind, TypeKind},
    codegen::{
        infer::infer_return_type_with,
        registry::SymbolTable,
        types::{c_type, declared_type_string},
        CodeGenerator,
    },
};

impl CodeGenerator {
    pub(crate) fn generate_function(&mut self, function: &Function) {
        self.emit_function_with(function, &function.name, None);
    }

    /// Methods reuse the function emitter with a reserved lowered name
    /// and a synthesized `self` first parameter.
    pub(crate) fn generate_method(&mut self, impl_block: &ImplBlock, method: &Function) {
        let is_pointer = impl_block.receiver.is_pointer();
        let lowered_name = format!(
            "__{}_{}{}",
            impl_block.struct_name,
            method.name,
            if is_pointer { "_p" } else { "" }
        );

        let self_param = if is_pointer {
            format!("struct {}* self", impl_block.struct_name)
        } else {
            format!("struct {} self", impl_block.struct_name)
        };

        self.emit_function_with(method, &lowered_name, Some(self_param));
    }

    fn emit_function_with(&mut self, function: &Function, name: &str, self_param: Option<String>) {
        // Fresh symbol table per function; parameters keep their
        // declared array types so loop bounds stay recoverable.
        self.symbols = SymbolTable::new();
        if let Some(self_param) = &self_param {
            let self_type = self_param
                .strip_suffix(" self")
                .unwrap_or(self_param)
                .to_string();
            self.symbols.add_symbol("self", &self_type);
        }
        for param in &function.parameters {
            if self_param.is_some() && param.name == "self" {
                continue;
            }
            let recorded = declared_type_string(&param.explicit_type, &self.registry);
            self.symbols.add_symbol(&param.name, &recorded);
        }

        let return_type = self.effective_return_type(function);

        self.emit(&format!("{return_type} {name}("));

        // A parameter literally named `self` is the receiver marker of a
        // method; the synthesized receiver replaces it.
        let user_params: Vec<&crate::ast::Param> = function
            .parameters
            .iter()
            .filter(|p| self_param.is_none() || p.name != "self")
            .collect();

        if user_params.is_empty() && self_param.is_none() {
            self.emit("void");
        } else {
            let mut first = true;
            if let Some(self_param) = &self_param {
                self.emit(self_param);
                first = false;
            }
            for param in user_params {
                if !first {
                    self.emit(", ");
                }
                first = false;
                self.emit_parameter(param);
            }
        }

        self.emit(") ");
        self.emit_function_body(function, &return_type);
    }

    /// Array parameters decay to pointers in C signatures.
    fn emit_parameter(&mut self, param: &crate::ast::Param) {
        let text = match &param.explicit_type.kind {
            TypeKind::Array(array) => {
                format!("{}* {}", c_type(&array.element, &self.registry), param.name)
            }
            _ => format!(
                "{} {}",
                c_type(&param.explicit_type, &self.registry),
                param.name
            ),
        };
        self.emit(&text);
    }

    fn effective_return_type(&mut self, function: &Function) -> String {
        if let Some(ty) = &function.return_type {
            return c_type(ty, &self.registry);
        }

        let mut symbols = self.symbols.clone();
        infer_return_type_with(function, &mut symbols, &self.registry)
            .unwrap_or_else(|| "void".to_string())
    }

    fn emit_function_body(&mut self, function: &Function, return_type: &str) {
        match &function.body.kind {
            StmtKind::Block(_) => {
                self.generate_stmt(&function.body);
            }
            StmtKind::Expression(expr_stmt) => {
                // Single-expression body: return the value unless the
                // function is void.
                self.emit("{\n");
                self.indent_level += 1;
                if return_type != "void" {
                    self.emit_indent();
                    self.emit("return ");
                    self.generate_expr(&expr_stmt.expression);
                    self.emit(";\n");
                } else {
                    self.generate_stmt(&function.body);
                }
                self.indent_level -= 1;
                self.emit_line("}");
            }
            _ => self.generate_stmt(&function.body),
        }
    }
}
