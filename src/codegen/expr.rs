use crate::{
    ast::{
        expressions::{FunctionCallExpr, MethodCallExpr, StructInitExpr, UnionInitExpr},
        Expr, ExprKind,
    },
    codegen::{
        infer::{infer_type, resolve_struct_name},
        CodeGenerator,
    },
};

impl CodeGenerator {
    pub(crate) fn generate_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntLiteral(lit) => self.emit(&lit.value.to_string()),
            ExprKind::LongLiteral(lit) => self.emit(&format!("{}L", lit.value)),
            ExprKind::FloatLiteral(lit) => self.emit(&format!("{}f", lit.value)),
            ExprKind::DoubleLiteral(lit) => self.emit(&lit.value),
            ExprKind::BoolLiteral(lit) => self.emit(if lit.value { "1" } else { "0" }),
            ExprKind::StringLiteral(lit) => self.generate_string_literal(&lit.value),
            ExprKind::Symbol(symbol) => self.emit(&symbol.value),

            ExprKind::ArrayLiteral(literal) => {
                self.emit("{");
                for (i, element) in literal.elements.iter().enumerate() {
                    if i > 0 {
                        self.emit(", ");
                    }
                    self.generate_expr(element);
                }
                self.emit("}");
            }

            ExprKind::Index(index) => {
                self.generate_postfix_base(&index.array);
                self.emit("[");
                self.generate_expr(&index.index);
                self.emit("]");
            }

            ExprKind::Binary(binary) => {
                self.emit("(");
                self.generate_expr(&binary.left);
                self.emit(" ");
                self.emit(&binary.operator.lexeme);
                self.emit(" ");
                self.generate_expr(&binary.right);
                self.emit(")");
            }

            ExprKind::Prefix(prefix) => {
                self.emit(&prefix.operator.lexeme);
                self.emit("(");
                self.generate_expr(&prefix.right);
                self.emit(")");
            }

            ExprKind::AddressOf(addr) => {
                self.emit("&(");
                self.generate_expr(&addr.operand);
                self.emit(")");
            }

            ExprKind::Dereference(deref) => {
                self.emit("*(");
                self.generate_expr(&deref.operand);
                self.emit(")");
            }

            ExprKind::FunctionCall(call) => self.generate_call(call),

            ExprKind::FieldAccess(access) => {
                self.generate_postfix_base(&access.base);
                self.emit(".");
                self.emit(&access.field);
            }

            ExprKind::MethodCall(call) => self.generate_method_call(call),

            ExprKind::StructInit(init) => self.generate_struct_init(init),

            ExprKind::UnionInit(init) => self.generate_union_init(init),
        }
    }

    /// A dereference in postfix-base position needs parentheses, or the
    /// postfix operator would bind tighter than the `*`.
    fn generate_postfix_base(&mut self, base: &Expr) {
        if matches!(base.kind, ExprKind::Dereference(_)) {
            self.emit("(");
            self.generate_expr(base);
            self.emit(")");
        } else {
            self.generate_expr(base);
        }
    }

    fn generate_string_literal(&mut self, value: &str) {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('"');
        for c in value.chars() {
            match c {
                '\n' => escaped.push_str("\\n"),
                '\t' => escaped.push_str("\\t"),
                '\r' => escaped.push_str("\\r"),
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                _ => escaped.push(c),
            }
        }
        escaped.push('"');
        self.emit(&escaped);
    }

    fn generate_call(&mut self, call: &FunctionCallExpr) {
        // print is polymorphic through the _Generic macro; multiple
        // arguments become a statement-position call sequence.
        if call.name == "print" {
            match call.arguments.len() {
                0 => {
                    self.emit("printf(\"\\n\")");
                    return;
                }
                1 => {
                    self.emit("print(");
                    self.generate_expr(&call.arguments[0]);
                    self.emit(")");
                    return;
                }
                _ => {
                    for (i, arg) in call.arguments.iter().enumerate() {
                        if i > 0 {
                            self.emit("; ");
                        }
                        self.emit("print(");
                        self.generate_expr(arg);
                        self.emit(")");
                    }
                    return;
                }
            }
        }

        if call.name == "range" {
            match call.arguments.len() {
                1 => self.emit("range1"),
                2 => self.emit("range2"),
                3 => self.emit("range3"),
                _ => self.emit(&call.name),
            }
        } else {
            self.emit(&call.name);
        }

        self.emit("(");
        for (i, arg) in call.arguments.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.generate_expr(arg);
        }
        self.emit(")");
    }

    /// Lowers `recv.m(args)` to `__Struct_m[_p](recv, args)`. Receiver
    /// resolution goes through the symbol table and the type registry;
    /// an unresolvable receiver is surfaced as a tagged comment plus the
    /// `UnknownStruct` placeholder rather than silently guessed.
    fn generate_method_call(&mut self, call: &MethodCallExpr) {
        let struct_name = resolve_struct_name(&call.receiver, &self.symbols, &self.registry);

        let Some(struct_name) = struct_name else {
            let receiver_text = self.expr_text(&call.receiver);
            self.emit(&format!(
                "/* ERROR: Could not determine struct type for {receiver_text} */ "
            ));
            self.emit(&format!("__UnknownStruct_{}(", call.method));
            self.emit(&receiver_text);
            for arg in &call.arguments {
                self.emit(", ");
                self.generate_expr(arg);
            }
            self.emit(")");
            return;
        };

        let is_pointer_method = self
            .registry
            .method(&struct_name, &call.method)
            .map(|m| m.is_pointer_receiver)
            .unwrap_or(false);

        let suffix = if is_pointer_method { "_p" } else { "" };
        self.emit(&format!("__{}_{}{}(", struct_name, call.method, suffix));

        let receiver_type = infer_type(&call.receiver, &self.symbols, &self.registry);
        let receiver_is_pointer = receiver_type.ends_with('*');

        if is_pointer_method && !receiver_is_pointer {
            self.emit("&(");
            self.generate_expr(&call.receiver);
            self.emit(")");
        } else if !is_pointer_method && receiver_is_pointer {
            self.emit("*(");
            self.generate_expr(&call.receiver);
            self.emit(")");
        } else {
            self.generate_expr(&call.receiver);
        }

        for arg in &call.arguments {
            self.emit(", ");
            self.generate_expr(arg);
        }
        self.emit(")");
    }

    fn generate_struct_init(&mut self, init: &StructInitExpr) {
        let keyword = if self.registry.is_union(&init.name) {
            "union"
        } else {
            "struct"
        };
        self.emit(&format!("({keyword} {}){{", init.name));

        for (i, field) in init.fields.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            match &field.name {
                Some(name) => {
                    self.emit(&format!(".{name} = "));
                    self.generate_expr(&field.value);
                }
                None => self.generate_expr(&field.value),
            }
        }

        self.emit("}");
    }

    fn generate_union_init(&mut self, init: &UnionInitExpr) {
        self.emit(&format!("(union {}){{.{} = ", init.name, init.member));
        self.generate_expr(&init.value);
        self.emit("}");
    }
}
