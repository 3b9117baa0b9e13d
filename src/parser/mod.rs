mod expr;
mod item;
mod lookups;
mod stmt;
mod types;

use std::collections::HashSet;

use anyhow::Result;
use thin_vec::ThinVec;

use crate::{
    ast::Program,
    errors::builders,
    lexer::token::{Token, TokenKind},
    parser::lookups::create_token_lookups,
};

pub struct Parser {
    tokens: ThinVec<Token>,
    pos: usize,
    /// Union names seen so far; `Name{.m = e}` for one of these parses as
    /// a union initializer instead of a struct initializer.
    known_unions: HashSet<String>,
}

impl Parser {
    pub fn new(tokens: ThinVec<Token>) -> Self {
        create_token_lookups();
        Self {
            tokens,
            pos: 0,
            known_unions: HashSet::new(),
        }
    }

    pub fn current_token(&self) -> Token {
        if self.pos < self.tokens.len() {
            self.tokens[self.pos].clone()
        } else {
            let prev = self.tokens[self.tokens.len() - 1].clone();
            Token::new(TokenKind::Eof, "", prev.line, prev.column)
        }
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current_token();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_token_kind() != TokenKind::Eof
    }

    pub fn expect_error(&mut self, expected_kind: TokenKind, err: Option<String>) -> Result<Token> {
        let token = self.current_token();

        if token.kind != expected_kind {
            let err = err.unwrap_or(format!(
                "Expected {} but received {} instead",
                expected_kind, token.kind
            ));
            return Err(builders::syntax(err).at(token.line, token.column).into());
        }

        Ok(self.advance())
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token> {
        self.expect_error(expected_kind, None)
    }

    pub fn error_at_current(&self, message: impl Into<String>) -> anyhow::Error {
        let token = self.current_token();
        builders::syntax(message).at(token.line, token.column).into()
    }

    pub fn is_known_union(&self, name: &str) -> bool {
        self.known_unions.contains(name)
    }

    pub fn register_union(&mut self, name: &str) {
        self.known_unions.insert(name.to_string());
    }
}

/// Parses a whole token stream into a [`Program`], failing on the first
/// syntax error.
pub fn parse(tokens: ThinVec<Token>) -> Result<Program> {
    let mut parser = Parser::new(tokens);
    item::parse_program(&mut parser)
}

pub use types::parse_type;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{ExprKind, StmtKind},
        lexer::tokenize,
    };

    fn parse_source(source: &str) -> Result<Program> {
        parse(tokenize(source).unwrap())
    }

    #[test]
    fn test_function_with_expression_body() {
        let program = parse_source("def double(x: int) -> int = x * 2").unwrap();
        assert_eq!(program.functions.len(), 1);
        let func = &program.functions[0];
        assert_eq!(func.name, "double");
        assert_eq!(func.parameters.len(), 1);
        assert!(func.return_type.is_some());
        assert!(matches!(func.body.kind, StmtKind::Expression(_)));
    }

    #[test]
    fn test_void_parameter_list() {
        let program = parse_source("def nop(void) = {}").unwrap();
        assert!(program.functions[0].parameters.is_empty());
    }

    #[test]
    fn test_val_requires_initializer() {
        let err = parse_source("def main() -> int = { val x: int; return 0 }").unwrap_err();
        assert!(err.to_string().contains("must be initialized"));
    }

    #[test]
    fn test_struct_and_impl() {
        let program = parse_source(
            "struct P { x: int y: int }\n\
             impl P { def sum(self: void) -> int = self.x + self.y }",
        )
        .unwrap();
        assert_eq!(program.structs.len(), 1);
        assert_eq!(program.structs[0].fields.len(), 2);
        assert_eq!(program.impls.len(), 1);
        assert_eq!(program.impls[0].receiver, crate::ast::ReceiverKind::Value);
        assert_eq!(program.impls[0].methods[0].name, "sum");
    }

    #[test]
    fn test_pointer_receiver_impl() {
        let program = parse_source("struct C { n: int }\nimpl *C { def bump(self: void) -> int = 1 }")
            .unwrap();
        assert_eq!(program.impls[0].receiver, crate::ast::ReceiverKind::Pointer);
    }

    #[test]
    fn test_struct_init_vs_identifier() {
        let program = parse_source("def main() -> int = { val p = P{.x=3,.y=4}; return 0 }").unwrap();
        let StmtKind::Block(block) = &program.functions[0].body.kind else {
            panic!("expected block body");
        };
        let StmtKind::VarDecl(decl) = &block.body[0].kind else {
            panic!("expected var decl");
        };
        let init = decl.assigned_value.as_ref().unwrap();
        assert!(matches!(init.kind, ExprKind::StructInit(_)));
    }

    #[test]
    fn test_union_init_recognized() {
        let program = parse_source(
            "union V { i: int f: float }\n\
             def main() -> int = { val v = V{.i = 3}; return 0 }",
        )
        .unwrap();
        let StmtKind::Block(block) = &program.functions[0].body.kind else {
            panic!("expected block body");
        };
        let StmtKind::VarDecl(decl) = &block.body[0].kind else {
            panic!("expected var decl");
        };
        assert!(matches!(
            decl.assigned_value.as_ref().unwrap().kind,
            ExprKind::UnionInit(_)
        ));
    }

    #[test]
    fn test_chained_assignment_rejected() {
        let err = parse_source("def main() -> int = { a = b = c; return 0 }").unwrap_err();
        assert!(err.to_string().contains("Chained assignment"));
    }

    #[test]
    fn test_for_loop_shapes() {
        let program = parse_source(
            "def main() -> int = { for (i <- range(1, 5)) print(i); for (x <- xs) print(x); return 0 }",
        )
        .unwrap();
        let StmtKind::Block(block) = &program.functions[0].body.kind else {
            panic!("expected block body");
        };
        assert!(matches!(block.body[0].kind, StmtKind::For(_)));
        assert!(matches!(block.body[1].kind, StmtKind::For(_)));
    }

    #[test]
    fn test_parse_error_carries_position() {
        colored::control::set_override(false);
        let err = parse_source("def main( -> int = 0").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Parse error at line 1"), "got: {text}");
    }
}
