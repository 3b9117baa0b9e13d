use anyhow::Result;

use crate::{
    ast::{
        types::{ArrayType, BasicType, NamedType, PointerType},
        Type, TypeKind,
    },
    lexer::token::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower, Parser},
};

/// `[size?]T`, `*T`, a primitive keyword, or a user type name.
pub fn parse_type(parser: &mut Parser) -> Result<Type> {
    if parser.match_kind(TokenKind::LBracket) {
        let size = if !parser.check(TokenKind::RBracket) {
            Some(Box::new(parse_expr(parser, BindingPower::DefaultBp)?))
        } else {
            None
        };
        parser.expect_error(
            TokenKind::RBracket,
            Some(String::from("Expected ']' after array size")),
        )?;

        let element = Box::new(parse_type(parser)?);
        return Ok(Type::new(TypeKind::Array(ArrayType { element, size })));
    }

    if parser.match_kind(TokenKind::Star) {
        let pointee = Box::new(parse_type(parser)?);
        return Ok(Type::new(TypeKind::Pointer(PointerType { pointee })));
    }

    let token = parser.current_token();
    if let Some(name) = token.kind.type_name() {
        parser.advance();
        return Ok(Type::new(TypeKind::Basic(BasicType {
            name: name.to_string(),
        })));
    }

    if token.kind == TokenKind::Identifier {
        parser.advance();
        return Ok(Type::new(TypeKind::Named(NamedType { name: token.lexeme })));
    }

    Err(parser.error_at_current("Expected type"))
}
