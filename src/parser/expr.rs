use anyhow::Result;

use crate::{
    ast::{
        expressions::{
            AddressOfExpr, ArrayLiteralExpr, BinaryExpr, BoolLiteralExpr, DereferenceExpr,
            DoubleLiteralExpr, FieldAccessExpr, FloatLiteralExpr, FunctionCallExpr, IndexExpr,
            IntLiteralExpr, LongLiteralExpr, MethodCallExpr, PrefixExpr, StringLiteralExpr,
            StructInitExpr, StructInitField, SymbolExpr, UnionInitExpr,
        },
        Expr, ExprKind,
    },
    lexer::token::TokenKind,
    parser::{
        lookups::{BindingPower, BP_LU, LED_LU, NUD_LU},
        Parser,
    },
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr> {
    let token = parser.current_token();

    let nud_fn = NUD_LU
        .get()
        .expect("token lookups not initialized")
        .get(&token.kind)
        .copied()
        .ok_or_else(|| parser.error_at_current(format!("Unexpected token `{}`", token.lexeme)))?;

    let mut left = nud_fn(parser)?;

    loop {
        let current_bp = BP_LU
            .get()
            .expect("token lookups not initialized")
            .get(&parser.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::DefaultBp);

        if current_bp <= bp {
            break;
        }

        let led_fn = LED_LU
            .get()
            .expect("token lookups not initialized")
            .get(&parser.current_token_kind())
            .copied()
            .ok_or_else(|| {
                parser.error_at_current(format!(
                    "Unexpected token `{}` in expression",
                    parser.current_token().lexeme
                ))
            })?;

        left = led_fn(parser, left, current_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr> {
    let token = parser.advance();

    let kind = match token.kind {
        TokenKind::IntLiteral => {
            let value = token.lexeme.parse::<i32>().map_err(|_| {
                parser.error_at_current(format!("Integer literal out of range: {}", token.lexeme))
            })?;
            ExprKind::IntLiteral(IntLiteralExpr { value })
        }
        TokenKind::LongLiteral => {
            let value = token.lexeme.parse::<i64>().map_err(|_| {
                parser.error_at_current(format!("Long literal out of range: {}", token.lexeme))
            })?;
            ExprKind::LongLiteral(LongLiteralExpr { value })
        }
        TokenKind::FloatLiteral => ExprKind::FloatLiteral(FloatLiteralExpr {
            value: token.lexeme,
        }),
        TokenKind::DoubleLiteral => ExprKind::DoubleLiteral(DoubleLiteralExpr {
            value: token.lexeme,
        }),
        TokenKind::StringLiteral => ExprKind::StringLiteral(StringLiteralExpr {
            value: token.lexeme,
        }),
        TokenKind::True => ExprKind::BoolLiteral(BoolLiteralExpr { value: true }),
        TokenKind::False => ExprKind::BoolLiteral(BoolLiteralExpr { value: false }),
        _ => {
            return Err(parser.error_at_current(format!(
                "Cannot create primary expression from `{}`",
                token.lexeme
            )));
        }
    };

    Ok(Expr::new(kind))
}

/// An identifier is a struct or union initializer when `{` follows
/// immediately; otherwise it stays a bare symbol and the postfix loop
/// decides whether it becomes a call.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr> {
    let name = parser.expect(TokenKind::Identifier)?.lexeme;

    if !parser.check(TokenKind::LBrace) {
        return Ok(Expr::new(ExprKind::Symbol(SymbolExpr { value: name })));
    }

    parser.advance();

    let mut fields: Vec<StructInitField> = Vec::new();

    if !parser.check(TokenKind::RBrace) {
        loop {
            if parser.match_kind(TokenKind::Dot) {
                let field_name = parser
                    .expect_error(
                        TokenKind::Identifier,
                        Some(String::from("Expected field name after '.'")),
                    )?
                    .lexeme;
                parser.expect_error(
                    TokenKind::Assign,
                    Some(String::from("Expected '=' after field name")),
                )?;
                let value = parse_expr(parser, BindingPower::DefaultBp)?;
                fields.push(StructInitField {
                    name: Some(field_name),
                    value,
                });
            } else {
                let value = parse_expr(parser, BindingPower::DefaultBp)?;
                fields.push(StructInitField { name: None, value });
            }

            if !parser.match_kind(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect_error(
        TokenKind::RBrace,
        Some(String::from("Expected '}' after struct fields")),
    )?;

    // A single designated entry naming a known union is a union
    // initializer.
    if fields.len() == 1 && fields[0].name.is_some() && parser.is_known_union(&name) {
        let field = fields.remove(0);
        let member = field.name.expect("checked above");
        return Ok(Expr::new(ExprKind::UnionInit(UnionInitExpr {
            name,
            member,
            value: Box::new(field.value),
        })));
    }

    Ok(Expr::new(ExprKind::StructInit(StructInitExpr { name, fields })))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::new(ExprKind::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })))
}

pub fn parse_assignment_expr(parser: &mut Parser, assigne: Expr, _bp: BindingPower) -> Result<Expr> {
    let operator = parser.advance();
    let value = parse_expr(parser, BindingPower::Assignment)?;

    if parser.check(TokenKind::Assign) {
        return Err(parser.error_at_current("Chained assignment is not allowed"));
    }

    Ok(Expr::new(ExprKind::Binary(BinaryExpr {
        left: Box::new(assigne),
        operator,
        right: Box::new(value),
    })))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr> {
    let operator = parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(ExprKind::Prefix(PrefixExpr {
        operator,
        right: Box::new(right),
    })))
}

pub fn parse_address_of_expr(parser: &mut Parser) -> Result<Expr> {
    parser.expect(TokenKind::Ampersand)?;
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(ExprKind::AddressOf(AddressOfExpr {
        operand: Box::new(operand),
    })))
}

pub fn parse_dereference_expr(parser: &mut Parser) -> Result<Expr> {
    parser.expect(TokenKind::Star)?;
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(ExprKind::Dereference(DereferenceExpr {
        operand: Box::new(operand),
    })))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr> {
    parser.expect(TokenKind::LParen)?;
    let expr = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_error(
        TokenKind::RParen,
        Some(String::from("Expected ')' after expression")),
    )?;
    Ok(expr)
}

/// `{ e1, e2, ... }` in expression position.
pub fn parse_array_literal_expr(parser: &mut Parser) -> Result<Expr> {
    parser.expect(TokenKind::LBrace)?;

    let mut elements: Vec<Expr> = Vec::new();

    if !parser.check(TokenKind::RBrace) {
        loop {
            elements.push(parse_expr(parser, BindingPower::DefaultBp)?);
            if !parser.match_kind(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect_error(
        TokenKind::RBrace,
        Some(String::from("Expected '}' after array elements")),
    )?;

    Ok(Expr::new(ExprKind::ArrayLiteral(ArrayLiteralExpr { elements })))
}

fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>> {
    let mut arguments: Vec<Expr> = Vec::new();

    if !parser.check(TokenKind::RParen) {
        loop {
            arguments.push(parse_expr(parser, BindingPower::DefaultBp)?);
            if !parser.match_kind(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect_error(
        TokenKind::RParen,
        Some(String::from("Expected ')' after arguments")),
    )?;

    Ok(arguments)
}

pub fn parse_function_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr> {
    parser.expect(TokenKind::LParen)?;

    let name = match &left.kind {
        ExprKind::Symbol(sym) => sym.value.clone(),
        _ => return Err(parser.error_at_current("Invalid function call")),
    };

    let arguments = parse_arguments(parser)?;

    Ok(Expr::new(ExprKind::FunctionCall(FunctionCallExpr {
        name,
        arguments,
    })))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr> {
    parser.expect(TokenKind::LBracket)?;
    let index = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_error(
        TokenKind::RBracket,
        Some(String::from("Expected ']' after array index")),
    )?;

    Ok(Expr::new(ExprKind::Index(IndexExpr {
        array: Box::new(left),
        index: Box::new(index),
    })))
}

/// `.name` is a method call when `(` follows, a field access otherwise.
pub fn parse_member_access_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr> {
    parser.expect(TokenKind::Dot)?;

    let member = parser
        .expect_error(
            TokenKind::Identifier,
            Some(String::from("Expected field or method name after '.'")),
        )?
        .lexeme;

    if parser.match_kind(TokenKind::LParen) {
        let arguments = parse_arguments(parser)?;
        return Ok(Expr::new(ExprKind::MethodCall(MethodCallExpr {
            receiver: Box::new(left),
            method: member,
            arguments,
        })));
    }

    Ok(Expr::new(ExprKind::FieldAccess(FieldAccessExpr {
        base: Box::new(left),
        field: member,
    })))
}
