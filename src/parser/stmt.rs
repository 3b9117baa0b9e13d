use anyhow::Result;

use crate::{
    ast::{
        statements::{
            BlockStmt, ExpressionStmt, ForStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt,
        },
        Stmt, StmtKind,
    },
    lexer::token::TokenKind,
    parser::{
        expr::parse_expr,
        lookups::BindingPower,
        types::parse_type,
        Parser,
    },
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt> {
    match parser.current_token_kind() {
        TokenKind::Val | TokenKind::Var => parse_var_decl_statement(parser),
        TokenKind::LBrace => parse_block_statement(parser),
        TokenKind::If => parse_if_statement(parser),
        TokenKind::While => parse_while_statement(parser),
        TokenKind::For => parse_for_statement(parser),
        TokenKind::Return => parse_return_statement(parser),
        _ => parse_expression_statement(parser),
    }
}

pub fn parse_var_decl_statement(parser: &mut Parser) -> Result<Stmt> {
    let var_token = parser.advance();
    let is_constant = var_token.kind == TokenKind::Val;

    let variable_name = parser
        .expect_error(
            TokenKind::Identifier,
            Some(String::from("Expected variable name")),
        )?
        .lexeme;

    let mut explicit_type = None;
    if parser.match_kind(TokenKind::Colon) {
        explicit_type = Some(parse_type(parser)?);
    }

    let mut assigned_value = None;
    if parser.match_kind(TokenKind::Assign) {
        assigned_value = Some(parse_expr(parser, BindingPower::DefaultBp)?);
    } else if is_constant {
        return Err(crate::errors::builders::syntax("'val' declarations must be initialized")
            .at(var_token.line, var_token.column)
            .into());
    }

    parser.match_kind(TokenKind::Semicolon);

    Ok(Stmt::new(StmtKind::VarDecl(VarDeclStmt {
        is_constant,
        variable_name,
        explicit_type,
        assigned_value,
    })))
}

pub fn parse_block_statement(parser: &mut Parser) -> Result<Stmt> {
    parser.expect(TokenKind::LBrace)?;

    let mut body: Vec<Stmt> = Vec::new();

    while parser.has_tokens() && !parser.check(TokenKind::RBrace) {
        body.push(parse_stmt(parser)?);
    }

    parser.expect_error(TokenKind::RBrace, Some(String::from("Expected '}' after block")))?;

    Ok(Stmt::new(StmtKind::Block(BlockStmt { body })))
}

fn parse_if_statement(parser: &mut Parser) -> Result<Stmt> {
    parser.expect(TokenKind::If)?;
    parser.expect_error(TokenKind::LParen, Some(String::from("Expected '(' after 'if'")))?;
    let condition = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_error(TokenKind::RParen, Some(String::from("Expected ')' after condition")))?;

    let then_branch = Box::new(parse_stmt(parser)?);

    let else_branch = if parser.match_kind(TokenKind::Else) {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::new(StmtKind::If(IfStmt {
        condition,
        then_branch,
        else_branch,
    })))
}

fn parse_while_statement(parser: &mut Parser) -> Result<Stmt> {
    parser.expect(TokenKind::While)?;
    parser.expect_error(TokenKind::LParen, Some(String::from("Expected '(' after 'while'")))?;
    let condition = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_error(TokenKind::RParen, Some(String::from("Expected ')' after condition")))?;

    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::new(StmtKind::While(WhileStmt { condition, body })))
}

/// `for (ident <- expr) stmt` covers both range loops and array
/// iteration; the code generator picks the lowering.
fn parse_for_statement(parser: &mut Parser) -> Result<Stmt> {
    parser.expect(TokenKind::For)?;
    parser.expect_error(TokenKind::LParen, Some(String::from("Expected '(' after 'for'")))?;

    let iterator = parser
        .expect_error(TokenKind::Identifier, Some(String::from("Expected iterator name")))?
        .lexeme;
    parser.expect_error(
        TokenKind::LeftArrow,
        Some(String::from("Expected '<-' after iterator name")),
    )?;

    let collection = parse_expr(parser, BindingPower::DefaultBp)?;

    parser.expect_error(TokenKind::RParen, Some(String::from("Expected ')' after for clause")))?;

    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::new(StmtKind::For(ForStmt {
        iterator,
        collection,
        body,
    })))
}

fn parse_return_statement(parser: &mut Parser) -> Result<Stmt> {
    parser.expect(TokenKind::Return)?;

    let value = if !parser.check(TokenKind::Semicolon) && !parser.check(TokenKind::RBrace) {
        Some(parse_expr(parser, BindingPower::DefaultBp)?)
    } else {
        None
    };

    parser.match_kind(TokenKind::Semicolon);

    Ok(Stmt::new(StmtKind::Return(ReturnStmt { value })))
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Stmt> {
    let expression = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.match_kind(TokenKind::Semicolon);

    Ok(Stmt::new(StmtKind::Expression(ExpressionStmt { expression })))
}
