use anyhow::Result;

use crate::{
    ast::{
        statements::ExpressionStmt,
        Function, ImplBlock, Param, Program, ReceiverKind, Stmt, StmtKind, StructDef, StructField,
        UnionDef,
    },
    lexer::token::TokenKind,
    parser::{
        expr::parse_expr,
        lookups::BindingPower,
        stmt::{parse_block_statement, parse_var_decl_statement},
        types::parse_type,
        Parser,
    },
};

pub fn parse_program(parser: &mut Parser) -> Result<Program> {
    let mut program = Program::default();

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Def => program.functions.push(parse_function(parser)?),
            TokenKind::Val | TokenKind::Var => {
                program.globals.push(parse_var_decl_statement(parser)?)
            }
            TokenKind::Struct => program.structs.push(parse_struct_def(parser)?),
            TokenKind::Union => program.unions.push(parse_union_def(parser)?),
            TokenKind::Impl => program.impls.push(parse_impl_block(parser)?),
            _ => {
                return Err(parser.error_at_current(
                    "Expected function, global declaration, struct, union, or impl block",
                ));
            }
        }
    }

    Ok(program)
}

/// `def name(params) [-> type] = (block | expr)`
pub fn parse_function(parser: &mut Parser) -> Result<Function> {
    parser.expect(TokenKind::Def)?;

    let name = parser
        .expect_error(TokenKind::Identifier, Some(String::from("Expected function name")))?
        .lexeme;

    parser.expect_error(
        TokenKind::LParen,
        Some(String::from("Expected '(' after function name")),
    )?;

    let mut parameters: Vec<Param> = Vec::new();

    if !parser.check(TokenKind::RParen) {
        if parser.check(TokenKind::Void) {
            // `(void)` is an explicitly empty parameter list
            parser.advance();
        } else {
            loop {
                let param_name = parser
                    .expect_error(
                        TokenKind::Identifier,
                        Some(String::from("Expected parameter name")),
                    )?
                    .lexeme;
                parser.expect_error(
                    TokenKind::Colon,
                    Some(String::from("Expected ':' after parameter name")),
                )?;
                let explicit_type = parse_type(parser)?;

                parameters.push(Param {
                    name: param_name,
                    explicit_type,
                });

                if !parser.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
    }

    parser.expect_error(
        TokenKind::RParen,
        Some(String::from("Expected ')' after parameters")),
    )?;

    let return_type = if parser.match_kind(TokenKind::Arrow) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect_error(
        TokenKind::Assign,
        Some(String::from("Expected '=' before function body")),
    )?;

    let body = if parser.check(TokenKind::LBrace) {
        parse_block_statement(parser)?
    } else {
        let expression = parse_expr(parser, BindingPower::DefaultBp)?;
        Stmt::new(StmtKind::Expression(ExpressionStmt { expression }))
    };

    Ok(Function {
        name,
        parameters,
        return_type,
        body,
    })
}

pub fn parse_struct_def(parser: &mut Parser) -> Result<StructDef> {
    parser.expect(TokenKind::Struct)?;
    let name = parser
        .expect_error(TokenKind::Identifier, Some(String::from("Expected struct name")))?
        .lexeme;
    parser.expect_error(
        TokenKind::LBrace,
        Some(String::from("Expected '{' after struct name")),
    )?;

    let fields = parse_field_list(parser)?;

    parser.expect_error(
        TokenKind::RBrace,
        Some(String::from("Expected '}' after struct fields")),
    )?;

    Ok(StructDef { name, fields })
}

pub fn parse_union_def(parser: &mut Parser) -> Result<UnionDef> {
    parser.expect(TokenKind::Union)?;
    let name = parser
        .expect_error(TokenKind::Identifier, Some(String::from("Expected union name")))?
        .lexeme;
    parser.expect_error(
        TokenKind::LBrace,
        Some(String::from("Expected '{' after union name")),
    )?;

    let members = parse_field_list(parser)?;

    parser.expect_error(
        TokenKind::RBrace,
        Some(String::from("Expected '}' after union members")),
    )?;

    parser.register_union(&name);

    Ok(UnionDef { name, members })
}

fn parse_field_list(parser: &mut Parser) -> Result<Vec<StructField>> {
    let mut fields: Vec<StructField> = Vec::new();

    while parser.has_tokens() && !parser.check(TokenKind::RBrace) {
        let field_name = parser
            .expect_error(TokenKind::Identifier, Some(String::from("Expected field name")))?
            .lexeme;
        parser.expect_error(
            TokenKind::Colon,
            Some(String::from("Expected ':' after field name")),
        )?;
        let explicit_type = parse_type(parser)?;

        fields.push(StructField {
            name: field_name,
            explicit_type,
        });
    }

    Ok(fields)
}

/// `impl [* | &] Name { def ... }`
pub fn parse_impl_block(parser: &mut Parser) -> Result<ImplBlock> {
    parser.expect(TokenKind::Impl)?;

    let receiver = if parser.match_kind(TokenKind::Star) {
        ReceiverKind::Pointer
    } else if parser.match_kind(TokenKind::Ampersand) {
        ReceiverKind::Reference
    } else {
        ReceiverKind::Value
    };

    let struct_name = parser
        .expect_error(TokenKind::Identifier, Some(String::from("Expected struct name")))?
        .lexeme;

    parser.expect_error(
        TokenKind::LBrace,
        Some(String::from("Expected '{' after impl declaration")),
    )?;

    let mut methods: Vec<Function> = Vec::new();

    while parser.has_tokens() && !parser.check(TokenKind::RBrace) {
        if parser.check(TokenKind::Def) {
            methods.push(parse_function(parser)?);
        } else {
            return Err(parser.error_at_current("Expected method definition in impl block"));
        }
    }

    parser.expect_error(
        TokenKind::RBrace,
        Some(String::from("Expected '}' after impl block")),
    )?;

    Ok(ImplBlock {
        receiver,
        struct_name,
        methods,
    })
}
