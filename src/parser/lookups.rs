use std::{collections::HashMap, sync::OnceLock};

use parking_lot::Once;

use crate::{
    ast::Expr,
    lexer::token::TokenKind::{self, self as T},
    parser::{expr::*, Parser},
};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BindingPower {
    DefaultBp,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Comparison,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}
use BindingPower as BP;

type NudHandler = fn(&mut Parser) -> anyhow::Result<Expr>;
type LedHandler = fn(&mut Parser, Expr, BindingPower) -> anyhow::Result<Expr>;

type NudLookup = HashMap<TokenKind, NudHandler>;
type LedLookup = HashMap<TokenKind, LedHandler>;
pub type BpLookup = HashMap<TokenKind, BindingPower>;

static INITIALIZE: Once = Once::new();
pub static BP_LU: OnceLock<BpLookup> = OnceLock::new();
pub static NUD_LU: OnceLock<NudLookup> = OnceLock::new();
pub static LED_LU: OnceLock<LedLookup> = OnceLock::new();

fn led(
    kind: TokenKind,
    bp: BindingPower,
    led_fn: LedHandler,
    bp_lu: &mut BpLookup,
    led_lu: &mut LedLookup,
) {
    bp_lu.insert(kind, bp);
    led_lu.insert(kind, led_fn);
}

fn nud(kind: TokenKind, nud_fn: NudHandler, nud_lu: &mut NudLookup) {
    nud_lu.insert(kind, nud_fn);
}

pub fn create_token_lookups() {
    INITIALIZE.call_once(|| {
        let mut bp_lu = BpLookup::new();
        let mut nud_lu = NudLookup::new();
        let mut led_lu = LedLookup::new();

        // Assignment (right side re-parsed below assignment level; chains
        // are rejected by the handler)
        led(T::Assign, BP::Assignment, parse_assignment_expr, &mut bp_lu, &mut led_lu);

        // Logical
        led(T::Or, BP::LogicalOr, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::And, BP::LogicalAnd, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Equality
        led(T::Eq, BP::Equality, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Ne, BP::Equality, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Comparison
        led(T::Lt, BP::Comparison, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Gt, BP::Comparison, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Le, BP::Comparison, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Ge, BP::Comparison, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Additive
        led(T::Plus, BP::Additive, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Minus, BP::Additive, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Multiplicative
        led(T::Star, BP::Multiplicative, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Slash, BP::Multiplicative, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Percent, BP::Multiplicative, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Literals & symbols
        nud(T::IntLiteral, parse_primary_expr, &mut nud_lu);
        nud(T::LongLiteral, parse_primary_expr, &mut nud_lu);
        nud(T::FloatLiteral, parse_primary_expr, &mut nud_lu);
        nud(T::DoubleLiteral, parse_primary_expr, &mut nud_lu);
        nud(T::StringLiteral, parse_primary_expr, &mut nud_lu);
        nud(T::True, parse_primary_expr, &mut nud_lu);
        nud(T::False, parse_primary_expr, &mut nud_lu);
        nud(T::Identifier, parse_symbol_expr, &mut nud_lu);
        nud(T::LParen, parse_grouping_expr, &mut nud_lu);
        nud(T::LBrace, parse_array_literal_expr, &mut nud_lu);

        // Prefix
        nud(T::Not, parse_prefix_expr, &mut nud_lu);
        nud(T::Minus, parse_prefix_expr, &mut nud_lu);
        nud(T::Ampersand, parse_address_of_expr, &mut nud_lu);
        nud(T::Star, parse_dereference_expr, &mut nud_lu);

        // Postfix: call, index, member/method
        led(T::LParen, BP::Call, parse_function_call_expr, &mut bp_lu, &mut led_lu);
        led(T::LBracket, BP::Call, parse_index_expr, &mut bp_lu, &mut led_lu);
        led(T::Dot, BP::Member, parse_member_access_expr, &mut bp_lu, &mut led_lu);

        let _ = BP_LU.set(bp_lu);
        let _ = NUD_LU.set(nud_lu);
        let _ = LED_LU.set(led_lu);
    });
}
