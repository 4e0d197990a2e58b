use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::{lexer::TokenSource, tokens::TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Precedence levels, weakest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Lowest,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Prefix,
    Call,
}

pub type StmtHandler<S> = fn(&mut Parser<S>) -> Result<Stmt, Error>;
pub type NUDHandler<S> = fn(&mut Parser<S>) -> Result<Expr, Error>;
pub type LEDHandler<S> = fn(&mut Parser<S>, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups<S: TokenSource>(parser: &mut Parser<S>) {
    // Equality
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);

    // Relational
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Integer, parse_integer_expr);
    parser.nud(TokenKind::True, parse_boolean_expr);
    parser.nud(TokenKind::False, parse_boolean_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Fn, parse_fn_expr);

    // Statements
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup<S> = HashMap<TokenKind, StmtHandler<S>>;
pub type NUDLookup<S> = HashMap<TokenKind, NUDHandler<S>>;
pub type LEDLookup<S> = HashMap<TokenKind, LEDHandler<S>>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
