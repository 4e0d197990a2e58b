use log::trace;

use crate::{
    ast::expressions::{
        BooleanExpr, CallExpr, Expr, FunctionExpr, Identifier, IfExpr, InfixExpr, IntegerExpr,
        PrefixExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::TokenSource, tokens::TokenKind},
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression starting at the current token.
///
/// Only operators binding tighter than `bp` are folded into the result; on
/// return the current token is the expression's last token. Each call takes
/// one level of nesting, so deeply nested input fails with `NestingTooDeep`
/// instead of exhausting the stack.
pub fn parse_expr<S: TokenSource>(parser: &mut Parser<S>, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let expr = parse_pratt_expr(parser, bp);
    parser.exit_nesting();

    expr
}

fn parse_pratt_expr<S: TokenSource>(parser: &mut Parser<S>, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token = parser.current_token();
    let Some(nud_fn) = parser.get_nud_handler(token.kind) else {
        let error = match token.kind {
            TokenKind::Illegal => ErrorImpl::IllegalToken {
                literal: token.literal.clone(),
            },
            found => ErrorImpl::NoPrefixRule { found },
        };
        return Err(Error::new(error, token.clone()));
    };
    trace!("prefix rule for {}", token);

    let mut left = nud_fn(parser)?;

    // While the lookahead binds tighter than the caller, fold it into lhs
    while parser.peek_binding_power() > bp {
        let Some(led_fn) = parser.get_led_handler(parser.peek_token_kind()) else {
            break;
        };
        let operator_bp = parser.peek_binding_power();

        parser.advance();
        trace!("infix rule for {}", parser.current_token());
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_identifier_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    Ok(Expr::Identifier(Identifier::new(parser.current_token().clone())))
}

pub fn parse_integer_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.literal.parse::<i64>() {
        Ok(value) => Ok(Expr::Integer(IntegerExpr { token, value })),
        Err(_) => Err(Error::new(
            ErrorImpl::IntegerParseError {
                literal: token.literal.clone(),
            },
            token,
        )),
    }
}

pub fn parse_boolean_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let value = token.is(TokenKind::True);

    Ok(Expr::Boolean(BooleanExpr { token, value }))
}

pub fn parse_prefix_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let operand = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        operand: Box::new(operand),
    }))
}

pub fn parse_binary_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    // Same binding power on the right keeps equal-precedence chains left-associative
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    // if (<condition>) { ... } else { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_token_kind() == TokenKind::Else {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_fn_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    // fn(a, b) { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    if parser.peek_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        parameters.push(Identifier::new(parser.expect_peek(TokenKind::Identifier)?));
        while parser.peek_token_kind() == TokenKind::Comma {
            parser.advance();
            parameters.push(Identifier::new(parser.expect_peek(TokenKind::Identifier)?));
        }
        parser.expect_peek(TokenKind::CloseParen)?;
    }

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(FunctionExpr {
        token,
        parameters,
        body,
    }))
}

pub fn parse_call_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    callee: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let mut arguments = vec![];
    if parser.peek_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Lowest)?);
        while parser.peek_token_kind() == TokenKind::Comma {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Lowest)?);
        }
        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token,
        callee: Box::new(callee),
        arguments,
    }))
}
