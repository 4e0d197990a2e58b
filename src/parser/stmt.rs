use crate::{
    ast::{
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, ReturnStmt, Stmt, VarDeclStmt},
    },
    errors::errors::Error,
    lexer::{lexer::TokenSource, tokens::TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement starting at the current token.
///
/// On success the current token is the statement's last token.
pub fn parse_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser.get_stmt_handler(parser.current_token_kind()) {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    // `if` and `fn` already end in `}`, the semicolon is optional for them
    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    } else if !expression.ends_with_block() {
        return Err(Error::unexpected_token(
            TokenKind::Semicolon,
            parser.peek_token(),
        ));
    }

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

pub fn parse_var_decl_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let name = Identifier::new(parser.expect_peek(TokenKind::Identifier)?);
    parser.expect_peek(TokenKind::Assign)?;

    parser.advance();
    let value = parse_expr(parser, BindingPower::Lowest)?;

    parser.expect_peek(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt { token, name, value }))
}

pub fn parse_return_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    parser.advance();
    let value = parse_expr(parser, BindingPower::Lowest)?;

    parser.expect_peek(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses `{ ... }` with the current token on the `{`; finishes on the `}`.
pub fn parse_block_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<BlockStmt, Error> {
    let token = parser.current_token().clone();
    parser.advance();
    parser.enter_block();

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::EOF {
            return Err(Error::unexpected_token(
                TokenKind::CloseCurly,
                parser.current_token(),
            ));
        }
        body.push(parse_stmt(parser)?);
        parser.advance();
    }
    parser.exit_block();

    Ok(BlockStmt { token, body })
}
