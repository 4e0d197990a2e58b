use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};

/// A syntax error together with the token it was detected at.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    token: Token,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, token: Token) -> Self {
        Error {
            internal_error: error_impl,
            token,
        }
    }

    pub fn unexpected_token(expected: TokenKind, found: &Token) -> Self {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected,
                found: found.kind,
            },
            found.clone(),
        )
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_token(&self) -> &Token {
        &self.token
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixRule { .. } => "NoPrefixRule",
            ErrorImpl::IllegalToken { .. } => "IllegalToken",
            ErrorImpl::IntegerParseError { .. } => "IntegerParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::Semicolon,
                ..
            } => ErrorTip::Suggestion(String::from("did you miss a semicolon?")),
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::None,
            ErrorImpl::NoPrefixRule { found } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression, is an operand missing?",
                found
            )),
            ErrorImpl::IllegalToken { literal } => ErrorTip::Suggestion(format!(
                "`{}` is not part of the language, remove it",
                literal
            )),
            ErrorImpl::IntegerParseError { literal } => ErrorTip::Suggestion(format!(
                "Invalid integer: `{}`, is it above the integer limit?",
                literal
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "split the expression up with `var` declarations",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("no prefix parse rule for {found} found")]
    NoPrefixRule { found: TokenKind },
    #[error("illegal character {literal:?}")]
    IllegalToken { literal: String },
    #[error("could not parse {literal:?} as integer")]
    IntegerParseError { literal: String },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
