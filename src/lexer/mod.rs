//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (scanner) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Byte-by-byte scanning with one byte of lookahead
//! - Recognition of keywords, identifiers, integer literals, and operators
//! - Illegal characters, surfaced as tokens rather than errors
//! - Pooling of lexers for line-oriented callers

pub mod lexer;
pub mod pool;
pub mod tokens;

#[cfg(test)]
mod tests;
