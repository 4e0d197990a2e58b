//! Parser implementation for building the Abstract Syntax Tree.
//!
//! The parser pulls tokens from a [`TokenSource`] on demand and always holds
//! two of them: the token under examination and one token of lookahead.
//! Expressions are parsed with a Pratt parser driven by lookup tables:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix positions
//! - LED (left denotation) handlers for infix positions
//! - Binding powers for operator precedence
//!
//! Syntax errors never abort parsing. A failed statement is dropped, its
//! error is recorded and parsing resumes at the next statement boundary: a
//! `;` outside any block, or the `}` closing the block the error was in.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, TokenSource},
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest expression nesting accepted before `NestingTooDeep` is reported.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
pub struct Parser<S: TokenSource = Lexer> {
    /// Where tokens come from
    source: S,
    /// The token under examination
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Every diagnostic collected so far, in order
    errors: Vec<Error>,
    /// Blocks entered by the statement being parsed and not closed yet
    open_blocks: usize,
    /// Expressions currently being parsed, outermost included
    nesting: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup<S>,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup<S>,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup<S>,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser<Lexer> {
    pub fn from_source(source: &str) -> Self {
        Parser::new(Lexer::new(source))
    }
}

impl<S: TokenSource> Parser<S> {
    /// Creates a parser and primes `current` and `peek`.
    ///
    /// On empty input both are `EOF`.
    pub fn new(source: S) -> Self {
        let mut parser = Parser {
            source,
            current: Token::eof(),
            peek: Token::eof(),
            errors: vec![],
            open_blocks: 0,
            nesting: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser.advance();
        parser.advance();
        parser
    }

    /// Parses statements until `EOF`.
    ///
    /// Failed statements are left out of the returned program; their errors
    /// are available from [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current.is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => program.statements.push(stmt),
                Err(error) => {
                    debug!("discarding statement: {}", error);
                    self.errors.push(error);
                    self.synchronize();
                }
            }
            // Always make progress, even on malformed input.
            self.advance();
        }

        program
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts the token window by one.
    pub fn advance(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Advances onto the lookahead token if it is of `expected_kind`.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error naming the
    /// expected kind and the lookahead's kind. The window is not moved on
    /// error.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek.is(expected_kind) {
            self.advance();
            Ok(self.current.clone())
        } else {
            Err(Error::unexpected_token(expected_kind, &self.peek))
        }
    }

    pub fn enter_block(&mut self) {
        self.open_blocks += 1;
    }

    pub fn exit_block(&mut self) {
        self.open_blocks = self.open_blocks.saturating_sub(1);
    }

    /// Claims one level of expression nesting.
    ///
    /// Fails with `NestingTooDeep` at the current token once
    /// [`MAX_NESTING_DEPTH`] levels are in use. Every successful call must be
    /// paired with [`Parser::exit_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current.clone(),
            ));
        }

        self.nesting += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Binding power of the lookahead token; `Lowest` if it has no infix rule.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.peek.kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler<S>> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn get_nud_handler(&self, kind: TokenKind) -> Option<NUDHandler<S>> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn get_led_handler(&self, kind: TokenKind) -> Option<LEDHandler<S>> {
        self.led_lookup.get(&kind).copied()
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler<S>) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler<S>) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler<S>) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Skips to the next statement boundary.
    ///
    /// Stops on `EOF`, on a `;` outside every block, or on the `}` closing
    /// the outermost block the failed statement had opened. A `;` right after
    /// that brace belongs to the same statement and is consumed as well, and
    /// an `else` right after it keeps the skip going.
    fn synchronize(&mut self) {
        let mut depth = std::mem::take(&mut self.open_blocks);

        loop {
            match self.current.kind {
                TokenKind::EOF => return,
                TokenKind::Semicolon if depth == 0 => return,
                TokenKind::CloseCurly if depth == 0 => return,
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => {
                    depth -= 1;
                    if depth == 0 && !self.peek.is(TokenKind::Else) {
                        if self.peek.is(TokenKind::Semicolon) {
                            self.advance();
                        }
                        return;
                    }
                }
                _ => {}
            }

            trace!("syncing past {}", self.current);
            self.advance();
        }
    }
}

/// Parses everything `source` yields.
///
/// # Returns
///
/// A tuple containing:
/// - The program, without any statement that failed to parse
/// - Every diagnostic, in the order it was found
pub fn parse<S: TokenSource>(source: S) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();

    (program, parser.into_errors())
}

/// Scans and parses `source`.
pub fn parse_source(source: &str) -> (Program, Vec<Error>) {
    parse(Lexer::new(source))
}
