use std::collections::VecDeque;

use log::trace;

use crate::MK_TOKEN;

use super::tokens::{lookup_identifier, Token, TokenKind};

/// Anything the parser can pull tokens from.
///
/// Implementors must keep returning an `EOF` token once their input is
/// exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Byte-oriented cursor over a source string.
///
/// `position` indexes the byte held in `ch`; `read_position` is the next byte
/// to be read. `ch` is `None` once the cursor is at or past the end of input.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    source: String,
    position: usize,
    read_position: usize,
    ch: Option<u8>,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        let mut lexer = Lexer {
            source: source.into(),
            position: 0,
            read_position: 0,
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Drops the current input; the next token produced is `EOF`.
    pub fn reset(&mut self) {
        self.source.clear();
        self.position = 0;
        self.read_position = 0;
        self.ch = None;
    }

    /// Resets the lexer and installs `source` as its new input.
    pub fn load(&mut self, source: &str) {
        self.reset();
        self.source.push_str(source);
        self.read_char();
    }

    pub fn is_exhausted(&self) -> bool {
        self.ch.is_none()
    }

    fn read_char(&mut self) {
        self.ch = self.source.as_bytes().get(self.read_position).copied();
        self.position = self.read_position;
        if self.read_position < self.source.len() {
            self.read_position += 1;
        }
    }

    fn peek_char(&self) -> Option<u8> {
        self.source.as_bytes().get(self.read_position).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.read_char();
        }
    }

    /// Consumes bytes while `accept` holds and returns the consumed slice.
    fn read_while(&mut self, accept: impl Fn(u8) -> bool) -> &str {
        let start = self.position;
        while self.ch.is_some_and(&accept) {
            self.read_char();
        }
        &self.source[start..self.position]
    }

    fn read_identifier(&mut self) -> Token {
        let word = self.read_while(is_letter);
        MK_TOKEN!(lookup_identifier(word), word)
    }

    fn read_number(&mut self) -> Token {
        let digits = self.read_while(|c| c.is_ascii_digit());
        MK_TOKEN!(TokenKind::Integer, digits)
    }

    /// Consumes every byte of the non-ASCII character under the cursor as one
    /// `Illegal` token, so the literal is the exact source text.
    fn read_unrecognized_char(&mut self) -> Token {
        let start = self.position;
        let width = self
            .source
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);

        for _ in 0..width {
            self.read_char();
        }

        let literal = self.source.get(start..start + width).unwrap_or_default();
        MK_TOKEN!(TokenKind::Illegal, literal)
    }

    /// Produces a one- or two-byte operator, consuming the second byte only
    /// when it is `second`.
    fn either(&mut self, second: u8, double: TokenKind, single: TokenKind) -> Token {
        if self.peek_char() == Some(second) {
            let first = self.ch.unwrap_or_default();
            self.read_char();
            let literal = [first, second];
            MK_TOKEN!(double, String::from_utf8_lossy(&literal))
        } else {
            MK_TOKEN!(single, char::from(self.ch.unwrap_or_default()).to_string())
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.ch else {
            return Token::eof();
        };

        let single = |kind: TokenKind| MK_TOKEN!(kind, char::from(ch).to_string());

        let token = match ch {
            b'=' => self.either(b'=', TokenKind::Equals, TokenKind::Assign),
            b'!' => self.either(b'=', TokenKind::NotEquals, TokenKind::Not),
            b'+' => single(TokenKind::Plus),
            b'-' => single(TokenKind::Minus),
            b'*' => single(TokenKind::Star),
            b'/' => single(TokenKind::Slash),
            b'^' => single(TokenKind::Caret),
            b'<' => single(TokenKind::Less),
            b'>' => single(TokenKind::Greater),
            b',' => single(TokenKind::Comma),
            b';' => single(TokenKind::Semicolon),
            b'(' => single(TokenKind::OpenParen),
            b')' => single(TokenKind::CloseParen),
            b'{' => single(TokenKind::OpenCurly),
            b'}' => single(TokenKind::CloseCurly),
            c if is_letter(c) => {
                // Already positioned past the word.
                let token = self.read_identifier();
                trace!("scanned {}", token);
                return token;
            }
            c if c.is_ascii_digit() => {
                let token = self.read_number();
                trace!("scanned {}", token);
                return token;
            }
            c if c.is_ascii() => single(TokenKind::Illegal),
            _ => {
                let token = self.read_unrecognized_char();
                trace!("scanned {}", token);
                return token;
            }
        };

        self.read_char();
        trace!("scanned {}", token);
        token
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// A pre-scanned token sequence.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: VecDeque<Token>,
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        TokenBuffer {
            tokens: tokens.into(),
        }
    }
}

impl TokenSource for TokenBuffer {
    fn next_token(&mut self) -> Token {
        self.tokens.pop_front().unwrap_or_else(Token::eof)
    }
}

/// Scans `source` to completion. The returned vector always ends with exactly
/// one `EOF` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::EOF);
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
