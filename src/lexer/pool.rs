use std::{
    ops::{Deref, DerefMut},
    sync::{Mutex, PoisonError},
};

use log::debug;

use super::{
    lexer::{Lexer, TokenSource},
    tokens::Token,
};

/// A set of reusable lexers.
///
/// Every lexer handed out by [`LexerPool::acquire`] is owned by exactly one
/// guard; it only becomes visible to other callers again after the guard is
/// dropped and the lexer has been reset.
#[derive(Debug, Default)]
pub struct LexerPool {
    idle: Mutex<Vec<Lexer>>,
}

impl LexerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes an idle lexer (or creates one) and loads `source` into it.
    pub fn acquire(&self, source: &str) -> PooledLexer<'_> {
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();

        let lexer = match reused {
            Some(mut lexer) => {
                debug!("reusing pooled lexer");
                lexer.load(source);
                lexer
            }
            None => {
                debug!("allocating new lexer");
                Lexer::new(source)
            }
        };

        PooledLexer {
            pool: self,
            lexer,
        }
    }

    /// Number of lexers currently waiting to be reused.
    pub fn idle_count(&self) -> usize {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn release(&self, mut lexer: Lexer) {
        lexer.reset();
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(lexer);
    }
}

/// Exclusive handle to a pooled lexer; returns it to the pool on drop.
#[derive(Debug)]
pub struct PooledLexer<'a> {
    pool: &'a LexerPool,
    lexer: Lexer,
}

impl Deref for PooledLexer<'_> {
    type Target = Lexer;

    fn deref(&self) -> &Lexer {
        &self.lexer
    }
}

impl DerefMut for PooledLexer<'_> {
    fn deref_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }
}

impl TokenSource for PooledLexer<'_> {
    fn next_token(&mut self) -> Token {
        self.lexer.next_token()
    }
}

impl Drop for PooledLexer<'_> {
    fn drop(&mut self) {
        debug!("returning lexer to pool");
        self.pool.release(std::mem::take(&mut self.lexer));
    }
}
