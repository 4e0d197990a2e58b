//! Interactive shell.
//!
//! Reads one line at a time and prints either the tokens the line scans to or
//! the program it parses to. Lexers are borrowed from a [`LexerPool`] for each
//! line and handed back once the line has been processed.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::{
    display_errors,
    lexer::{lexer::TokenSource, pool::LexerPool, tokens::TokenKind},
    parser::parser::parse,
};

pub const PROMPT: &str = ">> ";

/// Input line that ends the session.
pub const QUIT: &str = "QUIT";

/// What the shell prints for every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// One token per output line, up to end-of-input
    Tokens,
    /// The parsed program, or its diagnostics
    #[default]
    Ast,
}

/// Runs the shell until `input` is exhausted or a `QUIT` line is read.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, mode: Mode) -> io::Result<()> {
    let pool = LexerPool::new();
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("input exhausted");
            return Ok(());
        }

        let line = line.trim_end_matches(['\n', '\r']);
        if line == QUIT {
            debug!("quit requested");
            return Ok(());
        }

        let lexer = pool.acquire(line);
        match mode {
            Mode::Tokens => print_tokens(lexer, &mut output)?,
            Mode::Ast => print_program(lexer, &mut output)?,
        }
    }
}

fn print_tokens<S: TokenSource, W: Write>(mut source: S, output: &mut W) -> io::Result<()> {
    loop {
        let token = source.next_token();
        if token.is(TokenKind::EOF) {
            return Ok(());
        }
        writeln!(output, "{}", token)?;
    }
}

fn print_program<S: TokenSource, W: Write>(source: S, output: &mut W) -> io::Result<()> {
    let (program, errors) = parse(source);

    if !errors.is_empty() {
        return display_errors(output, &errors);
    }
    if !program.is_empty() {
        writeln!(output, "{}", program)?;
    }

    Ok(())
}
