#![allow(clippy::module_inception)]

use std::io::{self, Write};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod repl;

/// Writes every diagnostic in the order it was found.
///
/// ```text
/// Error: UnexpectedToken (did you miss a semicolon?)
///  | expected next token to be Semicolon, got EOF instead
///  | at EOF ""
/// ```
pub fn display_errors<W: Write>(output: &mut W, errors: &[Error]) -> io::Result<()> {
    for error in errors {
        match error.get_tip() {
            ErrorTip::None => writeln!(output, "Error: {}", error.get_error_name())?,
            tip => writeln!(output, "Error: {} ({})", error.get_error_name(), tip)?,
        }
        writeln!(output, " | {}", error)?;
        writeln!(output, " | at {}", error.get_token())?;
    }

    Ok(())
}
