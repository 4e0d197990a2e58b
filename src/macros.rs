//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The exact source text of the token
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42");
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            literal: ::std::string::String::from($literal),
        }
    };
}
