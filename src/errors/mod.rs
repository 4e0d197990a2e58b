//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics the parser collects:
//!
//! - Error structures carrying the offending token
//! - Specific error variants for each kind of syntax error
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
