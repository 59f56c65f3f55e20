//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer that converts comment-stripped source
//! lines into phrases of tokens for validation. It handles:
//!
//! - Indentation depth of every line
//! - Greedy recognition of one and two character symbols
//! - String literals opened by either quote character
//! - Numbers, identifiers and address-qualified hexadecimal literals
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
