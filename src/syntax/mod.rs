//! Syntax validation module for the compiler.
//!
//! This module decides whether each phrase produced by the lexer has one of
//! the recognised statement shapes. It does not build a tree: phrases are
//! reduced to a string of class tags and that string is matched against
//! the grammar. It handles:
//!
//! - Mapping token kinds to class tags
//! - Collapsing member access and index expressions
//! - Statement shape recognition
//! - Reporting invalid phrases with their source text

pub mod classes;
pub mod validator;

#[cfg(test)]
mod tests;
