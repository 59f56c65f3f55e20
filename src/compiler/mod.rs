//! Compilation driver.
//!
//! This module runs the front end over a list of source files. It handles:
//!
//! - Deriving each file's compilation-unit name (its dot-path)
//! - Running the lexer and validator per file
//! - Placing valid files into the shared scope tree
//! - Resolving usages once every file is in
//! - Handing the result to an [`compiler::Emitter`] when nothing failed

pub mod compiler;
