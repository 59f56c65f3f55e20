#![allow(clippy::module_inception)]

use std::{fmt::Display, fs, path::Path, rc::Rc};

pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod scope;
pub mod syntax;

extern crate regex;

/// A location in a source file: the compilation-unit name, a 1-based line and
/// a 1-based column. Column 0 marks a whole-line position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: Rc<String>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: Rc<String>, line: u32, column: u32) -> Self {
        Position { file, line, column }
    }

    pub fn null() -> Self {
        Position::new(Rc::new(String::from("<null>")), 0, 0)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.column == 0 {
            write!(f, "{}@{}", self.file, self.line)
        } else {
            write!(f, "{}@{}:{}", self.file, self.line, self.column)
        }
    }
}

/// Reads `file` and returns the text of the 1-based `line`, without its line
/// terminator. Returns `None` when the file cannot be read or is too short.
pub fn get_line_at_position(file: &Path, line: u32) -> Option<String> {
    let content = fs::read_to_string(file).ok()?;
    let index = (line as usize).checked_sub(1)?;

    content
        .lines()
        .nth(index)
        .map(|text| text.trim_end_matches('\r').to_string())
}
