use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// How much a diagnostic matters. Warnings are reported but never block
/// compilation; a single error suppresses code generation for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn severity(&self) -> Severity {
        self.internal_error.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnknownLexeme { .. } => "UnknownLexeme",
            ErrorImpl::UnclosedString { .. } => "UnclosedString",
            ErrorImpl::IllegalDepthMarker => "IllegalDepthMarker",
            ErrorImpl::UnknownSymbol { .. } => "UnknownSymbol",
            ErrorImpl::InvalidSyntax { .. } => "InvalidSyntax",
            ErrorImpl::InvalidIndex { .. } => "InvalidIndex",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::UnreadableSource { .. } => "UnreadableSource",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnknownLexeme { lexeme } => ErrorTip::Suggestion(format!(
                "`{}` is neither a symbol, a number nor an identifier",
                lexeme
            )),
            ErrorImpl::UnclosedString { .. } => {
                ErrorTip::Suggestion(String::from("Close the string with its opening quote"))
            }
            ErrorImpl::IllegalDepthMarker => ErrorTip::Suggestion(String::from(
                "`;` is reserved for indentation and cannot appear in a statement",
            )),
            ErrorImpl::UnknownSymbol { .. } => ErrorTip::None,
            ErrorImpl::InvalidSyntax { shape, .. } => ErrorTip::Suggestion(format!(
                "No statement has the shape `{}`",
                shape
            )),
            ErrorImpl::InvalidIndex { shape } => ErrorTip::Suggestion(format!(
                "Index `{}` is not a valid expression",
                shape
            )),
            ErrorImpl::DuplicateDeclaration { name, previous } => ErrorTip::Suggestion(format!(
                "`{}` was first declared at {}",
                name, previous
            )),
            ErrorImpl::UndeclaredIdentifier { name } => ErrorTip::Suggestion(format!(
                "Declare `{}` in this scope or an enclosing one",
                name
            )),
            ErrorImpl::UnreadableSource { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unknown lexeme: {lexeme:?}")]
    UnknownLexeme { lexeme: String },
    #[error("unclosed string: {line:?}")]
    UnclosedString { line: String },
    #[error("illegal character ';'")]
    IllegalDepthMarker,
    #[error("unknown symbol: {symbol:?}")]
    UnknownSymbol { symbol: String },
    #[error("invalid syntax: {phrase:?}")]
    InvalidSyntax { phrase: String, shape: String },
    #[error("invalid index expression: {shape:?}")]
    InvalidIndex { shape: String },
    #[error("duplicate declaration: {name:?}")]
    DuplicateDeclaration { name: String, previous: String },
    #[error("undeclared identifier: {name:?}")]
    UndeclaredIdentifier { name: String },
    #[error("error reading {path:?}: {reason}")]
    UnreadableSource { path: String, reason: String },
}

impl ErrorImpl {
    pub fn severity(&self) -> Severity {
        match self {
            ErrorImpl::UnclosedString { .. } | ErrorImpl::UnknownSymbol { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
