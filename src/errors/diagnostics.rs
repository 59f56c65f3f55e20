use crate::Position;

use super::errors::{Error, ErrorImpl, Severity};

/// Collects every warning and error raised during a compilation run, in the
/// order they were raised. One collector is threaded `&mut` through the
/// lexer, the validator and the scope resolver.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Records a diagnostic; its severity comes from the variant.
    pub fn push(&mut self, error_impl: ErrorImpl, position: Position) {
        self.entries.push(Error::new(error_impl, position));
    }

    pub fn push_error(&mut self, error: Error) {
        self.entries.push(error);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Keeps only the diagnostics for which `keep` returns true.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Error) -> bool,
    {
        self.entries.retain(keep);
    }

    pub fn entries(&self) -> &[Error] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Error> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.with_severity(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Error::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Error> {
        self.entries
            .iter()
            .filter(move |error| error.severity() == severity)
    }
}
