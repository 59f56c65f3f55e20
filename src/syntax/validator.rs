//! Grammar conformance for single phrases.
//!
//! A phrase is mapped to its class tags, reduced until no rule applies, and
//! the reduced tags are matched against the closed set of statement shapes.
//! Reduction has two rules:
//!
//! - `ID DOT ID` collapses to `ID` (member access never changes a shape)
//! - `INL <inner> INR` is removed once `<inner>` has been checked as an
//!   expression on its own

use log::trace;

use crate::{
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    lexer::tokens::Phrase,
};

use super::classes::{ClassString, ClassTag};

/// The statement shapes a phrase can take, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Empty,
    Label,
    LabelledStatement,
    With,
    Jump,
    Declaration,
    DeclarationAssignment,
    FunctionDeclaration,
    AddressAssignment,
    Reassignment,
    Comparison,
    FunctionCall,
    OperatorExpression,
}

pub struct Validator<'a> {
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Validator<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        Validator { diagnostics }
    }

    /// Maps tokens to class tags. Tokens without a class are reported as
    /// warnings and left out.
    pub fn classes(&mut self, phrase: &Phrase) -> ClassString {
        let mut tags = vec![];

        for token in &phrase.tokens {
            match ClassTag::of(token.kind) {
                Some(tag) => tags.push(tag),
                None => self.diagnostics.push(
                    ErrorImpl::UnknownSymbol {
                        symbol: token
                            .value
                            .clone()
                            .unwrap_or_else(|| token.kind.to_string()),
                    },
                    token.position.clone(),
                ),
            }
        }

        ClassString(tags)
    }

    /// Applies the reduction rules until nothing changes. Returns false if an
    /// index expression failed to validate; reduction still runs to the end.
    pub fn reduce(&mut self, phrase: &Phrase, class_string: &mut ClassString) -> bool {
        let tags = &mut class_string.0;
        let mut valid = true;

        loop {
            if let Some(start) = tags
                .windows(3)
                .position(|window| window == [ClassTag::Id, ClassTag::Dot, ClassTag::Id])
            {
                tags.drain(start + 1..start + 3);
                continue;
            }

            let Some(close) = tags.iter().position(|tag| *tag == ClassTag::Inr) else {
                break;
            };
            let Some(open) = tags[..close].iter().rposition(|tag| *tag == ClassTag::Inl) else {
                break;
            };

            let inner = &tags[open + 1..close];
            if !is_expression(inner) {
                self.diagnostics.push(
                    ErrorImpl::InvalidIndex {
                        shape: ClassString(inner.to_vec()).to_string(),
                    },
                    phrase.position(),
                );
                valid = false;
            }
            tags.drain(open..=close);
        }

        valid
    }

    pub fn validate(&mut self, phrase: &Phrase) -> bool {
        let mut class_string = self.classes(phrase);
        let raw = class_string.to_string();
        let indices_valid = self.reduce(phrase, &mut class_string);
        let shape = recognize(class_string.tags());

        trace!(
            "{}: {} -> {} ({:?})",
            phrase.position(),
            raw,
            class_string,
            shape
        );

        match shape {
            Some(_) => indices_valid,
            None => {
                self.diagnostics.push(
                    ErrorImpl::InvalidSyntax {
                        phrase: phrase.source.clone(),
                        shape: class_string.to_string(),
                    },
                    phrase.position(),
                );
                false
            }
        }
    }
}

/// Validates a single phrase, recording diagnostics into `diagnostics`.
pub fn validate(phrase: &Phrase, diagnostics: &mut Diagnostics) -> bool {
    Validator::new(diagnostics).validate(phrase)
}

/// Matches fully reduced tags against the statement shapes; first match wins.
pub fn recognize(tags: &[ClassTag]) -> Option<Shape> {
    use ClassTag::*;

    let shape = match tags {
        [] | [Nul] => Shape::Empty,
        [Lbl, Id] => Shape::Label,
        [Lbl, Id, rest @ ..] if recognize(rest).is_some() => Shape::LabelledStatement,
        [Wtl, Id, Wtr] => Shape::With,
        [Id] => Shape::Jump,
        [Var, Id] => Shape::Declaration,
        [Var, Id, assignment, rhs @ ..] if assignment.is_assignment() && is_expression(rhs) => {
            Shape::DeclarationAssignment
        }
        _ if is_function_declaration(tags) => Shape::FunctionDeclaration,
        [Adr, Hex, assignment, rhs @ ..] if assignment.is_assignment() && is_expression(rhs) => {
            Shape::AddressAssignment
        }
        [Id, assignment, rhs @ ..] if assignment.is_assignment() && is_expression(rhs) => {
            Shape::Reassignment
        }
        _ if is_comparison(tags) => Shape::Comparison,
        [arguments @ .., Id] if !arguments.is_empty() && is_expression(arguments) => {
            Shape::FunctionCall
        }
        [.., Op] if is_expression(tags) => Shape::OperatorExpression,
        _ => return None,
    };

    Some(shape)
}

/// An expression is a run of literals, identifiers and operators that does
/// not begin with an operator. Hexadecimal literals may carry their address
/// sigil. The empty expression is valid.
pub fn is_expression(tags: &[ClassTag]) -> bool {
    use ClassTag::*;

    if tags.first() == Some(&Op) {
        return false;
    }

    let mut rest = tags;
    loop {
        rest = match rest {
            [] => return true,
            [Adr, Hex, tail @ ..] => tail,
            [Nul | Num | Str | Id | Op | Hex, tail @ ..] => tail,
            _ => return false,
        };
    }
}

/// `()`, `[]` or zero or more `VAR ID` parameters, then `FNC ID`. A vararg
/// marker may also lead named parameters.
fn is_function_declaration(tags: &[ClassTag]) -> bool {
    use ClassTag::*;

    let [parameters @ .., Fnc, Id] = tags else {
        return false;
    };

    let named = match parameters {
        [Nul] => return true,
        [Arr, rest @ ..] => rest,
        rest => rest,
    };

    named.len() % 2 == 0 && named.chunks(2).all(|pair| pair == [Var, Id])
}

/// Exactly one comparator with an expression on either side. Either side
/// may be empty.
fn is_comparison(tags: &[ClassTag]) -> bool {
    let mut comparators = tags
        .iter()
        .enumerate()
        .filter(|(_, tag)| tag.is_comparator());

    let (Some((index, _)), None) = (comparators.next(), comparators.next()) else {
        return false;
    };

    is_expression(&tags[..index]) && is_expression(&tags[index + 1..])
}
