use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// The structural class of a token as far as statement shapes are concerned.
/// Every arithmetic and bitwise operator collapses into `Op`, and raised
/// declarations share the tag of their plain form.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ClassTag {
    Id,
    Num,
    Hex,
    Str,
    Bin,
    Nul,
    Arr,
    Var,
    Fnc,
    Lbl,
    Adr,
    Wtl,
    Wtr,
    Ass,
    Ref,
    Eq,
    Eqr,
    Lt,
    Lte,
    Gt,
    Gte,
    Op,
    Dot,
    Inl,
    Inr,
    Ngl,
    Ngr,
}

impl ClassTag {
    /// Returns `None` for kinds that have no place in any statement shape.
    pub fn of(kind: TokenKind) -> Option<ClassTag> {
        let tag = match kind {
            TokenKind::Identifier => ClassTag::Id,
            TokenKind::Number => ClassTag::Num,
            TokenKind::Hexadecimal => ClassTag::Hex,
            TokenKind::String => ClassTag::Str,
            TokenKind::BinaryBlob => ClassTag::Bin,
            TokenKind::Null => ClassTag::Nul,
            TokenKind::Vararg => ClassTag::Arr,
            TokenKind::Variable | TokenKind::VariableRaised => ClassTag::Var,
            TokenKind::Function | TokenKind::FunctionRaised => ClassTag::Fnc,
            TokenKind::Label => ClassTag::Lbl,
            TokenKind::Address => ClassTag::Adr,
            TokenKind::WithOpen => ClassTag::Wtl,
            TokenKind::WithClose => ClassTag::Wtr,
            TokenKind::Copy => ClassTag::Ass,
            TokenKind::CopyRef => ClassTag::Ref,
            TokenKind::Equals => ClassTag::Eq,
            TokenKind::EqualsRef => ClassTag::Eqr,
            TokenKind::Less => ClassTag::Lt,
            TokenKind::LessEqual => ClassTag::Lte,
            TokenKind::Greater => ClassTag::Gt,
            TokenKind::GreaterEqual => ClassTag::Gte,
            TokenKind::Dot => ClassTag::Dot,
            TokenKind::IndexOpen => ClassTag::Inl,
            TokenKind::IndexClose => ClassTag::Inr,
            TokenKind::NegateOpen => ClassTag::Ngl,
            TokenKind::NegateClose => ClassTag::Ngr,
            kind if kind.is_operator() => ClassTag::Op,
            _ => return None,
        };
        Some(tag)
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self, ClassTag::Ass | ClassTag::Ref)
    }

    pub fn is_comparator(&self) -> bool {
        matches!(
            self,
            ClassTag::Eq | ClassTag::Eqr | ClassTag::Lt | ClassTag::Lte | ClassTag::Gt | ClassTag::Gte
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassTag::Id => "ID",
            ClassTag::Num => "NUM",
            ClassTag::Hex => "HEX",
            ClassTag::Str => "STR",
            ClassTag::Bin => "BIN",
            ClassTag::Nul => "NUL",
            ClassTag::Arr => "ARR",
            ClassTag::Var => "VAR",
            ClassTag::Fnc => "FNC",
            ClassTag::Lbl => "LBL",
            ClassTag::Adr => "ADR",
            ClassTag::Wtl => "WTL",
            ClassTag::Wtr => "WTR",
            ClassTag::Ass => "ASS",
            ClassTag::Ref => "REF",
            ClassTag::Eq => "EQ",
            ClassTag::Eqr => "EQR",
            ClassTag::Lt => "LT",
            ClassTag::Lte => "LTE",
            ClassTag::Gt => "GT",
            ClassTag::Gte => "GTE",
            ClassTag::Op => "OP",
            ClassTag::Dot => "DOT",
            ClassTag::Inl => "INL",
            ClassTag::Inr => "INR",
            ClassTag::Ngl => "NGL",
            ClassTag::Ngr => "NGR",
        }
    }
}

impl Display for ClassTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A phrase's tags in order. Displays as `VAR-ID-ASS-NUM-`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassString(pub Vec<ClassTag>);

impl ClassString {
    pub fn tags(&self) -> &[ClassTag] {
        &self.0
    }
}

impl Display for ClassString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for tag in &self.0 {
            write!(f, "{}-", tag)?;
        }
        Ok(())
    }
}
