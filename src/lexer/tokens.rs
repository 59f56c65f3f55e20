use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::{errors::errors::ErrorImpl, Position};

lazy_static! {
    /// Two character symbols. These are always tried before the one character
    /// symbol that shares their first character.
    pub static ref DIGRAPH_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("__", TokenKind::BinaryBlob);
        map.insert("$$", TokenKind::VariableRaised);
        map.insert("@@", TokenKind::FunctionRaised);
        map.insert("()", TokenKind::Null);
        map.insert("[]", TokenKind::Vararg);
        map.insert("?:", TokenKind::EqualsRef);
        map.insert("?<", TokenKind::LessEqual);
        map.insert("?>", TokenKind::GreaterEqual);
        map.insert("<-", TokenKind::ShiftLeft);
        map.insert("->", TokenKind::ShiftRight);
        map.insert(">>", TokenKind::SignedShiftRight);
        map
    };

    pub static ref SYMBOL_LOOKUP: HashMap<char, TokenKind> = {
        let mut map = HashMap::new();
        map.insert(';', TokenKind::Depth);
        map.insert('{', TokenKind::WithOpen);
        map.insert('}', TokenKind::WithClose);
        map.insert('\\', TokenKind::Label);
        map.insert('_', TokenKind::Address);
        map.insert('$', TokenKind::Variable);
        map.insert('@', TokenKind::Function);
        map.insert('#', TokenKind::Hexadecimal);
        map.insert('"', TokenKind::String);
        map.insert('\'', TokenKind::String);
        map.insert('!', TokenKind::Count);
        map.insert('.', TokenKind::Dot);
        map.insert('[', TokenKind::IndexOpen);
        map.insert(']', TokenKind::IndexClose);
        map.insert('(', TokenKind::NegateOpen);
        map.insert(')', TokenKind::NegateClose);
        map.insert('=', TokenKind::Copy);
        map.insert(':', TokenKind::CopyRef);
        map.insert('?', TokenKind::Equals);
        map.insert('<', TokenKind::Less);
        map.insert('>', TokenKind::Greater);
        map.insert('~', TokenKind::Complement);
        map.insert('&', TokenKind::And);
        map.insert('|', TokenKind::Or);
        map.insert('^', TokenKind::Xor);
        map.insert('+', TokenKind::Add);
        map.insert('-', TokenKind::Subtract);
        map.insert('*', TokenKind::Multiply);
        map.insert('/', TokenKind::Divide);
        map.insert('%', TokenKind::Modulus);
        map
    };

    // Digits with `,` as grouping and decimal separator.
    static ref NUMBER_SHAPE: Regex = Regex::new(r"^[0-9][0-9,]*$").unwrap();
    static ref IDENTIFIER_SHAPE: Regex = Regex::new(r"^\p{Alphabetic}\S*$").unwrap();
    static ref HEXADECIMAL_SHAPE: Regex = Regex::new(r"^[0-9A-Fa-f]+$").unwrap();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Depth,

    // Literals
    Identifier,
    Number,
    Hexadecimal,
    String,
    BinaryBlob,
    Null,
    Vararg,

    WithOpen,
    WithClose,
    NegateOpen,
    NegateClose,
    IndexOpen,
    IndexClose,
    Dot,
    Count,

    // Declarations
    Variable,
    VariableRaised,
    Function,
    FunctionRaised,
    Label,
    Address,

    Copy,    // =
    CopyRef, // :

    Equals,       // ?
    EqualsRef,    // ?:
    Less,         // <
    LessEqual,    // ?<
    Greater,      // >
    GreaterEqual, // ?>

    Complement,
    And,
    Or,
    Xor,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    ShiftLeft,
    ShiftRight,
    SignedShiftRight,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TokenKind {
    pub fn is_assignment(&self) -> bool {
        matches!(self, TokenKind::Copy | TokenKind::CopyRef)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::EqualsRef
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
        )
    }

    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            TokenKind::Variable
                | TokenKind::VariableRaised
                | TokenKind::Function
                | TokenKind::FunctionRaised
                | TokenKind::Label
        )
    }

    /// Doubled sigils declare into the parent of the enclosing scope.
    pub fn is_raised(&self) -> bool {
        matches!(self, TokenKind::VariableRaised | TokenKind::FunctionRaised)
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Complement
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Xor
                | TokenKind::Add
                | TokenKind::Subtract
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Modulus
                | TokenKind::ShiftLeft
                | TokenKind::ShiftRight
                | TokenKind::SignedShiftRight
        )
    }
}

/// Maps a raw lexeme onto the one token kind it represents.
///
/// Symbols are matched by prefix, two character symbols first. Anything that
/// is not a symbol must look like a number or an identifier.
pub fn classify(lexeme: &str) -> Result<TokenKind, ErrorImpl> {
    if lexeme.trim().is_empty() {
        return Err(ErrorImpl::UnknownLexeme {
            lexeme: lexeme.to_string(),
        });
    }

    let digraph: String = lexeme.chars().take(2).collect();
    if let Some(kind) = DIGRAPH_LOOKUP.get(digraph.as_str()) {
        return Ok(*kind);
    }

    if let Some(kind) = lexeme.chars().next().and_then(|c| SYMBOL_LOOKUP.get(&c)) {
        return Ok(*kind);
    }

    if NUMBER_SHAPE.is_match(lexeme) {
        Ok(TokenKind::Number)
    } else if IDENTIFIER_SHAPE.is_match(lexeme) {
        Ok(TokenKind::Identifier)
    } else {
        Err(ErrorImpl::UnknownLexeme {
            lexeme: lexeme.to_string(),
        })
    }
}

pub fn is_hexadecimal(lexeme: &str) -> bool {
    HEXADECIMAL_SHAPE.is_match(lexeme)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<String>,
    pub position: Position,
}

impl Token {
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} ({})", self.kind, value),
            None => write!(f, "{} ()", self.kind),
        }
    }
}

/// The tokens of one logical statement, together with the indentation depth
/// of the source line they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub depth: usize,
    pub file: Rc<String>,
    pub line: u32,
    /// The source line with its comment removed, kept for diagnostics.
    pub source: String,
    pub tokens: Vec<Token>,
}

impl Phrase {
    pub fn position(&self) -> Position {
        Position::new(Rc::clone(&self.file), self.line, 0)
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }
}
