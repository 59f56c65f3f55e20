use std::rc::Rc;

use log::{debug, trace};

use crate::{
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{classify, is_hexadecimal, Phrase, Token, TokenKind, DIGRAPH_LOOKUP, SYMBOL_LOOKUP};

pub const COMMENT: char = '`';

/// A string literal being built. `open` is false once the closing delimiter
/// was seen; a quote directly after it continues the same literal.
struct StringLiteral {
    value: String,
    start: usize,
    delimiter: char,
    open: bool,
}

/// Splits a single source line into tokens.
pub struct Lexer<'a> {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
    file: Rc<String>,
    line: u32,
    pending: String,
    pending_start: usize,
    string: Option<StringLiteral>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &str, file: Rc<String>, line: u32, diagnostics: &'a mut Diagnostics) -> Lexer<'a> {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            tokens: vec![],
            file,
            line,
            pending: String::new(),
            pending_start: 0,
            string: None,
            diagnostics,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.chars[self.pos]
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Columns are 1-based and count every character, indentation included.
    fn position_at(&self, pos: usize) -> Position {
        Position::new(Rc::clone(&self.file), self.line, pos as u32 + 1)
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|token| token.kind)
    }

    pub fn run(mut self) -> Vec<Token> {
        while !self.at_eof() {
            let c = self.at();

            if let Some(string) = self.string.as_mut().filter(|string| string.open) {
                if c == string.delimiter {
                    string.open = false;
                } else {
                    string.value.push(c);
                }
                self.advance_n(1);
                continue;
            }

            if c == '"' || c == '\'' {
                self.open_string(c);
                self.advance_n(1);
                continue;
            }

            self.flush_string();

            if c.is_whitespace() {
                self.flush_pending();
                self.advance_n(1);
            } else if SYMBOL_LOOKUP.contains_key(&c) {
                self.flush_pending();
                self.symbol(c);
            } else {
                if self.pending.is_empty() {
                    self.pending_start = self.pos;
                }
                self.pending.push(c);
                self.advance_n(1);
            }
        }

        self.flush_string();
        self.flush_pending();
        self.tokens
    }

    fn open_string(&mut self, delimiter: char) {
        match self.string.as_mut() {
            Some(string) => {
                string.delimiter = delimiter;
                string.open = true;
            }
            None => {
                self.flush_pending();
                self.string = Some(StringLiteral {
                    value: String::new(),
                    start: self.pos,
                    delimiter,
                    open: true,
                });
            }
        }
    }

    fn flush_string(&mut self) {
        if let Some(string) = self.string.take() {
            let position = self.position_at(string.start);
            if string.open {
                self.diagnostics.push(
                    ErrorImpl::UnclosedString {
                        line: self.chars.iter().collect::<String>().trim().to_string(),
                    },
                    position.clone(),
                );
            }
            self.push(MK_TOKEN!(TokenKind::String, Some(string.value), position));
        }
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let lexeme = std::mem::take(&mut self.pending);
        let position = self.position_at(self.pending_start);

        if self.last_kind() == Some(TokenKind::Address) && is_hexadecimal(&lexeme) {
            self.push(MK_TOKEN!(TokenKind::Hexadecimal, Some(lexeme), position));
            return;
        }

        match classify(&lexeme) {
            Ok(kind) => self.push(MK_TOKEN!(kind, Some(lexeme), position)),
            Err(error) => self.diagnostics.push(error, position),
        }
    }

    fn symbol(&mut self, c: char) {
        let position = self.position_at(self.pos);

        if let Some(next) = self.peek() {
            let digraph: String = [c, next].iter().collect();
            if let Some(kind) = DIGRAPH_LOOKUP.get(digraph.as_str()) {
                self.push(MK_TOKEN!(*kind, None, position));
                self.advance_n(2);
                return;
            }
        }

        match SYMBOL_LOOKUP.get(&c).copied() {
            Some(TokenKind::Depth) => {
                self.diagnostics.push(ErrorImpl::IllegalDepthMarker, position);
                self.advance_n(1);
            }
            Some(TokenKind::Hexadecimal) => {
                self.advance_n(1);
                let mut digits = String::new();
                while !self.at_eof() && self.at().is_ascii_hexdigit() {
                    digits.push(self.at());
                    self.advance_n(1);
                }
                if digits.is_empty() {
                    self.diagnostics.push(
                        ErrorImpl::UnknownLexeme {
                            lexeme: c.to_string(),
                        },
                        position,
                    );
                } else {
                    self.push(MK_TOKEN!(TokenKind::Hexadecimal, Some(digits), position));
                }
            }
            Some(kind) => {
                self.push(MK_TOKEN!(kind, None, position));
                self.advance_n(1);
            }
            None => {
                self.diagnostics.push(
                    ErrorImpl::UnknownLexeme {
                        lexeme: c.to_string(),
                    },
                    position,
                );
                self.advance_n(1);
            }
        }
    }
}

/// Removes everything from the first backtick onwards.
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Indentation depth: the number of leading whitespace characters.
pub fn get_depth(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Converts the lines of one source file into phrases.
///
/// Comments are stripped here and blank lines skipped, but line numbers keep
/// counting from the first line given so diagnostics point at the real
/// source line. Lines that yield no tokens produce no phrase.
pub fn tokenize<I, S>(file: Rc<String>, lines: I, diagnostics: &mut Diagnostics) -> Vec<Phrase>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut phrases = vec![];

    for (index, raw) in lines.into_iter().enumerate() {
        let line = strip_comment(raw.as_ref()).trim_end_matches(|c| c == '\r' || c == '\n');
        if line.trim().is_empty() {
            continue;
        }

        let line_no = index as u32 + 1;
        let tokens = Lexer::new(line, Rc::clone(&file), line_no, diagnostics).run();
        if tokens.is_empty() {
            continue;
        }

        trace!(
            "{}@{}: {}",
            file,
            line_no,
            tokens.iter().map(|token| token.to_string()).collect::<Vec<_>>().join(", ")
        );

        phrases.push(Phrase {
            depth: get_depth(line),
            file: Rc::clone(&file),
            line: line_no,
            source: line.trim().to_string(),
            tokens,
        });
    }

    debug!("tokenized {} into {} phrases", file, phrases.len());
    phrases
}
