//! Tokenizer for rule expression text

use crate::error::{ParseError, Result};
use std::fmt;

/// Kind of a lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Bare word: field path, keyword or math operation
    Ident(String),
    Number(f64),
    /// Quoted string with escapes resolved
    Str(String),
    /// Symbolic operator or connective (`==`, `<=`, `&&`, ...)
    Symbol(&'static str),
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
}

/// A token and the byte offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => f.write_str(s),
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Str(s) => write!(f, "\"{}\"", s),
            TokenKind::Symbol(s) => f.write_str(s),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Comma => f.write_str(","),
        }
    }
}

const SYMBOLS: [&str; 8] = ["==", "!=", "<=", ">=", "&&", "||", "<", ">"];

/// Splits expression text into tokens
pub struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    /// Tokenize the whole input
    pub fn tokenize(input: &'a str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|(_, c)| *c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|(i, _)| *i)
            .unwrap_or(self.input.len())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }

        let position = self.offset();
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        let kind = match c {
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ',' => self.single(TokenKind::Comma),
            '"' | '\'' => self.string(c, position)?,
            c if c.is_ascii_digit() => self.number(position)?,
            '-' | '+' if self.starts_number() => self.number(position)?,
            c if is_ident_start(c) => self.ident(),
            _ => self.symbol(position)?,
        };

        Ok(Some(Token { kind, position }))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn starts_number(&self) -> bool {
        match self.peek_at(1) {
            Some(d) if d.is_ascii_digit() => true,
            Some('.') => matches!(self.peek_at(2), Some(d) if d.is_ascii_digit()),
            _ => false,
        }
    }

    fn string(&mut self, quote: char, position: usize) -> Result<TokenKind> {
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString(position)),
                Some('\\') => {
                    match self.peek_at(1) {
                        Some(escaped) => value.push(escaped),
                        None => return Err(ParseError::UnterminatedString(position)),
                    }
                    self.pos += 2;
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(TokenKind::Str(value));
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn number(&mut self, position: usize) -> Result<TokenKind> {
        let start = self.pos;
        self.pos += 1;
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-')
                && matches!(self.chars.get(self.pos - 1), Some((_, 'e' | 'E')));
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }

        let literal: String = self.chars[start..self.pos].iter().map(|(_, c)| *c).collect();
        literal
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ParseError::InvalidNumber { literal, position })
    }

    fn ident(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_ident_char(c)) {
            self.pos += 1;
        }
        TokenKind::Ident(self.chars[start..self.pos].iter().map(|(_, c)| *c).collect())
    }

    fn symbol(&mut self, position: usize) -> Result<TokenKind> {
        let rest = &self.input[position..];
        for symbol in SYMBOLS {
            if rest.starts_with(symbol) {
                self.pos += symbol.chars().count();
                return Ok(TokenKind::Symbol(symbol));
            }
        }

        let found = rest.chars().next().map(String::from).unwrap_or_default();
        Err(ParseError::UnexpectedToken {
            found,
            expected: "expression",
            position,
        })
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}
