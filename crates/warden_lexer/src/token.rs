//! Token types and keyword lookups.
//!
//! The token kind vocabulary is closed: it is the full contract between the
//! lexer and any parser consuming the stream. End-of-stream has no token of
//! its own; the lexer's iterator simply yields `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Reserved words (case-sensitive)
    /// `ROLE` declaration keyword.
    Role,
    /// `USER` declaration keyword.
    User,
    /// `RESOURCE` declaration keyword.
    Resource,
    /// `ALLOW` policy keyword.
    Allow,
    /// `DENY` policy keyword.
    Deny,
    /// `IF` condition keyword.
    If,
    /// `ON` resource-clause keyword.
    On,
    /// `AND` boolean connective.
    And,
    /// `OR` boolean connective.
    Or,

    // Attribute keywords (case-insensitive, normalized to the canonical kind)
    /// `can` attribute label.
    Can,
    /// `path` attribute label.
    Path,
    /// `action` attribute label.
    Action,

    // Two-character comparison operators
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<=`
    Le,
    /// `>=`
    Ge,

    // Arithmetic operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*` in multiplication position.
    Times,
    /// `/`
    Divide,

    // Context-resolved `*`
    /// `*` in action-list position.
    Wildcard,

    // Single-character comparison operators
    /// `<`
    Lt,
    /// `>`
    Gt,

    // Literals
    /// A plain name: `[A-Za-z_][A-Za-z0-9_]*` that is not a keyword.
    Identifier,
    /// A non-negative decimal integer.
    Number,
    /// A double-quoted string, value stored with quotes stripped.
    Str,

    // Punctuation
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Returns the canonical vocabulary name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Role => "ROLE",
            Self::User => "USER",
            Self::Resource => "RESOURCE",
            Self::Allow => "ALLOW",
            Self::Deny => "DENY",
            Self::If => "IF",
            Self::On => "ON",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Can => "CAN",
            Self::Path => "PATH",
            Self::Action => "ACTION",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Le => "LE",
            Self::Ge => "GE",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Times => "TIMES",
            Self::Divide => "DIVIDE",
            Self::Wildcard => "WILDCARD",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Identifier => "IDENTIFIER",
            Self::Number => "NUMBER",
            Self::Str => "STRING",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Colon => "COLON",
            Self::Dot => "DOT",
            Self::Comma => "COMMA",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The literal payload carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    /// No payload (keywords, operators, punctuation).
    None,
    /// Identifier text, or an attribute keyword's normalized spelling.
    Text(String),
    /// Parsed value of a number literal.
    Number(u64),
    /// Contents of a string literal, quotes stripped.
    Str(String),
}

/// A classified lexeme: kind, literal payload, and the 1-based line on which
/// scanning of the lexeme began.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// What was matched.
    pub kind: TokenKind,
    /// The literal payload, if the kind carries one.
    pub value: Literal,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    /// Creates a token with a literal payload.
    #[must_use]
    pub const fn new(kind: TokenKind, value: Literal, line: usize) -> Self {
        Self { kind, value, line }
    }

    /// Creates a token with no payload.
    #[must_use]
    pub const fn bare(kind: TokenKind, line: usize) -> Self {
        Self::new(kind, Literal::None, line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Literal::None => write!(f, "{}", self.kind),
            Literal::Text(text) => write!(f, "{} '{text}'", self.kind),
            Literal::Number(n) => write!(f, "{} {n}", self.kind),
            Literal::Str(s) => write!(f, "{} \"{s}\"", self.kind),
        }
    }
}

/// Looks up a case-sensitive reserved word.
///
/// Reserved words must match exactly: `role` is a plain identifier, not the
/// `ROLE` keyword.
#[must_use]
pub fn reserved_word(ident: &str) -> Option<TokenKind> {
    match ident {
        "ROLE" => Some(TokenKind::Role),
        "USER" => Some(TokenKind::User),
        "RESOURCE" => Some(TokenKind::Resource),
        "ALLOW" => Some(TokenKind::Allow),
        "DENY" => Some(TokenKind::Deny),
        "IF" => Some(TokenKind::If),
        "ON" => Some(TokenKind::On),
        "AND" => Some(TokenKind::And),
        "OR" => Some(TokenKind::Or),
        _ => None,
    }
}

/// Looks up a case-insensitive attribute keyword (`can`, `path`, `action`).
///
/// These double as field labels and ordinary names in the surface syntax, so
/// they get their own lookup rather than entries in the reserved-word table:
/// `Can`, `CAN` and `can` all normalize to [`TokenKind::Can`].
#[must_use]
pub fn attribute_keyword(ident: &str) -> Option<TokenKind> {
    if ident.eq_ignore_ascii_case("can") {
        Some(TokenKind::Can)
    } else if ident.eq_ignore_ascii_case("path") {
        Some(TokenKind::Path)
    } else if ident.eq_ignore_ascii_case("action") {
        Some(TokenKind::Action)
    } else {
        None
    }
}
