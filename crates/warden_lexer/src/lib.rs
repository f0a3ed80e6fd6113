//! Lexical analysis for the Warden access-policy language.
//!
//! Warden source text declares roles, users, resources and conditional
//! allow/deny rules. This crate turns that text into an ordered, lazy
//! stream of [`Token`]s for a grammar-driven parser to consume; it does no
//! parsing of its own.
//!
//! The one genuinely context-sensitive piece of the language is the `*`
//! lexeme, which is an action-list wildcard in `ROLE Admin {can: *}` but the
//! multiplication operator in `time.hour * 2`. Resolution is a bounded-
//! window text heuristic, isolated in [`context::classify_star`].
//!
//! # Example
//!
//! ```rust
//! use warden_lexer::{tokenize, TokenKind};
//!
//! let (tokens, diagnostics) = tokenize("ROLE Admin {can: *}");
//!
//! assert!(diagnostics.is_empty());
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Role,
//!         TokenKind::Identifier,
//!         TokenKind::LBrace,
//!         TokenKind::Can,
//!         TokenKind::Colon,
//!         TokenKind::Wildcard,
//!         TokenKind::RBrace,
//!     ]
//! );
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod context;
pub mod error;
pub mod lexer;
pub mod token;

pub use error::IllegalCharacter;
pub use lexer::{tokenize, Lexer};
pub use token::{attribute_keyword, reserved_word, Literal, Token, TokenKind};
