//! Syntax tree model for the Warden access-policy language.
//!
//! This crate provides:
//! - The closed set of tree node variants with uniform source-line metadata
//! - An indented, human-readable tree printer
//! - A total projection of any tree to a generic ordered-key mapping, ready
//!   for JSON-style encoding
//!
//! Trees are built by a parser (not part of this crate) from a token stream
//! honoring the Warden token vocabulary, and are only read afterwards: there
//! is no mutation API. The printer and serializer match exhaustively over
//! the variant set, so both are total and a new variant cannot be added
//! without updating them.
//!
//! # Example
//!
//! ```rust
//! use warden_ast::{ActionSet, Decl, Program, RoleDef};
//!
//! let program = Program::new(
//!     vec![Decl::Role(RoleDef::new("Admin", ActionSet::Wildcard, 1))],
//!     1,
//! );
//!
//! assert_eq!(
//!     program.render(),
//!     "Program(1 declarations)\n  └── RoleDef(name=\"Admin\", actions=[*])\n"
//! );
//! assert_eq!(program.to_value()["declarations"][0]["type"], "RoleDef");
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod node;
pub mod printer;
pub mod serialize;

pub use node::{
    ActionSet, ArithOp, CompareOp, Condition, Decl, Effect, Expr, LogicalOp, Policy, Program,
    ResourceDef, RoleDef, UnaryOp, UserDef,
};
pub use serialize::condition_to_value;
