//! Human-readable tree rendering.
//!
//! A pre-order depth-first walk, one node per line: two spaces of indent
//! per depth level, `├── ` before every sibling except the last, `└── `
//! before the last. Declarations and literal nodes are leaves here: a
//! role's action list is folded into its one-line summary rather than
//! rendered as children. A policy's condition is the only labeled child.
//!
//! Rendering is total and deterministic; the same tree always produces the
//! same bytes.

use crate::node::{Condition, Decl, Expr, Program};
use std::fmt;
use std::fmt::Write;

const INDENT: &str = "  ";
const MID: &str = "├── ";
const LAST: &str = "└── ";
const CONDITION_LABEL: &str = "└── condition: ";

impl Program {
    /// Renders the whole tree as an indented listing.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, 0, "", self);
        let count = self.declarations.len();
        for (index, decl) in self.declarations.iter().enumerate() {
            write_decl(&mut out, decl, 1, sibling_prefix(index, count));
        }
        out
    }
}

impl Decl {
    /// Renders this declaration (and, for a policy, its condition) as a
    /// standalone tree.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_decl(&mut out, self, 0, "");
        out
    }
}

impl Condition {
    /// Renders this condition subtree as a standalone tree.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_condition(&mut out, self, 0, "");
        out
    }
}

impl Expr {
    /// Renders this expression subtree as a standalone tree.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_expr(&mut out, self, 0, "");
        out
    }
}

const fn sibling_prefix(index: usize, count: usize) -> &'static str {
    if index + 1 == count {
        LAST
    } else {
        MID
    }
}

fn push_line(out: &mut String, depth: usize, prefix: &str, summary: impl fmt::Display) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(prefix);
    let _ = writeln!(out, "{summary}");
}

fn write_decl(out: &mut String, decl: &Decl, depth: usize, prefix: &str) {
    push_line(out, depth, prefix, decl);

    // The condition is a policy's only rendered child; everything else a
    // declaration holds is folded into its summary line.
    if let Decl::Policy(policy) = decl {
        if let Some(condition) = &policy.condition {
            write_condition(out, condition, depth + 1, CONDITION_LABEL);
        }
    }
}

fn write_condition(out: &mut String, condition: &Condition, depth: usize, prefix: &str) {
    push_line(out, depth, prefix, condition);

    match condition {
        Condition::Logical { left, right, .. } => {
            write_condition(out, left, depth + 1, MID);
            write_condition(out, right, depth + 1, LAST);
        }
        Condition::Comparison { left, right, .. } => {
            write_expr(out, left, depth + 1, MID);
            write_expr(out, right, depth + 1, LAST);
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr, depth: usize, prefix: &str) {
    push_line(out, depth, prefix, expr);

    match expr {
        Expr::Arithmetic { left, right, .. } => {
            write_expr(out, left, depth + 1, MID);
            write_expr(out, right, depth + 1, LAST);
        }
        Expr::Unary { operand, .. } => {
            // A unary's operand is its only child, so it always renders as
            // a last sibling.
            write_expr(out, operand, depth + 1, LAST);
        }
        Expr::Attribute { .. }
        | Expr::Identifier { .. }
        | Expr::Number { .. }
        | Expr::Str { .. }
        | Expr::Wildcard { .. } => {}
    }
}
