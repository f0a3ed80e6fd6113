//! Context classification for the overloaded `*` lexeme.
//!
//! A `*` is either an action-list wildcard (`can: *`, `action: *`) or the
//! multiplication operator (`3 * 4`, `time.hour * 2`). The lexer cannot know
//! which without a parse, so classification inspects a bounded window of raw
//! text on each side of the star. The decision policy below is evaluated in
//! order, first match wins:
//!
//! 1. the star directly follows an attribute label's colon (`can:`,
//!    `action:`, `path:`, any letter case, modulo whitespace): wildcard;
//! 2. the star sits inside an unclosed `{` block and a colon precedes it in
//!    the window: wildcard;
//! 3. an attribute label's colon precedes the star in the window and the
//!    text after the star is list-ending (`ON`/`IF`/`AND`/`OR`, `}`, `,`,
//!    or nothing): wildcard;
//! 4. otherwise: multiplication, which doubles as the default.
//!
//! This is a heuristic over raw text, not parse state; a star whose window
//! happens to straddle unrelated text (say, the tail of a string literal)
//! can be misclassified. That limitation is accepted.

use crate::token::TokenKind;

/// Number of characters inspected on each side of a `*`.
///
/// Wide enough to see the current clause, narrow enough not to leak context
/// from a neighboring statement.
pub const STAR_WINDOW: usize = 30;

/// Attribute labels whose colon marks an action/path list.
const ATTRIBUTE_SPELLINGS: [&str; 3] = ["can", "action", "path"];

/// Keywords that can directly follow a complete action list.
const TRAILING_KEYWORDS: [&str; 4] = ["ON", "IF", "AND", "OR"];

/// Classifies one `*` occurrence as [`TokenKind::Wildcard`] or
/// [`TokenKind::Times`].
///
/// `before` and `after` are the raw text windows on each side of the star
/// (at most [`STAR_WINDOW`] characters each, the star itself excluded).
/// `brace_depth` is the running count of unmatched `{` at the star's
/// position, maintained by the caller across the whole scan.
#[must_use]
pub fn classify_star(before: &str, after: &str, brace_depth: i32) -> TokenKind {
    // Rule 1: star immediately after an attribute label's colon.
    if attribute_colon_precedes(before, true) {
        return TokenKind::Wildcard;
    }

    // Rule 2: inside a brace block, with a colon somewhere before the star.
    if brace_depth > 0 && before.contains(':') {
        return TokenKind::Wildcard;
    }

    // Rule 3: attribute colon earlier in the clause (other list entries may
    // sit between it and the star), and the star ends the list.
    if attribute_colon_precedes(before, false) && list_like_trailing_context(after) {
        return TokenKind::Wildcard;
    }

    // Rules 4 and 5 coincide: anything not classified as a wildcard scans as
    // multiplication, the more permissive reading.
    TokenKind::Times
}

/// Returns true if the window ends with `<attr> :` followed only by
/// whitespace (when `require_adjacent`) or by anything at all (when not).
fn attribute_colon_precedes(before: &str, require_adjacent: bool) -> bool {
    let trimmed = before.trim();
    let Some(colon) = trimmed.rfind(':') else {
        return false;
    };

    if require_adjacent && !trimmed[colon + 1..].trim().is_empty() {
        return false;
    }

    let head = trimmed[..colon].trim_end().to_ascii_lowercase();
    ATTRIBUTE_SPELLINGS
        .iter()
        .any(|spelling| head.ends_with(spelling))
}

/// Returns true if the text after the star reads like the end of an action
/// list rather than the left half of a product.
fn list_like_trailing_context(after: &str) -> bool {
    let trimmed = after.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('}') || trimmed.starts_with(',') {
        return true;
    }
    TRAILING_KEYWORDS
        .iter()
        .any(|keyword| trimmed.starts_with(keyword))
}
