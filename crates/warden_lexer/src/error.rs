//! Diagnostics emitted while scanning.

use thiserror::Error;

/// A character that matched no token pattern and was skipped.
///
/// These are collected rather than raised: the scan reports the character
/// and carries on at the next one, so a single pass surfaces every illegal
/// character in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal character '{character}' at line {line}, position {position}")]
pub struct IllegalCharacter {
    /// The offending character.
    pub character: char,
    /// 1-based line on which it was found.
    pub line: usize,
    /// 0-based character offset from the start of the input.
    pub position: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_all_three_facts() {
        let diagnostic = IllegalCharacter {
            character: '#',
            line: 2,
            position: 17,
        };
        assert_eq!(
            diagnostic.to_string(),
            "illegal character '#' at line 2, position 17"
        );
    }
}
