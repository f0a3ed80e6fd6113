//! The scanner.
//!
//! [`Lexer`] walks an immutable character buffer and yields [`Token`]s
//! lazily through its [`Iterator`] impl. All scan state (position, line
//! counter, brace depth, collected diagnostics) lives on the instance, so
//! concurrent scans of different inputs never share anything and a fresh
//! [`Lexer::new`] always starts clean.
//!
//! Scanning never fails: a character that matches no pattern is reported as
//! an [`IllegalCharacter`], skipped, and the scan continues, so one pass
//! surfaces every bad character in the input.

use crate::context::{classify_star, STAR_WINDOW};
use crate::error::IllegalCharacter;
use crate::token::{attribute_keyword, reserved_word, Literal, Token, TokenKind};
use tracing::warn;

/// Tokenizes an entire input in one call.
///
/// Returns the tokens in source order together with the illegal-character
/// diagnostics collected along the way. Use [`Lexer`] directly when lazy
/// consumption matters.
#[must_use]
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<IllegalCharacter>) {
    let mut lexer = Lexer::new(input);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.into_diagnostics())
}

/// Streaming tokenizer over one input buffer.
#[derive(Debug, Clone)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    brace_depth: i32,
    diagnostics: Vec<IllegalCharacter>,
}

impl Lexer {
    /// Creates a lexer for `input`, positioned at line 1.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            brace_depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// The illegal-character diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[IllegalCharacter] {
        &self.diagnostics
    }

    /// Consumes the lexer, returning all collected diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<IllegalCharacter> {
        self.diagnostics
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Skips spaces, tabs and carriage returns; newline runs advance the
    /// line counter and produce nothing.
    fn skip_layout(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' => self.pos += 1,
                '\n' => {
                    self.pos += 1;
                    self.line += 1;
                }
                _ => break,
            }
        }
    }

    /// Emits a single-character token.
    fn single(&mut self, kind: TokenKind, line: usize) -> Token {
        self.pos += 1;
        Token::bare(kind, line)
    }

    /// Emits `two` if the next character is `second`, else `one`.
    fn one_or_two(
        &mut self,
        second: char,
        one: TokenKind,
        two: TokenKind,
        line: usize,
    ) -> Token {
        if self.peek_next() == Some(second) {
            self.pos += 2;
            Token::bare(two, line)
        } else {
            self.pos += 1;
            Token::bare(one, line)
        }
    }

    /// Emits `kind` for a two-character operator whose first character is
    /// not a token on its own (`==`, `!=`); reports the lone first
    /// character as illegal otherwise.
    fn two_or_illegal(&mut self, first: char, kind: TokenKind, line: usize) -> Option<Token> {
        if self.peek_next() == Some('=') {
            self.pos += 2;
            Some(Token::bare(kind, line))
        } else {
            self.report_illegal(first, self.pos);
            self.pos += 1;
            None
        }
    }

    /// Scans a double-quoted string literal with the quotes stripped.
    ///
    /// The literal may not contain a double quote or a newline; an opening
    /// quote that never closes on its line is itself an illegal character.
    fn string_literal(&mut self, line: usize) -> Option<Token> {
        let open = self.pos;
        let mut end = open + 1;
        while let Some(&ch) = self.chars.get(end) {
            if ch == '"' {
                let value: String = self.chars[open + 1..end].iter().collect();
                self.pos = end + 1;
                return Some(Token::new(TokenKind::Str, Literal::Str(value), line));
            }
            if ch == '\n' {
                break;
            }
            end += 1;
        }

        self.report_illegal('"', open);
        self.pos = open + 1;
        None
    }

    /// Scans a run of decimal digits. Values past `u64::MAX` saturate.
    fn number_literal(&mut self, line: usize) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }

        let mut value: u64 = 0;
        for digit in &self.chars[start..self.pos] {
            let d = u64::from(digit.to_digit(10).unwrap_or(0));
            value = value.saturating_mul(10).saturating_add(d);
        }

        Token::new(TokenKind::Number, Literal::Number(value), line)
    }

    /// Scans an identifier by maximal munch, then classifies it: reserved
    /// words match case-sensitively, attribute keywords case-insensitively
    /// (normalized to their uppercase spelling), anything else is a plain
    /// identifier.
    fn identifier_or_keyword(&mut self, line: usize) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();

        if let Some(kind) = reserved_word(&text) {
            return Token::bare(kind, line);
        }
        if let Some(kind) = attribute_keyword(&text) {
            return Token::new(kind, Literal::Text(text.to_ascii_uppercase()), line);
        }
        Token::new(TokenKind::Identifier, Literal::Text(text), line)
    }

    /// Resolves a `*` against its surrounding text windows.
    fn star(&mut self, line: usize) -> Token {
        let at = self.pos;
        let before: String = self.chars[at.saturating_sub(STAR_WINDOW)..at].iter().collect();
        let after_end = (at + 1 + STAR_WINDOW).min(self.chars.len());
        let after: String = self.chars[at + 1..after_end].iter().collect();

        self.pos += 1;
        let kind = classify_star(&before, &after, self.brace_depth);
        Token::bare(kind, line)
    }

    fn report_illegal(&mut self, character: char, position: usize) {
        warn!(
            "skipping illegal character '{}' at line {}, position {}",
            character, self.line, position
        );
        self.diagnostics.push(IllegalCharacter {
            character,
            line: self.line,
            position,
        });
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            self.skip_layout();
            let ch = self.peek()?;
            let line = self.line;

            match ch {
                '"' => {
                    if let Some(token) = self.string_literal(line) {
                        return Some(token);
                    }
                }
                '0'..='9' => return Some(self.number_literal(line)),
                'A'..='Z' | 'a'..='z' | '_' => {
                    return Some(self.identifier_or_keyword(line));
                }
                '*' => return Some(self.star(line)),

                // Two-character comparisons take priority over `<` and `>`.
                '<' => return Some(self.one_or_two('=', TokenKind::Lt, TokenKind::Le, line)),
                '>' => return Some(self.one_or_two('=', TokenKind::Gt, TokenKind::Ge, line)),
                '=' => {
                    if let Some(token) = self.two_or_illegal('=', TokenKind::Eq, line) {
                        return Some(token);
                    }
                }
                '!' => {
                    if let Some(token) = self.two_or_illegal('!', TokenKind::Ne, line) {
                        return Some(token);
                    }
                }

                '+' => return Some(self.single(TokenKind::Plus, line)),
                '-' => return Some(self.single(TokenKind::Minus, line)),
                '/' => return Some(self.single(TokenKind::Divide, line)),
                '{' => {
                    self.brace_depth += 1;
                    return Some(self.single(TokenKind::LBrace, line));
                }
                '}' => {
                    self.brace_depth -= 1;
                    return Some(self.single(TokenKind::RBrace, line));
                }
                '(' => return Some(self.single(TokenKind::LParen, line)),
                ')' => return Some(self.single(TokenKind::RParen, line)),
                ':' => return Some(self.single(TokenKind::Colon, line)),
                '.' => return Some(self.single(TokenKind::Dot, line)),
                ',' => return Some(self.single(TokenKind::Comma, line)),

                other => {
                    self.report_illegal(other, self.pos);
                    self.pos += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DEMO: &str = r#"ROLE Admin {can: *}
USER JaneDoe {role: Developer}
RESOURCE DB_Finance {path: "/data/financial"}
ALLOW action: read, write ON resource: DB_Finance
IF (time.hour > 9 AND time.hour < 17)"#;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).0.into_iter().map(|t| t.kind).collect()
    }

    /// The kind the single `*` in `input` resolved to.
    fn star_kind(input: &str) -> TokenKind {
        tokenize(input)
            .0
            .into_iter()
            .find(|t| matches!(t.kind, TokenKind::Times | TokenKind::Wildcard))
            .map(|t| t.kind)
            .expect("input contains a star")
    }

    #[test]
    fn demo_program_first_line() {
        let (tokens, diagnostics) = tokenize(DEMO);
        assert!(diagnostics.is_empty());

        let first_line: Vec<&Token> = tokens.iter().take_while(|t| t.line == 1).collect();
        let expected = [
            TokenKind::Role,
            TokenKind::Identifier,
            TokenKind::LBrace,
            TokenKind::Can,
            TokenKind::Colon,
            TokenKind::Wildcard,
            TokenKind::RBrace,
        ];
        let actual: Vec<TokenKind> = first_line.iter().map(|t| t.kind).collect();
        assert_eq!(actual, expected);
        assert_eq!(
            first_line[1].value,
            Literal::Text("Admin".to_string())
        );
    }

    #[test]
    fn demo_program_line_numbers_follow_source() {
        let (tokens, _) = tokenize(DEMO);

        let role_def = tokens.iter().find(|t| t.kind == TokenKind::Role).unwrap();
        assert_eq!(role_def.line, 1);
        let resource = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Resource)
            .unwrap();
        assert_eq!(resource.line, 3);
        let if_kw = tokens.iter().find(|t| t.kind == TokenKind::If).unwrap();
        assert_eq!(if_kw.line, 5);
    }

    #[test]
    fn star_resolution_matches_surrounding_context() {
        assert_eq!(star_kind("3 * 4"), TokenKind::Times);
        assert_eq!(star_kind("time.hour * 2 + 5"), TokenKind::Times);
        assert_eq!(star_kind("(a * b)"), TokenKind::Times);
        assert_eq!(star_kind("ROLE Admin {can: *}"), TokenKind::Wildcard);
        assert_eq!(
            star_kind("ALLOW action: * ON resource: DB_Finance"),
            TokenKind::Wildcard
        );
        assert_eq!(star_kind("ROLE Admin {can: read, *}"), TokenKind::Wildcard);
        assert_eq!(
            star_kind("ROLE Admin {can: {permissions: *}}"),
            TokenKind::Wildcard
        );
    }

    #[test]
    fn reserved_words_require_exact_case() {
        assert_eq!(
            kinds("role Admin"),
            [TokenKind::Identifier, TokenKind::Identifier]
        );
        assert_eq!(kinds("ROLE Admin"), [TokenKind::Role, TokenKind::Identifier]);
    }

    #[test]
    fn attribute_keywords_normalize_case() {
        for input in ["can", "CAN", "Can"] {
            let (tokens, _) = tokenize(input);
            assert_eq!(tokens[0].kind, TokenKind::Can);
            assert_eq!(tokens[0].value, Literal::Text("CAN".to_string()));
        }
    }

    #[test]
    fn string_literal_strips_quotes() {
        let (tokens, diagnostics) = tokenize("\"/data/financial\"");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(
            tokens[0].value,
            Literal::Str("/data/financial".to_string())
        );
    }

    #[test]
    fn unterminated_string_reports_the_quote_and_continues() {
        let (tokens, diagnostics) = tokenize("\"unclosed");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].character, '"');
        assert_eq!(diagnostics[0].position, 0);
        // The rest of the line still scans.
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, Literal::Text("unclosed".to_string()));
    }

    #[test]
    fn illegal_character_is_reported_and_skipped() {
        let (tokens, diagnostics) = tokenize("ROLE Admin {can: #}");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].character, '#');
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(diagnostics[0].position, 17);

        let expected = [
            TokenKind::Role,
            TokenKind::Identifier,
            TokenKind::LBrace,
            TokenKind::Can,
            TokenKind::Colon,
            TokenKind::RBrace,
        ];
        let actual: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn comparison_operators_prefer_the_longer_match() {
        assert_eq!(
            kinds("a <= b >= c == d != e < f > g"),
            [
                TokenKind::Identifier,
                TokenKind::Le,
                TokenKind::Identifier,
                TokenKind::Ge,
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::Identifier,
                TokenKind::Ne,
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn lone_equals_and_bang_are_illegal() {
        let (tokens, diagnostics) = tokenize("a = b ! c");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            [
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier
            ]
        );
        let reported: Vec<char> = diagnostics.iter().map(|d| d.character).collect();
        assert_eq!(reported, ['=', '!']);
    }

    #[test]
    fn number_values_parse() {
        let (tokens, _) = tokenize("9 17 100");
        let values: Vec<&Literal> = tokens.iter().map(|t| &t.value).collect();
        assert_eq!(
            values,
            [
                &Literal::Number(9),
                &Literal::Number(17),
                &Literal::Number(100)
            ]
        );
    }

    #[test]
    fn oversized_number_saturates() {
        let (tokens, diagnostics) = tokenize("99999999999999999999999999");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].value, Literal::Number(u64::MAX));
    }

    #[test]
    fn newline_runs_advance_the_line_counter() {
        let (tokens, _) = tokenize("a\n\n\nb");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 4);
    }

    #[test]
    fn each_lexer_starts_fresh() {
        let (tokens, _) = tokenize("a\nb");
        assert_eq!(tokens[1].line, 2);

        // A second run is unaffected by the first.
        let (tokens, diagnostics) = tokenize("c");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].line, 1);
    }

    proptest! {
        #[test]
        fn tokenization_terminates_with_monotone_lines(input in "[ -~\n]{0,200}") {
            let (tokens, diagnostics) = tokenize(&input);

            let mut previous = 1;
            for token in &tokens {
                prop_assert!(token.line >= previous);
                previous = token.line;
            }
            for diagnostic in &diagnostics {
                prop_assert!(diagnostic.line >= 1);
                prop_assert!(diagnostic.position < input.chars().count());
            }
        }

        #[test]
        fn every_character_is_consumed_or_reported(input in "[a-z{}:*,# ]{0,80}") {
            // Valid tokens plus diagnostics account for the whole scan; the
            // lexer never loops or drops input silently.
            let (tokens, diagnostics) = tokenize(&input);
            let scanned = tokens.len() + diagnostics.len();
            prop_assert!(scanned <= input.len());
        }
    }
}
