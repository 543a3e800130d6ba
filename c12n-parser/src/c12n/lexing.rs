//! Tokenization of marking strings
//!
//!     The wire grammar only has three separators: `//` between clauses, `/` between
//!     tokens, and `,` which some producers use in release lists (`REL TO A, B`).
//!     Everything else is text. The logos lexer below emits those four tokens with
//!     their byte spans; [`split_clauses`] groups the text runs into clauses.
//!
//!     The level clause is kept as the raw source slice because level names may
//!     legitimately contain characters that are separators elsewhere only in
//!     malformed input; whatever sits before the first `//` is the level candidate.

use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

/// `REL` or `REL TO` at the start of a normalized token.
static RELATION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^REL(?: TO)?(?: |$)").unwrap());

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[token("//")]
    ClauseSeparator,

    #[token("/")]
    TokenSeparator,

    #[token(",")]
    ListSeparator,

    #[regex(r"[^/,]+")]
    Text,
}

impl Token {
    pub fn is_separator(&self) -> bool {
        !matches!(self, Token::Text)
    }
}

/// Tokenize a marking, pairing each token with its byte span.
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

/// One `//`-delimited section of a marking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause<'a> {
    /// Source slice of the whole clause, untrimmed.
    pub text: &'a str,
    /// Trimmed, non-empty text runs between `/` and `,` separators.
    pub items: Vec<&'a str>,
}

/// Split a marking into clauses. There is always at least one clause, possibly empty.
pub fn split_clauses(source: &str) -> Vec<Clause<'_>> {
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut items = Vec::new();

    for (token, span) in tokenize_with_spans(source) {
        match token {
            Token::ClauseSeparator => {
                clauses.push(Clause {
                    text: &source[start..span.start],
                    items: std::mem::take(&mut items),
                });
                start = span.end;
            }
            Token::Text => {
                let item = source[span].trim();
                if !item.is_empty() {
                    items.push(item);
                }
            }
            Token::TokenSeparator | Token::ListSeparator => {}
        }
    }
    clauses.push(Clause {
        text: &source[start..],
        items,
    });

    clauses
}

/// Strip a leading relation marker from a normalized token.
///
/// Returns `None` when the token carries no marker.
pub fn strip_relation(token: &str) -> Option<&str> {
    RELATION_MARKER
        .find(token)
        .map(|marker| token[marker.end()..].trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_with_spans() {
        let tokens = tokenize_with_spans("TLP:A//MPL/LF//REL TO B, M");
        let kinds: Vec<Token> = tokens.iter().map(|(token, _)| *token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Text,
                Token::ClauseSeparator,
                Token::Text,
                Token::TokenSeparator,
                Token::Text,
                Token::ClauseSeparator,
                Token::Text,
                Token::ListSeparator,
                Token::Text,
            ]
        );
        assert_eq!(tokens[0].1, 0..5);
        assert_eq!(tokens[1].1, 5..7);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize_with_spans(""), vec![]);
        let clauses = split_clauses("");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, "");
        assert!(clauses[0].items.is_empty());
    }

    #[test]
    fn test_split_clauses() {
        let clauses = split_clauses("L2// LE /AC//REL A, B");
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].text, "L2");
        assert_eq!(clauses[1].items, vec!["LE", "AC"]);
        assert_eq!(clauses[2].items, vec!["REL A", "B"]);
    }

    #[test]
    fn test_noise_clauses_are_kept_empty() {
        let clauses = split_clauses("L0////,/");
        assert_eq!(clauses.len(), 3);
        assert!(clauses[1].items.is_empty());
        assert!(clauses[2].items.is_empty());
    }

    #[test]
    fn test_triple_slash() {
        // `//` wins the longest match, the leftover `/` separates nothing
        let clauses = split_clauses("L0///LE");
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[1].items, vec!["LE"]);
    }

    #[test]
    fn test_strip_relation() {
        assert_eq!(strip_relation("REL TO GROUP A"), Some("GROUP A"));
        assert_eq!(strip_relation("REL A"), Some("A"));
        assert_eq!(strip_relation("REL"), Some(""));
        assert_eq!(strip_relation("REL TO"), Some(""));
        assert_eq!(strip_relation("RELEASE"), None);
        assert_eq!(strip_relation("A"), None);
    }
}
