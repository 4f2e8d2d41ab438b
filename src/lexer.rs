//! Selector tokenizer
//!
//! Splits selector text into typed tokens using the pest grammar in
//! `selector.pest`. Scanning is best-effort: it stops at the first
//! character no token pattern accepts, and the unscanned tail is handed
//! back to the caller rather than reported as an error.

use log::debug;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "selector.pest"]
struct SelectorLexer;

/// Kind of a selector token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Whitespace,
    HashName,
    ClassName,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "ident",
            TokenKind::Whitespace => "space",
            TokenKind::HashName => "hash",
            TokenKind::ClassName => "class",
            TokenKind::Comma => "comma",
        };
        f.write_str(name)
    }
}

/// A lexical token with its decoded value
///
/// `#`/`.` sigils are stripped from hash and class names, and any run of
/// whitespace is reduced to a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    fn from_match(rule: Rule, text: &str) -> Option<Self> {
        let token = match rule {
            Rule::ident => Token::new(TokenKind::Identifier, text),
            Rule::hash => Token::new(TokenKind::HashName, &text[1..]),
            Rule::class => Token::new(TokenKind::ClassName, &text[1..]),
            Rule::whitespace => Token::new(TokenKind::Whitespace, " "),
            Rule::comma => Token::new(TokenKind::Comma, ","),
            _ => return None,
        };
        Some(token)
    }
}

/// Output of [`tokenize`]: the tokens scanned and whatever input was left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub tokens: Vec<Token>,
    pub remainder: &'a str,
}

impl Tokens<'_> {
    /// True when the whole input was consumed
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// Tokenize selector text
///
/// Patterns are tried in the order identifier, hash name, class name,
/// whitespace, comma. Never fails: unrecognized input ends the scan and is
/// returned as [`Tokens::remainder`].
pub fn tokenize(input: &str) -> Tokens<'_> {
    let scanned = match SelectorLexer::parse(Rule::tokens, input) {
        Ok(mut pairs) => pairs.next(),
        Err(err) => {
            // `tokens` accepts the empty prefix, so this is unreachable in practice
            debug!("selector scan failed: {}", err);
            None
        }
    };

    let Some(scanned) = scanned else {
        return Tokens {
            tokens: Vec::new(),
            remainder: input,
        };
    };

    let end = scanned.as_span().end();
    let tokens = scanned
        .into_inner()
        .filter_map(|pair| Token::from_match(pair.as_rule(), pair.as_str()))
        .collect();

    let remainder = &input[end..];
    if !remainder.is_empty() {
        debug!(
            "selector truncated at byte {}: ignoring {:?}",
            end, remainder
        );
    }

    Tokens { tokens, remainder }
}
