//! Selector grammar
//!
//! Recursive descent over the token stream with one token of look-ahead and
//! no backtracking:
//!
//! ```text
//! selector_group := selector ( Comma selector )*
//! selector       := simple_seq ( Whitespace simple_seq )*
//! simple_seq     := ( Identifier | special ) special* | ε
//! special        := HashName | ClassName
//! ```
//!
//! Parsing never fails. Anything the grammar cannot place ends the parse
//! and is ignored.

use log::debug;

use crate::lexer::{Token, TokenKind, tokenize};
use crate::pattern::{Compound, Predicate, Selector, SelectorGroup};

/// Parse selector text into a [`SelectorGroup`]
///
/// Input the tokenizer cannot scan is dropped, so `"div$$$"` parses the
/// same as `"div"`.
pub fn parse_selector(input: &str) -> SelectorGroup {
    let scanned = tokenize(input);
    parse_tokens(&scanned.tokens)
}

/// Parse a token sequence into a [`SelectorGroup`]
pub fn parse_tokens(tokens: &[Token]) -> SelectorGroup {
    let mut stream = TokenStream::new(tokens);
    let group = selector_group(&mut stream);

    let rest = stream.remaining();
    if !rest.is_empty() {
        debug!("ignoring {} unparsed selector token(s): {:?}", rest.len(), rest);
    }
    group
}

/// Cursor over a token slice, consumed front to back
struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Consume the next token if it has the given kind
    fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        let token = self.peek().filter(|t| t.kind == kind)?;
        self.pos += 1;
        Some(token)
    }

    fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }
}

fn selector_group(stream: &mut TokenStream<'_>) -> SelectorGroup {
    let mut selectors = vec![selector(stream)];

    while stream.eat(TokenKind::Comma).is_some() {
        stream.eat(TokenKind::Whitespace);
        selectors.push(selector(stream));
    }

    SelectorGroup::new(selectors)
}

fn selector(stream: &mut TokenStream<'_>) -> Selector {
    let mut selector = Selector::new();
    selector.push(simple_seq(stream));

    while combinator(stream) {
        selector.push(simple_seq(stream));
    }

    selector
}

fn simple_seq(stream: &mut TokenStream<'_>) -> Compound {
    let mut predicates = Vec::new();

    let Some(first) = type_sel(stream).or_else(|| special_sel(stream)) else {
        return Compound::default();
    };
    predicates.push(first);

    while let Some(predicate) = special_sel(stream) {
        predicates.push(predicate);
    }

    Compound::new(predicates)
}

fn type_sel(stream: &mut TokenStream<'_>) -> Option<Predicate> {
    stream
        .eat(TokenKind::Identifier)
        .map(|t| Predicate::Tag(t.value.clone()))
}

fn special_sel(stream: &mut TokenStream<'_>) -> Option<Predicate> {
    match stream.peek_kind()? {
        TokenKind::HashName => stream
            .eat(TokenKind::HashName)
            .map(|t| Predicate::Id(t.value.clone())),
        TokenKind::ClassName => stream
            .eat(TokenKind::ClassName)
            .map(|t| Predicate::Class(t.value.clone())),
        _ => None,
    }
}

/// Only the descendant combinator exists
fn combinator(stream: &mut TokenStream<'_>) -> bool {
    stream.eat(TokenKind::Whitespace).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> Predicate {
        Predicate::Tag(s.to_string())
    }

    fn id(s: &str) -> Predicate {
        Predicate::Id(s.to_string())
    }

    fn class(s: &str) -> Predicate {
        Predicate::Class(s.to_string())
    }

    #[test]
    fn test_parse_type_selector() {
        let group = parse_selector("div");

        assert_eq!(group.selectors.len(), 1);
        assert_eq!(group.selectors[0].compounds, vec![Compound::new(vec![tag("div")])]);
    }

    #[test]
    fn test_parse_compound() {
        let group = parse_selector("div.warn#x");

        assert_eq!(
            group.selectors[0].compounds,
            vec![Compound::new(vec![tag("div"), class("warn"), id("x")])]
        );
    }

    #[test]
    fn test_parse_compound_without_type() {
        let group = parse_selector("#x.a.b");

        assert_eq!(
            group.selectors[0].compounds,
            vec![Compound::new(vec![id("x"), class("a"), class("b")])]
        );
    }

    #[test]
    fn test_parse_descendants() {
        let group = parse_selector("ul  li.item a");

        let compounds = &group.selectors[0].compounds;
        assert_eq!(compounds.len(), 3);
        assert_eq!(compounds[0], Compound::new(vec![tag("ul")]));
        assert_eq!(compounds[1], Compound::new(vec![tag("li"), class("item")]));
        assert_eq!(compounds[2], Compound::new(vec![tag("a")]));
    }

    #[test]
    fn test_parse_group() {
        let group = parse_selector("a, b.c,#d");

        assert_eq!(group.selectors.len(), 3);
        assert_eq!(group.to_string(), "a, b.c, #d");
    }

    #[test]
    fn test_parse_group_with_space_before_comma() {
        let group = parse_selector("a , b");

        assert_eq!(group.selectors.len(), 2);
        assert_eq!(group.to_string(), "a, b");
    }

    #[test]
    fn test_parse_empty() {
        let group = parse_selector("");

        assert_eq!(group.selectors.len(), 1);
        assert!(group.selectors[0].is_empty());
    }

    #[test]
    fn test_parse_leading_whitespace() {
        let group = parse_selector("  p");

        assert_eq!(group.selectors.len(), 1);
        assert_eq!(group.selectors[0].compounds, vec![Compound::new(vec![tag("p")])]);
    }

    #[test]
    fn test_parse_trailing_comma() {
        let group = parse_selector("a,");

        assert_eq!(group.selectors.len(), 2);
        assert!(group.selectors[1].is_empty());
    }

    #[test]
    fn test_parse_truncated_input() {
        assert_eq!(parse_selector("div$$$"), parse_selector("div"));
        assert_eq!(parse_selector("ul > li"), parse_selector("ul"));
    }

    #[test]
    fn test_unplaceable_tokens_end_parse() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Identifier, "b"),
            Token::new(TokenKind::Comma, ","),
            Token::new(TokenKind::Identifier, "c"),
        ];
        let group = parse_tokens(&tokens);

        assert_eq!(group.selectors.len(), 1);
        assert_eq!(group.to_string(), "a");
    }

    #[test]
    fn test_tag_case_preserved_in_ast() {
        let group = parse_selector("DIV");
        assert_eq!(group.selectors[0].compounds[0].predicates[0], tag("DIV"));
    }
}
