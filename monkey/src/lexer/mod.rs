//! Lexer implementation using logos
//!
//! [`Lexer`] pulls one [`Token`] at a time from a `logos` recogniser and
//! normalises what it produces: string literals lose their quotes, anything
//! unrecognised becomes [`TokenKind::Illegal`], and the stream ends with a
//! single synthetic `EOF` that repeats if the caller keeps asking.

mod token;

pub use token::{Token, TokenKind};

use crate::ast::Span;
use logos::Logos;

/// Pull-based token stream over a source string
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    /// Set once `EOF` has been handed out through the iterator
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            inner: TokenKind::lexer(source),
            exhausted: false,
        }
    }

    /// Next token; returns `EOF` forever once the input is consumed
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.inner.next() else {
            return Token::eof(self.inner.source().len());
        };
        let span = Span::from(self.inner.span());
        let slice = self.inner.slice();

        match result {
            Ok(TokenKind::String) => string_token(slice, span),
            Ok(kind) => Token::new(kind, slice, span),
            Err(()) => illegal(slice, span),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the first `EOF`
    fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.exhausted = true;
        }
        Some(token)
    }
}

/// Strip the delimiters from a string literal, or flag it as unterminated
fn string_token(slice: &str, span: Span) -> Token {
    match slice
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => Token::new(TokenKind::String, inner, span),
        None => illegal(slice, span),
    }
}

fn illegal(slice: &str, span: Span) -> Token {
    let literal = slice.chars().next().map(String::from).unwrap_or_default();
    Token::new(TokenKind::Illegal, literal, span)
}

/// Tokenize a whole source string, including the trailing `EOF`
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
