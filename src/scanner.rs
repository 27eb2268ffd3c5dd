//! Priority-order scanner over a [`SyntaxMap`].

use crate::syntax::SyntaxMap;
use crate::token::{Token, TokenKind};

/// Splits a source buffer into tokens, one rule match at a time.
///
/// Blank runs are consumed silently. Input that no rule matches comes out
/// as a one-byte [`TokenKind::None`] token, so the scanner always advances.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    map: &'a SyntaxMap,
    step_limit: Option<usize>,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a [u8], map: &'a SyntaxMap) -> Self {
        Self {
            src,
            pos: 0,
            map,
            step_limit: None,
            done: false,
        }
    }

    /// Bound every rule match to `limit` steps.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn is_finished(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The next token. Once the input is exhausted this keeps returning
    /// [`TokenKind::End`].
    pub fn next_token(&mut self) -> Token<'a> {
        loop {
            let token = self.scan();
            if token.kind != TokenKind::Blank {
                tracing::trace!(
                    kind = %token.kind,
                    offset = token.offset,
                    len = token.len(),
                    "token"
                );
                return token;
            }
        }
    }

    fn scan(&mut self) -> Token<'a> {
        let start = self.pos;
        let rest = &self.src[start..];
        if rest.is_empty() {
            return Token::new(TokenKind::End, start, rest);
        }

        let (kind, len) = self
            .map
            .first_match(rest, self.step_limit)
            .unwrap_or((TokenKind::None, 1));
        self.pos += len;
        Token::new(kind, start, &rest[..len])
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    /// Yields every token, then `End` exactly once.
    fn next(&mut self) -> Option<Token<'a>> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = token.kind == TokenKind::End;
        Some(token)
    }
}

/// Every token of `src`, the final `End` included.
pub fn tokenize<'a>(src: &'a [u8], map: &'a SyntaxMap) -> Vec<Token<'a>> {
    Scanner::new(src, map).collect()
}
