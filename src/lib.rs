//! Front end of the Bee language: a graph-based pattern engine and the
//! scanner built on top of it.
//!
//! # Example
//!
//! ```rust
//! use bee::{Regex, SyntaxMap, TokenKind, tokenize};
//!
//! // Patterns are prefix matches that report how many bytes they accept.
//! let ident = Regex::new("{a|'_'} {a|'_'|n}*").unwrap();
//! assert_eq!(ident.match_len("snake_case42 = 1"), Some(12));
//! assert_eq!(ident.match_len("42"), None);
//!
//! // The built-in rule table drives the scanner.
//! let map = SyntaxMap::bee().unwrap();
//! let kinds: Vec<TokenKind> = tokenize(b"x = 0x1f;", &map)
//!     .iter()
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Identifier,
//!         TokenKind::Assign,
//!         TokenKind::IntHex,
//!         TokenKind::Semicolon,
//!         TokenKind::End,
//!     ]
//! );
//! ```

pub mod escape;
pub mod pattern;
pub mod scanner;
pub mod syntax;
pub mod token;

pub use escape::unescape;
pub use pattern::{Graph, MatchError, Matcher, PatternError, Regex};
pub use scanner::{Scanner, tokenize};
pub use syntax::{BEE_RULES, Rule, RuleError, SyntaxMap};
pub use token::{Token, TokenKind};
