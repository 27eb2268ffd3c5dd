//! The lexical rule table.
//!
//! Every rule is written in the pattern dialect of [`crate::pattern`]. Rules
//! are tried in table order and the first one to match wins, so longer
//! operators must come before their own prefixes and keywords before
//! identifiers.

use std::fmt;

use crate::pattern::{PatternError, Regex};
use crate::token::TokenKind;

/// Lookahead shared by keywords: the next byte may not continue an
/// identifier.
macro_rules! keyword {
    ($word:literal) => {
        concat!("'", $word, "' /!{a|n|'_'}")
    };
}

/// Rule table of the Bee language, highest priority first.
pub const BEE_RULES: &[(TokenKind, &str)] = &[
    (TokenKind::NewLine, r"`\n`"),
    (TokenKind::Blank, r"{/!`\n` _}+"),
    (TokenKind::Comment, r"'//' {!`\n`}*"),
    (TokenKind::Directive, r"'#' {!`\n`}*"),
    (TokenKind::KwStruct, keyword!("struct")),
    (TokenKind::KwEnum, keyword!("enum")),
    (TokenKind::KwUnion, keyword!("union")),
    (TokenKind::KwUnderscore, keyword!("_")),
    (TokenKind::KwSelf, "'$'"),
    (TokenKind::KwBreak, keyword!("break")),
    (TokenKind::KwCase, keyword!("case")),
    (TokenKind::KwContinue, keyword!("continue")),
    (TokenKind::KwElse, keyword!("else")),
    (TokenKind::KwEach, keyword!("each")),
    (TokenKind::KwFor, keyword!("for")),
    (TokenKind::KwIf, keyword!("if")),
    (TokenKind::KwReturn, keyword!("return")),
    (TokenKind::KwSwitch, keyword!("switch")),
    (TokenKind::KwAnd, keyword!("and")),
    (TokenKind::KwOr, keyword!("or")),
    (TokenKind::KwFn, keyword!("fn")),
    (TokenKind::ParenBegin, "'('"),
    (TokenKind::ParenEnd, "')'"),
    (TokenKind::ScopeBegin, "'{'"),
    (TokenKind::ScopeEnd, "'}'"),
    (TokenKind::CrochetBegin, "'['"),
    (TokenKind::CrochetEnd, "']'"),
    (TokenKind::Arrow, "'->'"),
    (TokenKind::Increment, "'++'"),
    (TokenKind::Decrement, "'--'"),
    (TokenKind::Add, "'+'"),
    (TokenKind::Sub, "'-'"),
    (TokenKind::Float, "{n+ '.' n*} | {n* '.' n+}"),
    (TokenKind::IntBin, "'0b' [0-1]+"),
    (TokenKind::IntHex, "'0x' {n|[a-f]|[A-F]}+"),
    (TokenKind::IntDec, "n+"),
    (TokenKind::RawStr, "Q {!Q}* Q"),
    (TokenKind::Str, r"q {{'\' ^} | !{q | `\n`}}* q"),
    (TokenKind::Char, r"'`' {{'\' ^} | !{'`' | `\n`}} '`'"),
    (TokenKind::Identifier, "{a|'_'} {a|'_'|n}*"),
    (TokenKind::Declare, "'::'"),
    (TokenKind::Define, "':'"),
    (TokenKind::BinNot, "'~'"),
    (TokenKind::BinOr, "'|'"),
    (TokenKind::BinXor, "'^'"),
    (TokenKind::BinShiftL, "'<<'"),
    (TokenKind::BinShiftR, "'>>'"),
    (TokenKind::Div, "'/'"),
    (TokenKind::Mod, "'%'"),
    (TokenKind::Equal, "'=='"),
    (TokenKind::NotEq, "'!='"),
    (TokenKind::LessEq, "'<='"),
    (TokenKind::GreaterEq, "'>='"),
    (TokenKind::Less, "'<'"),
    (TokenKind::Greater, "'>'"),
    (TokenKind::Not, "'!'"),
    (TokenKind::Assign, "'='"),
    (TokenKind::Ref, "'&'"),
    (TokenKind::Deref, "'*'"),
    (TokenKind::Dot, "'.'"),
    (TokenKind::Comma, "','"),
    (TokenKind::Semicolon, "';'"),
    (TokenKind::None, "{!_}+"),
];

/// A rule whose source failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    pub kind: TokenKind,
    pub source: String,
    pub error: PatternError,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} ({:?}): {}", self.kind, self.source, self.error)
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: TokenKind,
    pub regex: Regex,
}

/// Ordered list of compiled rules.
#[derive(Debug, Clone)]
pub struct SyntaxMap {
    rules: Vec<Rule>,
}

impl SyntaxMap {
    /// The built-in rule table.
    pub fn bee() -> Result<Self, RuleError> {
        Self::from_rules(BEE_RULES)
    }

    pub fn from_rules(rules: &[(TokenKind, &str)]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .map(|&(kind, source)| {
                Regex::new(source)
                    .map(|regex| Rule { kind, regex })
                    .map_err(|error| RuleError {
                        kind,
                        source: source.to_string(),
                        error,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(rules = rules.len(), "built syntax map");
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule, in table order, that matches a non-empty prefix of
    /// `input`, with the length it matched.
    ///
    /// A rule that runs out of `step_limit` counts as not matching.
    pub fn first_match(
        &self,
        input: &[u8],
        step_limit: Option<usize>,
    ) -> Option<(TokenKind, usize)> {
        self.rules.iter().find_map(|rule| {
            let matcher = rule.regex.matcher();
            let matcher = match step_limit {
                Some(limit) => matcher.with_step_limit(limit),
                None => matcher,
            };
            match matcher.run(input) {
                Ok(Some(len)) if len > 0 => Some((rule.kind, len)),
                _ => None,
            }
        })
    }
}
