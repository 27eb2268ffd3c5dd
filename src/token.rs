use std::borrow::Cow;
use std::fmt;

/// Declares [`TokenKind`] together with its display names, so the two lists
/// cannot drift apart.
macro_rules! token_kinds {
    ($($(#[$doc:meta])* $kind:ident),* $(,)?) => {
        /// Lexical category of a token.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($(#[$doc])* $kind,)*
        }

        impl TokenKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$kind,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$kind => stringify!($kind),)*
                }
            }
        }
    };
}

token_kinds! {
    /// Input no rule recognises.
    None,

    NewLine,
    /// Spaces and tabs. Never handed out by the scanner.
    Blank,
    /// Zero-length marker at the end of input.
    End,
    Comment,
    Directive,

    KwStruct,
    KwEnum,
    KwUnion,
    KwUnderscore,
    KwSelf,
    KwBreak,
    KwCase,
    KwContinue,
    KwElse,
    KwEach,
    KwFor,
    KwIf,
    KwReturn,
    KwSwitch,
    KwAnd,
    KwOr,
    KwFn,

    Identifier,

    Float,
    IntDec,
    IntBin,
    IntHex,
    Str,
    RawStr,
    Char,

    Increment,
    Decrement,
    ParenBegin,
    ParenEnd,
    ScopeBegin,
    ScopeEnd,
    CrochetBegin,
    CrochetEnd,
    Declare,
    Define,
    Assign,
    Arrow,
    Not,
    Add,
    Sub,
    Div,
    Mod,
    BinNot,
    BinOr,
    BinXor,
    BinShiftL,
    BinShiftR,
    Equal,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Ref,
    Deref,
    Dot,
    Comma,
    Semicolon,
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        self.name().starts_with("Kw")
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexeme cut out of the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Byte offset of the lexeme in the source.
    pub offset: usize,
    pub lexeme: &'a [u8],
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, offset: usize, lexeme: &'a [u8]) -> Self {
        Self {
            kind,
            offset,
            lexeme,
        }
    }

    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    /// The lexeme as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.lexeme)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>20}: {}", format!("{:?}", self.text()), self.kind)
    }
}
