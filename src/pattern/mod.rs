//! Bee pattern engine.
//!
//! Lexical rules are written in a small pattern dialect, compiled into a
//! graph of nodes and matched by ordered-choice backtracking. A match is
//! always a prefix match: the result is how many leading bytes of the input
//! the pattern accepts.
//!
//! # Pattern syntax
//!
//! | Token         | Meaning                                               |
//! |---------------|-------------------------------------------------------|
//! | `_`           | One blank byte (space, tab, newline, CR, VT, FF)      |
//! | `a`           | One ASCII letter                                      |
//! | `o`           | One punctuation byte                                  |
//! | `n`           | One ASCII digit                                       |
//! | `Q` / `q`     | A double / single quote                               |
//! | `^`           | Any one byte                                          |
//! | `[x-y]`       | One byte in the inclusive range `x..=y`               |
//! | `'text'`      | Literal bytes, taken as written                       |
//! | `` `text` ``  | Literal bytes with backslash escapes decoded          |
//! | `{…}`         | Grouping                                              |
//! | `!X`          | One byte, where `X` does not match                    |
//! | `/X`          | Zero width, where `X` matches                         |
//! | `X\|Y`        | Ordered choice: `X`, otherwise `Y`                    |
//! | `X?`          | Optional                                              |
//! | `X*`          | Zero or more                                          |
//! | `X+`          | One or more                                           |
//! | `X~Y`         | Skip over `X` until `Y` matches, trying `Y` first     |
//!
//! Blanks between tokens are ignored. Postfix and infix operators take the
//! single unit before them, so `'a' 'b'|'c'` is `'a'` followed by `'b'|'c'`.

pub mod char_class;
pub mod dot;
pub mod graph;
pub mod matcher;
pub mod parser;
pub mod state;

#[cfg(test)]
mod tests;

pub use graph::{Graph, Node, NodeId};
pub use matcher::{MatchError, Matcher};
pub use parser::{PatternError, compile};
pub use state::State;

/// Stack left before a recursive pass grows the stack (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack allocated per growth (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f` on a freshly grown stack segment if the current one is nearly
/// used up. Recursion depth follows pattern nesting, which is unbounded.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// A compiled pattern together with its source.
///
/// The graph is immutable once built, so a `Regex` can be matched any
/// number of times, from any number of threads.
#[derive(Debug, Clone)]
pub struct Regex {
    source: String,
    graph: Graph,
}

impl Regex {
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let graph = compile(source.as_bytes())?;
        tracing::debug!(source, nodes = graph.len(), "compiled pattern");
        Ok(Self {
            source: source.to_string(),
            graph,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.graph)
    }

    /// Length of the matched prefix of `input`, or `None` for no match.
    pub fn match_len(&self, input: impl AsRef<[u8]>) -> Option<usize> {
        // Without a step limit the matcher cannot fail.
        self.matcher().run(input.as_ref()).ok().flatten()
    }

    pub fn is_match(&self, input: impl AsRef<[u8]>) -> bool {
        self.match_len(input).is_some()
    }

    /// Graphviz rendering of the compiled graph.
    pub fn to_dot(&self, name: &str) -> String {
        dot::render(&self.graph, name)
    }
}

impl std::str::FromStr for Regex {
    type Err = PatternError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::new(source)
    }
}
