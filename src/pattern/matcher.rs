//! Backtracking matcher over a compiled [`Graph`].
//!
//! Matching is always anchored at the start of the input and reports the
//! length of the matched prefix. Alternatives are tried in edge order and the
//! first one that succeeds wins, regardless of how much it consumes.

use rustc_hash::FxHashSet;

use super::ensure_sufficient_stack;
use super::graph::{Graph, NodeId};
use super::state::State;

/// Why a match attempt was abandoned without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// More than `limit` nodes were visited.
    StepLimitExceeded { limit: usize },
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepLimitExceeded { limit } => {
                write!(f, "Pattern match abandoned after {limit} steps")
            }
        }
    }
}

impl std::error::Error for MatchError {}

/// Runs a graph against inputs. Holds no state between runs.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'g> {
    graph: &'g Graph,
    step_limit: Option<usize>,
}

impl<'g> Matcher<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            step_limit: None,
        }
    }

    /// Abandon a run once it has visited more than `limit` nodes.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Match a prefix of `input`. `Ok(None)` is an ordinary no-match.
    pub fn run(&self, input: &[u8]) -> Result<Option<usize>, MatchError> {
        let mut run = Run {
            graph: self.graph,
            input,
            steps: 0,
            step_limit: self.step_limit,
            active: FxHashSet::default(),
        };
        let result = run.submit(self.graph.head(), 0);
        if let Err(MatchError::StepLimitExceeded { limit }) = result {
            tracing::warn!(limit, input_len = input.len(), "pattern match hit its step limit");
        }
        result
    }
}

struct Run<'g, 'i> {
    graph: &'g Graph,
    input: &'i [u8],
    steps: usize,
    step_limit: Option<usize>,
    /// `(node, position)` pairs on the current recursion path.
    active: FxHashSet<(NodeId, usize)>,
}

impl Run<'_, '_> {
    fn submit(&mut self, id: NodeId, at: usize) -> Result<Option<usize>, MatchError> {
        self.steps += 1;
        if let Some(limit) = self.step_limit
            && self.steps > limit
        {
            return Err(MatchError::StepLimitExceeded { limit });
        }

        // Re-entering a pair still on the path is a zero-width loop that
        // could never finish.
        if !self.active.insert((id, at)) {
            return Ok(None);
        }
        let result = ensure_sufficient_stack(|| self.visit(id, at));
        self.active.remove(&(id, at));
        result
    }

    fn visit(&mut self, id: NodeId, at: usize) -> Result<Option<usize>, MatchError> {
        let graph = self.graph;
        let node = graph.node(id);
        let Some(end) = self.evaluate(node.state(), at)? else {
            return Ok(None);
        };

        let branches = graph.branches(id);
        if !branches && end >= self.input.len() {
            return Ok(Some(end));
        }
        for &edge in node.edges() {
            if let Some(matched) = self.submit(edge, end)? {
                return Ok(Some(matched));
            }
        }
        // A node without forward edges may end the match where it stands.
        Ok((!branches).then_some(end))
    }

    /// Run the local test of `state` at `at`, returning where it ends.
    fn evaluate(&mut self, state: &State, at: usize) -> Result<Option<usize>, MatchError> {
        let input = self.input;
        let Some(&byte) = input.get(at) else {
            return Ok(matches!(state, State::Epsilon).then_some(at));
        };

        Ok(match state {
            State::Epsilon => Some(at),
            State::Wildcard => Some(at + 1),
            State::Fail => None,
            State::Negate(inner) => match self.submit(*inner, at)? {
                Some(_) => None,
                None => Some(at + 1),
            },
            State::Lookahead(inner) => self.submit(*inner, at)?.map(|_| at),
            State::Literal(text) => {
                let len = text.len().min(input.len() - at);
                (text[..len] == input[at..at + len]).then_some(at + len)
            }
            State::Set(members) => members.contains(&byte).then_some(at + 1),
            State::Range(lo, hi) => (*lo..=*hi).contains(&byte).then_some(at + 1),
        })
    }
}
