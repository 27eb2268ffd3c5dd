//! Atomic match tests carried by graph nodes.

use super::graph::NodeId;

/// The local test a node performs before its edges are considered.
///
/// Every variant except [`State::Epsilon`] fails once the input is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Zero width, always succeeds.
    Epsilon,
    /// Consumes any single byte.
    Wildcard,
    /// Zero width, always fails. Used to turn a node into a branch point.
    Fail,
    /// Consumes one byte when the inner graph does *not* match here.
    Negate(NodeId),
    /// Zero width, succeeds when the inner graph matches here.
    Lookahead(NodeId),
    /// Leading bytes of the remaining input. A literal longer than the
    /// remaining input is compared against the truncated prefix only.
    Literal(Vec<u8>),
    /// One byte out of a predefined class.
    Set(&'static [u8]),
    /// One byte in `lo..=hi`.
    Range(u8, u8),
}
