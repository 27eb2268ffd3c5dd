//! Node arena and the splicing combinators every pattern operator is built from.
//!
//! Nodes live in a flat arena and refer to each other through [`NodeId`]s.
//! Each node also carries a layout `index`. An edge whose target has a larger
//! index than its source continues forward; any other edge is a back-edge
//! (repetition) and is never followed when enumerating members. Splicing a
//! subgraph into another renumbers it so these two rules keep holding.

use rustc_hash::FxHashSet;

use super::state::State;

/// Handle of a node inside its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn get(self) -> usize {
        self.0
    }
}

/// One atomic test plus its ordered continuation edges.
#[derive(Debug, Clone)]
pub struct Node {
    state: State,
    index: usize,
    edges: Vec<NodeId>,
}

impl Node {
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Layout marker, not a creation order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Outgoing edges, ascending by target index.
    pub fn edges(&self) -> &[NodeId] {
        &self.edges
    }
}

/// A compiled pattern: an arena of nodes rooted at `head`.
///
/// Nodes referenced by [`State::Negate`] and [`State::Lookahead`] live in the
/// same arena but are only reachable through the state that owns them.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    head: NodeId,
}

impl Graph {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: NodeId(0),
        }
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub(crate) fn set_head(&mut self, head: NodeId) {
        self.head = head;
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes in the arena, including lookahead and negation bodies.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node with index 0.
    pub(crate) fn add(&mut self, state: State) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            state,
            index: 0,
            edges: Vec::new(),
        });
        id
    }

    fn index(&self, id: NodeId) -> usize {
        self.nodes[id.0].index
    }

    /// Every node reachable from `from` through forward edges, depth first,
    /// `from` included. Each node is listed once.
    pub fn members(&self, from: NodeId) -> Vec<NodeId> {
        let mut seen = FxHashSet::default();
        let mut members = Vec::new();
        let mut stack = vec![from];

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            members.push(id);
            let node = &self.nodes[id.0];
            stack.extend(
                node.edges
                    .iter()
                    .rev()
                    .copied()
                    .filter(|&edge| self.index(edge) > node.index),
            );
        }
        members
    }

    /// One past the highest index among the members of `from`.
    pub fn next_index(&self, from: NodeId) -> usize {
        self.members(from)
            .into_iter()
            .map(|id| self.index(id))
            .max()
            .unwrap_or(0)
            + 1
    }

    /// True when `id` has at least one forward edge, i.e. it must continue
    /// through an edge and cannot end a match by itself.
    pub fn branches(&self, id: NodeId) -> bool {
        let index = self.index(id);
        self.nodes[id.0]
            .edges
            .iter()
            .any(|&edge| self.index(edge) > index)
    }

    /// Insert `edge` after any existing edges with an index not above its own.
    fn link(&mut self, from: NodeId, edge: NodeId) {
        let target = self.index(edge);
        let at = self.nodes[from.0]
            .edges
            .partition_point(|&e| self.nodes[e.0].index <= target);
        self.nodes[from.0].edges.insert(at, edge);
    }

    /// Attach `edge` as a new alternative of `from`, numbered above
    /// everything currently reachable from `from`.
    pub(crate) fn push(&mut self, from: NodeId, edge: NodeId) -> NodeId {
        let base = self.next_index(from);
        self.rescope(edge, base);
        self.link(from, edge);
        edge
    }

    /// Append `edge` to every member of `from` that does not branch.
    /// No renumbering happens, so `edge` may become a back-edge.
    pub(crate) fn concat(&mut self, from: NodeId, edge: NodeId) -> NodeId {
        for member in self.members(from) {
            if !self.branches(member) {
                self.link(member, edge);
            }
        }
        edge
    }

    /// Shift the index of every member of `from` by `base`.
    pub(crate) fn rescope(&mut self, from: NodeId, base: usize) {
        for member in self.members(from) {
            self.nodes[member.0].index += base;
        }
    }

    /// Sequence `seq` after `from`.
    pub(crate) fn merge(&mut self, from: NodeId, seq: NodeId) {
        let base = self.next_index(from);
        self.rescope(seq, base);
        self.concat(from, seq);
    }
}
