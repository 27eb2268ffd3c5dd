//! Graphviz export of compiled patterns, for debugging rule tables.

use itertools::Itertools;

use super::ensure_sufficient_stack;
use super::graph::{Graph, NodeId};
use super::state::State;

/// Render `graph` as a `strict digraph` document labelled `name`.
pub fn render(graph: &Graph, name: &str) -> String {
    let mut doc = DotDoc {
        graph,
        lines: Vec::new(),
    };
    let head = graph.head();
    let name = quote(name);

    doc.lines.push("strict digraph {".to_string());
    doc.lines
        .push(r##"rankdir=LR;bgcolor="#F9F9F9";compound=true"##.to_string());
    doc.lines.push(format!(r#""{name}" [shape="none"]"#));
    doc.lines.push(format!(
        r#""{name}" -> "n{}" [label="{}"]"#,
        head.get(),
        glyph(graph.node(head).state())
    ));
    for member in graph.members(head) {
        doc.format(member);
    }
    doc.lines.push("}".to_string());

    doc.lines.iter().join("\n") + "\n"
}

struct DotDoc<'g> {
    graph: &'g Graph,
    lines: Vec<String>,
}

impl DotDoc<'_> {
    fn define(&mut self, id: NodeId) {
        let shape = if self.graph.branches(id) {
            "square"
        } else {
            "circle"
        };
        self.lines.push(format!(
            r#""n{}" [shape="{shape}", label="{}"]"#,
            id.get(),
            self.graph.node(id).index()
        ));
    }

    fn connect(&mut self, from: NodeId, to: NodeId) {
        self.lines.push(format!(
            r#""n{}" -> "n{}" [label="{}"]"#,
            from.get(),
            to.get(),
            glyph(self.graph.node(to).state())
        ));
    }

    fn format(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| self.format_node(id));
    }

    fn format_node(&mut self, id: NodeId) {
        let graph = self.graph;
        match *graph.node(id).state() {
            State::Negate(inner) => self.cluster(id, inner, "#FBF3F3"),
            State::Lookahead(inner) => self.cluster(id, inner, "#F4FDFF"),
            _ => {
                self.define(id);
                for &edge in graph.node(id).edges() {
                    self.connect(id, edge);
                }
            }
        }
    }

    /// Draw an assertion node together with its inner graph. Outgoing edges
    /// leave from the highest numbered inner member.
    fn cluster(&mut self, id: NodeId, inner: NodeId, color: &str) {
        let graph = self.graph;
        self.lines.push(format!("subgraph cluster_{} {{", id.get()));
        self.lines.push(format!(r#"style=filled;bgcolor="{color}""#));
        self.define(id);
        self.connect(id, inner);

        let members = graph.members(inner);
        for &member in &members {
            self.format(member);
        }
        self.lines.push("}".to_string());

        let last = members
            .iter()
            .copied()
            .max_by_key(|&m| graph.node(m).index())
            .unwrap_or(inner);
        for &edge in graph.node(id).edges() {
            self.connect(last, edge);
        }
    }
}

/// Edge label for a node's state.
fn glyph(state: &State) -> String {
    match state {
        State::Epsilon => "&Sigma;".to_string(),
        State::Wildcard => "&alpha;".to_string(),
        State::Fail => "&times;".to_string(),
        State::Negate(_) => "!".to_string(),
        State::Lookahead(_) => "/".to_string(),
        State::Literal(text) => quote(&format!("'{}'", text.escape_ascii())),
        State::Set(members) => match members {
            [] => "[]".to_string(),
            [only] => quote(&format!("[{}]", only.escape_ascii())),
            [first, .., last] => quote(&format!(
                "[{}..{}]",
                first.escape_ascii(),
                last.escape_ascii()
            )),
        },
        State::Range(lo, hi) => {
            quote(&format!("[{}-{}]", lo.escape_ascii(), hi.escape_ascii()))
        }
    }
}

/// Escape text for a double-quoted DOT string.
fn quote(text: &str) -> String {
    text.replace('\\', r"\\").replace('"', r#"\""#)
}
