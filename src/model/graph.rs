//! petgraph-based index over a workflow snapshot.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{Connection, Node, WorkflowSnapshot};

/// Adjacency built once per validation call.
///
/// Connection lists come from the raw connection set, so a connection with a
/// dangling endpoint still counts against the endpoint that exists. The
/// petgraph graph only holds connections whose both endpoints resolve and
/// is what traversals walk.
pub struct WorkflowGraph<'a> {
    pub snapshot: &'a WorkflowSnapshot,
    /// Node weight: position in `snapshot.nodes`. Edge weight: position in
    /// `snapshot.connections`.
    pub graph: DiGraph<usize, usize>,
    pub node_indices: HashMap<&'a str, NodeIndex>,
    outgoing: HashMap<&'a str, Vec<&'a Connection>>,
    incoming: HashMap<&'a str, Vec<&'a Connection>>,
}

impl<'a> WorkflowGraph<'a> {
    pub fn build(snapshot: &'a WorkflowSnapshot) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut outgoing: HashMap<&str, Vec<&Connection>> = HashMap::new();
        let mut incoming: HashMap<&str, Vec<&Connection>> = HashMap::new();

        for (pos, node) in snapshot.nodes.iter().enumerate() {
            let idx = graph.add_node(pos);
            node_indices.insert(node.id.as_str(), idx);
        }

        for (pos, conn) in snapshot.connections.iter().enumerate() {
            outgoing.entry(conn.from_node_id.as_str()).or_default().push(conn);
            incoming.entry(conn.to_node_id.as_str()).or_default().push(conn);

            let source = node_indices.get(conn.from_node_id.as_str());
            let target = node_indices.get(conn.to_node_id.as_str());
            if let (Some(&s), Some(&t)) = (source, target) {
                graph.add_edge(s, t, pos);
            }
        }

        WorkflowGraph {
            snapshot,
            graph,
            node_indices,
            outgoing,
            incoming,
        }
    }

    pub fn node(&self, idx: NodeIndex) -> &'a Node {
        &self.snapshot.nodes[self.graph[idx]]
    }

    pub fn outgoing(&self, node_id: &str) -> &[&'a Connection] {
        self.outgoing.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incoming(&self, node_id: &str) -> &[&'a Connection] {
        self.incoming.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.outgoing(node_id).len()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.incoming(node_id).len()
    }

    /// Successors of `idx` in connection order.
    ///
    /// petgraph walks adjacency most-recent-first, so sort by the edge weight
    /// to get back the snapshot's order.
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort_by_key(|(pos, _)| *pos);
        edges.into_iter().map(|(_, target)| target).collect()
    }
}
