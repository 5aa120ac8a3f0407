//! Pure graph algorithms over a snapshot: reachability, isolation, cycles.
//!
//! Traversals use explicit work stacks so deeply chained graphs cannot
//! exhaust the call stack.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use tracing::debug;

use crate::model::WorkflowGraph;

/// Topology summary of a graph. All lists hold node ids in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphAnalysis {
    /// Nodes with no incoming connection.
    pub entry_nodes: Vec<String>,
    /// Nodes touched by no connection at all.
    pub isolated: Vec<String>,
    /// Nodes that are neither reachable from an entry node nor isolated.
    pub unreachable: Vec<String>,
    /// Each cycle as the path from the repeated node to the node closing it.
    pub cycles: Vec<Vec<String>>,
}

pub fn analyze(graph: &WorkflowGraph<'_>) -> GraphAnalysis {
    let isolated_set = isolated_nodes(graph);
    let reachable = reachable_nodes(graph);

    let mut analysis = GraphAnalysis {
        entry_nodes: entry_nodes(graph)
            .into_iter()
            .map(|idx| graph.node(idx).id.clone())
            .collect(),
        cycles: find_cycles(graph),
        ..GraphAnalysis::default()
    };

    for idx in graph.graph.node_indices() {
        let id = &graph.node(idx).id;
        if isolated_set.contains(&idx) {
            analysis.isolated.push(id.clone());
        } else if !reachable.contains(&idx) {
            analysis.unreachable.push(id.clone());
        }
    }

    analysis
}

/// Nodes with zero incoming connections, in snapshot order.
pub fn entry_nodes(graph: &WorkflowGraph<'_>) -> Vec<NodeIndex> {
    graph
        .graph
        .node_indices()
        .filter(|&idx| graph.incoming_count(&graph.node(idx).id) == 0)
        .collect()
}

pub fn isolated_nodes(graph: &WorkflowGraph<'_>) -> HashSet<NodeIndex> {
    graph
        .graph
        .node_indices()
        .filter(|&idx| {
            let id = &graph.node(idx).id;
            graph.incoming_count(id) == 0 && graph.outgoing_count(id) == 0
        })
        .collect()
}

/// Everything reachable from an entry node.
///
/// When a non-empty graph has no entry node at all, every node is used as a
/// root in turn, so the whole node set ends up reachable.
pub fn reachable_nodes(graph: &WorkflowGraph<'_>) -> HashSet<NodeIndex> {
    let mut reachable = HashSet::new();
    let mut roots = entry_nodes(graph);
    if roots.is_empty() {
        roots = graph.graph.node_indices().collect();
    }

    // `move_to` keeps the discovered set, so already-visited roots are skipped.
    let mut dfs = Dfs::empty(&graph.graph);
    for root in roots {
        if reachable.contains(&root) {
            continue;
        }
        dfs.move_to(root);
        while let Some(nx) = dfs.next(&graph.graph) {
            reachable.insert(nx);
        }
    }

    reachable
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    cursor: usize,
}

/// White/gray/black DFS. Every back-edge into the current path records the
/// path slice from the repeated node to the current one.
pub fn find_cycles(graph: &WorkflowGraph<'_>) -> Vec<Vec<String>> {
    let g = &graph.graph;
    let mut colors = vec![Color::White; g.node_count()];
    let mut path: Vec<NodeIndex> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut cycles = Vec::new();

    for start in g.node_indices() {
        if colors[start.index()] != Color::White {
            continue;
        }
        colors[start.index()] = Color::Gray;
        path.push(start);
        stack.push(Frame {
            node: start,
            successors: graph.successors(start),
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let Some(&next) = frame.successors.get(frame.cursor) else {
                let done = frame.node;
                stack.pop();
                path.pop();
                colors[done.index()] = Color::Black;
                continue;
            };
            frame.cursor += 1;

            match colors[next.index()] {
                Color::Gray => {
                    if let Some(pos) = path.iter().position(|&n| n == next) {
                        let cycle: Vec<String> = path[pos..]
                            .iter()
                            .map(|&idx| graph.node(idx).id.clone())
                            .collect();
                        debug!(?cycle, "cycle detected");
                        cycles.push(cycle);
                    }
                }
                Color::White => {
                    colors[next.index()] = Color::Gray;
                    path.push(next);
                    stack.push(Frame {
                        node: next,
                        successors: graph.successors(next),
                        cursor: 0,
                    });
                }
                Color::Black => {}
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::catalog::NodeType;
    use crate::model::{Connection, Node, VersionStatus, WorkflowSnapshot, WorkflowVersion};

    fn snapshot(nodes: &[&str], edges: &[(&str, &str)]) -> WorkflowSnapshot {
        WorkflowSnapshot {
            version: WorkflowVersion {
                id: "v1".into(),
                definition_id: "d1".into(),
                version_number: 1,
                status: VersionStatus::Draft,
                created_at: Utc::now(),
                published_at: None,
            },
            nodes: nodes
                .iter()
                .map(|id| Node {
                    id: id.to_string(),
                    key: id.to_string(),
                    name: None,
                    node_type: NodeType::Action,
                    config: None,
                    created_at: Utc::now(),
                })
                .collect(),
            connections: edges
                .iter()
                .enumerate()
                .map(|(i, (from, to))| Connection {
                    id: format!("c{}", i),
                    from_node_id: from.to_string(),
                    to_node_id: to.to_string(),
                    outcome: "Completed".into(),
                    order: None,
                })
                .collect(),
            variables: vec![],
            labels: vec![],
            settings: None,
            trigger_bindings: vec![],
        }
    }

    #[test]
    fn two_node_cycle_is_reported_once() {
        let snap = snapshot(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let graph = WorkflowGraph::build(&snap);
        assert_eq!(find_cycles(&graph), vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn self_loop_is_a_single_node_cycle() {
        let snap = snapshot(&["a", "b"], &[("a", "b"), ("b", "b")]);
        let graph = WorkflowGraph::build(&snap);
        assert_eq!(find_cycles(&graph), vec![vec!["b".to_string()]]);
    }

    #[test]
    fn cycle_path_starts_at_repeated_node() {
        // a -> b -> c -> d -> b
        let snap = snapshot(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")],
        );
        let graph = WorkflowGraph::build(&snap);
        assert_eq!(
            find_cycles(&graph),
            vec![vec!["b".to_string(), "c".to_string(), "d".to_string()]]
        );
    }

    #[test]
    fn diamond_has_no_cycle() {
        let snap = snapshot(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let graph = WorkflowGraph::build(&snap);
        assert!(find_cycles(&graph).is_empty());
    }

    #[test]
    fn pure_cycle_marks_everything_reachable() {
        let snap = snapshot(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let graph = WorkflowGraph::build(&snap);
        let analysis = analyze(&graph);
        assert!(analysis.entry_nodes.is_empty());
        assert!(analysis.unreachable.is_empty());
        assert!(analysis.isolated.is_empty());
    }

    #[test]
    fn isolated_and_unreachable_are_separate() {
        // a -> b is the reachable chain, c is isolated, d <-> e is a detached loop.
        let snap = snapshot(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("d", "e"), ("e", "d")],
        );
        let graph = WorkflowGraph::build(&snap);
        let analysis = analyze(&graph);
        assert_eq!(analysis.entry_nodes, vec!["a", "c"]);
        assert_eq!(analysis.isolated, vec!["c"]);
        assert_eq!(analysis.unreachable, vec!["d", "e"]);
        assert_eq!(analysis.cycles.len(), 1);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("n{}", i)).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str)> = id_refs.windows(2).map(|w| (w[0], w[1])).collect();
        let snap = snapshot(&id_refs, &edges);
        let graph = WorkflowGraph::build(&snap);
        let analysis = analyze(&graph);
        assert!(analysis.cycles.is_empty());
        assert!(analysis.unreachable.is_empty());
    }
}
