//! Directed multigraph view over a node index.
//!
//! - [`LinkGraph`]: one petgraph node per note id, one edge per backlink entry
//! - [`GraphExport`]: flat nodes/edges form for serialization to visualization tooling

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Deref,
};

use crate::properties::RoamNode;

/// Nodes are index keys, edges are backlinks. Parallel edges are kept: a body that references the
/// same target twice contributes two edges. Self references become self loops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkGraph {
    graph: petgraph::Graph<String, ()>,
    id_to_index: BTreeMap<String, NodeIndex>,
}

impl LinkGraph {
    pub fn build(nodes: &BTreeMap<String, RoamNode>) -> LinkGraph {
        let mut graph = petgraph::Graph::with_capacity(nodes.len(), 0);
        let id_to_index: BTreeMap<String, NodeIndex> = nodes
            .keys()
            .map(|id| (id.clone(), graph.add_node(id.clone())))
            .collect();

        for node in nodes.values() {
            let source_idx = id_to_index[&node.id];
            for sink in node.backlinks.iter() {
                match id_to_index.get(sink) {
                    Some(sink_idx) => {
                        graph.add_edge(source_idx, *sink_idx, ());
                    }
                    None => {
                        tracing::warn!(
                            "[LinkGraph::build] {} links to {} which is not in the index",
                            node.id,
                            sink
                        );
                    }
                }
            }
        }

        LinkGraph { graph, id_to_index }
    }

    pub fn as_graph(&self) -> &petgraph::Graph<String, ()> {
        &self.graph
    }

    /// `(node_count, edge_count)`
    pub fn size(&self) -> (usize, usize) {
        (self.graph.node_count(), self.graph.edge_count())
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    /// Number of parallel `source -> sink` edges.
    pub fn edge_multiplicity(&self, source: &str, sink: &str) -> usize {
        match (self.index_of(source), self.index_of(sink)) {
            (Some(a), Some(b)) => self.graph.edges_connecting(a, b).count(),
            _ => 0,
        }
    }

    /// Distinct ids linked to `id` in either direction, excluding `id` itself.
    pub fn neighbors_undirected(&self, id: &str) -> BTreeSet<String> {
        let Some(idx) = self.index_of(id) else {
            return BTreeSet::new();
        };
        self.graph
            .neighbors_undirected(idx)
            .filter(|n| *n != idx)
            .map(|n| self.graph[n].clone())
            .collect()
    }
}

impl Deref for LinkGraph {
    type Target = petgraph::Graph<String, ()>;
    fn deref(&self) -> &petgraph::Graph<String, ()> {
        &self.graph
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    pub title: String,
    pub tags: BTreeSet<String>,
}

/// Used to hand a collection to visualization tooling as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    /// (source id, sink id), one entry per edge
    pub edges: Vec<(String, String)>,
}

impl GraphExport {
    pub fn new(nodes: &BTreeMap<String, RoamNode>, graph: &LinkGraph) -> GraphExport {
        let g = graph.as_graph();
        GraphExport {
            nodes: nodes
                .values()
                .map(|n| ExportNode {
                    id: n.id.clone(),
                    title: n.title.clone(),
                    tags: n.tags.clone(),
                })
                .collect(),
            edges: g
                .raw_edges()
                .iter()
                .map(|e| (g[e.source()].clone(), g[e.target()].clone()))
                .collect(),
        }
    }
}
