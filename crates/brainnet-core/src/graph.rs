//! Undirected simple graph for one subject and one time bucket.
//!
//! Nodes and edges keep insertion order so serialized output follows the
//! order records appeared in the source file.

use crate::region::Region;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

pub type NodeId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub area: Region,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge {a}-{b} already exists")]
    DuplicateEdge { a: NodeId, b: NodeId },
    #[error("edge {a}-{b} references missing node {missing}")]
    MissingEndpoint { a: NodeId, b: NodeId, missing: NodeId },
}

#[derive(Debug, Clone, Default)]
pub struct BrainGraph {
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_keys: HashSet<(NodeId, NodeId)>,
}

fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl BrainGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or reassign the area of an existing one.
    pub fn add_node(&mut self, id: NodeId, area: Region) {
        match self.node_index.get(&id) {
            Some(&idx) => self.nodes[idx].area = area,
            None => {
                self.node_index.insert(id, self.nodes.len());
                self.nodes.push(Node { id, area });
            }
        }
    }

    /// Add an undirected edge between two existing nodes.
    ///
    /// `a-b` and `b-a` are the same edge; the first one added wins.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<(), GraphError> {
        for n in [a, b] {
            if !self.node_index.contains_key(&n) {
                return Err(GraphError::MissingEndpoint { a, b, missing: n });
            }
        }
        if !self.edge_keys.insert(edge_key(a, b)) {
            return Err(GraphError::DuplicateEdge { a, b });
        }
        self.edges.push(Edge {
            source: a,
            target: b,
            weight,
        });
        Ok(())
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_keys.contains(&edge_key(a, b))
    }

    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        if !self.has_edge(a, b) {
            return None;
        }
        self.edges
            .iter()
            .find(|e| edge_key(e.source, e.target) == edge_key(a, b))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
