use std::collections::HashMap;

use crate::graph::adjacency::AdjacencyGraph;
use crate::graph::traits::{NodeId, Weight};

/// Mutable staging area for an [`AdjacencyGraph`]
///
/// Nodes receive dense indices in first-seen order. Adding an edge implicitly
/// adds its endpoints. Weights are stored as given; the engines reject
/// negative weights when they are constructed.
#[derive(Debug, Clone)]
pub struct GraphBuilder<N, W>
where
    N: NodeId,
    W: Weight,
{
    index: HashMap<N, usize>,
    ids: Vec<N>,
    adjacency: Vec<Vec<(usize, W)>>,
}

impl<N, W> GraphBuilder<N, W>
where
    N: NodeId,
    W: Weight,
{
    /// Creates a new empty builder
    pub fn new() -> Self {
        GraphBuilder {
            index: HashMap::new(),
            ids: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    /// Creates a builder with room for the given number of nodes
    pub fn with_capacity(nodes: usize) -> Self {
        GraphBuilder {
            index: HashMap::with_capacity(nodes),
            ids: Vec::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
        }
    }

    /// Adds a node and returns its dense index; existing nodes keep theirs
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&existing) = self.index.get(&node) {
            return existing;
        }
        let new_index = self.ids.len();
        self.index.insert(node.clone(), new_index);
        self.ids.push(node);
        self.adjacency.push(Vec::new());
        new_index
    }

    /// Adds a directed arc. Parallel arcs and self-loops are kept as given.
    pub fn add_edge(&mut self, from: N, to: N, weight: W) -> &mut Self {
        let u = self.add_node(from);
        let v = self.add_node(to);
        self.adjacency[u].push((v, weight));
        self
    }

    /// Adds an undirected edge as a pair of opposite arcs
    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: W) -> &mut Self {
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.adjacency[u].push((v, weight));
        self.adjacency[v].push((u, weight));
        self
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Freezes the builder into an immutable graph
    pub fn build(self) -> AdjacencyGraph<N, W> {
        AdjacencyGraph::from_parts(self.index, self.ids, self.adjacency)
    }
}

impl<N, W> Default for GraphBuilder<N, W>
where
    N: NodeId,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}
