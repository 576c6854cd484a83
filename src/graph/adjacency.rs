use std::collections::HashMap;

use num_traits::{One, ToPrimitive};
use serde::Serialize;

use crate::graph::traits::{Graph, NodeId, Weight};
use crate::{Error, Result};

/// An immutable directed graph stored as adjacency lists over dense indices
///
/// Built through [`GraphBuilder`](crate::graph::GraphBuilder) or
/// [`AdjacencyGraph::from_edge_list`]. Undirected edges are stored as two arcs.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<N, W>
where
    N: NodeId,
    W: Weight,
{
    /// Original identifier -> dense index
    index: HashMap<N, usize>,

    /// Dense index -> original identifier
    ids: Vec<N>,

    /// Outgoing arcs for each node: index -> [(target index, weight)]
    adjacency: Vec<Vec<(usize, W)>>,

    /// Total number of arcs
    arc_count: usize,
}

/// Summary figures of a graph, as reported by the benchmark harness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub nodes: usize,
    /// Undirected edge count (arcs / 2, rounded up)
    pub edges: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub min_degree: usize,
    pub density: f64,
    pub avg_weight: f64,
}

impl<N, W> AdjacencyGraph<N, W>
where
    N: NodeId,
    W: Weight,
{
    pub(crate) fn from_parts(
        index: HashMap<N, usize>,
        ids: Vec<N>,
        adjacency: Vec<Vec<(usize, W)>>,
    ) -> Self {
        let arc_count = adjacency.iter().map(|arcs| arcs.len()).sum();
        AdjacencyGraph {
            index,
            ids,
            adjacency,
            arc_count,
        }
    }

    /// Original identifiers in index order
    pub fn node_ids(&self) -> &[N] {
        &self.ids
    }

    /// Iterates over every arc as `(from index, to index, weight)`
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, arcs)| arcs.iter().map(move |&(v, w)| (u, v, w)))
    }

    /// Degree, density and weight summary
    pub fn statistics(&self) -> GraphStatistics {
        let n = self.ids.len();
        let degrees: Vec<usize> = self.adjacency.iter().map(|arcs| arcs.len()).collect();
        let edges = (self.arc_count + 1) / 2;

        let max_pairs = n as f64 * (n as f64 - 1.0) / 2.0;
        let weight_sum: f64 = self
            .arcs()
            .map(|(_, _, w)| ToPrimitive::to_f64(&w).unwrap_or(0.0))
            .sum();

        GraphStatistics {
            nodes: n,
            edges,
            avg_degree: if n > 0 { self.arc_count as f64 / n as f64 } else { 0.0 },
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            min_degree: degrees.iter().copied().min().unwrap_or(0),
            density: if max_pairs > 0.0 { edges as f64 / max_pairs } else { 0.0 },
            avg_weight: if self.arc_count > 0 {
                weight_sum / self.arc_count as f64
            } else {
                0.0
            },
        }
    }
}

impl<W> AdjacencyGraph<usize, W>
where
    W: Weight,
{
    /// Builds a graph over nodes `0..n` from an edge list
    ///
    /// Missing weights default to one. Undirected edges become two arcs.
    pub fn from_edge_list(
        n: usize,
        edges: &[(usize, usize)],
        weights: Option<&[W]>,
        directed: bool,
    ) -> Result<Self> {
        if let Some(weights) = weights {
            if weights.len() != edges.len() {
                return Err(Error::InvalidInput(format!(
                    "edge count ({}) does not match weight count ({})",
                    edges.len(),
                    weights.len()
                )));
            }
        }

        let mut adjacency: Vec<Vec<(usize, W)>> = vec![Vec::new(); n];
        for (i, &(u, v)) in edges.iter().enumerate() {
            if u >= n || v >= n {
                return Err(Error::InvalidEdge(u, v));
            }
            let weight = weights.map_or_else(<W as One>::one, |ws| ws[i]);
            adjacency[u].push((v, weight));
            if !directed {
                adjacency[v].push((u, weight));
            }
        }

        let ids: Vec<usize> = (0..n).collect();
        let index = ids.iter().map(|&id| (id, id)).collect();
        log::debug!(
            "Built adjacency list: {} nodes, {} edges, directed={}",
            n,
            edges.len(),
            directed
        );
        Ok(Self::from_parts(index, ids, adjacency))
    }
}

impl<N, W> Graph for AdjacencyGraph<N, W>
where
    N: NodeId,
    W: Weight,
{
    type Node = N;
    type Weight = W;

    fn node_count(&self) -> usize {
        self.ids.len()
    }

    fn edge_count(&self) -> usize {
        self.arc_count
    }

    fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    fn node_id(&self, index: usize) -> Option<&N> {
        self.ids.get(index)
    }

    fn neighbors(&self, index: usize) -> &[(usize, W)] {
        match self.adjacency.get(index) {
            Some(arcs) => arcs.as_slice(),
            None => &[],
        }
    }
}
