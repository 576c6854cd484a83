use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::graph::{AdjacencyGraph, GraphBuilder};
use crate::{Error, Result};

/// Graph type used by the generators, the dataset loader and the harness
pub type BenchGraph = AdjacencyGraph<usize, i64>;

/// Weight range used by the dense and sparse generators
pub const DEFAULT_WEIGHT_RANGE: RangeInclusive<i64> = 1..=100;

/// Weight range used by the grid generator
pub const GRID_WEIGHT_RANGE: RangeInclusive<i64> = 1..=10;

/// Family a benchmark graph belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Dense,
    Sparse,
    Grid,
    Random,
    Chain,
    Star,
    Complete,
    Dataset,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphKind::Dense => "dense",
            GraphKind::Sparse => "sparse",
            GraphKind::Grid => "grid",
            GraphKind::Random => "random",
            GraphKind::Chain => "chain",
            GraphKind::Star => "star",
            GraphKind::Complete => "complete",
            GraphKind::Dataset => "dataset",
        };
        f.write_str(name)
    }
}

/// A graph together with the query to run on it
#[derive(Debug, Clone)]
pub struct GraphCase {
    pub name: String,
    pub kind: GraphKind,
    pub graph: BenchGraph,
    pub source: usize,
    pub target: usize,
    /// Known strict second-shortest distance, when the case comes with one
    pub expected: Option<i64>,
    /// Known shortest distance, when the case comes with one
    pub expected_shortest: Option<i64>,
}

impl GraphCase {
    /// Wraps a graph with the default query (first node to last node)
    pub fn new(name: impl Into<String>, kind: GraphKind, graph: BenchGraph) -> Self {
        let last = graph.node_ids().len().saturating_sub(1);
        GraphCase {
            name: name.into(),
            kind,
            graph,
            source: 0,
            target: last,
            expected: None,
            expected_shortest: None,
        }
    }

    pub fn with_query(mut self, source: usize, target: usize) -> Self {
        self.source = source;
        self.target = target;
        self
    }

    pub fn with_expected(mut self, expected: Option<i64>) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_expected_shortest(mut self, expected: Option<i64>) -> Self {
        self.expected_shortest = expected;
        self
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn check_params(n: usize, weights: &RangeInclusive<i64>) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidInput("graph needs at least one node".to_string()));
    }
    if weights.start() > weights.end() {
        return Err(Error::InvalidInput(format!(
            "empty weight range {}..={}",
            weights.start(),
            weights.end()
        )));
    }
    Ok(())
}

fn builder_with_nodes(n: usize) -> GraphBuilder<usize, i64> {
    let mut builder = GraphBuilder::with_capacity(n);
    for v in 0..n {
        builder.add_node(v);
    }
    builder
}

/// Chain `0 - 1 - ... - n-1` for connectivity, then `edge_target - (n - 1)`
/// random attempts at extra undirected edges; self-loop draws are dropped.
fn chain_plus_random(
    n: usize,
    edge_target: usize,
    weights: RangeInclusive<i64>,
    rng: &mut StdRng,
) -> (BenchGraph, usize) {
    let mut builder = builder_with_nodes(n);
    let mut edges = 0;

    for v in 1..n {
        builder.add_undirected_edge(v - 1, v, rng.gen_range(weights.clone()));
        edges += 1;
    }

    for _ in 0..edge_target.saturating_sub(n - 1) {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v {
            continue;
        }
        builder.add_undirected_edge(u, v, rng.gen_range(weights.clone()));
        edges += 1;
    }

    (builder.build(), edges)
}

/// Generates a dense undirected graph with roughly n²/5 edges
pub fn dense_graph(n: usize, weights: RangeInclusive<i64>, seed: Option<u64>) -> Result<GraphCase> {
    check_params(n, &weights)?;
    let mut rng = rng_from(seed);
    let (graph, edges) = chain_plus_random(n, n * n / 5, weights, &mut rng);
    log::debug!("Generated dense graph: {} nodes, ~{} edges", n, edges);
    Ok(GraphCase::new(format!("dense_n{}", n), GraphKind::Dense, graph))
}

/// Generates a sparse undirected graph with roughly 5n edges
pub fn sparse_graph(n: usize, weights: RangeInclusive<i64>, seed: Option<u64>) -> Result<GraphCase> {
    check_params(n, &weights)?;
    let mut rng = rng_from(seed);
    let (graph, edges) = chain_plus_random(n, n * 5, weights, &mut rng);
    log::debug!("Generated sparse graph: {} nodes, ~{} edges", n, edges);
    Ok(GraphCase::new(format!("sparse_n{}", n), GraphKind::Sparse, graph))
}

/// Generates a `height x width` 4-neighbour grid with random weights
///
/// Grids have a large diameter and many near-equal routes between opposite
/// corners, which makes the label-correcting engine relax the same node over
/// and over.
pub fn grid_graph(
    height: usize,
    width: usize,
    weights: RangeInclusive<i64>,
    seed: Option<u64>,
) -> Result<GraphCase> {
    check_params(height * width, &weights)?;
    let mut rng = rng_from(seed);
    let n = height * width;
    let mut builder = builder_with_nodes(n);

    let id = |r: usize, c: usize| r * width + c;
    let mut edges = 0;
    for r in 0..height {
        for c in 0..width {
            if c + 1 < width {
                builder.add_undirected_edge(id(r, c), id(r, c + 1), rng.gen_range(weights.clone()));
                edges += 1;
            }
            if r + 1 < height {
                builder.add_undirected_edge(id(r, c), id(r + 1, c), rng.gen_range(weights.clone()));
                edges += 1;
            }
        }
    }

    log::debug!("Generated {}x{} grid: {} nodes, {} edges", height, width, n, edges);
    Ok(GraphCase::new(
        format!("grid_{}x{}", height, width),
        GraphKind::Grid,
        builder.build(),
    ))
}

/// Generates a connected undirected graph with exactly `m` distinct edges
///
/// A random spanning tree guarantees connectivity; the remaining edges are
/// drawn uniformly among the missing pairs.
pub fn random_connected_graph(
    n: usize,
    m: usize,
    weights: RangeInclusive<i64>,
    seed: Option<u64>,
) -> Result<GraphCase> {
    check_params(n, &weights)?;
    let max_edges = n * (n - 1) / 2;
    if m > max_edges {
        return Err(Error::InvalidInput(format!(
            "{} edges exceed the maximum of {} for {} nodes",
            m, max_edges, n
        )));
    }
    let mut rng = rng_from(seed);

    let mut edge_set: HashSet<(usize, usize)> = HashSet::with_capacity(m.max(n));
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    for i in 1..n {
        let u = order[i];
        let v = order[rng.gen_range(0..i)];
        edge_set.insert((u.min(v), u.max(v)));
    }

    while edge_set.len() < m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            edge_set.insert((u.min(v), u.max(v)));
        }
    }

    // Sort so the adjacency order only depends on the seed
    let mut edge_list: Vec<(usize, usize)> = edge_set.into_iter().collect();
    edge_list.sort_unstable();

    let mut builder = builder_with_nodes(n);
    for (u, v) in edge_list {
        builder.add_undirected_edge(u, v, rng.gen_range(weights.clone()));
    }

    Ok(GraphCase::new(
        format!("random_n{}_m{}", n, m),
        GraphKind::Random,
        builder.build(),
    ))
}

/// Unit-weight path `0 - 1 - ... - n-1`
pub fn chain_graph(n: usize) -> Result<GraphCase> {
    check_params(n, &(1..=1))?;
    let mut builder = builder_with_nodes(n);
    for v in 1..n {
        builder.add_undirected_edge(v - 1, v, 1);
    }
    Ok(GraphCase::new(format!("chain_n{}", n), GraphKind::Chain, builder.build()))
}

/// Unit-weight star centred on node 0; queried between two leaves
pub fn star_graph(n: usize) -> Result<GraphCase> {
    if n < 3 {
        return Err(Error::InvalidInput("a star needs at least three nodes".to_string()));
    }
    let mut builder = builder_with_nodes(n);
    for leaf in 1..n {
        builder.add_undirected_edge(0, leaf, 1);
    }
    Ok(GraphCase::new(format!("star_n{}", n), GraphKind::Star, builder.build()).with_query(1, n - 1))
}

/// Unit-weight complete graph
pub fn complete_graph(n: usize) -> Result<GraphCase> {
    check_params(n, &(1..=1))?;
    let mut builder = builder_with_nodes(n);
    for i in 0..n {
        for j in (i + 1)..n {
            builder.add_undirected_edge(i, j, 1);
        }
    }
    Ok(GraphCase::new(
        format!("complete_n{}", n),
        GraphKind::Complete,
        builder.build(),
    ))
}

/// Complete, chain, star and grid cases used by the correctness suite
pub fn special_cases() -> Result<Vec<GraphCase>> {
    let cases = vec![
        complete_graph(20)?,
        chain_graph(100)?,
        star_graph(50)?,
        grid_graph(10, 10, 1..=1, Some(0))?,
    ];
    log::info!("Generated {} special cases", cases.len());
    Ok(cases)
}

/// Random connected graphs of the given sizes at the given edge density
pub fn test_suite(sizes: &[usize], density: f64, seed: Option<u64>) -> Result<Vec<GraphCase>> {
    let mut suite = Vec::with_capacity(sizes.len());
    for (i, &n) in sizes.iter().enumerate() {
        let max_edges = n * n.saturating_sub(1) / 2;
        let m = ((max_edges as f64 * density) as usize).max(n.saturating_sub(1));
        log::info!("Generating test graph: n={}, m={}", n, m);
        let case_seed = seed.map(|s| s.wrapping_add(i as u64));
        suite.push(random_connected_graph(n, m, DEFAULT_WEIGHT_RANGE, case_seed)?);
    }
    Ok(suite)
}
