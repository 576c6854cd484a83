//! JSON datasets: LeetCode-style test case files and saved graph cases
//!
//! Directory layout understood by [`load_all_datasets`]:
//!
//! ```text
//! <dir>/leetcode/*.json    {"problem_id", "problem_name", "test_cases": [...]}
//! <dir>/generated/*.json   {"n", "edges": [[u, v, w], ...], "source", "target", ...}
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::graph::generators::{BenchGraph, GraphCase, GraphKind};
use crate::graph::{AdjacencyGraph, Graph};
use crate::{Error, Result};

/// A LeetCode-style file with several test cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeFile {
    #[serde(default)]
    pub problem_id: Option<u32>,
    #[serde(default)]
    pub problem_name: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<LeetCodeCase>,
}

/// One test case: an unweighted undirected graph whose edges all take `time`
///
/// `expected` is the problem's answer, a travel time. Once `change` is set it
/// includes traffic-signal waits and no longer equals a path length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeCase {
    #[serde(default)]
    pub id: Option<u64>,
    pub n: usize,
    pub edges: Vec<[usize; 2]>,
    #[serde(default)]
    pub source: Option<usize>,
    #[serde(default)]
    pub target: Option<usize>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub change: Option<i64>,
    #[serde(default)]
    pub expected: Option<i64>,
    #[serde(default)]
    pub expected_shortest: Option<i64>,
    #[serde(default)]
    pub expected_second_shortest: Option<i64>,
}

/// Edge entry of a graph file, with or without a weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeRecord {
    Weighted(usize, usize, i64),
    Unweighted(usize, usize),
}

impl EdgeRecord {
    fn parts(self) -> (usize, usize, i64) {
        match self {
            EdgeRecord::Weighted(u, v, w) => (u, v, w),
            EdgeRecord::Unweighted(u, v) => (u, v, 1),
        }
    }
}

/// A saved graph case over nodes `0..n`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub n: usize,
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub source: Option<usize>,
    #[serde(default)]
    pub target: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_shortest: Option<i64>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Loads a LeetCode-style test case file
pub fn load_leetcode_file(path: impl AsRef<Path>) -> Result<LeetCodeFile> {
    let path = path.as_ref();
    log::info!("Loading LeetCode data: {}", path.display());
    let data: LeetCodeFile = read_json(path)?;
    log::info!("Loaded {} test cases", data.test_cases.len());
    Ok(data)
}

/// Converts a LeetCode test case into a runnable graph case
///
/// Every edge weighs `time` (default 1). Node labels are taken as 0-based
/// unless some edge or query endpoint mentions `n`, in which case all labels
/// are shifted down by one. The query runs between `source` and `target`,
/// defaulting to the first and last node.
///
/// `expected_shortest` / `expected_second_shortest` become the case's oracle.
/// Without them, `expected` checks the second distance only when no signal
/// `change` applies.
pub fn convert_leetcode_case(case: &LeetCodeCase, name: impl Into<String>) -> Result<GraphCase> {
    if case.n == 0 {
        return Err(Error::InvalidInput("test case has no nodes".to_string()));
    }
    let one_based = case
        .edges
        .iter()
        .flatten()
        .chain(case.source.iter())
        .chain(case.target.iter())
        .any(|&node| node == case.n);
    let shift = usize::from(one_based);

    let mut edges = Vec::with_capacity(case.edges.len());
    for &[u, v] in &case.edges {
        if u < shift || v < shift {
            return Err(Error::InvalidEdge(u, v));
        }
        edges.push((u - shift, v - shift));
    }

    let endpoint = |node: Option<usize>, default: usize| match node {
        Some(node) if node < shift || node - shift >= case.n => Err(Error::InvalidInput(
            format!("query endpoint {} is outside the graph", node),
        )),
        Some(node) => Ok(node - shift),
        None => Ok(default),
    };
    let source = endpoint(case.source, 0)?;
    let target = endpoint(case.target, case.n - 1)?;

    let weight = case.time.unwrap_or(1);
    let weights = vec![weight; edges.len()];
    let graph = AdjacencyGraph::from_edge_list(case.n, &edges, Some(weights.as_slice()), false)?;

    let travel_time = match (case.expected, case.change) {
        (Some(expected), None) => Some(expected),
        (Some(_), Some(change)) => {
            log::debug!("Ignoring expected travel time: signal change {} applies", change);
            None
        }
        (None, _) => None,
    };
    let expected_second = case.expected_second_shortest.or(travel_time);

    log::debug!("Converted test case: {} nodes, {} edges", case.n, edges.len());
    Ok(GraphCase::new(name, GraphKind::Dataset, graph)
        .with_query(source, target)
        .with_expected_shortest(case.expected_shortest)
        .with_expected(expected_second))
}

/// Loads a saved graph case
pub fn load_graph_file(path: impl AsRef<Path>) -> Result<GraphCase> {
    let path = path.as_ref();
    let file: GraphFile = read_json(path)?;
    let name = file.name.clone().unwrap_or_else(|| file_stem(path));
    graph_file_to_case(file, name)
}

fn graph_file_to_case(file: GraphFile, name: String) -> Result<GraphCase> {
    let (edges, weights): (Vec<(usize, usize)>, Vec<i64>) = file
        .edges
        .iter()
        .map(|record| {
            let (u, v, w) = record.parts();
            ((u, v), w)
        })
        .unzip();
    let graph =
        AdjacencyGraph::from_edge_list(file.n, &edges, Some(weights.as_slice()), file.directed)?;

    let default_target = file.n.saturating_sub(1);
    Ok(GraphCase::new(name, GraphKind::Dataset, graph)
        .with_query(file.source.unwrap_or(0), file.target.unwrap_or(default_target))
        .with_expected_shortest(file.expected_shortest)
        .with_expected(file.expected))
}

/// Saves a graph case as a directed arc list that reloads identically
pub fn save_graph_case(case: &GraphCase, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = GraphFile {
        name: Some(case.name.clone()),
        n: case.graph.node_count(),
        edges: graph_records(&case.graph),
        directed: true,
        source: Some(case.source),
        target: Some(case.target),
        expected: case.expected,
        expected_shortest: case.expected_shortest,
    };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    log::info!("Saved graph case to {}", path.display());
    Ok(())
}

fn graph_records(graph: &BenchGraph) -> Vec<EdgeRecord> {
    let ids = graph.node_ids();
    graph
        .arcs()
        .map(|(u, v, w)| EdgeRecord::Weighted(ids[u], ids[v], w))
        .collect()
}

fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
            .collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// Loads every dataset under `dir/leetcode` and `dir/generated`
///
/// Files that cannot be read or converted are logged and skipped.
pub fn load_all_datasets(dir: impl AsRef<Path>) -> Vec<GraphCase> {
    let dir = dir.as_ref();
    let mut cases = Vec::new();

    for path in json_files(&dir.join("leetcode")) {
        let stem = file_stem(&path);
        let file = match load_leetcode_file(&path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        for (i, case) in file.test_cases.iter().enumerate() {
            let case_id = case.id.unwrap_or(i as u64);
            match convert_leetcode_case(case, format!("{}_{}", stem, case_id)) {
                Ok(graph_case) => cases.push(graph_case),
                Err(e) => log::warn!("Skipping case {} of {}: {}", case_id, path.display(), e),
            }
        }
    }

    for path in json_files(&dir.join("generated")) {
        match load_graph_file(&path) {
            Ok(graph_case) => cases.push(graph_case),
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    log::info!("Loaded {} datasets in total", cases.len());
    cases
}
