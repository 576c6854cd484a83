use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::{Algorithm, SearchStatistics, SecondShortestResult};
use crate::benchmark::{Comparison, TimingSummary};
use crate::graph::generators::GraphKind;

/// Represents a node in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
}

/// Represents a directed arc in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: i64,
}

/// Represents a complete graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub kind: GraphKind,
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
    /// Default query endpoints chosen by the generator
    pub source: usize,
    pub target: usize,
}

/// Parameters for graph generation
#[derive(Debug, Deserialize)]
pub struct GraphGenerationRequest {
    pub graph_type: GraphKind,
    #[serde(default = "default_node_count")]
    pub node_count: usize,
    /// Edge count of `random` graphs; defaults to twice the node count
    #[serde(default)]
    pub edge_count: Option<usize>,
    /// `(height, width)` of `grid` graphs; defaults to a square
    #[serde(default)]
    pub grid_dimensions: Option<(usize, usize)>,
    #[serde(default = "default_min_weight")]
    pub min_weight: i64,
    #[serde(default = "default_max_weight")]
    pub max_weight: i64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_node_count() -> usize { 100 }
fn default_min_weight() -> i64 { 1 }
fn default_max_weight() -> i64 { 100 }

/// Parameters for a single query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub algorithm: Algorithm,
    #[serde(default)]
    pub source: Option<usize>,
    #[serde(default)]
    pub target: Option<usize>,
}

/// Response containing one query's result
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub execution_id: Uuid,
    pub algorithm: Algorithm,
    pub algorithm_name: String,
    pub source: usize,
    pub target: usize,
    pub execution_time_ms: f64,
    pub result: SecondShortestResult<i64>,
    pub statistics: SearchStatistics,
}

/// Parameters for comparing both engines on a session graph
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub source: Option<usize>,
    #[serde(default)]
    pub target: Option<usize>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

fn default_iterations() -> usize { 1 }

/// Benchmark configuration
#[derive(Debug, Deserialize)]
pub struct BenchmarkRequest {
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,
    pub graph_types: Vec<GraphKind>,
    pub node_counts: Vec<usize>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_algorithms() -> Vec<Algorithm> {
    Algorithm::ALL.to_vec()
}

/// Benchmark results
#[derive(Debug, Serialize)]
pub struct BenchmarkResponse {
    pub benchmark_id: Uuid,
    pub comparisons: Vec<Comparison>,
    pub summary: Vec<TimingSummary>,
    /// Every case produced the same pair under both engines
    pub all_agree: bool,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session containing graph data and execution history
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraph,
    pub last_result: Option<QueryResponse>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WebGraph) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            last_result: None,
            created_at: Utc::now(),
        }
    }
}
