use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::benchmark::{compare, summarize, Comparison};
use crate::graph::generators::{
    chain_graph, complete_graph, dense_graph, grid_graph, random_connected_graph, sparse_graph,
    star_graph, BenchGraph, GraphCase, GraphKind,
};
use crate::graph::{AdjacencyGraph, Graph};
use crate::web::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

/// Sessions kept when no limit is configured
const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Largest graph a generation request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    pub max_nodes: usize,
    /// Undirected edges, as estimated from the request before generating
    pub max_edges: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_nodes: 1_000_000,
            max_edges: 10_000_000,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    max_sessions: usize,
    limits: GenerationLimits,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_max_sessions(DEFAULT_MAX_SESSIONS)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
            limits: GenerationLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: GenerationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Stores a session, evicting the oldest ones beyond the limit
    fn insert_session(&self, session: Session) -> Result<(), ApiError> {
        let mut sessions = self.sessions()?;
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id);
            match oldest {
                Some(id) => {
                    log::debug!("Evicting session {}", id);
                    sessions.remove(&id);
                }
                None => break,
            }
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_store_poisoned",
                "Session store is unavailable".to_string(),
            )
        })
    }

    fn session_graph(&self, session_id: &Uuid) -> Result<WebGraph, ApiError> {
        match self.sessions()?.get(session_id) {
            Some(session) => Ok(session.graph.clone()),
            None => Err(session_not_found()),
        }
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs/generate", post(generate_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/query/:session_id", post(run_query))
        .route("/api/compare/:session_id", post(compare_engines))
        .route("/api/benchmark", post(run_benchmark))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session))
        .route("/api/health", get(health_check))
}

/// Generate a new graph
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphGenerationRequest>,
) -> ApiResult<Session> {
    let limits = state.limits;
    let case = tokio::task::spawn_blocking(move || generate_case(&request, limits))
        .await
        .map_err(join_error)??;

    let session = Session::new(convert_case_to_web(&case));
    log::info!(
        "Created session {} with a {} graph of {} nodes",
        session.id,
        case.kind,
        case.graph.node_count()
    );
    state.insert_session(session.clone())?;

    Ok(Json(session))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<WebGraph> {
    state.session_graph(&session_id).map(Json)
}

/// Run one engine on a session graph
pub async fn run_query(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<QueryResponse> {
    let web_graph = state.session_graph(&session_id)?;
    let source = request.source.unwrap_or(web_graph.source);
    let target = request.target.unwrap_or(web_graph.target);
    let algorithm = request.algorithm;

    let (outcome, elapsed) = tokio::task::spawn_blocking(move || {
        let graph = convert_web_graph_to_rust(&web_graph)?;
        let start_time = Instant::now();
        let outcome = algorithm.run(&graph, &source, &target)?;
        Ok::<_, crate::Error>((outcome, start_time.elapsed()))
    })
    .await
    .map_err(join_error)?
    .map_err(library_error)?;

    let response = QueryResponse {
        execution_id: Uuid::new_v4(),
        algorithm,
        algorithm_name: algorithm.name().to_string(),
        source,
        target,
        execution_time_ms: elapsed.as_secs_f64() * 1000.0,
        result: outcome.result,
        statistics: outcome.statistics,
    };

    if let Some(session) = state.sessions()?.get_mut(&session_id) {
        session.last_result = Some(response.clone());
    }

    Ok(Json(response))
}

/// Run both engines on a session graph and compare them
pub async fn compare_engines(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<CompareRequest>,
) -> ApiResult<Comparison> {
    let web_graph = state.session_graph(&session_id)?;
    let source = request.source.unwrap_or(web_graph.source);
    let target = request.target.unwrap_or(web_graph.target);

    let comparison = tokio::task::spawn_blocking(move || {
        let graph = convert_web_graph_to_rust(&web_graph)?;
        let case = GraphCase::new(session_id.to_string(), web_graph.kind, graph)
            .with_query(source, target);
        compare(&case, request.iterations)
    })
    .await
    .map_err(join_error)?
    .map_err(library_error)?;

    Ok(Json(comparison))
}

/// Compare both engines over freshly generated graphs
pub async fn run_benchmark(
    State(state): State<AppState>,
    Json(request): Json<BenchmarkRequest>,
) -> ApiResult<BenchmarkResponse> {
    let limits = state.limits;
    let response = tokio::task::spawn_blocking(move || {
        let mut comparisons = Vec::new();
        for &graph_type in &request.graph_types {
            for &node_count in &request.node_counts {
                let generation = GraphGenerationRequest {
                    graph_type,
                    node_count,
                    edge_count: None,
                    grid_dimensions: None,
                    min_weight: 1,
                    max_weight: 100,
                    seed: request.seed,
                };
                let case = generate_case(&generation, limits)?;
                comparisons.push(compare(&case, request.iterations).map_err(library_error)?);
            }
        }

        let records: Vec<_> = comparisons
            .iter()
            .flat_map(|c| [c.dijkstra.clone(), c.spfa.clone()])
            .filter(|r| request.algorithms.contains(&r.algorithm))
            .collect();
        let all_agree = comparisons.iter().all(|c| c.agree);

        Ok::<_, ApiError>(BenchmarkResponse {
            benchmark_id: Uuid::new_v4(),
            summary: summarize(&records),
            comparisons,
            all_agree,
        })
    })
    .await
    .map_err(join_error)??;

    Ok(Json(response))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Vec<Uuid>> {
    let session_ids: Vec<Uuid> = state.sessions()?.keys().cloned().collect();
    Ok(Json(session_ids))
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Session> {
    match state.sessions()?.get(&session_id) {
        Some(session) => Ok(Json(session.clone())),
        None => Err(session_not_found()),
    }
}

/// Health check endpoint
pub async fn health_check() -> ApiResult<serde_json::Value> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found() -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "session_not_found",
        "Session not found".to_string(),
    )
}

fn library_error(err: crate::Error) -> ApiError {
    let (status, code) = match err {
        crate::Error::UnknownNode(_) => (StatusCode::NOT_FOUND, "unknown_node"),
        crate::Error::InvalidGraph { .. } | crate::Error::InvalidEdge(..) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "invalid_graph")
        }
        crate::Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
        crate::Error::Io(_) | crate::Error::Json(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };
    api_error(status, code, err.to_string())
}

fn join_error(err: tokio::task::JoinError) -> ApiError {
    log::error!("Worker task failed: {}", err);
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "task_failed",
        format!("Worker task failed: {}", err),
    )
}

fn grid_shape(request: &GraphGenerationRequest) -> (usize, usize) {
    request.grid_dimensions.unwrap_or_else(|| {
        let side = ((request.node_count as f64).sqrt().ceil() as usize).max(1);
        (side, side)
    })
}

fn random_edge_count(request: &GraphGenerationRequest) -> usize {
    let n = request.node_count;
    let max_edges = n.saturating_mul(n.saturating_sub(1)) / 2;
    request.edge_count.unwrap_or(n.saturating_mul(2)).min(max_edges)
}

/// Node and edge counts the generator would produce, saturating on overflow
fn estimated_size(request: &GraphGenerationRequest) -> (usize, usize) {
    let n = request.node_count;
    match request.graph_type {
        GraphKind::Dense => (n, n.saturating_mul(n) / 5),
        GraphKind::Sparse => (n, n.saturating_mul(5)),
        GraphKind::Grid => {
            let (height, width) = grid_shape(request);
            let nodes = height.saturating_mul(width);
            (nodes, nodes.saturating_mul(2))
        }
        GraphKind::Random => (n, random_edge_count(request)),
        GraphKind::Complete => (n, n.saturating_mul(n.saturating_sub(1)) / 2),
        GraphKind::Chain | GraphKind::Star | GraphKind::Dataset => (n, n),
    }
}

fn generate_case(
    request: &GraphGenerationRequest,
    limits: GenerationLimits,
) -> Result<GraphCase, ApiError> {
    let (nodes, edges) = estimated_size(request);
    if nodes > limits.max_nodes || edges > limits.max_edges {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "graph_too_large",
            format!(
                "Requested {} graph has ~{} nodes and ~{} edges; limits are {} and {}",
                request.graph_type, nodes, edges, limits.max_nodes, limits.max_edges
            ),
        ));
    }

    let weights = request.min_weight..=request.max_weight;
    let n = request.node_count;
    let case = match request.graph_type {
        GraphKind::Dense => dense_graph(n, weights, request.seed),
        GraphKind::Sparse => sparse_graph(n, weights, request.seed),
        GraphKind::Grid => {
            let (height, width) = grid_shape(request);
            grid_graph(height, width, weights, request.seed)
        }
        GraphKind::Random => {
            random_connected_graph(n, random_edge_count(request), weights, request.seed)
        }
        GraphKind::Chain => chain_graph(n),
        GraphKind::Star => star_graph(n),
        GraphKind::Complete => complete_graph(n),
        GraphKind::Dataset => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_graph_type",
                "Dataset graphs cannot be generated".to_string(),
            ));
        }
    };
    case.map_err(library_error)
}

fn convert_case_to_web(case: &GraphCase) -> WebGraph {
    let ids = case.graph.node_ids();
    let nodes = ids
        .iter()
        .map(|&id| WebNode {
            id,
            label: format!("Node {}", id),
        })
        .collect();

    let links = case
        .graph
        .arcs()
        .map(|(u, v, weight)| WebEdge {
            source: ids[u],
            target: ids[v],
            weight,
        })
        .collect();

    WebGraph {
        kind: case.kind,
        nodes,
        links,
        source: case.source,
        target: case.target,
    }
}

fn convert_web_graph_to_rust(web_graph: &WebGraph) -> crate::Result<BenchGraph> {
    let (edges, weights): (Vec<(usize, usize)>, Vec<i64>) = web_graph
        .links
        .iter()
        .map(|edge| ((edge.source, edge.target), edge.weight))
        .unzip();
    AdjacencyGraph::from_edge_list(web_graph.nodes.len(), &edges, Some(weights.as_slice()), true)
}
