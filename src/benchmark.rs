//! Timing and counter collection for comparing the two engines

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::spfa::StateExtendedSpfa;
use crate::algorithm::two_distance_dijkstra::TwoDistanceDijkstra;
use crate::algorithm::{Algorithm, SearchStatistics, SecondShortestPath, SecondShortestResult};
use crate::graph::generators::{BenchGraph, GraphCase, GraphKind};
use crate::graph::Graph;
use crate::Result;

/// Measurements of one (case, algorithm) run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRecord {
    pub algorithm: Algorithm,
    pub case: String,
    pub kind: GraphKind,
    pub nodes: usize,
    /// Directed arc count
    pub arcs: usize,
    pub source: usize,
    pub target: usize,
    /// Mean wall-clock time of the query call over all repetitions
    pub elapsed_ms: f64,
    pub shortest: Option<i64>,
    pub second_shortest: Option<i64>,
    pub statistics: SearchStatistics,
    /// Whether the pair matched the case's expected values, if it has any
    pub correct: Option<bool>,
}

/// Timing distribution of one algorithm across many records
#[derive(Debug, Clone, Serialize)]
pub struct TimingSummary {
    pub algorithm: Algorithm,
    pub runs: usize,
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub std_ms: f64,
    pub mean_edge_relaxations: f64,
    pub mean_enqueues: f64,
}

/// Both engines on one case
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub dijkstra: BenchmarkRecord,
    pub spfa: BenchmarkRecord,
    /// Both engines returned the same pair
    pub agree: bool,
    /// SPFA enqueues divided by Dijkstra enqueues
    pub push_ratio: f64,
    /// SPFA time divided by Dijkstra time
    pub speedup: f64,
}

fn timed_query<E>(
    mut engine: E,
    source: &usize,
    target: &usize,
    iterations: usize,
) -> Result<(SecondShortestResult<i64>, SearchStatistics, Duration)>
where
    E: SecondShortestPath<BenchGraph>,
{
    let mut total = Duration::ZERO;
    let mut result = SecondShortestResult::unreachable();
    for _ in 0..iterations.max(1) {
        let start = Instant::now();
        result = engine.find_second_shortest(source, target)?;
        total += start.elapsed();
    }
    let statistics = engine.statistics().copied().unwrap_or_default();
    Ok((result, statistics, total / iterations.max(1) as u32))
}

/// Runs one engine on one case, timing only the query itself
pub fn run_single_test(algorithm: Algorithm, case: &GraphCase) -> Result<BenchmarkRecord> {
    run_repeated(algorithm, case, 1)
}

/// Like [`run_single_test`], averaging the time over `iterations` queries
pub fn run_repeated(
    algorithm: Algorithm,
    case: &GraphCase,
    iterations: usize,
) -> Result<BenchmarkRecord> {
    let graph = &case.graph;
    let (source, target) = (&case.source, &case.target);

    let (result, statistics, elapsed) = match algorithm {
        Algorithm::Spfa => timed_query(StateExtendedSpfa::new(graph)?, source, target, iterations)?,
        Algorithm::Dijkstra => {
            timed_query(TwoDistanceDijkstra::new(graph)?, source, target, iterations)?
        }
    };

    let correct = check_expected(case, &result);
    if correct == Some(false) {
        log::warn!(
            "Result mismatch on {} ({}): expected=({:?}, {:?}), actual=({:?}, {:?})",
            case.name,
            algorithm,
            case.expected_shortest,
            case.expected,
            result.shortest,
            result.second_shortest
        );
    }

    Ok(BenchmarkRecord {
        algorithm,
        case: case.name.clone(),
        kind: case.kind,
        nodes: graph.node_count(),
        arcs: graph.edge_count(),
        source: case.source,
        target: case.target,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        shortest: result.shortest,
        second_shortest: result.second_shortest,
        statistics,
        correct,
    })
}

/// Compares each known component; `None` when the case carries no oracle
fn check_expected(case: &GraphCase, result: &SecondShortestResult<i64>) -> Option<bool> {
    if case.expected.is_none() && case.expected_shortest.is_none() {
        return None;
    }
    let shortest_ok = case
        .expected_shortest
        .map_or(true, |expected| result.shortest == Some(expected));
    let second_ok = case
        .expected
        .map_or(true, |expected| result.second_shortest == Some(expected));
    Some(shortest_ok && second_ok)
}

fn run_case(algorithms: &[Algorithm], case: &GraphCase, iterations: usize) -> Vec<BenchmarkRecord> {
    algorithms
        .iter()
        .filter_map(|&algorithm| match run_repeated(algorithm, case, iterations) {
            Ok(record) => Some(record),
            Err(e) => {
                log::error!("Test failed: {} on {}: {}", algorithm.name(), case.name, e);
                None
            }
        })
        .collect()
}

/// Runs every algorithm on every case
///
/// With `parallel`, cases are spread over the rayon pool. Each query owns its
/// own labels and queue and the graphs are shared read-only, so results are
/// unaffected; timings get noisier.
pub fn run_benchmark(
    algorithms: &[Algorithm],
    cases: &[GraphCase],
    iterations: usize,
    parallel: bool,
) -> Vec<BenchmarkRecord> {
    log::info!(
        "Starting benchmark: {} algorithms, {} cases",
        algorithms.len(),
        cases.len()
    );

    let records: Vec<BenchmarkRecord> = if parallel {
        cases
            .par_iter()
            .map(|case| run_case(algorithms, case, iterations))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    } else {
        cases
            .iter()
            .flat_map(|case| run_case(algorithms, case, iterations))
            .collect()
    };

    log::info!("Benchmark finished with {} records", records.len());
    records
}

/// Runs both engines on a case and compares them
pub fn compare(case: &GraphCase, iterations: usize) -> Result<Comparison> {
    let dijkstra = run_repeated(Algorithm::Dijkstra, case, iterations)?;
    let spfa = run_repeated(Algorithm::Spfa, case, iterations)?;

    let agree = dijkstra.shortest == spfa.shortest && dijkstra.second_shortest == spfa.second_shortest;
    if !agree {
        log::error!(
            "Engines disagree on {}: dijkstra=({:?}, {:?}), spfa=({:?}, {:?})",
            case.name,
            dijkstra.shortest,
            dijkstra.second_shortest,
            spfa.shortest,
            spfa.second_shortest
        );
    }

    let push_ratio = ratio(
        spfa.statistics.enqueue_count as f64,
        dijkstra.statistics.enqueue_count as f64,
    );
    let speedup = ratio(spfa.elapsed_ms, dijkstra.elapsed_ms);

    Ok(Comparison {
        dijkstra,
        spfa,
        agree,
        push_ratio,
        speedup,
    })
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Linear-interpolated quantile of an ascending sample
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Sample standard deviation; zero for fewer than two values
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Per-algorithm timing distribution and mean counters
pub fn summarize(records: &[BenchmarkRecord]) -> Vec<TimingSummary> {
    let mut by_algorithm: BTreeMap<Algorithm, Vec<&BenchmarkRecord>> = BTreeMap::new();
    for record in records {
        by_algorithm.entry(record.algorithm).or_default().push(record);
    }

    by_algorithm
        .into_iter()
        .map(|(algorithm, group)| {
            let mut times: Vec<OrderedFloat<f64>> =
                group.iter().map(|r| OrderedFloat(r.elapsed_ms)).collect();
            times.sort();
            let times: Vec<f64> = times.into_iter().map(OrderedFloat::into_inner).collect();

            let relaxations: Vec<f64> = group
                .iter()
                .map(|r| r.statistics.edge_relaxations as f64)
                .collect();
            let enqueues: Vec<f64> = group
                .iter()
                .map(|r| r.statistics.enqueue_count as f64)
                .collect();

            TimingSummary {
                algorithm,
                runs: group.len(),
                mean_ms: mean(&times),
                median_ms: quantile(&times, 0.5),
                p95_ms: quantile(&times, 0.95),
                p99_ms: quantile(&times, 0.99),
                std_ms: std_dev(&times),
                mean_edge_relaxations: mean(&relaxations),
                mean_enqueues: mean(&enqueues),
            }
        })
        .collect()
}
