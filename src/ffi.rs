//! C ABI over the two engines
//!
//! Graphs are built incrementally through [`ssp_graph_add_edge`]; the first
//! query after a mutation freezes a snapshot that later queries reuse.

use libc::c_int;

use crate::algorithm::Algorithm;
use crate::graph::generators::BenchGraph;
use crate::graph::GraphBuilder;
use crate::Error;

pub const SSP_OK: c_int = 0;
pub const SSP_NULL_POINTER: c_int = -1;
pub const SSP_UNKNOWN_NODE: c_int = -2;
pub const SSP_INVALID_GRAPH: c_int = -3;
pub const SSP_INVALID_INPUT: c_int = -4;

/// Marks an absent distance in [`FfiQueryResult`]
pub const SSP_UNREACHABLE: i64 = -1;

/// Engine selector: 0 for Two-Distance Dijkstra, 1 for State-Extended SPFA
pub const SSP_DIJKSTRA: c_int = 0;
pub const SSP_SPFA: c_int = 1;

pub struct FfiGraph {
    builder: GraphBuilder<usize, i64>,
    snapshot: Option<BenchGraph>,
}

impl FfiGraph {
    fn graph(&mut self) -> &BenchGraph {
        let builder = &self.builder;
        self.snapshot.get_or_insert_with(|| builder.clone().build())
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfiQueryResult {
    pub shortest: i64,
    pub second_shortest: i64,
    pub edge_relaxations: u64,
    pub enqueue_count: u64,
}

fn status_of(err: &Error) -> c_int {
    match err {
        Error::UnknownNode(_) => SSP_UNKNOWN_NODE,
        Error::InvalidGraph { .. } | Error::InvalidEdge(..) => SSP_INVALID_GRAPH,
        _ => SSP_INVALID_INPUT,
    }
}

#[no_mangle]
pub extern "C" fn ssp_graph_new() -> *mut FfiGraph {
    Box::into_raw(Box::new(FfiGraph {
        builder: GraphBuilder::new(),
        snapshot: None,
    }))
}

/// Adds a directed arc, creating either endpoint if needed
#[no_mangle]
pub extern "C" fn ssp_graph_add_edge(g: *mut FfiGraph, from: usize, to: usize, weight: i64) -> c_int {
    let Some(g) = (unsafe { g.as_mut() }) else {
        return SSP_NULL_POINTER;
    };
    g.builder.add_edge(from, to, weight);
    g.snapshot = None;
    SSP_OK
}

#[no_mangle]
pub extern "C" fn ssp_graph_node_count(g: *const FfiGraph) -> usize {
    match unsafe { g.as_ref() } {
        Some(g) => g.builder.node_count(),
        None => 0,
    }
}

#[no_mangle]
pub extern "C" fn ssp_graph_free(g: *mut FfiGraph) {
    if !g.is_null() {
        unsafe {
            drop(Box::from_raw(g));
        }
    }
}

/// Runs one query and writes the pair and counters into `out`
#[no_mangle]
pub extern "C" fn ssp_second_shortest(
    g: *mut FfiGraph,
    algorithm: c_int,
    source: usize,
    target: usize,
    out: *mut FfiQueryResult,
) -> c_int {
    let (Some(g), Some(out)) = (unsafe { g.as_mut() }, unsafe { out.as_mut() }) else {
        return SSP_NULL_POINTER;
    };
    let algorithm = match algorithm {
        SSP_DIJKSTRA => Algorithm::Dijkstra,
        SSP_SPFA => Algorithm::Spfa,
        _ => return SSP_INVALID_INPUT,
    };

    match algorithm.run(g.graph(), &source, &target) {
        Ok(outcome) => {
            *out = FfiQueryResult {
                shortest: outcome.result.shortest.unwrap_or(SSP_UNREACHABLE),
                second_shortest: outcome.result.second_shortest.unwrap_or(SSP_UNREACHABLE),
                edge_relaxations: outcome.statistics.edge_relaxations,
                enqueue_count: outcome.statistics.enqueue_count,
            };
            SSP_OK
        }
        Err(e) => {
            log::debug!("FFI query failed: {}", e);
            status_of(&e)
        }
    }
}
