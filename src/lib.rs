//! Second Shortest - strict second-shortest path distances
//!
//! This library computes, for a weighted directed graph, the shortest path length
//! and the strict second-shortest path length (the smallest length strictly greater
//! than the shortest) between a source and a target node.
//!
//! Two independent engines share one contract and must always agree:
//! a label-correcting State-Extended SPFA driven by a FIFO queue, and a
//! label-setting Two-Distance Dijkstra driven by a min-heap. Both expose the same
//! operation counters so their behaviour can be compared on adversarial inputs
//! such as grid graphs.

pub mod algorithm;
pub mod benchmark;
pub mod config;
pub mod data_structures;
pub mod dataset;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod graph;
#[cfg(feature = "python")]
mod python;
pub mod web;

pub use algorithm::{
    spfa::StateExtendedSpfa, two_distance_dijkstra::TwoDistanceDijkstra, Algorithm, Rank,
    SearchStatistics, SecondShortestPath, SecondShortestResult,
};
/// Re-export main types for convenient use
pub use graph::{AdjacencyGraph, Graph, GraphBuilder};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid graph: negative edge weight {weight} on edge {from} -> {to}")]
    InvalidGraph {
        from: String,
        to: String,
        weight: String,
    },

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
