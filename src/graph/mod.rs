pub mod adjacency;
pub mod builder;
pub mod generators;
pub mod traits;

pub use adjacency::{AdjacencyGraph, GraphStatistics};
pub use builder::GraphBuilder;
pub use generators::{GraphCase, GraphKind};
pub use traits::{Graph, NodeId, Weight};
