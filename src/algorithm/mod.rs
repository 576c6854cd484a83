pub mod selection;
pub mod spfa;
pub mod state;
pub mod statistics;
pub mod traits;
pub mod two_distance_dijkstra;

pub use selection::{Algorithm, QueryOutcome};
pub use state::{LabelUpdate, Rank};
pub use statistics::SearchStatistics;
pub use traits::{SecondShortestPath, SecondShortestResult};
