use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::spfa::StateExtendedSpfa;
use crate::algorithm::statistics::SearchStatistics;
use crate::algorithm::two_distance_dijkstra::TwoDistanceDijkstra;
use crate::algorithm::{SecondShortestPath, SecondShortestResult};
use crate::graph::Graph;
use crate::{Error, Result};

/// Engine selector for callers that pick the strategy at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Spfa,
    Dijkstra,
}

/// Result pair and counters of one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryOutcome<W> {
    pub result: SecondShortestResult<W>,
    pub statistics: SearchStatistics,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::Spfa];

    /// Human readable engine name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Spfa => "State-Extended SPFA",
            Algorithm::Dijkstra => "Two-Distance Dijkstra",
        }
    }

    /// Builds the selected engine over `graph` and runs one query
    pub fn run<G: Graph>(
        self,
        graph: &G,
        source: &G::Node,
        target: &G::Node,
    ) -> Result<QueryOutcome<G::Weight>> {
        match self {
            Algorithm::Spfa => {
                run_engine::<G, _>(StateExtendedSpfa::new(graph)?, source, target)
            }
            Algorithm::Dijkstra => {
                run_engine::<G, _>(TwoDistanceDijkstra::new(graph)?, source, target)
            }
        }
    }
}

fn run_engine<G, E>(
    mut engine: E,
    source: &G::Node,
    target: &G::Node,
) -> Result<QueryOutcome<G::Weight>>
where
    G: Graph,
    E: SecondShortestPath<G>,
{
    let result = engine.find_second_shortest(source, target)?;
    let statistics = engine.statistics().copied().unwrap_or_default();
    Ok(QueryOutcome { result, statistics })
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Spfa => "spfa",
            Algorithm::Dijkstra => "dijkstra",
        })
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "spfa" | "state-extended-spfa" => Ok(Algorithm::Spfa),
            "dijkstra" | "two-distance-dijkstra" => Ok(Algorithm::Dijkstra),
            other => Err(Error::InvalidInput(format!("unknown algorithm: {}", other))),
        }
    }
}
