use std::fmt::{self, Display};

use serde::Serialize;

use crate::algorithm::statistics::SearchStatistics;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Result of a second-shortest query
///
/// `None` stands for "unreachable": no path at all for `shortest`, no
/// strictly longer path for `second_shortest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecondShortestResult<W> {
    /// Length of the shortest path from source to target
    pub shortest: Option<W>,

    /// Smallest path length strictly greater than `shortest`
    pub second_shortest: Option<W>,
}

impl<W: Weight> SecondShortestResult<W> {
    pub fn new(shortest: Option<W>, second_shortest: Option<W>) -> Self {
        SecondShortestResult {
            shortest,
            second_shortest,
        }
    }

    /// Both components unreachable
    pub fn unreachable() -> Self {
        Self::new(None, None)
    }

    pub fn is_reachable(&self) -> bool {
        self.shortest.is_some()
    }

    pub fn as_pair(&self) -> (Option<W>, Option<W>) {
        (self.shortest, self.second_shortest)
    }
}

impl<W: Display> Display for SecondShortestResult<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn component<W: Display>(value: &Option<W>) -> String {
            value
                .as_ref()
                .map_or_else(|| "unreachable".to_string(), |d| d.to_string())
        }
        write!(
            f,
            "shortest={}, second={}",
            component(&self.shortest),
            component(&self.second_shortest)
        )
    }
}

/// Trait for strict second-shortest path engines
///
/// An engine is bound to one immutable graph at construction and may be
/// queried any number of times; every query starts from fresh labels and a
/// fresh counter set.
pub trait SecondShortestPath<G>
where
    G: Graph,
{
    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Shortest and strict second-shortest distance from `source` to `target`
    ///
    /// Fails with [`Error::UnknownNode`](crate::Error::UnknownNode) before any
    /// work if either endpoint is not in the graph.
    fn find_second_shortest(
        &mut self,
        source: &G::Node,
        target: &G::Node,
    ) -> Result<SecondShortestResult<G::Weight>>;

    /// Counters of the most recently completed query; `None` before the first
    fn statistics(&self) -> Option<&SearchStatistics>;
}
