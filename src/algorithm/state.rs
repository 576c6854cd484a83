use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::graph::Weight;

/// Which of a node's two labels a work item refines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    First,
    Second,
}

impl Rank {
    pub(crate) fn slot(self) -> usize {
        match self {
            Rank::First => 0,
            Rank::Second => 1,
        }
    }
}

/// Unit of scheduling: one (node, rank) state and the distance it carried
/// when it was enqueued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem<W> {
    pub node: usize,
    pub rank: Rank,
    pub distance: W,
}

impl<W> WorkItem<W> {
    pub fn new(node: usize, rank: Rank, distance: W) -> Self {
        WorkItem {
            node,
            rank,
            distance,
        }
    }
}

/// Outcome of offering a candidate distance to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation<W> {
    /// New shortest label. `demoted` is the previous shortest label, now the
    /// second label, when it was finite.
    First { distance: W, demoted: Option<W> },
    /// New second label
    Second { distance: W },
    Unchanged,
}

/// Labels of a node after it changed, passed to query observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelUpdate<W> {
    pub node: usize,
    pub first: Option<W>,
    pub second: Option<W>,
}

/// Per-query `first`/`second` distance labels over dense node indices
///
/// Invariant: `first[v] < second[v]` whenever `second[v]` is finite, and
/// neither label ever increases.
#[derive(Debug, Clone)]
pub struct DistanceLabels<W> {
    first: Vec<W>,
    second: Vec<W>,
}

impl<W: Weight> DistanceLabels<W> {
    /// All labels unreached, except `first[source] = 0`
    pub fn new(node_count: usize, source: usize) -> Self {
        let mut labels = DistanceLabels {
            first: vec![W::infinity(); node_count],
            second: vec![W::infinity(); node_count],
        };
        labels.first[source] = <W as Zero>::zero();
        labels
    }

    pub fn first(&self, node: usize) -> W {
        self.first[node]
    }

    pub fn second(&self, node: usize) -> W {
        self.second[node]
    }

    pub fn get(&self, node: usize, rank: Rank) -> W {
        match rank {
            Rank::First => self.first[node],
            Rank::Second => self.second[node],
        }
    }

    /// True when a better label for the item's state arrived after it was queued
    pub fn is_stale(&self, item: &WorkItem<W>) -> bool {
        item.distance > self.get(item.node, item.rank)
    }

    /// Offers `candidate` as a path length to `node`
    pub fn relax(&mut self, node: usize, candidate: W) -> Relaxation<W> {
        let first = self.first[node];
        if candidate < first {
            self.second[node] = first;
            self.first[node] = candidate;
            Relaxation::First {
                distance: candidate,
                demoted: first.finite(),
            }
        } else if first < candidate && candidate < self.second[node] {
            self.second[node] = candidate;
            Relaxation::Second {
                distance: candidate,
            }
        } else {
            Relaxation::Unchanged
        }
    }

    pub fn snapshot(&self, node: usize) -> LabelUpdate<W> {
        LabelUpdate {
            node,
            first: self.first[node].finite(),
            second: self.second[node].finite(),
        }
    }
}
