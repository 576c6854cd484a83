use serde::{Deserialize, Serialize};

use crate::algorithm::state::Relaxation;

/// Operation counters of one query, identical in shape for both engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Work items pushed onto the queue or heap
    pub enqueue_count: u64,
    /// Work items popped from the queue or heap
    pub dequeue_count: u64,
    /// Edges examined
    pub edge_relaxations: u64,
    /// Improvements of a shortest label
    pub first_updates: u64,
    /// Improvements of a second label, including finite demotions
    pub second_updates: u64,
    /// Main loop iterations
    pub iterations: u64,
    /// Popped items whose distance had been superseded (discarded by the
    /// heap engine, refreshed by the queue engine)
    pub stale_items: u64,
}

impl SearchStatistics {
    /// Pushes plus pops
    pub fn queue_operations(&self) -> u64 {
        self.enqueue_count + self.dequeue_count
    }

    pub(crate) fn record<W>(&mut self, relaxation: &Relaxation<W>) {
        match relaxation {
            Relaxation::First { demoted, .. } => {
                self.first_updates += 1;
                if demoted.is_some() {
                    self.second_updates += 1;
                }
            }
            Relaxation::Second { .. } => self.second_updates += 1,
            Relaxation::Unchanged => {}
        }
    }
}
