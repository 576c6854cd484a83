use num_traits::Zero;

use crate::algorithm::state::{DistanceLabels, LabelUpdate, Rank, Relaxation, WorkItem};
use crate::algorithm::statistics::SearchStatistics;
use crate::algorithm::{SecondShortestPath, SecondShortestResult};
use crate::data_structures::PendingQueue;
use crate::graph::{Graph, Weight};
use crate::Result;

/// State-Extended SPFA
///
/// Label-correcting search over the extended state space (node, rank): a
/// FIFO queue keeps at most one pending item per state and relaxation
/// continues until no label changes. Average O(m), worst case O(nm); grid
/// graphs with random weights come close to the worst case.
#[derive(Debug)]
pub struct StateExtendedSpfa<'g, G>
where
    G: Graph,
{
    graph: &'g G,
    statistics: Option<SearchStatistics>,
}

impl<'g, G> StateExtendedSpfa<'g, G>
where
    G: Graph,
{
    /// Binds the engine to a graph; fails on negative edge weights
    pub fn new(graph: &'g G) -> Result<Self> {
        graph.validate_non_negative()?;
        log::debug!(
            "Initialised StateExtendedSpfa on {} nodes, {} arcs",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(StateExtendedSpfa {
            graph,
            statistics: None,
        })
    }

    /// Same as [`SecondShortestPath::find_second_shortest`], calling `observe`
    /// after every label change
    pub fn find_second_shortest_observed<F>(
        &mut self,
        source: &G::Node,
        target: &G::Node,
        mut observe: F,
    ) -> Result<SecondShortestResult<G::Weight>>
    where
        F: FnMut(LabelUpdate<G::Weight>),
    {
        let graph = self.graph;
        let source_index = graph.require_index(source)?;
        let target_index = graph.require_index(target)?;

        let mut stats = SearchStatistics::default();
        let mut labels = DistanceLabels::new(graph.node_count(), source_index);
        let mut queue = PendingQueue::new(graph.node_count());

        let origin = WorkItem::new(source_index, Rank::First, <G::Weight as Zero>::zero());
        queue.push_if_absent(origin);
        stats.enqueue_count += 1;

        log::debug!("Searching second-shortest path from {:?} to {:?}", source, target);

        while let Some(item) = queue.pop() {
            stats.iterations += 1;
            stats.dequeue_count += 1;

            // An item superseded while pending stands for its state's current
            // label: the pending flag kept the fresher item out of the queue.
            let current = labels.get(item.node, item.rank);
            let distance = if labels.is_stale(&item) {
                stats.stale_items += 1;
                log::trace!(
                    "Refreshing {:?} item of node {}: {} -> {}",
                    item.rank,
                    item.node,
                    item.distance,
                    current
                );
                current
            } else {
                item.distance
            };

            for &(v, weight) in graph.neighbors(item.node) {
                stats.edge_relaxations += 1;
                let relaxation = labels.relax(v, distance.extend(weight));
                stats.record(&relaxation);

                match relaxation {
                    Relaxation::First {
                        distance: first,
                        demoted,
                    } => {
                        observe(labels.snapshot(v));
                        if queue.push_if_absent(WorkItem::new(v, Rank::First, first)) {
                            stats.enqueue_count += 1;
                        }
                        if let Some(second) = demoted {
                            if queue.push_if_absent(WorkItem::new(v, Rank::Second, second)) {
                                stats.enqueue_count += 1;
                            }
                        }
                    }
                    Relaxation::Second { distance: second } => {
                        observe(labels.snapshot(v));
                        if queue.push_if_absent(WorkItem::new(v, Rank::Second, second)) {
                            stats.enqueue_count += 1;
                        }
                    }
                    Relaxation::Unchanged => {}
                }
            }
        }

        let result = SecondShortestResult::new(
            labels.first(target_index).finite(),
            labels.second(target_index).finite(),
        );
        log::info!(
            "StateExtendedSpfa finished: {}, iterations={}",
            result,
            stats.iterations
        );

        self.statistics = Some(stats);
        Ok(result)
    }
}

impl<'g, G> SecondShortestPath<G> for StateExtendedSpfa<'g, G>
where
    G: Graph,
{
    fn name(&self) -> &'static str {
        "State-Extended SPFA"
    }

    fn find_second_shortest(
        &mut self,
        source: &G::Node,
        target: &G::Node,
    ) -> Result<SecondShortestResult<G::Weight>> {
        self.find_second_shortest_observed(source, target, |_| {})
    }

    fn statistics(&self) -> Option<&SearchStatistics> {
        self.statistics.as_ref()
    }
}
