use num_traits::Zero;

use crate::algorithm::state::{DistanceLabels, LabelUpdate, Rank, Relaxation, WorkItem};
use crate::algorithm::statistics::SearchStatistics;
use crate::algorithm::{SecondShortestPath, SecondShortestResult};
use crate::data_structures::WorkHeap;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Two-Distance Dijkstra
///
/// Keeps a shortest and a strict second-shortest label per node and settles
/// (node, rank) states in distance order from a min-heap. O(m log n).
///
/// Improvements are always pushed; superseded heap entries are dropped when
/// popped. The search stops as soon as the target's second label is popped,
/// since no later entry can be shorter.
#[derive(Debug)]
pub struct TwoDistanceDijkstra<'g, G>
where
    G: Graph,
{
    graph: &'g G,
    statistics: Option<SearchStatistics>,
}

impl<'g, G> TwoDistanceDijkstra<'g, G>
where
    G: Graph,
{
    /// Binds the engine to a graph; fails on negative edge weights
    pub fn new(graph: &'g G) -> Result<Self> {
        graph.validate_non_negative()?;
        log::debug!(
            "Initialised TwoDistanceDijkstra on {} nodes, {} arcs",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(TwoDistanceDijkstra {
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
        let mut heap = WorkHeap::new();

        heap.push(WorkItem::new(source_index, Rank::First, <G::Weight as Zero>::zero()));
        stats.enqueue_count += 1;

        log::debug!("Searching second-shortest path from {:?} to {:?}", source, target);

        while let Some(item) = heap.pop() {
            stats.iterations += 1;
            stats.dequeue_count += 1;

            if item.node == target_index && item.rank == Rank::Second {
                log::debug!(
                    "Target second label settled: shortest={}, second={}",
                    labels.first(target_index),
                    labels.second(target_index)
                );
                break;
            }

            if labels.is_stale(&item) {
                stats.stale_items += 1;
                continue;
            }

            for &(v, weight) in graph.neighbors(item.node) {
                stats.edge_relaxations += 1;
                let relaxation = labels.relax(v, item.distance.extend(weight));
                stats.record(&relaxation);

                match relaxation {
                    Relaxation::First { distance, demoted } => {
                        observe(labels.snapshot(v));
                        heap.push(WorkItem::new(v, Rank::First, distance));
                        stats.enqueue_count += 1;
                        if let Some(second) = demoted {
                            heap.push(WorkItem::new(v, Rank::Second, second));
                            stats.enqueue_count += 1;
                        }
                    }
                    Relaxation::Second { distance } => {
                        observe(labels.snapshot(v));
                        heap.push(WorkItem::new(v, Rank::Second, distance));
                        stats.enqueue_count += 1;
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
            "TwoDistanceDijkstra finished: {}, iterations={}",
            result,
            stats.iterations
        );

        self.statistics = Some(stats);
        Ok(result)
    }
}

impl<'g, G> SecondShortestPath<G> for TwoDistanceDijkstra<'g, G>
where
    G: Graph,
{
    fn name(&self) -> &'static str {
        "Two-Distance Dijkstra"
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
