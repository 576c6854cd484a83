use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use crate::algorithm::state::{Rank, WorkItem};

/// Min-heap of work items keyed by distance
///
/// Ties are broken by node index, then rank. Duplicates are allowed; callers
/// prune superseded items when they pop them.
#[derive(Debug)]
pub struct WorkHeap<W>
where
    W: Ord + Copy + Debug,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(W, usize, Rank)>>,
}

impl<W> WorkHeap<W>
where
    W: Ord + Copy + Debug,
{
    /// Creates a new empty heap
    pub fn new() -> Self {
        WorkHeap {
            heap: BinaryHeap::new(),
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of queued items, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, item: WorkItem<W>) {
        self.heap.push(Reverse((item.distance, item.node, item.rank)));
    }

    /// Removes the item with the smallest distance
    pub fn pop(&mut self) -> Option<WorkItem<W>> {
        self.heap
            .pop()
            .map(|Reverse((distance, node, rank))| WorkItem::new(node, rank, distance))
    }

    /// Returns the item with the smallest distance without removing it
    pub fn peek(&self) -> Option<WorkItem<W>> {
        self.heap
            .peek()
            .map(|Reverse((distance, node, rank))| WorkItem::new(*node, *rank, *distance))
    }
}

impl<W> Default for WorkHeap<W>
where
    W: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
