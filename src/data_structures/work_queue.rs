use std::collections::VecDeque;

use crate::algorithm::state::{Rank, WorkItem};

/// FIFO work queue that holds at most one pending item per (node, rank)
///
/// The pending table is a flat `[bool; 2]` per node, sized once per query.
#[derive(Debug)]
pub struct PendingQueue<W> {
    queue: VecDeque<WorkItem<W>>,
    pending: Vec<[bool; 2]>,
}

impl<W: Copy> PendingQueue<W> {
    /// Creates an empty queue for a graph with `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        PendingQueue {
            queue: VecDeque::new(),
            pending: vec![[false; 2]; node_count],
        }
    }

    /// Appends the item unless its (node, rank) is already pending.
    /// Returns true if the item was enqueued.
    pub fn push_if_absent(&mut self, item: WorkItem<W>) -> bool {
        let flag = &mut self.pending[item.node][item.rank.slot()];
        if *flag {
            return false;
        }
        *flag = true;
        self.queue.push_back(item);
        true
    }

    /// Removes the front item and clears its pending flag
    pub fn pop(&mut self) -> Option<WorkItem<W>> {
        let item = self.queue.pop_front()?;
        self.pending[item.node][item.rank.slot()] = false;
        Some(item)
    }

    pub fn is_pending(&self, node: usize, rank: Rank) -> bool {
        self.pending[node][rank.slot()]
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
