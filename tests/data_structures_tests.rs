use second_shortest::algorithm::state::WorkItem;
use second_shortest::algorithm::Rank;
use second_shortest::data_structures::{PendingQueue, WorkHeap};

#[test]
fn test_work_heap_pops_in_distance_order() {
    let mut heap = WorkHeap::new();
    heap.push(WorkItem::new(3, Rank::First, 7i64));
    heap.push(WorkItem::new(1, Rank::Second, 2));
    heap.push(WorkItem::new(2, Rank::First, 5));
    // Duplicate state with a worse distance stays in the heap
    heap.push(WorkItem::new(1, Rank::Second, 9));

    assert_eq!(heap.len(), 4);
    assert_eq!(heap.peek(), Some(WorkItem::new(1, Rank::Second, 2)));

    let order: Vec<i64> = std::iter::from_fn(|| heap.pop()).map(|item| item.distance).collect();
    assert_eq!(order, vec![2, 5, 7, 9]);
    assert!(heap.is_empty());
}

#[test]
fn test_work_heap_breaks_ties_by_node_then_rank() {
    let mut heap = WorkHeap::new();
    heap.push(WorkItem::new(4, Rank::Second, 1u32));
    heap.push(WorkItem::new(4, Rank::First, 1));
    heap.push(WorkItem::new(2, Rank::Second, 1));

    assert_eq!(heap.pop(), Some(WorkItem::new(2, Rank::Second, 1)));
    assert_eq!(heap.pop(), Some(WorkItem::new(4, Rank::First, 1)));
    assert_eq!(heap.pop(), Some(WorkItem::new(4, Rank::Second, 1)));
    assert_eq!(heap.pop(), None);
}

#[test]
fn test_pending_queue_keeps_one_item_per_state() {
    let mut queue = PendingQueue::new(3);
    assert!(queue.push_if_absent(WorkItem::new(0, Rank::First, 4i64)));
    assert!(!queue.push_if_absent(WorkItem::new(0, Rank::First, 1)));
    // The other rank of the same node is a different state
    assert!(queue.push_if_absent(WorkItem::new(0, Rank::Second, 6)));
    assert!(queue.push_if_absent(WorkItem::new(2, Rank::First, 3)));
    assert_eq!(queue.len(), 3);
    assert!(queue.is_pending(0, Rank::First));
    assert!(!queue.is_pending(1, Rank::First));

    // FIFO order; the first-queued distance is kept
    assert_eq!(queue.pop(), Some(WorkItem::new(0, Rank::First, 4)));
    assert!(!queue.is_pending(0, Rank::First));
    assert!(queue.push_if_absent(WorkItem::new(0, Rank::First, 1)));

    assert_eq!(queue.pop(), Some(WorkItem::new(0, Rank::Second, 6)));
    assert_eq!(queue.pop(), Some(WorkItem::new(2, Rank::First, 3)));
    assert_eq!(queue.pop(), Some(WorkItem::new(0, Rank::First, 1)));
    assert!(queue.is_empty());
    assert_eq!(queue.pop(), None);
}
