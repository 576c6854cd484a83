pub mod priority_queue;
pub mod work_queue;

pub use priority_queue::WorkHeap;
pub use work_queue::PendingQueue;
