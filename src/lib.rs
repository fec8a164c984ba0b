//! A queue of owned strings backed by a singly linked list, with in-place
//! reversal and a stable merge sort.

mod alloc;
pub mod buffer;
mod config;
mod error;
pub mod handle;
mod queue;
mod sort;

pub use config::{FailurePlan, QueueConfig};
pub use error::{QueueError, Result};
pub use queue::{IntoIter, Iter, Queue};
