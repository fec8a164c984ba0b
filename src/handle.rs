//! Flag-returning operations on possibly absent queue handles.
//!
//! An absent handle (`None`) stands for "no queue exists". Mutating calls on
//! it report failure, `size` reports zero and `reverse`/`sort` do nothing.
//! Errors from the underlying [`Queue`] methods are logged and collapsed into
//! `false`.

use tracing::debug;

use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::queue::Queue;

pub fn create() -> Option<Box<Queue>> {
    create_with(QueueConfig::default())
}

pub fn create_with(config: QueueConfig) -> Option<Box<Queue>> {
    Queue::try_boxed(config)
        .map_err(|err| debug!(%err, "queue creation failed"))
        .ok()
}

pub fn destroy(queue: Option<Box<Queue>>) {
    drop(queue);
}

pub fn insert_head(queue: Option<&mut Queue>, text: &str) -> bool {
    report(
        "insert_head",
        queue.ok_or(QueueError::Absent).and_then(|q| q.insert_head(text)),
    )
}

pub fn insert_tail(queue: Option<&mut Queue>, text: &str) -> bool {
    report(
        "insert_tail",
        queue.ok_or(QueueError::Absent).and_then(|q| q.insert_tail(text)),
    )
}

/// Removes the head element, copying it into `out` when a buffer is given.
/// The buffer's length is its capacity.
pub fn remove_head(queue: Option<&mut Queue>, out: Option<&mut [u8]>) -> bool {
    report(
        "remove_head",
        queue.ok_or(QueueError::Absent).and_then(|q| q.remove_head(out)),
    )
}

pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.reverse();
    }
}

pub fn sort(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.sort();
    }
}

fn report(op: &'static str, result: Result<(), QueueError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            debug!(op, %err, "operation rejected");
            false
        }
    }
}
