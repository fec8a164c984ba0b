use core::alloc::Layout;

use tracing::debug;

use crate::config::FailurePlan;
use crate::error::{QueueError, Result};

#[derive(Debug, Default)]
pub(crate) struct Allocator {
    plan: FailurePlan,
    attempts: usize,
}

impl Allocator {
    pub(crate) fn new(plan: FailurePlan) -> Self {
        Allocator { plan, attempts: 0 }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts
    }

    pub(crate) fn reset(&mut self, plan: FailurePlan) {
        self.plan = plan;
        self.attempts = 0;
    }

    pub(crate) fn admit(&mut self, bytes: usize) -> Result<()> {
        self.attempts += 1;
        if self.plan.refuses(self.attempts) {
            debug!(attempt = self.attempts, bytes, "injected allocation failure");
            return Err(QueueError::AllocFailed { bytes });
        }
        Ok(())
    }

    pub(crate) fn copy_str(&mut self, text: &str) -> Result<String> {
        self.admit(text.len())?;
        let mut copy = String::new();
        copy.try_reserve_exact(text.len()).map_err(|_| {
            debug!(bytes = text.len(), "string copy allocation failed");
            QueueError::AllocFailed { bytes: text.len() }
        })?;
        copy.push_str(text);
        Ok(copy)
    }

    pub(crate) fn boxed<T>(&mut self, value: T) -> Result<Box<T>> {
        self.admit(Layout::new::<T>().size())?;
        try_box(value)
    }
}

/// `Box::new` that reports allocator exhaustion instead of aborting.
pub(crate) fn try_box<T>(value: T) -> Result<Box<T>> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }

    // SAFETY: layout has a non-zero size (checked above).
    let ptr = unsafe { std::alloc::alloc(layout) as *mut T };
    if ptr.is_null() {
        debug!(bytes = layout.size(), "allocator returned null");
        return Err(QueueError::AllocFailed {
            bytes: layout.size(),
        });
    }

    // SAFETY: ptr is non-null and was allocated by the global allocator with
    // Layout::new::<T>(), which is the layout Box uses to free it.
    unsafe {
        ptr.write(value);
        Ok(Box::from_raw(ptr))
    }
}
