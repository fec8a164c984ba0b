use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use tracing::{debug, trace};

use crate::alloc::{try_box, Allocator};
use crate::buffer;
use crate::config::{FailurePlan, QueueConfig};
use crate::error::{QueueError, Result};
use crate::sort;

pub(crate) type Link = Option<NonNull<Node>>;

pub(crate) struct Node {
    pub(crate) value: String,
    pub(crate) next: Link,
}

// Every node reachable from `head` was leaked from a `Box` in `new_node` and
// is owned by the queue until `unlink_head` turns it back into one.
pub struct Queue {
    head: Link,
    tail: Link,
    size: usize,
    allocator: Allocator,
    _owns: PhantomData<Box<Node>>,
}

impl Queue {
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Queue {
            head: None,
            tail: None,
            size: 0,
            allocator: Allocator::new(config.failure_plan),
            _owns: PhantomData,
        }
    }

    pub fn try_boxed(config: QueueConfig) -> Result<Box<Queue>> {
        let mut queue = Self::with_config(config);
        queue.allocator.admit(core::mem::size_of::<Queue>())?;
        let queue = try_box(queue)?;
        trace!("queue created");
        Ok(queue)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn alloc_attempts(&self) -> usize {
        self.allocator.attempts()
    }

    pub fn set_failure_plan(&mut self, plan: FailurePlan) {
        self.allocator.reset(plan);
    }

    pub fn insert_head(&mut self, text: &str) -> Result<()> {
        let node = self.new_node(text)?;

        // SAFETY: node was just allocated and is not yet part of the chain.
        unsafe {
            (*node.as_ptr()).next = self.head;
        }

        if self.tail.is_none() {
            self.tail = Some(node);
        }

        self.head = Some(node);
        self.size += 1;
        trace!(len = text.len(), size = self.size, "inserted at head");
        Ok(())
    }

    pub fn insert_tail(&mut self, text: &str) -> Result<()> {
        let node = self.new_node(text)?;

        match self.tail {
            None => self.head = Some(node),
            // SAFETY: tail points to the last node owned by this queue and no
            // reference into the chain outlives a method call.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
        }

        self.tail = Some(node);
        self.size += 1;
        trace!(len = text.len(), size = self.size, "inserted at tail");
        Ok(())
    }

    /// Removes the first element. When `out` is given, the removed string is
    /// copied into it, truncated to `out.len() - 1` bytes plus a NUL.
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<()> {
        let Some(node) = self.unlink_head() else {
            debug!("remove from empty queue");
            return Err(QueueError::Empty);
        };

        if let Some(buf) = out {
            buffer::copy_truncated(&node.value, buf);
        }

        trace!(size = self.size, "removed from head");
        Ok(())
    }

    pub fn pop_head(&mut self) -> Option<String> {
        self.unlink_head().map(|node| node.value)
    }

    pub fn front(&self) -> Option<&str> {
        // SAFETY: head is a live node owned by this queue. The borrow is tied
        // to &self, so the node cannot be released while it is held.
        self.head.map(|node| unsafe { (*node.as_ptr()).value.as_str() })
    }

    pub fn back(&self) -> Option<&str> {
        // SAFETY: as for front, with tail.
        self.tail.map(|node| unsafe { (*node.as_ptr()).value.as_str() })
    }

    pub fn clear(&mut self) {
        while self.unlink_head().is_some() {}
    }

    pub fn reverse(&mut self) {
        if self.size < 2 {
            return;
        }

        let mut reversed: Link = None;
        let mut current = self.head;
        while let Some(node) = current {
            // SAFETY: every node in the chain is owned by this queue and
            // nothing else points at it during the walk.
            unsafe {
                current = (*node.as_ptr()).next;
                (*node.as_ptr()).next = reversed;
            }
            reversed = Some(node);
        }

        self.tail = self.head;
        self.head = reversed;
        trace!(size = self.size, "reversed");
    }

    pub fn sort(&mut self) {
        if self.size < 2 {
            return;
        }

        // SAFETY: head starts a terminated chain owned only by this queue.
        self.head = unsafe { sort::merge_sort(self.head) };
        // Merge sort does not track the tail.
        self.relink_tail();
        trace!(size = self.size, "sorted");
    }

    pub fn validate(&self) -> Result<()> {
        let mut count = 0;
        let mut last: Link = None;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            count += 1;
            if count > self.size {
                return Err(QueueError::Corrupted("chain is longer than size"));
            }
            last = Some(node);
            // SAFETY: node is part of the chain owned by this queue.
            cursor = unsafe { (*node.as_ptr()).next };
        }

        if count != self.size {
            return Err(QueueError::Corrupted("size does not match chain length"));
        }
        if last != self.tail {
            return Err(QueueError::Corrupted("tail is not the last node"));
        }
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            current: self.head,
            _queue: PhantomData,
        }
    }

    fn new_node(&mut self, text: &str) -> Result<NonNull<Node>> {
        let mut node = self.allocator.boxed(Node {
            value: String::new(),
            next: None,
        })?;
        node.value = self.allocator.copy_str(text)?;
        Ok(NonNull::from(Box::leak(node)))
    }

    fn unlink_head(&mut self) -> Option<Box<Node>> {
        self.head.map(|head| {
            // SAFETY: head came from Box::leak in new_node. It is detached
            // from the chain below, so this Box is its only owner.
            let mut node = unsafe { Box::from_raw(head.as_ptr()) };
            self.head = node.next.take();
            self.size -= 1;

            if self.head.is_none() {
                self.tail = None;
            }

            node
        })
    }

    fn relink_tail(&mut self) {
        let mut tail = None;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            tail = Some(node);
            // SAFETY: node is part of the chain owned by this queue.
            cursor = unsafe { (*node.as_ptr()).next };
        }
        self.tail = tail;
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY: the queue exclusively owns every node and string it points to, so
// moving it to another thread moves all of them.
unsafe impl Send for Queue {}

pub struct Iter<'a> {
    current: Link,
    _queue: PhantomData<&'a Queue>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            // SAFETY: the iterator borrows the queue, so the chain cannot be
            // changed or released while 'a is alive.
            let node: &'a Node = unsafe { &*node.as_ptr() };
            self.current = node.next;
            node.value.as_str()
        })
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter {
    queue: Queue,
}

impl Iterator for IntoIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_head()
    }
}

impl IntoIterator for Queue {
    type Item = String;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}
