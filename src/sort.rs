//! Stable merge sort over a node chain.
//!
//! Every function here expects a terminated chain of live nodes that nothing
//! else references during the call. Only `next` links are rewritten.

use crate::queue::Link;

pub(crate) unsafe fn merge_sort(head: Link) -> Link {
    let Some(first) = head else {
        return None;
    };
    if (*first.as_ptr()).next.is_none() {
        return head;
    }

    let (front, back) = split(head);
    merge(merge_sort(front), merge_sort(back))
}

/// Splits a chain into a front half of `ceil(n / 2)` nodes and the rest.
pub(crate) unsafe fn split(head: Link) -> (Link, Link) {
    let Some(first) = head else {
        return (None, None);
    };

    let mut slow = first;
    let mut fast = (*first.as_ptr()).next;
    while let Some(node) = fast {
        let Some(skip) = (*node.as_ptr()).next else {
            break;
        };
        fast = (*skip.as_ptr()).next;
        slow = match (*slow.as_ptr()).next {
            Some(next) => next,
            None => break,
        };
    }

    let back = (*slow.as_ptr()).next.take();
    (head, back)
}

/// Merges two sorted chains. On equal values the left node goes first.
pub(crate) unsafe fn merge(mut left: Link, mut right: Link) -> Link {
    let mut head: Link = None;
    let mut tail: Link = None;

    while let (Some(l), Some(r)) = (left, right) {
        let node = if (*l.as_ptr()).value.as_bytes() <= (*r.as_ptr()).value.as_bytes() {
            left = (*l.as_ptr()).next;
            l
        } else {
            right = (*r.as_ptr()).next;
            r
        };

        match tail {
            None => head = Some(node),
            Some(last) => (*last.as_ptr()).next = Some(node),
        }
        tail = Some(node);
    }

    let rest = left.or(right);
    match tail {
        None => head = rest,
        Some(last) => (*last.as_ptr()).next = rest,
    }
    head
}
