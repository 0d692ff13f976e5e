#![forbid(unsafe_code)]

//! Periodicity detection over the selection history.
//!
//! The history is a bounded FIFO of selected entry indices, oldest first.
//! [`detect_infinite_loop`] reports whether the whole buffer is periodic:
//! there is a period `p` with `2 <= p <= len / 2` such that every element
//! repeats the element `p` places earlier in the first period. A trailing
//! partial period still counts.
//!
//! | History            | Loop? |
//! |--------------------|-------|
//! | `[1,1,1]`          | no    |
//! | `[1,1,1,1]`        | yes   |
//! | `[1,2,1,2]`        | yes   |
//! | `[1,2,3,1,2]`      | no    |
//! | `[1,2,3,1,2,3,1]`  | yes   |
//! | `[1,2,2,2,2]`      | no    |
//!
//! A full buffer evicts its oldest entry before the newest is appended, and
//! the check runs after the append.

use std::collections::VecDeque;

/// Whether `history` consists of one block of length `p >= 2` repeated at
/// least twice, with an optional partial block at the end.
pub fn detect_infinite_loop<T: PartialEq>(history: &[T]) -> bool {
    let len = history.len();
    (2..=len / 2).any(|p| (p..len).all(|i| history[i] == history[i % p]))
}

/// Bounded FIFO of selected entry indices.
#[derive(Debug, Clone)]
pub struct LoopHistory {
    capacity: usize,
    entries: VecDeque<usize>,
}

impl LoopHistory {
    /// A capacity of 0 disables detection.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Evict if full, append, then check. Returns `true` on a detected loop.
    pub fn push(&mut self, index: usize) -> bool {
        if !self.is_enabled() {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(index);
        detect_infinite_loop(self.entries.make_contiguous())
    }

    pub fn snapshot(&self) -> Vec<usize> {
        self.entries.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_histories_never_loop() {
        assert!(!detect_infinite_loop::<u32>(&[]));
        assert!(!detect_infinite_loop(&[1]));
        assert!(!detect_infinite_loop(&[1, 1]));
        assert!(!detect_infinite_loop(&[1, 1, 1]));
    }

    #[test]
    fn disabled_history_ignores_pushes() {
        let mut h = LoopHistory::new(0);
        for _ in 0..10 {
            assert!(!h.push(1));
        }
        assert!(h.is_empty());
    }

    #[test]
    fn overflow_evicts_before_check() {
        let mut h = LoopHistory::new(5);
        for i in [1, 2, 2, 2, 2] {
            assert!(!h.push(i));
        }
        assert!(!h.push(3));
        assert_eq!(h.snapshot(), vec![2, 2, 2, 2, 3]);
    }
}
