//! Shared FIFO between input listener threads and the display loop
//!
//! Listener threads push display symbols as input arrives; the drain tick
//! on the GUI thread pops them one at a time. The queue is unbounded and
//! strictly order-preserving.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle to the shared symbol queue
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a symbol at the back of the queue (producer side).
    ///
    /// A poisoned lock is recovered rather than propagated: one panicking
    /// listener must not silence every other input device.
    pub fn push(&self, symbol: String) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_back(symbol);
    }

    /// Remove and return the oldest symbol, if any (consumer side)
    pub fn pop_oldest(&self) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.pop_front()
    }

    /// Number of symbols waiting to be displayed
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = InputQueue::new();
        queue.push("A".to_string());
        queue.push("␣".to_string());
        queue.push("⏎".to_string());

        assert_eq!(queue.pop_oldest().as_deref(), Some("A"));
        assert_eq!(queue.pop_oldest().as_deref(), Some("␣"));
        assert_eq!(queue.pop_oldest().as_deref(), Some("⏎"));
        assert_eq!(queue.pop_oldest(), None);
    }

    #[test]
    fn test_pop_on_empty() {
        let queue = InputQueue::new();
        assert_eq!(queue.pop_oldest(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_interleaved_push_pop() {
        let queue = InputQueue::new();
        queue.push("1".to_string());
        queue.push("2".to_string());
        assert_eq!(queue.pop_oldest().as_deref(), Some("1"));
        queue.push("3".to_string());
        assert_eq!(queue.pop_oldest().as_deref(), Some("2"));
        assert_eq!(queue.pop_oldest().as_deref(), Some("3"));
    }

    #[test]
    fn test_concurrent_producers_lose_nothing() {
        const PER_PRODUCER: usize = 5_000;

        let queue = InputQueue::new();
        let handles: Vec<_> = (0..2)
            .map(|producer| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        queue.push(format!("{producer}:{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.len(), 2 * PER_PRODUCER);

        let mut seen = HashSet::new();
        while let Some(entry) = queue.pop_oldest() {
            assert!(seen.insert(entry), "entry popped twice");
        }
        assert_eq!(seen.len(), 2 * PER_PRODUCER);
    }

    #[test]
    fn test_per_producer_order_preserved() {
        let queue = InputQueue::new();
        let handles: Vec<_> = (0..2usize)
            .map(|producer| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for i in 0..1_000 {
                        queue.push(format!("{producer}:{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // FIFO: each producer's entries come out in its own push order.
        let mut next = [0usize; 2];
        while let Some(entry) = queue.pop_oldest() {
            let (producer, index) = entry.split_once(':').unwrap();
            let producer: usize = producer.parse().unwrap();
            let index: usize = index.parse().unwrap();
            assert_eq!(index, next[producer]);
            next[producer] += 1;
        }
        assert_eq!(next, [1_000, 1_000]);
    }
}
