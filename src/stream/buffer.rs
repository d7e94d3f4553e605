//! Bounded hand-off buffer for consumers that poll at their own pace

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Fixed-capacity ring of records with oldest-first eviction.
///
/// Writers never wait on readers beyond the short critical section of a push.
/// When full, each push drops the oldest record and bumps
/// [`evicted`](Self::evicted).
///
/// ```rust
/// use pitlane::stream::RecordBuffer;
///
/// let buffer = RecordBuffer::new(2);
/// buffer.push(1);
/// buffer.push(2);
/// buffer.push(3);
/// assert_eq!(buffer.snapshot(), vec![2, 3]);
/// assert_eq!(buffer.evicted(), 1);
/// ```
#[derive(Debug)]
pub struct RecordBuffer<T> {
    records: Mutex<VecDeque<T>>,
    capacity: usize,
    evicted: AtomicU64,
}

impl<T> RecordBuffer<T> {
    /// Create a buffer holding at most `capacity` records (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            evicted: AtomicU64::new(0),
        }
    }

    /// Append a record, evicting the oldest one when full.
    ///
    /// Returns the evicted record, if any.
    pub fn push(&self, record: T) -> Option<T> {
        let mut records = self.lock();
        let evicted = if records.len() == self.capacity { records.pop_front() } else { None };
        records.push_back(record);
        drop(records);

        if evicted.is_some() {
            self.evicted.fetch_add(1, Ordering::Relaxed);
        }
        evicted
    }

    /// Remove and return every buffered record, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.lock().drain(..).collect()
    }

    /// Remove and return the oldest record.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records dropped to make room since creation.
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panicking reader can't leave the deque half-modified
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> RecordBuffer<T> {
    /// Copy of the buffered records, oldest first, leaving them in place.
    pub fn snapshot(&self) -> Vec<T> {
        self.lock().iter().cloned().collect()
    }

    /// Most recently pushed record.
    pub fn latest(&self) -> Option<T> {
        self.lock().back().cloned()
    }
}
