//! Fixed-capacity sample history
//!
//! A ring buffer that keeps the most recent samples of a system. Once the
//! buffer is full, every new record overwrites the oldest one.
//!
//! ```text
//!   buffer: [s3, s4, s2]   write_index = 2   count = 3
//!                   ^ next write overwrites the oldest sample (s2)
//! ```
//!
//! When `count < capacity` the oldest sample lives at index 0. When the buffer
//! is full it lives at `write_index`, the slot about to be overwritten.

use crate::error::{check_buffer_size, Result};
use serde::Serialize;

/// One recorded step: input u(k), output y(k) and the step index k
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Sample {
    pub input: f64,
    pub output: f64,
    pub step: u64,
}

/// Generic fixed-capacity ring buffer
///
/// Storage is allocated once at construction. Pushing never allocates.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buffer: Box<[T]>,
    /// Next slot to write
    write_index: usize,
    /// Number of valid entries
    count: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Create a ring buffer holding at most `capacity` entries
    pub fn new(capacity: usize) -> Result<Self> {
        check_buffer_size(capacity, "RingBuffer")?;

        Ok(Self {
            buffer: vec![T::default(); capacity].into_boxed_slice(),
            write_index: 0,
            count: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.buffer.len()
    }

    /// Insert at the write cursor, evicting the oldest entry when full
    pub fn push(&mut self, value: T) {
        self.buffer[self.write_index] = value;

        if self.count < self.buffer.len() {
            self.count += 1;
        }
        self.write_index = (self.write_index + 1) % self.buffer.len();
    }

    /// Forget all entries. The storage is kept.
    pub fn clear(&mut self) {
        self.write_index = 0;
        self.count = 0;
    }

    fn oldest_index(&self) -> usize {
        if self.is_full() {
            self.write_index
        } else {
            0
        }
    }

    /// Iterate entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let start = self.oldest_index();
        let capacity = self.buffer.len();
        (0..self.count).map(move |i| &self.buffer[(start + i) % capacity])
    }

    /// Entries in chronological order (oldest to newest)
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let capacity = self.buffer.len();
        Some(self.buffer[(self.write_index + capacity - 1) % capacity])
    }
}

/// History of `(input, output, step)` samples owned by a discrete system
#[derive(Debug, Clone)]
pub struct SampleHistory {
    ring: RingBuffer<Sample>,
}

impl SampleHistory {
    /// Create an empty history with fixed `capacity`
    ///
    /// Fails with `InvalidBufferSize` if `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self> {
        check_buffer_size(capacity, "SampleHistory")?;
        Ok(Self {
            ring: RingBuffer::new(capacity)?,
        })
    }

    /// Record one step
    pub fn record(&mut self, input: f64, output: f64, step: u64) {
        let was_full = self.ring.is_full();
        self.ring.push(Sample {
            input,
            output,
            step,
        });

        if !was_full && self.ring.is_full() {
            log::debug!(
                "SampleHistory: capacity {} reached at step {}, evicting oldest from now on",
                self.ring.capacity(),
                step
            );
        }
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }

    /// Recorded samples, oldest first
    pub fn export_ordered(&self) -> Vec<Sample> {
        self.ring.to_vec()
    }

    /// Iterate recorded samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.ring.iter()
    }

    pub fn latest(&self) -> Option<Sample> {
        self.ring.last()
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SystemError;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            SampleHistory::new(0),
            Err(SystemError::InvalidBufferSize(_))
        ));
        assert!(RingBuffer::<f64>::new(0).is_err());
    }

    #[test]
    fn test_partial_fill_order() {
        let mut history = SampleHistory::new(5).unwrap();
        for k in 0..3 {
            history.record(k as f64, 2.0 * k as f64, k);
        }

        assert_eq!(history.len(), 3);
        assert!(!history.is_full());

        let steps: Vec<u64> = history.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![0, 1, 2]);
    }

    #[test]
    fn test_wraparound_keeps_temporal_order() {
        let mut history = SampleHistory::new(3).unwrap();
        for k in 0..7 {
            history.record(k as f64, 0.0, k);
        }

        assert!(history.is_full());
        let samples = history.export_ordered();
        let steps: Vec<u64> = samples.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![4, 5, 6]);
        assert_eq!(samples[0].input, 4.0);
        assert_eq!(history.latest().unwrap().step, 6);
    }

    #[test]
    fn test_exactly_full() {
        let mut history = SampleHistory::new(4).unwrap();
        for k in 0..4 {
            history.record(0.0, 0.0, k);
        }

        let steps: Vec<u64> = history.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_capacity_one() {
        let mut history = SampleHistory::new(1).unwrap();
        history.record(1.0, 1.0, 0);
        history.record(2.0, 2.0, 1);

        let samples = history.export_ordered();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].step, 1);
        assert_eq!(samples[0].input, 2.0);
    }

    #[test]
    fn test_clear() {
        let mut history = SampleHistory::new(3).unwrap();
        for k in 0..5 {
            history.record(0.0, 0.0, k);
        }
        history.clear();

        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.export_ordered().is_empty());
        assert_eq!(history.capacity(), 3);

        history.record(9.0, 9.0, 0);
        assert_eq!(history.export_ordered()[0].input, 9.0);
    }

    #[test]
    fn test_ring_buffer_last() {
        let mut ring = RingBuffer::<f64>::new(2).unwrap();
        assert!(ring.last().is_none());
        ring.push(1.0);
        ring.push(2.0);
        ring.push(3.0);
        assert_eq!(ring.last(), Some(3.0));
        assert_eq!(ring.to_vec(), vec![2.0, 3.0]);
    }
}
