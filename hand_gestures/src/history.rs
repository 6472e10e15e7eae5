//! Bounded FIFO of fingertip positions.

use std::collections::VecDeque;

use hand_landmarks::Point3;

/// The last `capacity` samples of one tracked joint, oldest first.
///
/// Pushing into a full history evicts the oldest sample, so the length never
/// exceeds the capacity.
#[derive(Clone, Debug)]
pub struct PositionHistory {
    samples:  VecDeque<Point3>,
    capacity: usize,
}

impl PositionHistory {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        PositionHistory {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, p: Point3) {
        self.samples.push_back(p);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self)      -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool  { self.samples.is_empty() }
    pub fn capacity(&self) -> usize { self.capacity }

    pub fn oldest(&self) -> Option<Point3> { self.samples.front().copied() }
    pub fn newest(&self) -> Option<Point3> { self.samples.back().copied() }

    /// All samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Point3> + '_ {
        self.samples.iter().copied()
    }

    /// The most recent `n` samples (or fewer), oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = Point3> + '_ {
        self.samples.iter().skip(self.samples.len().saturating_sub(n)).copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
