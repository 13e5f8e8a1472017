//! Sliding window of recent attractor points.
//!
//! The buffer grows by one point per frame until it reaches capacity, then
//! evicts its oldest point for every new one, so the rendered trail has a
//! fixed maximum length and slides along the attractor.

use std::collections::VecDeque;

use glam::Vec3;

use crate::config::{DISPLAY_SCALE, TRAIL_CAPACITY};
use crate::lorenz::LorenzState;

/// Capacity-bounded FIFO of scaled display points.
#[derive(Debug, Clone)]
pub struct TrajectoryBuffer {
    points: VecDeque<Vec3>,
    capacity: usize,
    scale: f64,
}

impl TrajectoryBuffer {
    /// Create an empty buffer. A capacity of zero is treated as one.
    pub fn new(capacity: usize, scale: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
            scale,
        }
    }

    /// Append a scaled copy of `state`, evicting the oldest point if the
    /// buffer is now over capacity.
    pub fn push(&mut self, state: &LorenzState) {
        self.points.push_back(state.scaled(self.scale));
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Oldest point still in the window.
    pub fn first(&self) -> Option<Vec3> {
        self.points.front().copied()
    }

    /// Most recently pushed point.
    pub fn last(&self) -> Option<Vec3> {
        self.points.back().copied()
    }

    /// Points in insertion order, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }

    /// Flat `[x, y, z]` triples in insertion order.
    pub fn to_vertices(&self) -> Vec<[f32; 3]> {
        self.points.iter().map(|p| p.to_array()).collect()
    }
}

impl Default for TrajectoryBuffer {
    fn default() -> Self {
        Self::new(TRAIL_CAPACITY, DISPLAY_SCALE)
    }
}
