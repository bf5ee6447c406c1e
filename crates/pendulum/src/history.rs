use std::collections::{VecDeque, vec_deque};

use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

use crate::PendulumState;

/// Default number of points retained by a [`History`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Larger histories grow on demand instead of allocating up front.
const MAX_PREALLOCATED: usize = 4096;

/// A decimated sample of the pendulum angles for trend display.
///
/// `time` is rounded to 0.01 s and the angles are in degrees, rounded to 0.1°.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryPoint {
    pub time: f64,
    pub theta1: f64,
    pub theta2: f64,
}

impl HistoryPoint {
    /// Samples `state` at display precision.
    #[must_use]
    pub fn sample(state: &PendulumState) -> Self {
        Self {
            time: round_to(state.time, 2),
            theta1: round_to(degrees(state.theta1), 1),
            theta2: round_to(degrees(state.theta2), 1),
        }
    }
}

/// A bounded, time-ordered record of recent [`HistoryPoint`]s.
///
/// Points are only ever appended. Once the length exceeds the capacity the
/// oldest points are dropped first.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    points: VecDeque<HistoryPoint>,
    capacity: usize,
}

impl History {
    /// Creates an empty history that retains at most `capacity` points.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.saturating_add(1).min(MAX_PREALLOCATED)),
            capacity,
        }
    }

    /// Appends a point, evicting from the front to stay within capacity.
    pub fn push(&mut self, point: HistoryPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Removes every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently appended point.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> vec_deque::Iter<'_, HistoryPoint> {
        self.points.iter()
    }

    /// Copies the points, oldest first, into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<HistoryPoint> {
        self.points.iter().copied().collect()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryPoint;
    type IntoIter = vec_deque::Iter<'a, HistoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn degrees(radians: f64) -> f64 {
    Angle::new::<radian>(radians).get::<degree>()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_3, FRAC_PI_4, PI};

    fn point(time: f64) -> HistoryPoint {
        HistoryPoint {
            time,
            theta1: 0.0,
            theta2: 0.0,
        }
    }

    #[test]
    fn sample_rounds_to_display_precision() {
        let state = PendulumState {
            time: 1.23456,
            ..PendulumState::new(FRAC_PI_3, -FRAC_PI_4)
        };

        let sample = HistoryPoint::sample(&state);

        assert_eq!(sample.time, 1.23);
        assert_eq!(sample.theta1, 60.0);
        assert_eq!(sample.theta2, -45.0);
    }

    #[test]
    fn sample_keeps_unwrapped_angles() {
        let state = PendulumState::new(3.0 * PI, -2.5 * PI);
        let sample = HistoryPoint::sample(&state);
        assert_eq!(sample.theta1, 540.0);
        assert_eq!(sample.theta2, -450.0);
    }

    #[test]
    fn push_evicts_oldest_first() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(point(f64::from(i)));
        }

        assert_eq!(history.len(), 3);
        let times: Vec<f64> = history.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
        assert_eq!(history.latest(), Some(&point(4.0)));
    }

    #[test]
    fn default_capacity_is_one_hundred() {
        let mut history = History::default();
        for i in 0..250 {
            history.push(point(f64::from(i) * 0.05));
        }

        assert_eq!(history.capacity(), 100);
        assert_eq!(history.len(), 100);
        assert_eq!(history.to_vec()[0], point(150.0 * 0.05));
    }

    #[test]
    fn clear_empties_the_history() {
        let mut history = History::new(10);
        history.push(point(0.05));
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        assert_eq!(history.capacity(), 10);
    }

    #[test]
    fn unbounded_capacity_does_not_overflow() {
        let mut history = History::new(usize::MAX);
        for i in 0..3 {
            history.push(point(f64::from(i)));
        }

        assert_eq!(history.capacity(), usize::MAX);
        assert_eq!(history.len(), 3);
    }
}
