//! Detects whether the player moved since the previous tick.

use autoplanter_core::Vec3d;

/// Default per-axis movement threshold in blocks.
pub const DEFAULT_MOVEMENT_EPSILON: f64 = 0.001;

/// Remembers one position sample and whether the latest one differed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementTracker {
    epsilon: f64,
    last_position: Option<Vec3d>,
    is_moving: bool,
}

impl MovementTracker {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            last_position: None,
            is_moving: false,
        }
    }

    /// Record a new sample and return whether the player is moving.
    ///
    /// Moving means the delta exceeds the epsilon on at least one axis. The
    /// first sample after a reset has nothing to compare against and counts
    /// as stationary.
    pub fn update(&mut self, position: Vec3d) -> bool {
        self.is_moving = match self.last_position {
            Some(last) => {
                (position.x - last.x).abs() > self.epsilon
                    || (position.y - last.y).abs() > self.epsilon
                    || (position.z - last.z).abs() > self.epsilon
            }
            None => false,
        };
        self.last_position = Some(position);
        self.is_moving
    }

    /// Forget the previous sample. `is_moving` is left as-is until the next update.
    pub fn reset(&mut self) {
        self.last_position = None;
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn last_position(&self) -> Option<Vec3d> {
        self.last_position
    }
}

impl Default for MovementTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MOVEMENT_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_stationary() {
        let mut tracker = MovementTracker::default();
        assert!(!tracker.update(Vec3d::new(0.0, 64.0, 0.0)));
        assert_eq!(tracker.last_position(), Some(Vec3d::new(0.0, 64.0, 0.0)));
    }

    #[test]
    fn delta_above_epsilon_on_any_axis_is_movement() {
        let mut tracker = MovementTracker::default();
        tracker.update(Vec3d::new(0.0, 64.0, 0.0));
        assert!(tracker.update(Vec3d::new(0.0, 64.0, 0.01)));
        assert!(tracker.update(Vec3d::new(0.0, 63.9, 0.01)));
        assert!(!tracker.update(Vec3d::new(0.0005, 63.9, 0.01)));
        assert!(!tracker.is_moving());
    }

    #[test]
    fn delta_equal_to_epsilon_is_not_movement() {
        let mut tracker = MovementTracker::new(0.5);
        tracker.update(Vec3d::new(0.0, 0.0, 0.0));
        assert!(!tracker.update(Vec3d::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn reset_forgets_sample_only() {
        let mut tracker = MovementTracker::default();
        tracker.update(Vec3d::new(0.0, 64.0, 0.0));
        tracker.update(Vec3d::new(1.0, 64.0, 0.0));
        tracker.reset();
        assert!(tracker.is_moving());
        assert_eq!(tracker.last_position(), None);

        // No memory of the pre-reset sample.
        assert!(!tracker.update(Vec3d::new(9.0, 64.0, 0.0)));
    }
}
