//! Closed float interval used for authored min/max limits.

use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl Default for FloatRange {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive() {
        let r = FloatRange::new(0.0, 45.0);
        assert!(r.contains(0.0));
        assert!(r.contains(45.0));
        assert!(!r.contains(45.01));
        assert!(!r.contains(-0.01));
        assert!(!r.contains(f32::NAN));
    }

    #[test]
    fn test_inverted() {
        assert!(FloatRange::new(2.0, 1.0).is_inverted());
        assert!(!FloatRange::default().is_inverted());
    }
}
