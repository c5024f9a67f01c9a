//! Stage-relative input coordinates.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A point in normalized stage coordinates, nominally `[0, 100]²`.
///
/// Points outside the nominal square are accepted; they simply miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, 0 at the left edge.
    pub x: f64,
    /// Vertical position, 0 at the top edge.
    pub y: f64,
}

impl Point {
    /// Creates a point, rejecting non-finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidInput` if either coordinate is NaN or
    /// infinite.
    pub fn new(x: f64, y: f64) -> Result<Self, GameError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GameError::InvalidInput(format!(
                "pointer coordinates must be finite, got ({x}, {y})"
            )));
        }
        Ok(Self { x, y })
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Travel direction along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards larger coordinates.
    Increasing,
    /// Towards smaller coordinates.
    Decreasing,
}

impl Direction {
    /// `+1.0` or `-1.0`.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Increasing => 1.0,
            Direction::Decreasing => -1.0,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }
}

/// Moves `position` by `step` in `direction`, reflecting off `[min, max]`.
///
/// A move that would overshoot a bound stops exactly on it and flips the
/// direction; otherwise the direction is unchanged.
#[must_use]
pub fn bounce(position: f64, direction: Direction, step: f64, min: f64, max: f64) -> (f64, Direction) {
    let next = position + direction.sign() * step;
    if next > max {
        (max, Direction::Decreasing)
    } else if next < min {
        (min, Direction::Increasing)
    } else {
        (next, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_moves_within_bounds() {
        let (next, direction) = bounce(50.0, Direction::Increasing, 5.5, 25.0, 75.0);
        assert!((next - 55.5).abs() < 1e-12);
        assert_eq!(direction, Direction::Increasing);
    }

    #[test]
    fn test_bounce_reverses_at_upper_bound() {
        let (next, direction) = bounce(72.0, Direction::Increasing, 5.5, 25.0, 75.0);
        assert!((next - 75.0).abs() < f64::EPSILON);
        assert_eq!(direction, Direction::Decreasing);
    }

    #[test]
    fn test_bounce_reverses_at_lower_bound() {
        let (next, direction) = bounce(20.5, Direction::Decreasing, 0.9, 20.0, 80.0);
        assert!((next - 20.0).abs() < f64::EPSILON);
        assert_eq!(direction, Direction::Increasing);
    }

    #[test]
    fn test_new_accepts_out_of_range_finite_points() {
        let point = Point::new(-10.0, 140.0).unwrap();
        assert!((point.x + 10.0).abs() < f64::EPSILON);
        assert!((point.y - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_rejects_nan() {
        match Point::new(f64::NAN, 10.0) {
            Err(GameError::InvalidInput(msg)) => assert!(msg.contains("finite")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_distance_to_is_euclidean() {
        let a = Point { x: 0.0, y: 0.0 };
        let b = Point { x: 3.0, y: 4.0 };
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }
}
