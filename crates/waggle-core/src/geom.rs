//! Planar Vector Math
//!
//! The small amount of 2-D vector arithmetic the foraging model needs.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point or displacement in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: Vec2) -> f64 {
        (*self - other).norm()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(&self) -> Option<Vec2> {
        let n = self.norm();
        if n > 0.0 {
            Some(Vec2::new(self.x / n, self.y / n))
        } else {
            None
        }
    }

    /// Angle of the vector in radians, measured from the positive x axis.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector pointing along `angle` radians.
    pub fn from_angle(angle: f64) -> Vec2 {
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Component-wise clamp into `[0, max.x] x [0, max.y]`.
    pub fn clamp_to(&self, max: Vec2) -> Vec2 {
        Vec2::new(self.x.clamp(0.0, max.x), self.y.clamp(0.0, max.y))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_and_distance() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(Vec2::ZERO.distance_to(v), 5.0);
    }

    #[test]
    fn test_normalized_zero_is_none() {
        assert!(Vec2::ZERO.normalized().is_none());
        let unit = Vec2::new(0.0, 2.0).normalized().unwrap();
        assert!((unit.y - 1.0).abs() < 1e-12);
        assert!(unit.x.abs() < 1e-12);
    }

    #[test]
    fn test_angle_round_trip() {
        let angle = 1.25_f64;
        let v = Vec2::from_angle(angle);
        assert!((v.angle() - angle).abs() < 1e-12);
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let max = Vec2::new(10.0, 4.0);
        let clamped = Vec2::new(-1.0, 7.5).clamp_to(max);
        assert_eq!(clamped, Vec2::new(0.0, 4.0));
    }
}
