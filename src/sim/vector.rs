//! Immutable 2D vector value type

use std::ops::{Add, Mul, Neg, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D vector with value semantics
///
/// Every operation returns a new vector; there is no in-place mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector2(Vec2);

impl Vector2 {
    pub const ZERO: Self = Self(Vec2::ZERO);

    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    /// Functional update: returns `f(self)`
    pub fn calc(self, f: impl FnOnce(Self) -> Self) -> Self {
        f(self)
    }

    /// Copy with a new x component
    pub fn with_x(self, x: f32) -> Self {
        Self::new(x, self.0.y)
    }

    /// Copy with a new y component
    pub fn with_y(self, y: f32) -> Self {
        Self::new(self.0.x, y)
    }

    /// Negate the x component
    pub fn flip_x(self) -> Self {
        Self::new(-self.0.x, self.0.y)
    }

    /// Negate the y component
    pub fn flip_y(self) -> Self {
        Self::new(self.0.x, -self.0.y)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self(self.0 * factor)
    }

    pub fn length(self) -> f32 {
        self.0.length()
    }

    pub fn distance(self, other: Self) -> f32 {
        self.0.distance(other.0)
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        v.0
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flip_x() {
        assert_eq!(Vector2::new(3.0, 4.0).flip_x(), Vector2::new(-3.0, 4.0));
        assert_eq!(Vector2::new(3.0, 4.0).flip_y(), Vector2::new(3.0, -4.0));
    }

    #[test]
    fn test_calc_returns_new_value() {
        let v = Vector2::new(10.0, 20.0);
        let moved = v.calc(|p| Vector2::new(p.x() - 5.0, p.y()));
        assert_eq!(moved, Vector2::new(5.0, 20.0));
        assert_eq!(v, Vector2::new(10.0, 20.0));
    }

    #[test]
    fn test_componentwise_ops() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -1.0);
        assert_eq!(a + b, Vector2::new(4.0, 1.0));
        assert_eq!(a - b, Vector2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Vector2::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: Vector2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Vector2::new(1.5, -2.0));
    }

    proptest! {
        #[test]
        fn flip_is_an_involution(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            let v = Vector2::new(x, y);
            prop_assert_eq!(v.flip_x().flip_x(), v);
            prop_assert_eq!(v.flip_y().flip_y(), v);
            prop_assert_eq!(v.flip_x().y(), y);
            prop_assert_eq!(v.flip_y().x(), x);
        }
    }
}
