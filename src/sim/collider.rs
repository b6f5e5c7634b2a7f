//! Collider shapes for hit-testing
//!
//! Colliders are stored in entity-local space (relative to the top-left of the
//! entity's bounding rectangle) and translated to world space on demand, so the
//! world geometry always follows the entity's current position.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::vector::Vector2;
use crate::error::ConfigurationError;

/// Geometric shape used for pointer and boundary hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Box(Rect),
    Circle { center: Vector2, radius: f32 },
}

impl Collider {
    /// Reject negative or non-finite dimensions
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            Collider::Box(rect) => {
                let finite = [rect.x, rect.y, rect.width, rect.height]
                    .iter()
                    .all(|v| v.is_finite());
                if !finite || rect.width < 0.0 || rect.height < 0.0 {
                    return Err(ConfigurationError::InvalidShape(format!(
                        "box {}x{} at ({}, {})",
                        rect.width, rect.height, rect.x, rect.y
                    )));
                }
            }
            Collider::Circle { center, radius } => {
                if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
                    return Err(ConfigurationError::InvalidShape(format!(
                        "circle radius {radius}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Shift the shape by `offset` (local to world)
    pub fn translate(&self, offset: Vector2) -> Self {
        match *self {
            Collider::Box(rect) => Collider::Box(rect.translate(offset)),
            Collider::Circle { center, radius } => Collider::Circle {
                center: center + offset,
                radius,
            },
        }
    }

    pub fn contains(&self, point: Vector2) -> bool {
        match *self {
            Collider::Box(rect) => rect.contains(point),
            Collider::Circle { center, radius } => center.distance(point) <= radius,
        }
    }

    /// Axis-aligned bounds of the shape
    pub fn bounds(&self) -> Rect {
        match *self {
            Collider::Box(rect) => rect,
            Collider::Circle { center, radius } => Rect::new(
                center.x() - radius,
                center.y() - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }
}

/// Stateless shape construction helpers
pub struct ColliderManager;

impl ColliderManager {
    /// Approximate a square box with its inscribed circle
    pub fn box_to_circle(x: f32, y: f32, diameter: f32) -> Collider {
        let radius = diameter / 2.0;
        Collider::Circle {
            center: Vector2::new(x + radius, y + radius),
            radius,
        }
    }
}
