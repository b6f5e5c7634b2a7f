//! Axis-aligned rectangles and origin anchoring

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::vector::Vector2;
use crate::error::ConfigurationError;

/// How an entity's bounding rectangle is anchored to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Origin {
    /// Position is the rectangle's top-left corner
    #[default]
    Corner,
    /// Position is the rectangle's center
    Center,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Corner => "CORNER",
            Origin::Center => "CENTER",
        }
    }
}

impl FromStr for Origin {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CORNER" => Ok(Origin::Corner),
            "CENTER" => Ok(Origin::Center),
            _ => Err(ConfigurationError::UnknownOrigin(s.to_string())),
        }
    }
}

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Derive the bounding rectangle of an entity of `size` placed at `position`
    pub fn anchored(position: Vector2, size: Vector2, origin: Origin) -> Self {
        match origin {
            Origin::Corner => Self::new(position.x(), position.y(), size.x(), size.y()),
            Origin::Center => Self::new(
                position.x() - size.x() / 2.0,
                position.y() - size.y() / 2.0,
                size.x(),
                size.y(),
            ),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment
    pub fn contains(&self, point: Vector2) -> bool {
        point.x() >= self.left()
            && point.x() <= self.right()
            && point.y() >= self.top()
            && point.y() <= self.bottom()
    }

    /// Point at fractional coordinates of the rectangle (0..1 on each axis)
    ///
    /// `grid(0.5, 0.5)` is the center.
    pub fn grid(&self, fx: f32, fy: f32) -> Vector2 {
        Vector2::new(self.x + self.width * fx, self.y + self.height * fy)
    }

    pub fn translate(&self, offset: Vector2) -> Self {
        Self::new(self.x + offset.x(), self.y + offset.y(), self.width, self.height)
    }
}
