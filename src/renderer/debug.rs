//! Debug overlay for ad-hoc diagnostic drawing

use serde::{Deserialize, Serialize};

use crate::sim::{Collider, Rect, Vector2};

/// Fill color and alpha applied to subsequent shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// 0xRRGGBB
    pub color: u32,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DebugShape {
    Rect { rect: Rect, fill: Fill },
    Circle { center: Vector2, radius: f32, fill: Fill },
}

/// Transparent layer drawn above the active scene
///
/// Only exists while debug mode is on; recreated for every scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLayer {
    fill: Fill,
    shapes: Vec<DebugShape>,
}

impl DebugLayer {
    pub fn new(fill: Fill) -> Self {
        Self {
            fill,
            shapes: Vec::new(),
        }
    }

    pub fn begin_fill(&mut self, color: u32, alpha: f32) -> &mut Self {
        self.fill = Fill {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        };
        self
    }

    pub fn draw_rect(&mut self, rect: Rect) -> &mut Self {
        self.shapes.push(DebugShape::Rect {
            rect,
            fill: self.fill,
        });
        self
    }

    pub fn draw_circle(&mut self, center: Vector2, radius: f32) -> &mut Self {
        self.shapes.push(DebugShape::Circle {
            center,
            radius,
            fill: self.fill,
        });
        self
    }

    /// Outline a collider with the current fill
    pub fn draw_collider(&mut self, collider: &Collider) -> &mut Self {
        match *collider {
            Collider::Box(rect) => self.draw_rect(rect),
            Collider::Circle { center, radius } => self.draw_circle(center, radius),
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn fill(&self) -> Fill {
        self.fill
    }

    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ColliderManager;

    #[test]
    fn test_shapes_capture_current_fill() {
        let mut layer = DebugLayer::new(Fill {
            color: 0xffffff,
            alpha: 0.5,
        });
        layer.draw_rect(Rect::new(0.0, 0.0, 200.0, 200.0));
        layer
            .begin_fill(0xff0000, 2.0)
            .draw_collider(&ColliderManager::box_to_circle(0.0, 0.0, 10.0));

        assert_eq!(layer.shapes().len(), 2);
        assert!(matches!(
            layer.shapes()[0],
            DebugShape::Rect { fill: Fill { color: 0xffffff, .. }, .. }
        ));
        match layer.shapes()[1] {
            DebugShape::Circle { radius, fill, .. } => {
                assert_eq!(radius, 5.0);
                assert_eq!(fill.alpha, 1.0);
            }
            ref other => panic!("unexpected shape {other:?}"),
        }

        layer.clear();
        assert!(layer.shapes().is_empty());
    }
}
