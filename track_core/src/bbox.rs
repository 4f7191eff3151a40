//! Axis-aligned bounding boxes.

use crate::types::Vector2;
use serde::{Deserialize, Serialize};

/// Smallest axis-aligned rectangle containing a shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vector2,
    pub max: Vector2,
}

impl BoundingBox {
    /// Box spanning two arbitrary corner points.
    pub fn from_points(a: Vector2, b: Vector2) -> Self {
        Self {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Component-wise min/max of both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: Vector2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vector2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Box grown by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: Vector2::new(self.min.x - margin, self.min.y - margin),
            max: Vector2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Vector2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// `([min_x, min_y], [max_x, max_y])`, the shape renderers consume.
    pub fn corners(&self) -> ([f64; 2], [f64; 2]) {
        ([self.min.x, self.min.y], [self.max.x, self.max.y])
    }
}

/// Union of every box yielded by `boxes`, `None` when there are none.
pub fn union_all<I>(boxes: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = BoundingBox>,
{
    boxes.into_iter().reduce(|acc, b| acc.union(&b))
}
