//! Car outline: the triangle a renderer draws for a car at a given pose.

use serde::{Deserialize, Serialize};
use track_core::{BoundingBox, Pose, Vector2};

/// Distance from the car's reference point to each triangle corner.
pub const DEFAULT_SIZE: f64 = 10.0;

/// Extra border around the outline when clearing the previous frame.
pub const CLEAR_MARGIN: f64 = 1.0;

/// Angle between the nose and each rear corner (degrees).
const REAR_ANGLE: f64 = 135.0;

/// Triangle pointing along the heading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarOutline {
    pub nose: Vector2,
    pub right: Vector2,
    pub left: Vector2,
}

impl CarOutline {
    pub fn from_pose(pose: &Pose, size: f64) -> Self {
        let heading = pose.heading();
        Self {
            nose: pose.position.translate(heading, size),
            right: pose.position.translate(heading + REAR_ANGLE, size),
            left: pose.position.translate(heading - REAR_ANGLE, size),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.nose, self.right).union(&BoundingBox::from_points(self.left, self.left))
    }

    /// Region to clear before redrawing the car elsewhere.
    pub fn clear_box(&self, margin: f64) -> BoundingBox {
        self.bounding_box().expand(margin)
    }
}

impl From<&Pose> for CarOutline {
    fn from(pose: &Pose) -> Self {
        Self::from_pose(pose, DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn outline_points_along_heading() {
        let outline = CarOutline::from(&Pose::new(0.0, 0.0, 0.0));
        assert_abs_diff_eq!(outline.nose.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(outline.nose.y, 0.0, epsilon = 1e-12);
        let k = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(outline.right.x, -k, epsilon = 1e-9);
        assert_abs_diff_eq!(outline.right.y, k, epsilon = 1e-9);
        assert_abs_diff_eq!(outline.left.x, -k, epsilon = 1e-9);
        assert_abs_diff_eq!(outline.left.y, -k, epsilon = 1e-9);
    }

    #[test]
    fn clear_box_covers_outline_with_margin() {
        let outline = CarOutline::from_pose(&Pose::new(5.0, 5.0, 72.0), DEFAULT_SIZE);
        let clear = outline.clear_box(CLEAR_MARGIN);
        for p in [outline.nose, outline.left, outline.right] {
            assert!(clear.contains(p));
        }
        let tight = outline.bounding_box();
        assert_abs_diff_eq!(clear.width(), tight.width() + 2.0 * CLEAR_MARGIN, epsilon = 1e-12);
    }
}
