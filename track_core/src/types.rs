//! Fundamental geometric types used across the entire workspace.
//!
//! Angles are in **degrees** everywhere in the public API. The frame follows
//! the usual math convention (0° = +x, angles grow towards +y), which on a
//! canvas with y pointing down reads as clockwise.

use nalgebra::{distance, Point2, Vector2 as Offset2};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

/// Full turn in degrees.
pub const FULL_TURN: f64 = 360.0;

/// Right angle in degrees; the arc centre always sits this far off the heading.
pub const QUARTER_TURN: f64 = 90.0;

/// Reduce a finite angle to `[0, 360)` degrees. NaN and infinities give NaN.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let reduced = degrees % FULL_TURN;
    let wrapped = if reduced < 0.0 { reduced + FULL_TURN } else { reduced };
    // -1e-17 + 360 rounds to exactly 360
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Angular sweep (degrees) of an arc of `length` on a circle of `radius`.
pub fn sweep_degrees(length: f64, radius: f64) -> f64 {
    (180.0 * length) / (std::f64::consts::PI * radius)
}

// ---------------------------------------------------------------------------
// Vector2
// ---------------------------------------------------------------------------

/// A point in the track plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ORIGIN: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point reached by moving `length` along direction `degrees`.
    ///
    /// `degrees` is reduced modulo 360 first so huge or negative inputs do
    /// not lose precision in the radian conversion.
    pub fn translate(self, degrees: f64, length: f64) -> Self {
        let rad = (degrees % FULL_TURN).to_radians();
        let moved = Point2::from(self) + Offset2::new(rad.cos(), rad.sin()) * length;
        moved.into()
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Vector2) -> f64 {
        distance(&Point2::from(self), &Point2::from(other))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2> for Point2<f64> {
    fn from(v: Vector2) -> Self {
        Point2::new(v.x, v.y)
    }
}

impl From<Point2<f64>> for Vector2 {
    fn from(p: Point2<f64>) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Pose
// ---------------------------------------------------------------------------

/// A position plus a heading in degrees.
///
/// A finite heading is normalized into `[0, 360)` on construction. A NaN or
/// infinite heading comes out as NaN and `is_finite` reports it; sectors and
/// tracks refuse such poses, so every pose they produce is in range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Vector2,
    heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self::at(Vector2::new(x, y), heading)
    }

    pub fn at(position: Vector2, heading: f64) -> Self {
        Self {
            position,
            heading: normalize_degrees(heading),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Heading in degrees, within `[0, 360)` whenever the pose is finite.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.heading.is_finite()
    }

    /// True when both poses agree within `tolerance` (position in track units,
    /// heading in degrees, compared across the 0/360 seam).
    pub fn approx_eq(&self, other: &Pose, tolerance: f64) -> bool {
        let dh = (self.heading - other.heading).abs();
        let dh = dh.min(FULL_TURN - dh);
        self.position.distance_to(other.position) <= tolerance && dh <= tolerance
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.3}°", self.position, self.heading)
    }
}

// Poses travel flat as `{x, y, heading}`.
impl Serialize for Pose {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Pose", 3)?;
        state.serialize_field("x", &self.position.x)?;
        state.serialize_field("y", &self.position.y)?;
        state.serialize_field("heading", &self.heading)?;
        state.end()
    }
}

// Routed through `Pose::new` so deserialized headings are normalized too.
impl<'de> Deserialize<'de> for Pose {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawPose {
            x: f64,
            y: f64,
            #[serde(default, alias = "degree")]
            heading: f64,
        }
        let raw = RawPose::deserialize(deserializer)?;
        Ok(Pose::new(raw.x, raw.y, raw.heading))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
