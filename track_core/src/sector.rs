//! Sector geometry: one straight or circular-arc piece of a track.
//!
//! # Curve construction
//! For a curve starting at pose (p, d) with radius r and length l the sweep is
//! `turn = 180·l / (π·r)` degrees. The arc centre sits a quarter turn off the
//! heading and the arc angles are measured on that centre:
//!
//! | direction | arc start | arc end           | centre               | end heading   |
//! |-----------|-----------|-------------------|----------------------|---------------|
//! | CW        | d − 90    | start + turn      | p moved r along d+90 | arc end + 90  |
//! | CCW       | d + 90    | start − turn      | p moved r along d−90 | arc end − 90  |
//!
//! Both arc angles are stored normalized to `[0, 360)`, so `arc_end_degree`
//! is not guaranteed to be greater than `arc_start_degree`.

use crate::{
    bbox::BoundingBox,
    descriptor::Direction,
    error::{Result, TrackError},
    types::{normalize_degrees, sweep_degrees, Pose, Vector2, FULL_TURN, QUARTER_TURN},
};
use serde::{Deserialize, Serialize};

/// Compass angles on the arc's own circle with the box side each one pushes.
const COMPASS: [(f64, Side); 4] = [
    (0.0, Side::MaxX),
    (90.0, Side::MaxY),
    (180.0, Side::MinX),
    (270.0, Side::MinY),
];

#[derive(Clone, Copy, Debug)]
enum Side {
    MaxX,
    MaxY,
    MinX,
    MinY,
}

/// Derived circle data of a curved sector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Vector2,
    pub radius: f64,
    /// Angle of the start point seen from the centre, `[0, 360)`
    pub start_degree: f64,
    /// Angle of the end point seen from the centre, `[0, 360)`
    pub end_degree: f64,
    pub direction: Direction,
    /// Unnormalized sweep in degrees (always positive)
    pub sweep: f64,
}

impl Arc {
    fn build(start: &Pose, length: f64, radius: f64, direction: Direction) -> Self {
        let d = start.heading();
        let sweep = sweep_degrees(length, radius);
        let (arc_start, arc_end, center) = match direction {
            Direction::Cw => {
                let arc_start = d - QUARTER_TURN;
                let center = start.position.translate(d + QUARTER_TURN, radius);
                (arc_start, arc_start + sweep, center)
            }
            Direction::Ccw => {
                let arc_start = d + QUARTER_TURN;
                let center = start.position.translate(d - QUARTER_TURN, radius);
                (arc_start, arc_start - sweep, center)
            }
        };
        Self {
            center,
            radius,
            start_degree: normalize_degrees(arc_start),
            end_degree: normalize_degrees(arc_end),
            direction,
            sweep,
        }
    }

    pub fn is_ccw(&self) -> bool {
        self.direction == Direction::Ccw
    }

    /// Pose on the circle after travelling `offset` from the arc start.
    fn pose_at(&self, offset: f64) -> Pose {
        let turn = sweep_degrees(offset, self.radius);
        let (arc_degree, tangent) = match self.direction {
            Direction::Cw => (self.start_degree + turn, QUARTER_TURN),
            Direction::Ccw => (self.start_degree - turn, -QUARTER_TURN),
        };
        let arc_degree = normalize_degrees(arc_degree);
        let point = self.center.translate(arc_degree, self.radius);
        Pose::at(point, arc_degree + tangent)
    }

    /// Grow the endpoint box to every compass extreme the arc passes through.
    fn extend_box(&self, mut bbox: BoundingBox) -> BoundingBox {
        let (c, r) = (self.center, self.radius);
        if self.sweep >= FULL_TURN {
            return bbox.union(&BoundingBox::from_points(
                Vector2::new(c.x - r, c.y - r),
                Vector2::new(c.x + r, c.y + r),
            ));
        }

        // Ascending sweep: CCW arcs run from end back to start.
        let (ang_start, mut ang_end) = if self.is_ccw() {
            (self.end_degree, self.start_degree)
        } else {
            (self.start_degree, self.end_degree)
        };
        if ang_end < ang_start {
            ang_end += FULL_TURN;
        }

        let within = |a: f64| ang_start <= a && a <= ang_end;
        for (compass, side) in COMPASS {
            if !(within(compass) || within(compass + FULL_TURN)) {
                continue;
            }
            match side {
                Side::MaxX => bbox.max.x = c.x + r,
                Side::MaxY => bbox.max.y = c.y + r,
                Side::MinX => bbox.min.x = c.x - r,
                Side::MinY => bbox.min.y = c.y - r,
            }
        }
        bbox
    }
}

/// Drawing parameters of a sector, in the form a 2D canvas path expects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectorShape {
    Line {
        from: Vector2,
        to: Vector2,
    },
    Arc {
        center: Vector2,
        radius: f64,
        start_degree: f64,
        end_degree: f64,
        ccw: bool,
    },
}

/// One straight or curved piece of track. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    index: usize,
    start_pose: Pose,
    end_pose: Pose,
    length: f64,
    distance_from_start: f64,
    /// Circle data, `None` for straights
    arc: Option<Arc>,
}

impl Sector {
    /// Build a sector and compute its end pose.
    ///
    /// `radius = None` makes a straight; `direction` is ignored then.
    pub fn new(
        index: usize,
        start_pose: Pose,
        length: f64,
        radius: Option<f64>,
        direction: Direction,
        distance_from_start: f64,
    ) -> Result<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(TrackError::InvalidLength { index, length });
        }
        if let Some(radius) = radius {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(TrackError::InvalidRadius { index, radius });
            }
        }
        if !start_pose.is_finite() {
            return Err(TrackError::InvalidStartPose);
        }

        let arc = radius.map(|r| Arc::build(&start_pose, length, r, direction));
        let mut sector = Self {
            index,
            start_pose,
            end_pose: start_pose,
            length,
            distance_from_start,
            arc,
        };
        sector.end_pose = match &sector.arc {
            Some(arc) => {
                let end = arc.center.translate(arc.end_degree, arc.radius);
                let tangent = if arc.is_ccw() { -QUARTER_TURN } else { QUARTER_TURN };
                Pose::at(end, arc.end_degree + tangent)
            }
            None => sector.pose_at_offset(length),
        };
        Ok(sector)
    }

    /// Position in the track's sector list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start_pose(&self) -> Pose {
        self.start_pose
    }

    pub fn end_pose(&self) -> Pose {
        self.end_pose
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Cumulative track distance at the first point of this sector.
    pub fn distance_from_start(&self) -> f64 {
        self.distance_from_start
    }

    pub fn is_curve(&self) -> bool {
        self.arc.is_some()
    }

    pub fn arc(&self) -> Option<&Arc> {
        self.arc.as_ref()
    }

    pub fn radius(&self) -> Option<f64> {
        self.arc.map(|a| a.radius)
    }

    /// Turn direction; straights report the default.
    pub fn direction(&self) -> Direction {
        self.arc.map(|a| a.direction).unwrap_or_default()
    }

    pub fn is_ccw(&self) -> bool {
        self.arc.is_some_and(|a| a.is_ccw())
    }

    /// Track distance just past the last point of this sector.
    pub fn distance_to_end(&self) -> f64 {
        self.distance_from_start + self.length
    }

    /// True if `distance` (track coordinate) falls in
    /// `[distance_from_start, distance_from_start + length)`.
    pub fn contains(&self, distance: f64) -> bool {
        self.distance_from_start <= distance && distance < self.distance_to_end()
    }

    /// Pose after travelling `offset` from the sector start.
    ///
    /// Offsets outside `[0, length]` extrapolate along the same line or circle.
    pub fn pose_at_offset(&self, offset: f64) -> Pose {
        if offset == 0.0 {
            return self.start_pose;
        }
        match &self.arc {
            Some(arc) => arc.pose_at(offset),
            None => Pose::at(
                self.start_pose
                    .position
                    .translate(self.start_pose.heading(), offset),
                self.start_pose.heading(),
            ),
        }
    }

    /// Axis-aligned box of the sector.
    ///
    /// A circular arc can only reach its extreme x/y at its endpoints or at
    /// the four axis-aligned points of its circle.
    pub fn bounding_box(&self) -> BoundingBox {
        let ends = BoundingBox::from_points(self.start_pose.position, self.end_pose.position);
        match &self.arc {
            Some(arc) => arc.extend_box(ends),
            None => ends,
        }
    }

    pub fn shape(&self) -> SectorShape {
        match &self.arc {
            Some(arc) => SectorShape::Arc {
                center: arc.center,
                radius: arc.radius,
                start_degree: arc.start_degree,
                end_degree: arc.end_degree,
                ccw: arc.is_ccw(),
            },
            None => SectorShape::Line {
                from: self.start_pose.position,
                to: self.end_pose.position,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
