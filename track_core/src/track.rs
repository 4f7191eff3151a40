//! Track: ordered sectors, total length, bounding box and distance → pose lookup.

use crate::{
    bbox::{union_all, BoundingBox},
    descriptor::{SectorDescriptor, TrackDefinition},
    error::{Result, TrackError},
    sector::Sector,
    types::Pose,
};
use rayon::prelude::*;
use tracing::debug;

/// A continuous path assembled from sectors. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    id: Option<u64>,
    name: String,
    start_pose: Pose,
    sectors: Vec<Sector>,
    length: f64,
}

impl Track {
    /// Build a track from a definition document.
    pub fn build(definition: &TrackDefinition) -> Result<Self> {
        let mut track = Self::from_descriptors(definition.start_pose, &definition.ordered_sectors())?;
        track.id = definition.id;
        track.name = definition.name.clone();
        Ok(track)
    }

    /// Chain sectors head to tail: each one starts at the previous end pose
    /// and at the cumulative distance so far.
    pub fn from_descriptors(start_pose: Pose, descriptors: &[SectorDescriptor]) -> Result<Self> {
        if !start_pose.is_finite() {
            return Err(TrackError::InvalidStartPose);
        }

        let mut sectors = Vec::with_capacity(descriptors.len());
        let mut current_pose = start_pose;
        let mut distance_from_start = 0.0;
        for (index, descriptor) in descriptors.iter().enumerate() {
            let sector = Sector::new(
                index,
                current_pose,
                descriptor.length,
                descriptor.curve_radius,
                descriptor.direction(),
                distance_from_start,
            )?;
            current_pose = sector.end_pose();
            distance_from_start += sector.length();
            sectors.push(sector);
        }

        debug!(
            sectors = sectors.len(),
            length = distance_from_start,
            "track built"
        );

        Ok(Self {
            id: None,
            name: String::new(),
            start_pose,
            sectors,
            length: distance_from_start,
        })
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_pose(&self) -> Pose {
        self.start_pose
    }

    /// Sum of all sector lengths.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Union of every sector box.
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        union_all(self.sectors.iter().map(Sector::bounding_box)).ok_or(TrackError::NoSectors)
    }

    /// The sector whose `[start, start + length)` range holds `distance`.
    ///
    /// Falls back to the last sector when nothing matches, which only happens
    /// through rounding at the total length. `None` only for an empty track.
    pub fn sector_at(&self, distance: f64) -> Option<&Sector> {
        if let Some(sector) = self.sectors.iter().find(|s| s.contains(distance)) {
            return Some(sector);
        }
        let last = self.sectors.last()?;
        debug!(distance, length = self.length, "distance past last sector, clamping");
        Some(last)
    }

    /// Pose at `distance` along the track, wrapping whole laps in either
    /// direction.
    pub fn pose_at(&self, distance: f64) -> Result<Pose> {
        if !distance.is_finite() {
            return Err(TrackError::InvalidDistance { distance });
        }
        if self.sectors.is_empty() {
            return Err(TrackError::NoSectors);
        }
        let wrapped = distance.rem_euclid(self.length);
        let sector = self.sector_at(wrapped).ok_or(TrackError::NoSectors)?;
        Ok(sector.pose_at_offset(wrapped - sector.distance_from_start()))
    }

    /// End of the last sector, `None` for an empty track.
    pub fn end_pose(&self) -> Option<Pose> {
        self.sectors.last().map(Sector::end_pose)
    }

    /// True when the last sector ends on the start pose within `tolerance`.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.end_pose()
            .is_some_and(|end| end.approx_eq(&self.start_pose, tolerance))
    }
}

/// Upper bound on the number of poses [`sample_poses`] returns for one lap.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Poses every `step` units over one lap, as `(distance, pose)` pairs.
///
/// Queries are independent, so the lap is evaluated in parallel. A step that
/// would need more than [`MAX_SAMPLES`] poses is rejected.
pub fn sample_poses(track: &Track, step: f64) -> Result<Vec<(f64, Pose)>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(TrackError::InvalidDistance { distance: step });
    }
    if track.is_empty() {
        return Err(TrackError::NoSectors);
    }
    let count = (track.length() / step).ceil();
    if count > MAX_SAMPLES as f64 {
        return Err(TrackError::TooManySamples {
            step,
            max: MAX_SAMPLES,
        });
    }
    let count = count as usize;
    (0..count)
        .into_par_iter()
        .map(|i| {
            let distance = i as f64 * step;
            track.pose_at(distance).map(|pose| (distance, pose))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
