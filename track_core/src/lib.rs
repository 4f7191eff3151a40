//! `track_core` — Track geometry: sectors, poses and distance lookup.
//!
//! # Module layout
//! - [`types`]      — Vector2, Pose and angle helpers (degrees throughout)
//! - [`bbox`]       — Axis-aligned bounding boxes
//! - [`descriptor`] — Track definition input (sector descriptors, metadata)
//! - [`sector`]     — Straight / arc sector geometry
//! - [`track`]      — Sector chain, bounding box, pose-at-distance
//! - [`error`]      — Construction and query errors

pub mod bbox;
pub mod descriptor;
pub mod error;
pub mod sector;
pub mod track;
pub mod types;

pub use bbox::BoundingBox;
pub use descriptor::{Direction, SectorDescriptor, TrackDefinition};
pub use error::{Result, TrackError};
pub use sector::{Arc, Sector, SectorShape};
pub use track::{sample_poses, Track, MAX_SAMPLES};
pub use types::{normalize_degrees, Pose, Vector2};
