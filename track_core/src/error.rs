//! Error types for track construction and queries.

use thiserror::Error;

/// Errors raised while building a track or querying it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    /// Sector length is zero, negative or not finite
    #[error("sector {index}: length must be positive and finite, got {length}")]
    InvalidLength {
        /// Position of the offending sector
        index: usize,
        length: f64,
    },

    /// Curve radius is zero, negative or not finite
    #[error("sector {index}: curve radius must be positive and finite, got {radius}")]
    InvalidRadius {
        /// Position of the offending sector
        index: usize,
        radius: f64,
    },

    /// Start pose has a NaN or infinite component
    #[error("start pose must be finite")]
    InvalidStartPose,

    /// Query against a track without sectors
    #[error("track has no sectors")]
    NoSectors,

    /// Query distance is NaN or infinite, or a step is not positive and finite
    #[error("invalid distance or step: {distance}")]
    InvalidDistance { distance: f64 },

    /// Sampling step so small that one lap would exceed the sample cap
    #[error("step {step} needs more than {max} samples per lap")]
    TooManySamples { step: f64, max: usize },
}

pub type Result<T> = std::result::Result<T, TrackError>;
