//! Ride logs: serialize/deserialize animator runs for offline analysis & replay.

use crate::animator::Frame;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use track_core::Pose;
use tracing::debug;

/// A full recorded ride.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RideLog {
    pub track_name: String,
    pub track_length: f64,
    pub step_distance: f64,
    /// Tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// All frames in tick order
    pub frames: Vec<Frame>,
}

/// Poses sampled along one lap, without animation state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    pub distance: f64,
    pub pose: Pose,
}

/// Save a ride log to a JSON file.
pub fn save_ride(log: &RideLog, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating ride log {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), log)
        .with_context(|| format!("writing ride log {}", path.display()))?;
    debug!(frames = log.frames.len(), path = %path.display(), "ride log saved");
    Ok(())
}

/// Load a ride log from a JSON file.
pub fn load_ride(path: &Path) -> anyhow::Result<RideLog> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening ride log {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing ride log {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::CarAnimator;
    use crate::layouts::{Layout, LayoutKind};
    use track_core::Track;

    #[test]
    fn ride_log_survives_a_file_round() {
        let track = Track::build(&Layout::build(LayoutKind::Oval, 0)).unwrap();
        let mut animator = CarAnimator::default();
        let frames = animator.run_laps(&track, 1).unwrap();
        let log = RideLog {
            track_name: track.name().to_owned(),
            track_length: track.length(),
            step_distance: animator.config.step_distance,
            tick_interval_ms: animator.config.tick_interval.as_millis() as u64,
            frames,
        };

        let path = std::env::temp_dir().join(format!("ride_{}.json", std::process::id()));
        save_ride(&log, &path).unwrap();
        let loaded = load_ride(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.track_name, "Oval");
        assert_eq!(loaded.frames.len(), log.frames.len());
        let previous = loaded.frames[1].previous.unwrap();
        assert!(previous.approx_eq(&log.frames[0].pose, 1e-9));
        assert_eq!(loaded.frames[0].previous, None);
    }

    #[test]
    fn load_ride_names_the_missing_file() {
        let err = load_ride(Path::new("/nonexistent/ride.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ride.json"));
    }
}
