//! Car animator: advances a distance-from-start scalar and asks the track
//! for the pose at each tick.
//!
//! The animator is the only stateful piece of the workspace. It keeps the
//! current distance plus the previously emitted pose, so a renderer can erase
//! the old car before drawing the new one; the track itself stays read-only.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use track_core::{Pose, Track, TrackError};
use tracing::trace;

/// Configuration for the car animator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// Track distance covered per tick (track units)
    pub step_distance: f64,
    /// Wall-clock time between ticks; only used to timestamp frames
    pub tick_interval: Duration,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            step_distance: 2.0,
            tick_interval: Duration::from_millis(10),
        }
    }
}

/// One animation step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    /// Cumulative distance driven, not wrapped to one lap
    pub distance: f64,
    /// Pose emitted on the previous tick, if any
    pub previous: Option<Pose>,
    pub pose: Pose,
}

/// Drives a car around a track at constant step per tick.
#[derive(Clone, Debug)]
pub struct CarAnimator {
    pub config: AnimatorConfig,
    tick: u64,
    distance: f64,
    last_pose: Option<Pose>,
}

impl CarAnimator {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            tick: 0,
            distance: 0.0,
            last_pose: None,
        }
    }

    /// Distance the next tick will be evaluated at.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Simulated time spent so far.
    pub fn elapsed(&self) -> Duration {
        self.config.tick_interval.saturating_mul(self.tick.min(u32::MAX as u64) as u32)
    }

    /// Completed laps on `track`.
    pub fn laps(&self, track: &Track) -> u64 {
        if track.length() > 0.0 {
            (self.distance / track.length()).floor() as u64
        } else {
            0
        }
    }

    /// Emit the pose at the current distance, then advance by one step.
    ///
    /// An empty track reports `NoSectors` and the animator does not move, so
    /// polling before a track is loaded is harmless. A step that is not a
    /// positive finite distance is rejected the same way.
    pub fn tick(&mut self, track: &Track) -> Result<Frame, TrackError> {
        self.check_step()?;
        let pose = track.pose_at(self.distance)?;
        let frame = Frame {
            tick: self.tick,
            distance: self.distance,
            previous: self.last_pose,
            pose,
        };
        trace!(tick = self.tick, distance = self.distance, %pose, "tick");

        self.last_pose = Some(pose);
        self.distance += self.config.step_distance;
        self.tick += 1;
        Ok(frame)
    }

    /// Tick until `laps` full laps have been driven.
    pub fn run_laps(&mut self, track: &Track, laps: u32) -> Result<Vec<Frame>, TrackError> {
        self.check_step()?;
        if track.is_empty() {
            return Err(TrackError::NoSectors);
        }
        let target = track.length() * laps as f64;
        let mut frames = Vec::new();
        while self.distance < target {
            frames.push(self.tick(track)?);
        }
        Ok(frames)
    }

    fn check_step(&self) -> Result<(), TrackError> {
        let step = self.config.step_distance;
        if step.is_finite() && step > 0.0 {
            Ok(())
        } else {
            Err(TrackError::InvalidDistance { distance: step })
        }
    }

    /// Back to the start line, history cleared.
    pub fn reset(&mut self) {
        self.tick = 0;
        self.distance = 0.0;
        self.last_pose = None;
    }
}

impl Default for CarAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}
