//! Built-in track layouts.
//!
//! Each layout is a named [`TrackDefinition`]. All layouts are deterministic
//! given the same seed; only [`LayoutKind::Random`] actually uses it.

use anyhow::Context;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::io::BufReader;
use std::path::Path;
use track_core::{Pose, SectorDescriptor as D, TrackDefinition};
use tracing::info;

/// Which pre-defined layout to load.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutKind {
    /// One 100-unit straight
    Straight,
    /// A single clockwise quarter circle of radius 50
    QuarterTurn,
    /// Two straights joined by two clockwise half circles (closed)
    Oval,
    /// 19-sector demo circuit mixing straights and both curve directions
    Brakogama,
    /// Seeded random sequence of valid sectors
    Random,
}

pub struct Layout;

impl Layout {
    /// Build the named layout. Uses `seed` for repeatability.
    pub fn build(kind: LayoutKind, seed: u64) -> TrackDefinition {
        match kind {
            LayoutKind::Straight => Self::straight(),
            LayoutKind::QuarterTurn => Self::quarter_turn(),
            LayoutKind::Oval => Self::oval(),
            LayoutKind::Brakogama => Self::brakogama(),
            LayoutKind::Random => Self::random(seed),
        }
    }

    fn straight() -> TrackDefinition {
        named(1, "Straight", Pose::new(0.0, 0.0, 0.0), vec![D::straight(100.0)])
    }

    fn quarter_turn() -> TrackDefinition {
        named(
            2,
            "Quarter turn",
            Pose::new(0.0, 0.0, 0.0),
            vec![D::right(PI * 50.0 / 2.0, 50.0)],
        )
    }

    fn oval() -> TrackDefinition {
        named(
            3,
            "Oval",
            Pose::new(20.0, 0.0, 0.0),
            vec![
                D::straight(100.0),
                D::right(PI * 20.0, 20.0),
                D::straight(100.0),
                D::right(PI * 20.0, 20.0),
            ],
        )
    }

    fn brakogama() -> TrackDefinition {
        named(
            4,
            "Track Brakogama",
            Pose::new(100.0, 100.0, 0.0),
            vec![
                D::straight(150.0),
                D::right(15.0, 15.0),
                D::left(15.0, 15.0),
                D::right(25.0, 15.0),
                D::straight(44.0),
                D::left(50.0, 45.0),
                D::straight(20.0),
                D::right(100.0, 200.0),
                D::right(50.0, 50.0),
                D::right(70.0, 30.0),
                D::left(140.0, 150.0),
                D::straight(200.0),
                D::left(30.0, 43.0),
                D::straight(120.0),
                D::right(50.0, 23.0),
                D::straight(120.0),
                D::right(185.0, 65.89),
                D::left(68.6, 28.1),
                D::right(14.5, 15.0),
            ],
        )
    }

    fn random(seed: u64) -> TrackDefinition {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = rng.gen_range(4..=16);
        let sectors = (0..count)
            .map(|_| {
                let length = rng.gen_range(5.0..200.0);
                if rng.gen_bool(0.5) {
                    D::straight(length)
                } else {
                    let radius = rng.gen_range(10.0..150.0);
                    if rng.gen_bool(0.5) {
                        D::left(length, radius)
                    } else {
                        D::right(length, radius)
                    }
                }
            })
            .collect();
        let start = Pose::new(
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-500.0..500.0),
            rng.gen_range(0.0..360.0),
        );
        named(1000u64.wrapping_add(seed), &format!("random-{seed}"), start, sectors)
    }
}

fn named(id: u64, name: &str, start_pose: Pose, sectors: Vec<D>) -> TrackDefinition {
    TrackDefinition {
        id: Some(id),
        ..TrackDefinition::new(name, start_pose, sectors)
    }
}

/// Load a track definition from a JSON file.
pub fn load_definition(path: &Path) -> anyhow::Result<TrackDefinition> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening track definition {}", path.display()))?;
    let reader = BufReader::new(file);
    let def: TrackDefinition = serde_json::from_reader(reader)
        .with_context(|| format!("parsing track definition {}", path.display()))?;
    info!(name = %def.name, sectors = def.sectors.len(), "loaded track definition");
    Ok(def)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use track_core::{sample_poses, Track};

    #[test]
    fn every_layout_builds() {
        for kind in [
            LayoutKind::Straight,
            LayoutKind::QuarterTurn,
            LayoutKind::Oval,
            LayoutKind::Brakogama,
            LayoutKind::Random,
        ] {
            let def = Layout::build(kind, 7);
            let track = Track::build(&def).unwrap();
            assert!(!track.is_empty(), "{kind:?}");
            assert!(track.bounding_box().is_ok());
        }
    }

    #[test]
    fn quarter_turn_ends_where_the_formulas_say() {
        let track = Track::build(&Layout::build(LayoutKind::QuarterTurn, 0)).unwrap();
        let end = track.end_pose().unwrap();
        assert_abs_diff_eq!(end.x(), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end.y(), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end.heading(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn oval_is_closed() {
        let track = Track::build(&Layout::build(LayoutKind::Oval, 0)).unwrap();
        assert!(track.is_closed(1e-9));
        assert_abs_diff_eq!(track.length(), 200.0 + 40.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn brakogama_matches_sector_sum() {
        let def = Layout::build(LayoutKind::Brakogama, 0);
        let track = Track::build(&def).unwrap();
        assert_eq!(track.sector_count(), 19);
        assert_eq!(track.name(), "Track Brakogama");
        let total: f64 = def.sectors.iter().map(|s| s.length).sum();
        assert_abs_diff_eq!(track.length(), total, epsilon = 1e-9);
    }

    #[test]
    fn random_layouts_are_reproducible() {
        assert_eq!(Layout::build(LayoutKind::Random, 42), Layout::build(LayoutKind::Random, 42));
        assert_ne!(Layout::build(LayoutKind::Random, 42), Layout::build(LayoutKind::Random, 43));
    }

    #[test]
    fn random_layouts_hold_track_invariants() {
        for seed in 0..25 {
            let track = Track::build(&Layout::build(LayoutKind::Random, seed)).unwrap();
            let len = track.length();

            let total: f64 = track.sectors().iter().map(|s| s.length()).sum();
            assert_abs_diff_eq!(total, len, epsilon = 1e-9);
            assert_eq!(track.pose_at(0.0).unwrap(), track.start_pose());

            for sector in track.sectors() {
                let chord = sector.start_pose().position.distance_to(sector.end_pose().position);
                match sector.radius() {
                    None => assert_abs_diff_eq!(chord, sector.length(), epsilon = 1e-9),
                    Some(r) => {
                        let expected = (2.0 * r * (sector.length() / (2.0 * r)).sin()).abs();
                        assert_abs_diff_eq!(chord, expected, epsilon = 1e-9);
                        assert!(chord <= sector.length() + 1e-9);
                    }
                }
            }

            let bbox = track.bounding_box().unwrap().expand(1e-6);
            for (d, pose) in sample_poses(&track, len / 200.0).unwrap() {
                assert!((0.0..360.0).contains(&pose.heading()));
                assert!(bbox.contains(pose.position), "seed {seed}: {d} outside");
                // Open layouts jump at the seam, so stay clear of it
                if d < 1e-6 || d > len - 1e-6 {
                    continue;
                }
                let lapped = track.pose_at(d + 3.0 * len).unwrap();
                assert!(lapped.approx_eq(&pose, 1e-6), "seed {seed}: lap drift at {d}");
            }
        }
    }

    #[test]
    fn load_definition_reads_json_file() {
        let path = std::env::temp_dir().join(format!("layout_{}.json", std::process::id()));
        let def = Layout::build(LayoutKind::Oval, 0);
        std::fs::write(&path, serde_json::to_string(&def).unwrap()).unwrap();
        let loaded = load_definition(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.name, "Oval");
        assert_eq!(loaded.sectors.len(), 4);
        assert!(load_definition(Path::new("/nonexistent/track.json")).is_err());
    }
}
