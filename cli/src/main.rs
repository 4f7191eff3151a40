//! `trackride` CLI: inspect track geometry, query poses, ride a car around.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sim::animator::{AnimatorConfig, CarAnimator};
use sim::layouts::{load_definition, Layout, LayoutKind};
use sim::replay::{save_ride, PoseSample, RideLog};
use std::path::{Path, PathBuf};
use std::time::Duration;
use track_core::{sample_poses, Track};
use tracing::info;

#[derive(Parser)]
#[command(name = "trackride", about = "Track geometry inspector and car animator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the track comes from: a built-in layout or a JSON definition.
#[derive(Args)]
struct TrackSource {
    /// Built-in layout
    #[arg(long, value_enum, default_value_t = LayoutKind::Oval, conflicts_with = "file")]
    layout: LayoutKind,
    /// Random seed for the `random` layout
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Track definition JSON file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl TrackSource {
    fn load(&self) -> Result<Track> {
        let definition = match &self.file {
            Some(path) => load_definition(path)?,
            None => Layout::build(self.layout, self.seed),
        };
        let track = Track::build(&definition)?;
        info!(
            name = track.name(),
            sectors = track.sector_count(),
            length = track.length(),
            "track ready"
        );
        Ok(track)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print length, bounding box and sectors of a track.
    Info {
        #[command(flatten)]
        source: TrackSource,
    },
    /// Print the pose at a distance from the start line.
    Pose {
        #[command(flatten)]
        source: TrackSource,
        /// Distance along the track (wraps whole laps)
        #[arg(long)]
        distance: f64,
    },
    /// Drive a car for a number of laps and report progress.
    Ride {
        #[command(flatten)]
        source: TrackSource,
        #[arg(long, default_value_t = 1)]
        laps: u32,
        /// Distance covered per tick
        #[arg(long, default_value_t = 2.0)]
        step: f64,
        /// Tick interval in milliseconds (frame timestamps only)
        #[arg(long, default_value_t = 10)]
        tick_ms: u64,
        /// Save the full ride log as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Sample poses over one lap at a fixed spacing.
    Sample {
        #[command(flatten)]
        source: TrackSource,
        #[arg(long, default_value_t = 10.0)]
        step: f64,
        /// Write samples to a JSON file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { source } => run_info(&source.load()?)?,
        Commands::Pose { source, distance } => {
            let track = source.load()?;
            println!("{}", track.pose_at(distance)?);
        }
        Commands::Ride {
            source,
            laps,
            step,
            tick_ms,
            output,
        } => {
            let config = AnimatorConfig {
                step_distance: step,
                tick_interval: Duration::from_millis(tick_ms),
            };
            run_ride(&source.load()?, config, laps, output.as_deref())?;
        }
        Commands::Sample {
            source,
            step,
            output,
        } => run_sample(&source.load()?, step, output.as_deref())?,
    }

    Ok(())
}

fn run_info(track: &Track) -> Result<()> {
    let bbox = track.bounding_box()?;
    println!(
        "Track '{}' ({} sectors, length={:.3})",
        track.name(),
        track.sector_count(),
        track.length()
    );
    println!("Start: {}", track.start_pose());
    println!(
        "Bounding box: {} .. {} ({:.3} x {:.3})",
        bbox.min,
        bbox.max,
        bbox.width(),
        bbox.height()
    );
    println!("Closed: {}", track.is_closed(1e-6));

    for sector in track.sectors() {
        let kind = match sector.arc() {
            Some(arc) => format!(
                "curve r={:.2} {:?} arc {:.2}°→{:.2}°",
                arc.radius, arc.direction, arc.start_degree, arc.end_degree
            ),
            None => "straight".to_owned(),
        };
        println!(
            "  #{:<3} at {:>9.3}  len {:>8.3}  {}  → {}",
            sector.index(),
            sector.distance_from_start(),
            sector.length(),
            kind,
            sector.end_pose()
        );
    }
    Ok(())
}

fn run_ride(
    track: &Track,
    config: AnimatorConfig,
    laps: u32,
    output_path: Option<&Path>,
) -> Result<()> {
    let mut animator = CarAnimator::new(config);
    println!(
        "Riding '{}' for {} lap(s), step={:.2}...",
        track.name(),
        laps,
        animator.config.step_distance
    );

    let start = std::time::Instant::now();
    let frames = animator.run_laps(track, laps)?;
    info!(ticks = frames.len(), laps = animator.laps(track), "ride finished");

    // One progress line per simulated second
    let ticks_per_second = (1000 / animator.config.tick_interval.as_millis().max(1)).max(1) as u64;
    for frame in frames.iter().filter(|f| f.tick % ticks_per_second == 0) {
        let time = animator.config.tick_interval.as_secs_f64() * frame.tick as f64;
        println!(
            "TIME: {:06.2}s\tDISTANCE: {:07.2}\tPOSE: {}",
            time, frame.distance, frame.pose
        );
    }

    println!(
        "Done: {} ticks, {:.2}s simulated, elapsed={:.3}s",
        frames.len(),
        animator.elapsed().as_secs_f64(),
        start.elapsed().as_secs_f64()
    );

    if let Some(opath) = output_path {
        let log = RideLog {
            track_name: track.name().to_owned(),
            track_length: track.length(),
            step_distance: animator.config.step_distance,
            tick_interval_ms: animator.config.tick_interval.as_millis() as u64,
            frames,
        };
        save_ride(&log, opath)?;
        println!("Ride saved to {}", opath.display());
    }

    Ok(())
}

fn run_sample(track: &Track, step: f64, output_path: Option<&Path>) -> Result<()> {
    let samples: Vec<PoseSample> = sample_poses(track, step)?
        .into_iter()
        .map(|(distance, pose)| PoseSample { distance, pose })
        .collect();

    let json = serde_json::json!({
        "track": track.name(),
        "length": track.length(),
        "bounding_box": track.bounding_box()?.corners(),
        "samples": samples,
    });
    let text = serde_json::to_string_pretty(&json)?;
    match output_path {
        Some(opath) => {
            std::fs::write(opath, text)?;
            println!("{} samples saved to {}", samples.len(), opath.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
