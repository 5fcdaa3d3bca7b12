//! xrpoint - headless harness for the VR pointer router.
//!
//! - `xrpoint run <scenario.yaml>` - drive the router over a box scene, trace as JSON lines
//! - `xrpoint arc` - solve one ballistic arc against the ground plane

mod config;
mod scene;

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glam::Vec3;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use xr_core::{DeviceId, HitResult};
use xr_pointer::{BallisticPointer, StraightPointer};
use xr_router::PointerEventRouter;
use xr_tools::TraceLog;
use xr_trajectory::{find_arc_collision, sample_arc, ArcOutcome, ArcWalkConfig};

use crate::config::{DeviceKind, Scenario};
use crate::scene::{BoxScene, FrameClock, ScriptedController};

#[derive(Parser)]
#[command(name = "xrpoint")]
#[command(about = "Headless VR pointer router harness", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print every dispatched event
    Run {
        /// Scenario file (YAML)
        scenario: PathBuf,

        /// Override the scenario's frame count
        #[arg(long)]
        frames: Option<u64>,
    },

    /// Solve a ballistic arc against the ground plane
    Arc(ArcArgs),
}

#[derive(Args)]
struct ArcArgs {
    /// Launch height above the ground
    #[arg(long, default_value_t = 1.5)]
    height: f32,

    /// Launch pitch in degrees (positive aims up)
    #[arg(long, default_value_t = 30.0)]
    pitch: f32,

    #[arg(long, default_value_t = 10.0)]
    speed: f32,

    /// Gravity magnitude
    #[arg(long, default_value_t = 9.81)]
    gravity: f32,

    #[arg(long, default_value_t = 1000.0)]
    max_path_length: f32,

    #[arg(long, default_value_t = 0.05)]
    time_step: f32,

    /// Arc polyline points to print
    #[arg(long, default_value_t = 32)]
    points: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    // stdout carries the trace; logs go to stderr
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Run { scenario, frames } => run_scenario(&scenario, frames),
        Commands::Arc(args) => solve_arc(&args),
    }
}

fn run_scenario(path: &Path, frames: Option<u64>) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let frames = frames.unwrap_or(scenario.frames);
    info!(
        scenario = %path.display(),
        objects = scenario.objects.len(),
        devices = scenario.devices.len(),
        frames,
        "Running scenario"
    );

    let clock = FrameClock::default();
    let trace = Rc::new(RefCell::new(TraceLog::default()));
    let mut scene = BoxScene::from_objects(&scenario.objects);
    let mut router: PointerEventRouter<u64> =
        PointerEventRouter::new(scenario.router).with_trace_sink(trace.clone());

    let mut ids: Vec<DeviceId> = Vec::with_capacity(scenario.devices.len());
    for (index, def) in scenario.devices.iter().enumerate() {
        let controller =
            ScriptedController::new(clock.clone(), def.presses.clone(), def.releases.clone());
        let id = match def.kind {
            DeviceKind::Straight => router.register(
                StraightPointer::new(controller)
                    .with_haptics(def.haptics)
                    .with_pose(def.pose),
            ),
            DeviceKind::Ballistic => router.register(
                BallisticPointer::new(controller, def.ballistic)
                    .with_context(|| format!("device {index}"))?
                    .with_haptics(def.haptics)
                    .with_pose(def.pose),
            ),
        };
        ids.push(id);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in 1..=frames {
        clock.set(frame);
        for (def, id) in scenario.devices.iter().zip(&ids) {
            for key in def.path.iter().filter(|k| k.frame == frame) {
                if let Some(device) = router.device_mut(*id) {
                    device.set_pose(key.pose);
                }
            }
        }

        router.process_frame(&mut scene);

        for event in trace.borrow_mut().events.drain(..) {
            serde_json::to_writer(&mut out, &event)?;
            writeln!(out)?;
        }
    }

    for id in &ids {
        if let Some(state) = router.state(*id) {
            info!(
                device = id.0,
                hover = ?state.hover_target(),
                pressed = ?state.pressed_target(),
                "Final device state"
            );
        }
    }
    info!(selected = ?router.selected(), frames = router.frame(), "Scenario complete");
    Ok(())
}

fn solve_arc(args: &ArcArgs) -> Result<()> {
    let config = ArcWalkConfig {
        time_step: args.time_step,
        ..ArcWalkConfig::default()
    };
    config.validate().context("Invalid arc walk settings")?;
    anyhow::ensure!(args.height > 0.0, "launch height must be above the ground");

    let pitch = args.pitch.to_radians();
    let start = Vec3::new(0.0, args.height, 0.0);
    let velocity = Vec3::new(0.0, pitch.sin(), pitch.cos()) * args.speed;
    let gravity = Vec3::new(0.0, -args.gravity, 0.0);

    let ground = |origin: Vec3, direction: Vec3| -> HitResult<u64> {
        if direction.y >= 0.0 || origin.y <= 0.0 {
            return HitResult::miss();
        }
        HitResult::new(None, origin.y / -direction.y)
    };
    let outcome =
        find_arc_collision(gravity, start, velocity, args.max_path_length, &config, ground);

    let mut points = Vec::new();
    sample_arc(
        outcome.time(),
        velocity,
        start,
        gravity,
        config.time_step,
        args.points,
        &mut points,
    );

    let report = match &outcome {
        ArcOutcome::Hit(hit) => {
            info!(time = hit.time, x = hit.point.x, z = hit.point.z, "Arc landed");
            json!({
                "hit": true,
                "time": hit.time,
                "point": hit.point.to_array(),
                "probe": {
                    "origin": hit.ray.origin.to_array(),
                    "direction": hit.ray.direction.to_array(),
                    "distance": hit.hit.distance,
                },
            })
        }
        ArcOutcome::Miss { elapsed } => {
            info!(elapsed, "Arc found no ground");
            json!({ "hit": false, "time": elapsed })
        }
    };
    let points: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "arc": report, "points": points }))?
    );
    Ok(())
}
