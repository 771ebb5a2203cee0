//! Tesla Table headless driver
//!
//! Runs the simulation in a 6 x 10 cm box with a slowly rotating tilt and a
//! fixed field, then prints where the balls ended up.
//!
//! Usage: `tesla-table [config.json] [frames]`

use std::f32::consts::TAU;

use tesla_table::consts::NANOS_TO_SECONDS;
use tesla_table::{ConfigError, ParticleSystem, SimConfig};

/// 60 Hz frames, in nanoseconds
const FRAME_NANOS: i64 = 16_666_667;
const DEFAULT_FRAMES: u32 = 600;
/// Standard gravity, m/s^2
const GRAVITY: f32 = 9.81;

fn load_config(path: Option<&str>) -> Result<SimConfig, ConfigError> {
    match path {
        Some(path) => {
            log::info!("Loading config from {path}");
            SimConfig::load(path)
        }
        None => Ok(SimConfig::default()),
    }
}

fn main() {
    env_logger::init();
    log::info!("Tesla Table (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Could not load config: {e}");
            std::process::exit(1);
        }
    };
    let frames = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut system = match ParticleSystem::new(config) {
        Ok(system) => system,
        Err(e) => {
            log::error!("Invalid config: {e}");
            std::process::exit(1);
        }
    };
    system.on_viewport_resized(0.06, 0.1);

    let mut capped_frames = 0;
    for frame in 0..frames {
        let timestamp = frame as i64 * FRAME_NANOS;
        // One full tilt revolution every ten seconds, tipped 30 degrees
        let angle = timestamp as f32 * NANOS_TO_SECONDS * TAU / 10.0;
        let tilt = GRAVITY * 0.5;
        system.update(tilt * angle.cos(), tilt * angle.sin(), 0.0, 40.0, timestamp);

        if system.last_passes() == system.config().max_passes {
            capped_frames += 1;
        }
        if frame % 60 == 0 {
            log::info!(
                "frame {frame}: {} collision passes, ball 0 at {:.4}",
                system.last_passes(),
                system.position(0).unwrap_or_default()
            );
        }
    }

    log::info!("{capped_frames} of {frames} frames hit the collision pass cap");
    for (i, p) in system.particles().iter().enumerate() {
        let charge = p
            .charge()
            .map(|c| format!("{c:+.3}"))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{i:2}: pos ({:+.4}, {:+.4}) m  mass {:7.1}  radius {:.5} m  charge {charge}",
            p.position().x,
            p.position().y,
            p.mass(),
            p.radius(),
        );
    }
}
