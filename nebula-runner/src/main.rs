//! Nebula Field Runner
//!
//! Loads a scene config from JSON, generates the particle field and writes
//! the packed instance buffer (little-endian f32, nine per particle).
//!
//! Usage: `nebula-runner scene.json [particles.bin] [ShapeName]`
//!
//! Set `RUST_LOG=debug` for regeneration details.

use log::{error, info, warn};
use nebula::pack::{as_bytes, FLOATS_PER_INSTANCE};
use nebula::prelude::*;
use nebula::transform::transform_all;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Preview viewport used for the frame summary.
const PREVIEW_VIEWPORT: (f32, f32) = (1280.0, 720.0);

fn load_config(path: &Path) -> SceneConfig {
    match SceneConfig::load(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to load config from {:?}: {}", path, e);
            warn!("Using default configuration.");
            SceneConfig::default()
        }
    }
}

/// Swap in the preset for `name`. Unknown names fall back to the nebula
/// preset, and the rejection is logged.
fn override_shape(config: &mut SceneConfig, name: &str) {
    let (kind, rejected) = ShapeKind::parse_or_fallback(name);
    if let Some(e) = rejected {
        warn!("{}; falling back to {}", e, kind);
    }
    config.shape = Shape::preset(kind);
}

fn run() -> Result<(), NebulaError> {
    let args: Vec<String> = env::args().collect();
    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            warn!("Usage: nebula-runner <scene.json> [out.bin] [ShapeName]");
            PathBuf::from("scene.json")
        }
    };
    let out_path = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("particles.bin"));

    let mut config = load_config(&config_path);
    if let Some(name) = args.get(3) {
        override_shape(&mut config, name);
    }

    let viewport = Viewport::new(PREVIEW_VIEWPORT.0, PREVIEW_VIEWPORT.1);
    let mut scene = Scene::new(config, viewport)?;

    if let Some(buffer) = scene.take_upload() {
        fs::write(&out_path, as_bytes(&buffer))?;
        info!(
            "Wrote {} instances ({} floats) to {:?}",
            buffer.len() / FLOATS_PER_INSTANCE,
            buffer.len(),
            out_path
        );
    }

    let particles = scene.store().particles();
    let extent = particles
        .iter()
        .map(|p| p.position.length())
        .fold(0.0f32, f32::max);
    info!("Field extent: {:.1} world units", extent);

    let frame = transform_all(particles, 0.0, scene.viewport(), scene.world_radius())?;
    let resolution = viewport.resolution();
    let on_screen = frame
        .iter()
        .filter(|t| {
            let c = t.screen_center;
            c.cmpge(Vec2::ZERO).all() && c.cmple(resolution).all()
        })
        .count();
    info!(
        "{} of {} billboards on screen at t=0 in {}x{}",
        on_screen,
        frame.len(),
        resolution.x,
        resolution.y
    );

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
