//! Subcommand implementations. Each returns a serializable report.

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use slidepass_core::{AppConfig, Tolerance};
use slidepass_solver::image_io::{load_rgb, save_debug_pair};
use slidepass_solver::{DragPlan, GapLocator, SlideSolver, SolverError, TrajectorySynthesizer};
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of `slidepass locate`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LocateReport {
    /// Gap column, `None` when the images never diverge
    pub offset: Option<u32>,
    pub width: u32,
    pub height: u32,
    pub tolerance: u8,
}

/// Result of `slidepass track`.
#[derive(Debug, Serialize)]
pub struct TrackReport {
    pub distance: i32,
    pub steps: Vec<i32>,
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn run_locate(
    reference: &Path,
    gapped: &Path,
    tolerance: Option<u8>,
    config: &AppConfig,
) -> anyhow::Result<LocateReport> {
    let tolerance = match tolerance {
        Some(value) => Tolerance::new(value)?,
        None => config.solver.tolerance,
    };

    let reference = load_rgb(reference).context("loading reference image")?;
    let gapped = load_rgb(gapped).context("loading gapped image")?;

    let offset = match GapLocator::new(tolerance).locate(&reference, &gapped) {
        Ok(offset) => Some(offset.column()),
        Err(SolverError::NoDivergenceFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    match offset {
        Some(column) => info!("Gap starts at column {}", column),
        None => info!("No gap detected"),
    }

    Ok(LocateReport {
        offset,
        width: reference.width(),
        height: reference.height(),
        tolerance: tolerance.get(),
    })
}

pub fn run_track(
    distance: i32,
    seed: Option<u64>,
    config: &AppConfig,
) -> anyhow::Result<TrackReport> {
    let synthesizer = TrajectorySynthesizer::from_config(&config.trajectory)?;
    let trajectory = synthesizer.synthesize_with(distance, &mut rng_for(seed))?;

    info!("Synthesized {} steps for distance {}", trajectory.len(), distance);
    Ok(TrackReport {
        distance,
        steps: trajectory.into_steps(),
    })
}

/// Resolve `--debug-dir`: absent, bare (cache directory), or explicit.
pub fn resolve_debug_dir(flag: Option<Option<PathBuf>>) -> anyhow::Result<Option<PathBuf>> {
    match flag {
        None => Ok(None),
        Some(Some(dir)) => Ok(Some(dir)),
        Some(None) => Ok(Some(AppConfig::debug_dir()?)),
    }
}

pub fn run_plan(
    reference: &Path,
    gapped: &Path,
    bias: Option<i32>,
    seed: Option<u64>,
    debug_dir: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<DragPlan> {
    let mut config = config.clone();
    if let Some(bias) = bias {
        config.solver.calibration_bias = bias;
    }
    let solver = SlideSolver::from_config(&config)?;

    let reference = load_rgb(reference).context("loading reference image")?;
    let gapped = load_rgb(gapped).context("loading gapped image")?;

    if let Some(dir) = debug_dir {
        save_debug_pair(dir, &reference, &gapped).context("saving debug images")?;
        info!("Saved debug images to {}", dir.display());
    }

    let plan = solver.solve(&reference, &gapped, &mut rng_for(seed))?;
    info!(
        "Gap at column {}, dragging {} px in {} steps",
        plan.offset,
        plan.distance,
        plan.steps.len()
    );
    Ok(plan)
}

pub fn run_config_show(config: &AppConfig) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

pub fn run_config_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save_to(path)?;
    info!("Wrote default config to {}", path.display());
    Ok(())
}
