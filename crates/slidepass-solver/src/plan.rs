//! Drag plans: everything a pointer driver needs to replay a solve.

use crate::error::Result;
use crate::gap::GapLocator;
use crate::trajectory::{Trajectory, TrajectorySynthesizer};
use image::{GenericImageView, Pixel};
use rand::Rng;
use serde::{Deserialize, Serialize};
use slidepass_core::{AppConfig, GapOffset};
use std::time::Duration;
use tracing::debug;

/// One relative pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragStep {
    /// Horizontal movement (trajectory step)
    pub dx: i32,
    /// Vertical jitter
    pub dy: i32,
}

/// A complete, ordered drag: press, move through `steps`, pause, release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPlan {
    /// Column where the gap was found
    pub offset: GapOffset,
    /// Distance actually dragged, after calibration bias
    pub distance: i32,
    /// Pointer movements in emission order
    pub steps: Vec<DragStep>,
    /// Hold time before releasing, in milliseconds
    pub release_pause_ms: u64,
}

impl DragPlan {
    /// Hold time before releasing.
    #[must_use]
    pub fn release_pause(&self) -> Duration {
        Duration::from_millis(self.release_pause_ms)
    }

    /// Total horizontal travel.
    #[must_use]
    pub fn horizontal_travel(&self) -> i64 {
        self.steps.iter().map(|s| i64::from(s.dx)).sum()
    }
}

/// Chains gap location, bias correction, trajectory synthesis and jitter.
#[derive(Debug, Clone)]
pub struct SlideSolver {
    locator: GapLocator,
    synthesizer: TrajectorySynthesizer,
    calibration_bias: i32,
    jitter_max: i32,
    release_pause_max_ms: u64,
}

impl SlideSolver {
    /// Build a solver from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            locator: GapLocator::from_config(&config.solver),
            synthesizer: TrajectorySynthesizer::from_config(&config.trajectory)?,
            calibration_bias: config.solver.calibration_bias,
            jitter_max: config.drag.jitter_max,
            release_pause_max_ms: config.drag.release_pause_max_ms,
        })
    }

    /// The gap locator in use.
    #[must_use]
    pub fn locator(&self) -> &GapLocator {
        &self.locator
    }

    /// The trajectory synthesizer in use.
    #[must_use]
    pub fn synthesizer(&self) -> &TrajectorySynthesizer {
        &self.synthesizer
    }

    /// Locate the gap between `reference` and `gapped` and plan the drag to it.
    pub fn solve<A, B, R>(&self, reference: &A, gapped: &B, rng: &mut R) -> Result<DragPlan>
    where
        A: GenericImageView,
        A::Pixel: Pixel<Subpixel = u8>,
        B: GenericImageView,
        B::Pixel: Pixel<Subpixel = u8>,
        R: Rng + ?Sized,
    {
        let offset = self.locator.locate(reference, gapped)?;
        self.plan(offset, rng)
    }

    /// Plan the drag for an already located gap.
    pub fn plan<R: Rng + ?Sized>(&self, offset: GapOffset, rng: &mut R) -> Result<DragPlan> {
        let distance = offset.corrected(self.calibration_bias);
        let trajectory = self.synthesizer.synthesize_with(distance, rng)?;
        let steps = self.jitter(&trajectory, rng);

        let release_pause_ms = if self.release_pause_max_ms == 0 {
            0
        } else {
            rng.gen_range(0..self.release_pause_max_ms)
        };

        debug!(
            offset = offset.column(),
            distance,
            steps = steps.len(),
            release_pause_ms,
            "planned drag"
        );

        Ok(DragPlan {
            offset,
            distance,
            steps,
            release_pause_ms,
        })
    }

    fn jitter<R: Rng + ?Sized>(&self, trajectory: &Trajectory, rng: &mut R) -> Vec<DragStep> {
        trajectory
            .steps()
            .iter()
            .map(|&dx| DragStep {
                dx,
                dy: rng.gen_range(0..=self.jitter_max),
            })
            .collect()
    }
}
