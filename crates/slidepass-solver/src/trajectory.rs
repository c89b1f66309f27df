//! Human-like drag trajectory synthesis.
//!
//! A slider dragged by a person speeds up, then brakes as it nears the target.
//! The synthesizer simulates that with a two-phase kinematic model: each tick
//! draws a random acceleration from the current phase's range, integrates the
//! displacement, and emits the rounded movement as one step. The last step is
//! corrected so the steps sum to the requested distance exactly.

use crate::error::{Result, SolverError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use slidepass_core::{AccelRange, TrajectoryConfig};
use tracing::debug;

/// Phase of the kinematic simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the switch point, acceleration is positive
    Accelerate,
    /// At or after the switch point, acceleration is negative
    Decelerate,
}

/// Simulation state for a single `synthesize` call.
#[derive(Debug, Clone)]
struct KinematicState {
    displacement: i32,
    velocity: f64,
    tick: f64,
    switch_at: f64,
}

impl KinematicState {
    fn new(distance: i32, tick: f64, switch_fraction: f64) -> Self {
        Self {
            displacement: 0,
            velocity: 0.0,
            tick,
            switch_at: f64::from(distance) * switch_fraction,
        }
    }

    fn phase(&self) -> Phase {
        if f64::from(self.displacement) < self.switch_at {
            Phase::Accelerate
        } else {
            Phase::Decelerate
        }
    }

    /// Integrate one tick under `accel` and return the rounded movement.
    ///
    /// Movement uses the velocity from before this tick.
    #[allow(clippy::cast_possible_truncation)]
    fn advance(&mut self, accel: f64) -> i32 {
        let v0 = self.velocity;
        self.velocity = v0 + accel * self.tick;
        let movement = v0 * self.tick + 0.5 * accel * self.tick * self.tick;
        movement.round_ties_even() as i32
    }
}

/// Ordered horizontal step sizes whose sum is the drag distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    steps: Vec<i32>,
}

impl Trajectory {
    /// Step sizes in emission order.
    #[must_use]
    pub fn steps(&self) -> &[i32] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all steps.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.steps.iter().map(|&s| i64::from(s)).sum()
    }

    /// Running sums after each step.
    pub fn cumulative(&self) -> impl Iterator<Item = i64> + '_ {
        self.steps.iter().scan(0_i64, |acc, &s| {
            *acc += i64::from(s);
            Some(*acc)
        })
    }

    /// Consume into the raw steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<i32> {
        self.steps
    }
}

/// Generates trajectories with an accelerate-then-decelerate profile.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySynthesizer {
    accel_range: AccelRange,
    decel_range: AccelRange,
    tick_secs: f64,
    switch_fraction: f64,
    max_steps: usize,
}

impl Default for TrajectorySynthesizer {
    fn default() -> Self {
        let defaults = TrajectoryConfig::default();
        Self {
            accel_range: defaults.accel_range,
            decel_range: defaults.decel_range,
            tick_secs: defaults.tick_secs,
            switch_fraction: defaults.switch_fraction,
            max_steps: defaults.max_steps,
        }
    }
}

impl TrajectorySynthesizer {
    /// Build a synthesizer from the `[trajectory]` configuration section.
    ///
    /// # Errors
    /// Returns [`SolverError::InvalidConfig`] if the ranges would stall the simulation.
    pub fn from_config(config: &TrajectoryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            accel_range: config.accel_range,
            decel_range: config.decel_range,
            tick_secs: config.tick_secs,
            switch_fraction: config.switch_fraction,
            max_steps: config.max_steps,
        })
    }

    /// Synthesize a trajectory using the thread-local RNG.
    pub fn synthesize(&self, distance: i32) -> Result<Trajectory> {
        self.synthesize_with(distance, &mut rand::thread_rng())
    }

    /// Synthesize a trajectory drawing accelerations from `rng`.
    ///
    /// # Errors
    /// - [`SolverError::InvalidDistance`] if `distance <= 0`
    /// - [`SolverError::TrajectoryDiverged`] if the target is not reached within `max_steps`
    pub fn synthesize_with<R: Rng + ?Sized>(
        &self,
        distance: i32,
        rng: &mut R,
    ) -> Result<Trajectory> {
        if distance <= 0 {
            return Err(SolverError::InvalidDistance(distance));
        }

        let mut state = KinematicState::new(distance, self.tick_secs, self.switch_fraction);
        let mut steps = Vec::new();

        while state.displacement < distance {
            if steps.len() >= self.max_steps {
                return Err(SolverError::TrajectoryDiverged {
                    max_steps: self.max_steps,
                });
            }

            let range = match state.phase() {
                Phase::Accelerate => self.accel_range,
                Phase::Decelerate => self.decel_range,
            };
            let accel = rng.gen_range(range.min..=range.max);

            let movement = state.advance(f64::from(accel));
            let before = state.displacement;
            state.displacement = before.saturating_add(movement);

            if state.displacement < distance {
                steps.push(movement);
            } else {
                steps.push(distance - before);
            }
        }

        debug!(distance, steps = steps.len(), "synthesized trajectory");
        Ok(Trajectory { steps })
    }
}
