//! Slidepass Solver - locate a slider puzzle's gap and plan a human-like drag.
//!
//! # Architecture
//!
//! - **Gap location** ([`gap`]): column-major pixel comparison with a tolerance
//! - **Trajectory** ([`trajectory`]): two-phase kinematic step synthesis
//! - **Plan** ([`plan`]): locate, apply calibration bias, synthesize, jitter
//! - **Image I/O** ([`image_io`]): data URI / PNG decoding and debug dumps
//! - **Errors** ([`error`]): solver error taxonomy
//!
//! # Example
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use slidepass_core::Tolerance;
//! use slidepass_solver::{locate_gap, TrajectorySynthesizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reference = RgbImage::from_pixel(10, 10, Rgb([100, 100, 100]));
//! let mut gapped = reference.clone();
//! gapped.put_pixel(4, 3, Rgb([200, 100, 100]));
//!
//! let offset = locate_gap(&reference, &gapped, Tolerance::default())?;
//! assert_eq!(offset.column(), 4);
//!
//! let trajectory = TrajectorySynthesizer::default().synthesize(120)?;
//! assert_eq!(trajectory.total(), 120);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod gap;
pub mod image_io;
pub mod plan;
pub mod trajectory;

pub use error::{Result, SolverError};
pub use gap::{is_similar, locate_gap, GapLocator};
pub use plan::{DragPlan, DragStep, SlideSolver};
pub use trajectory::{Phase, Trajectory, TrajectorySynthesizer};
