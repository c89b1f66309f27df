//! Slidepass Core - Foundation crate for the slidepass workspace.
//!
//! This crate provides shared types, error handling and configuration
//! management that the solver, browser and CLI crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`Tolerance`, `GapOffset`, `AccelRange`)
//!
//! # Example
//!
//! ```rust
//! use slidepass_core::{AppConfig, GapOffset};
//!
//! let config = AppConfig::default();
//! let offset = GapOffset::new(120);
//! assert_eq!(offset.corrected(config.solver.calibration_bias), 112);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BrowserConfig, DragConfig, RetryConfig, SolverConfig, TrajectoryConfig,
};
pub use error::{ConfigError, ConfigResult, Result, SlidepassError};
pub use types::{AccelRange, GapOffset, Tolerance};
