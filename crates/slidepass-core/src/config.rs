//! Configuration management for slidepass.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Every tunable constant of the solver
//! lives here so it can be adjusted per target site.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{AccelRange, Tolerance};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/slidepass/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gap location settings
    pub solver: SolverConfig,
    /// Trajectory synthesis settings
    pub trajectory: TrajectoryConfig,
    /// Drag execution settings
    pub drag: DragConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Attempt loop settings
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SLIDEPASS_TOLERANCE`: Override pixel tolerance
    /// - `SLIDEPASS_CALIBRATION_BIAS`: Override slider calibration bias
    /// - `SLIDEPASS_HEADLESS`: Override browser headless mode (true/false)
    /// - `SLIDEPASS_MAX_ATTEMPTS`: Override attempt count
    pub fn load_with_env() -> ConfigResult<Self> {
        Self::load_with_env_from(None)
    }

    /// Like [`AppConfig::load_with_env`], reading `path` instead of the
    /// default location when one is given.
    pub fn load_with_env_from(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides on top of the current values.
    ///
    /// Unparseable values are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("SLIDEPASS_TOLERANCE") {
            if let Ok(tolerance) = val.parse::<u8>() {
                if let Ok(tolerance) = Tolerance::new(tolerance) {
                    self.solver.tolerance = tolerance;
                    tracing::debug!("Override solver.tolerance from env: {}", tolerance);
                }
            }
        }

        if let Ok(val) = std::env::var("SLIDEPASS_CALIBRATION_BIAS") {
            if let Ok(bias) = val.parse() {
                self.solver.calibration_bias = bias;
                tracing::debug!("Override solver.calibration_bias from env: {}", bias);
            }
        }

        if let Ok(val) = std::env::var("SLIDEPASS_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("SLIDEPASS_MAX_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                self.retry.max_attempts = attempts;
                tracing::debug!("Override retry.max_attempts from env: {}", attempts);
            }
        }
    }

    /// Reject values that would make the solver degenerate.
    pub fn validate(&self) -> ConfigResult<()> {
        self.trajectory.validate()?;

        if self.drag.jitter_max < 0 {
            return Err(ConfigError::invalid(
                "drag.jitter_max",
                format!("must not be negative, got {}", self.drag.jitter_max),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "retry.max_attempts",
                "must allow at least one attempt",
            ));
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| ConfigError::invalid("config_path", "no parent directory"))?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/slidepass/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "slidepass", "slidepass").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the cache directory path.
    ///
    /// Uses XDG base directories: `~/.cache/slidepass`
    pub fn cache_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "slidepass", "slidepass").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.cache_dir().to_path_buf())
    }

    /// Default destination for debug image dumps: `<cache_dir>/debug`.
    pub fn debug_dir() -> ConfigResult<PathBuf> {
        Ok(Self::cache_dir()?.join("debug"))
    }
}

/// Gap location settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Per-channel difference below which pixels are considered equal
    pub tolerance: Tolerance,
    /// Pixels subtracted from the located gap before synthesizing a trajectory
    pub calibration_bias: i32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            calibration_bias: 8,
        }
    }
}

/// Kinematic trajectory settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Acceleration drawn each tick before the switch point
    pub accel_range: AccelRange,
    /// Acceleration drawn each tick after the switch point
    pub decel_range: AccelRange,
    /// Simulated duration of one tick
    pub tick_secs: f64,
    /// Fraction of the distance after which the slider decelerates
    pub switch_fraction: f64,
    /// Upper bound on emitted steps
    pub max_steps: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            accel_range: AccelRange { min: 40, max: 45 },
            decel_range: AccelRange { min: -50, max: -45 },
            tick_secs: 0.2,
            switch_fraction: 0.8,
            max_steps: 10_000,
        }
    }
}

impl TrajectoryConfig {
    /// Check the kinematic parameters.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.accel_range.is_positive() {
            return Err(ConfigError::invalid(
                "trajectory.accel_range",
                format!("must be strictly positive, got {}", self.accel_range),
            ));
        }
        if !self.decel_range.is_negative() {
            return Err(ConfigError::invalid(
                "trajectory.decel_range",
                format!("must be strictly negative, got {}", self.decel_range),
            ));
        }
        if !(self.tick_secs.is_finite() && self.tick_secs > 0.0) {
            return Err(ConfigError::invalid(
                "trajectory.tick_secs",
                format!("must be positive, got {}", self.tick_secs),
            ));
        }
        if !(self.switch_fraction > 0.0 && self.switch_fraction <= 1.0) {
            return Err(ConfigError::invalid(
                "trajectory.switch_fraction",
                format!("must be in (0, 1], got {}", self.switch_fraction),
            ));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::invalid(
                "trajectory.max_steps",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Drag execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Largest vertical jitter added to each step (inclusive)
    pub jitter_max: i32,
    /// Upper bound (exclusive) of the pause before releasing the slider
    pub release_pause_max_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            jitter_max: 4,
            release_pause_max_ms: 1000,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 20,
        }
    }
}

/// Attempt loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum solve attempts before giving up
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 3000,
        }
    }
}
