//! Error types for the solver.

use thiserror::Error;

/// Errors that can occur while locating a gap or building a trajectory.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Every pixel pair was within tolerance
    #[error("no divergence found in {width}x{height} image pair")]
    NoDivergenceFound {
        /// Width of the scanned images
        width: u32,
        /// Height of the scanned images
        height: u32,
    },

    /// The images to compare differ in size
    #[error("image dimensions differ: reference is {reference:?}, gapped is {gapped:?}")]
    DimensionMismatch {
        /// `(width, height)` of the reference image
        reference: (u32, u32),
        /// `(width, height)` of the gapped image
        gapped: (u32, u32),
    },

    /// Drag distance was zero or negative
    #[error("drag distance must be positive, got {0}")]
    InvalidDistance(i32),

    /// The simulation did not reach the target within the step cap
    #[error("trajectory did not converge within {max_steps} steps")]
    TrajectoryDiverged {
        /// Configured step cap
        max_steps: usize,
    },

    /// Solver configuration is unusable
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(#[from] slidepass_core::ConfigError),

    /// Input string is not a base64 image data URI
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Image bytes could not be decoded or encoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error while writing debug images
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SolverError> for slidepass_core::SlidepassError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::InvalidConfig(config) => Self::Config(config),
            SolverError::Io(io) => Self::Io(io),
            other => Self::Solver(other.to_string()),
        }
    }
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SolverError::InvalidDistance(-3);
        assert_eq!(err.to_string(), "drag distance must be positive, got -3");

        let err = SolverError::DimensionMismatch {
            reference: (260, 160),
            gapped: (260, 120),
        };
        assert!(err.to_string().contains("(260, 120)"));
    }

    #[test]
    fn test_into_central_error() {
        let err: slidepass_core::SlidepassError = SolverError::NoDivergenceFound {
            width: 10,
            height: 10,
        }
        .into();
        assert!(matches!(err, slidepass_core::SlidepassError::Solver(_)));
        assert!(err.to_string().contains("no divergence"));
    }
}
