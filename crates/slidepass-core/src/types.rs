//! Shared types used across slidepass.
//!
//! Newtypes for the scalar quantities passed between the gap locator, the
//! trajectory synthesizer and the drag executor.

use crate::error::SlidepassError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-channel threshold below which two pixels count as the same background.
///
/// Measured on the 0-255 channel scale. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tolerance(u8);

impl Tolerance {
    /// Threshold that works for canvas-rendered puzzle images.
    pub const DEFAULT: Self = Self(30);

    /// Create a new `Tolerance`.
    ///
    /// # Errors
    /// Returns error if `value` is zero, since nothing would ever compare as similar.
    pub fn new(value: u8) -> Result<Self, SlidepassError> {
        if value == 0 {
            return Err(SlidepassError::Validation(
                "tolerance must be positive, got 0".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the raw threshold.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether a single channel difference is below the threshold.
    #[must_use]
    pub fn accepts(self, a: u8, b: u8) -> bool {
        a.abs_diff(b) < self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Tolerance {
    type Error = SlidepassError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tolerance> for u8 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column index at which the reference and gapped images first diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GapOffset(u32);

impl GapOffset {
    /// Wrap a column index.
    #[must_use]
    pub fn new(column: u32) -> Self {
        Self(column)
    }

    /// Get the column index.
    #[must_use]
    pub fn column(self) -> u32 {
        self.0
    }

    /// Distance the slider has to travel once the site's calibration bias is removed.
    ///
    /// The result may be zero or negative; the trajectory synthesizer rejects those.
    #[must_use]
    pub fn corrected(self, bias: i32) -> i32 {
        i32::try_from(self.0)
            .unwrap_or(i32::MAX)
            .saturating_sub(bias)
    }
}

impl fmt::Display for GapOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive integer range an acceleration is drawn from, in units per tick².
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelRange {
    /// Lower bound (inclusive)
    pub min: i32,
    /// Upper bound (inclusive)
    pub max: i32,
}

impl AccelRange {
    /// Create a new range.
    ///
    /// # Errors
    /// Returns error if `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self, SlidepassError> {
        if min > max {
            return Err(SlidepassError::Validation(format!(
                "acceleration range is empty: min {min} > max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Whether every value in the range is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.min > 0 && self.min <= self.max
    }

    /// Whether every value in the range is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.max < 0 && self.min <= self.max
    }
}

impl fmt::Display for AccelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_rejects_zero() {
        assert!(Tolerance::new(0).is_err());
        assert_eq!(Tolerance::new(1).unwrap().get(), 1);
        assert_eq!(Tolerance::default().get(), 30);
    }

    #[test]
    fn test_tolerance_accepts_is_strict() {
        let tolerance = Tolerance::new(30).unwrap();
        assert!(tolerance.accepts(100, 129));
        assert!(tolerance.accepts(129, 100));
        assert!(!tolerance.accepts(100, 130));
        assert!(!tolerance.accepts(0, 255));
    }

    #[test]
    fn test_tolerance_serde_validates() {
        let parsed: Result<Tolerance, _> = serde_json::from_str("0");
        assert!(parsed.is_err());

        let parsed: Tolerance = serde_json::from_str("12").unwrap();
        assert_eq!(parsed.get(), 12);
    }

    #[test]
    fn test_gap_offset_corrected() {
        let offset = GapOffset::new(120);
        assert_eq!(offset.corrected(8), 112);
        assert_eq!(offset.corrected(0), 120);
        assert_eq!(offset.corrected(-4), 124);
        assert_eq!(GapOffset::new(3).corrected(8), -5);
    }

    #[test]
    fn test_accel_range_signs() {
        let accel = AccelRange::new(40, 45).unwrap();
        assert!(accel.is_positive());
        assert!(!accel.is_negative());

        let decel = AccelRange::new(-50, -45).unwrap();
        assert!(decel.is_negative());
        assert!(!decel.is_positive());

        assert!(AccelRange::new(5, 1).is_err());
        assert_eq!(decel.to_string(), "-50..=-45");
    }
}
