//! Pixel-difference gap location.
//!
//! The reference image is the full puzzle background; the gapped image is the
//! same background with the piece cut out. Scanning column by column, the
//! first column holding a pixel that differs beyond the tolerance is where the
//! gap starts.

use crate::error::{Result, SolverError};
use image::{GenericImageView, Pixel, Rgb};
use slidepass_core::{GapOffset, SolverConfig, Tolerance};
use tracing::debug;

/// Locates the horizontal offset of the gap between two renderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapLocator {
    tolerance: Tolerance,
}

impl GapLocator {
    /// Create a locator with an explicit tolerance.
    #[must_use]
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Create a locator from the `[solver]` configuration section.
    #[must_use]
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.tolerance)
    }

    /// Tolerance used for comparisons.
    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Locate the gap. See [`locate_gap`].
    pub fn locate<A, B>(&self, reference: &A, gapped: &B) -> Result<GapOffset>
    where
        A: GenericImageView,
        A::Pixel: Pixel<Subpixel = u8>,
        B: GenericImageView,
        B::Pixel: Pixel<Subpixel = u8>,
    {
        locate_gap(reference, gapped, self.tolerance)
    }
}

/// Whether two pixels are within `tolerance` on every color channel.
///
/// Alpha, if present, is not compared.
#[must_use]
pub fn is_similar(a: Rgb<u8>, b: Rgb<u8>, tolerance: Tolerance) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .all(|(&lhs, &rhs)| tolerance.accepts(lhs, rhs))
}

/// Return the smallest column `x` for which some row `y` holds a dissimilar pixel pair.
///
/// Columns are scanned left to right and rows top to bottom; the scan stops at
/// the first dissimilar pixel.
///
/// # Errors
/// - [`SolverError::DimensionMismatch`] if the images differ in size
/// - [`SolverError::NoDivergenceFound`] if every pixel pair is similar
pub fn locate_gap<A, B>(reference: &A, gapped: &B, tolerance: Tolerance) -> Result<GapOffset>
where
    A: GenericImageView,
    A::Pixel: Pixel<Subpixel = u8>,
    B: GenericImageView,
    B::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = reference.dimensions();
    if gapped.dimensions() != (width, height) {
        return Err(SolverError::DimensionMismatch {
            reference: (width, height),
            gapped: gapped.dimensions(),
        });
    }

    for x in 0..width {
        let diverges = (0..height).any(|y| {
            let lhs = reference.get_pixel(x, y).to_rgb();
            let rhs = gapped.get_pixel(x, y).to_rgb();
            !is_similar(lhs, rhs, tolerance)
        });

        if diverges {
            debug!(column = x, %tolerance, "located gap");
            return Ok(GapOffset::new(x));
        }
    }

    debug!(width, height, %tolerance, "images never diverge");
    Err(SolverError::NoDivergenceFound { width, height })
}
