//! Decoding captured puzzle images and dumping them for inspection.
//!
//! Canvas captures arrive as `data:image/png;base64,...` strings; files on
//! disk are plain PNGs. Both are normalized to `RgbImage`.

use crate::error::{Result, SolverError};
use base64::Engine as _;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decode a base64 image data URI such as the output of `canvas.toDataURL()`.
pub fn decode_data_uri(uri: &str) -> Result<RgbImage> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| SolverError::InvalidDataUri("missing `data:` scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SolverError::InvalidDataUri("missing `,` separator".to_string()))?;

    let media_type = header.strip_suffix(";base64").ok_or_else(|| {
        SolverError::InvalidDataUri(format!("payload is not base64 encoded: {header}"))
    })?;
    if !media_type.starts_with("image/") {
        return Err(SolverError::InvalidDataUri(format!(
            "unsupported media type: {media_type}"
        )));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| SolverError::InvalidDataUri(format!("base64 decode failed: {e}")))?;

    decode_bytes(&bytes)
}

/// Decode encoded image bytes (PNG) into RGB, dropping any alpha channel.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbImage> {
    Ok(image::load_from_memory(bytes)?.to_rgb8())
}

/// Load an image file from disk as RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    debug!("Loading image from {}", path.display());
    Ok(image::open(path)?.to_rgb8())
}

/// Write the reference and gapped images into `dir` as `reference.png` and `gapped.png`.
///
/// Creates `dir` if needed and returns the written paths.
pub fn save_debug_pair(
    dir: &Path,
    reference: &RgbImage,
    gapped: &RgbImage,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let reference_path = dir.join("reference.png");
    let gapped_path = dir.join("gapped.png");
    reference.save(&reference_path)?;
    gapped.save(&gapped_path)?;

    debug!("Saved debug images to {}", dir.display());
    Ok((reference_path, gapped_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, Rgb};
    use tempfile::TempDir;

    fn sample() -> RgbImage {
        let mut image = RgbImage::from_pixel(8, 4, Rgb([10, 200, 30]));
        image.put_pixel(5, 2, Rgb([255, 0, 0]));
        image
    }

    fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .expect("encode png");
        out
    }

    #[test]
    fn test_decode_canvas_data_uri() {
        let image = sample();
        let payload = base64::engine::general_purpose::STANDARD.encode(png_bytes(&image));
        let uri = format!("data:image/png;base64,{payload}");

        let decoded = decode_data_uri(&uri).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decode_data_uri_rejects_malformed_input() {
        assert!(matches!(
            decode_data_uri("image/png;base64,AAAA"),
            Err(SolverError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64"),
            Err(SolverError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:text/plain;base64,AAAA"),
            Err(SolverError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png,rawbytes"),
            Err(SolverError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64,!!!"),
            Err(SolverError::InvalidDataUri(_))
        ));
    }

    #[test]
    fn test_decode_bytes_rejects_garbage() {
        assert!(matches!(
            decode_bytes(b"not a png"),
            Err(SolverError::Image(_))
        ));
    }

    #[test]
    fn test_save_debug_pair() {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = tmp.path().join("debug");
        let reference = sample();
        let gapped = RgbImage::from_pixel(8, 4, Rgb([0, 0, 0]));

        let (reference_path, gapped_path) =
            save_debug_pair(&dir, &reference, &gapped).expect("save pair");

        assert_eq!(load_rgb(&reference_path).unwrap(), reference);
        assert_eq!(load_rgb(&gapped_path).unwrap(), gapped);
    }
}
