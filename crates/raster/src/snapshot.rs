//! PNG output of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so embeddings that only need
//! raw bytes do not pull in the `image` crate.

use std::path::Path;

use quiet_drift_core::{DriftError, Srgb};

use crate::pixel::to_rgba8;
use crate::raster::Raster;

/// Writes the raster composited onto `background` as a PNG file.
///
/// Returns `DriftError::InvalidDimensions` if the raster does not fit
/// `u32` dimensions, or `DriftError::Io` on write failure.
pub fn write_png(raster: &Raster, background: Srgb, path: &Path) -> Result<(), DriftError> {
    let w = u32::try_from(raster.pixel_width()).map_err(|_| DriftError::InvalidDimensions)?;
    let h = u32::try_from(raster.pixel_height()).map_err(|_| DriftError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, to_rgba8(raster, background))
        .ok_or_else(|| DriftError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| DriftError::Io(format!("{}: {e}", path.display())))
}
