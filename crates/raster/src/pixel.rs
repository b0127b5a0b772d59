//! Conversion from a [`Raster`] to 8-bit pixel buffers.
//!
//! Always available (no feature gate) so the PNG path and any embedding
//! that only wants raw bytes share one conversion.

use quiet_drift_core::Srgb;

use crate::raster::Raster;

/// Composites the raster onto an opaque `background` and returns RGBA8
/// bytes (alpha always 255), `width * height * 4` long.
pub fn to_rgba8(raster: &Raster, background: Srgb) -> Vec<u8> {
    let bg = [background.r, background.g, background.b];
    raster
        .pixels()
        .iter()
        .flat_map(|&[r, g, b, a]| {
            let over = |src: f64, dst: f64| {
                ((src + dst * (1.0 - a)).clamp(0.0, 1.0) * 255.0).round() as u8
            };
            [over(r, bg[0]), over(g, bg[1]), over(b, bg[2]), 255u8]
        })
        .collect()
}
