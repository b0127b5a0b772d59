//! Software implementation of [`Surface`] over an RGBA buffer.
//!
//! Pixels are stored premultiplied in f64 and composited source-over.
//! Shapes are antialiased by analytic coverage: a pixel's coverage is how
//! far its centre lies inside the shape's edge, clamped to [0, 1].

use glam::DVec2;
use quiet_drift_core::{DriftError, Glow, Rgba, Stroke, Surface};

/// Gaussian sigma per unit of glow blur, as canvas `shadowBlur` defines it.
const BLUR_TO_SIGMA: f64 = 0.5;
/// Halo cut-off in sigmas.
const HALO_EXTENT: f64 = 3.0;

/// A CPU drawing surface of `width` x `height` pixels.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<[f64; 4]>,
    glow: Option<Glow>,
}

impl Raster {
    /// Creates a transparent raster.
    ///
    /// Returns `DriftError::InvalidDimensions` for a zero dimension or a
    /// pixel count that overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, DriftError> {
        if width == 0 || height == 0 {
            return Err(DriftError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .filter(|n| n.checked_mul(4).is_some())
            .ok_or(DriftError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![[0.0; 4]; len],
            glow: None,
        })
    }

    pub fn pixel_width(&self) -> usize {
        self.width
    }

    pub fn pixel_height(&self) -> usize {
        self.height
    }

    /// Premultiplied RGBA at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f64; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Row-major premultiplied pixels.
    pub fn pixels(&self) -> &[[f64; 4]] {
        &self.pixels
    }

    /// True when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p[3] == 0.0)
    }

    /// Source-over composite of `color` at `coverage` onto one pixel.
    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f64) {
        let a = color.alpha * coverage.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let src = [color.rgb.r * a, color.rgb.g * a, color.rgb.b * a, a];
        let dst = &mut self.pixels[y * self.width + x];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = s + *d * (1.0 - a);
        }
    }

    /// Visits every pixel whose centre lies in the box `[min, max]`,
    /// clipped to the raster.
    fn for_pixels_in(&mut self, min: DVec2, max: DVec2, mut f: impl FnMut(&mut Self, usize, usize, DVec2)) {
        if !(min.is_finite() && max.is_finite()) {
            return;
        }
        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let centre = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                f(self, x, y, centre);
            }
        }
    }

    fn draw_halo(&mut self, center: DVec2, radius: f64, glow: Glow) {
        let sigma = glow.blur * BLUR_TO_SIGMA;
        if sigma <= 0.0 {
            return;
        }
        let reach = radius + HALO_EXTENT * sigma;
        let span = DVec2::splat(reach);
        self.for_pixels_in(center - span, center + span, |r, x, y, p| {
            let outside = (p.distance(center) - radius).max(0.0);
            if outside > HALO_EXTENT * sigma {
                return;
            }
            let falloff = (-(outside * outside) / (2.0 * sigma * sigma)).exp();
            r.blend(x, y, glow.color, falloff);
        });
    }
}

impl Surface for Raster {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn clear(&mut self) -> Result<(), DriftError> {
        self.pixels.fill([0.0; 4]);
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) -> Result<(), DriftError> {
        if let Some(glow) = self.glow {
            self.draw_halo(center, radius, glow);
        }
        let span = DVec2::splat(radius + 1.0);
        self.for_pixels_in(center - span, center + span, |r, x, y, p| {
            let coverage = radius + 0.5 - p.distance(center);
            r.blend(x, y, color, coverage);
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) -> Result<(), DriftError> {
        let half = stroke.width / 2.0;
        let pad = DVec2::splat(half + 1.0);
        let min = from.min(to) - pad;
        let max = from.max(to) + pad;
        self.for_pixels_in(min, max, |r, x, y, p| {
            let coverage = half + 0.5 - distance_to_segment(p, from, to);
            r.blend(x, y, stroke.color, coverage);
        });
        Ok(())
    }

    fn set_glow(&mut self, glow: Glow) -> Result<(), DriftError> {
        self.glow = Some(glow);
        Ok(())
    }

    fn reset_glow(&mut self) -> Result<(), DriftError> {
        self.glow = None;
        Ok(())
    }
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
