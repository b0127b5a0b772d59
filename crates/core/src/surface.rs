//! The immediate-mode 2D drawing contract animations render through.
//!
//! A [`Surface`] is deliberately small: clear, filled circles, stroked lines
//! and a glow that is set before a draw and reset right after. Adapters
//! exist for a CPU raster, the browser canvas and the in-memory
//! [`RecordingSurface`] below.

use glam::DVec2;

use crate::color::Rgba;
use crate::error::DriftError;

/// Line style for [`Surface::stroke_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line colour, alpha included.
    pub color: Rgba,
    /// Line width in surface units.
    pub width: f64,
}

/// Soft halo applied to subsequent fills until [`Surface::reset_glow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in surface units; the halo grows with it.
    pub blur: f64,
    /// Halo colour.
    pub color: Rgba,
}

/// A 2D drawing target with surface-local coordinates, origin top-left.
///
/// Every drawing call may fail (the browser canvas reports errors as
/// exceptions); callers treat a failure as fatal to the current frame only.
pub trait Surface {
    /// Width in surface units.
    fn width(&self) -> f64;

    /// Height in surface units.
    fn height(&self) -> f64;

    /// Erases the whole surface to transparent.
    fn clear(&mut self) -> Result<(), DriftError>;

    /// Fills a circle, with the active glow if one is set.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) -> Result<(), DriftError>;

    /// Strokes a straight segment from `from` to `to`.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) -> Result<(), DriftError>;

    /// Applies `glow` to every following fill until [`reset_glow`](Surface::reset_glow).
    fn set_glow(&mut self, glow: Glow) -> Result<(), DriftError>;

    /// Turns the glow off.
    fn reset_glow(&mut self) -> Result<(), DriftError>;
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The surface was erased.
    Clear,
    /// A filled circle and the glow active when it was drawn.
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
        glow: Option<Glow>,
    },
    /// A stroked segment.
    Line {
        from: DVec2,
        to: DVec2,
        stroke: Stroke,
    },
}

/// A surface that draws nothing and remembers what it was asked to draw.
///
/// `clear` drops everything recorded so far, so after a step the command
/// list describes exactly one frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    glow: Option<Glow>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Commands issued since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total number of clears over the surface's lifetime.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// The glow that would apply to the next fill, if any.
    pub fn active_glow(&self) -> Option<Glow> {
        self.glow
    }

    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Circles drawn while a glow was active.
    pub fn glowing_circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { glow: Some(_), .. }))
            .count()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) -> Result<(), DriftError> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) -> Result<(), DriftError> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            glow: self.glow,
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) -> Result<(), DriftError> {
        self.commands.push(DrawCommand::Line { from, to, stroke });
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
