//! Fixed visual constants for nodes, connections and signals.

use quiet_drift_core::{Glow, Rgba, Srgb, Stroke};

/// How a [`Field`](crate::Field) draws its nodes, connections and signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Radius of a node dot.
    pub node_radius: f64,
    /// Fill of a node dot.
    pub node_color: Rgba,
    /// Line drawn between connected nodes.
    pub connection: Stroke,
    /// Radius of a signal dot.
    pub signal_radius: f64,
    /// Fill of a signal dot.
    pub signal_color: Rgba,
    /// Halo set around each signal dot and reset right after it.
    pub signal_glow: Glow,
}

impl Default for Style {
    /// Grey nodes, near-invisible connection lines, green signals with a small glow.
    fn default() -> Self {
        let signal_green = Rgba::opaque(Srgb::from_rgb8(0x4c, 0xaf, 0x50));
        Self {
            node_radius: 2.0,
            node_color: Rgba::from_rgb8(150, 150, 150, 0.5),
            connection: Stroke {
                color: Rgba::from_rgb8(200, 200, 200, 0.15),
                width: 1.0,
            },
            signal_radius: 2.5,
            signal_color: signal_green,
            signal_glow: Glow {
                blur: 4.0,
                color: signal_green,
            },
        }
    }
}
