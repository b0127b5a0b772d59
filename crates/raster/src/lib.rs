#![deny(unsafe_code)]
//! CPU rendering for quiet-drift.
//!
//! [`Raster`] is a software [`Surface`](quiet_drift_core::Surface) that the
//! node network can draw into without a browser. [`pixel`] turns it into
//! bytes, [`snapshot`] into PNG files, and [`scene`] runs a whole
//! [`Scene`](quiet_drift_core::Scene) against it.

pub mod pixel;
pub mod raster;
pub mod scene;

#[cfg(feature = "png")]
pub mod snapshot;

pub use raster::Raster;
pub use scene::{default_background, render_scene, SceneRenderer};
