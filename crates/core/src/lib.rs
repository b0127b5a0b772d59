#![deny(unsafe_code)]
//! Core types and traits for the quiet-drift ambient animation.
//!
//! Provides the [`Animation`] trait drivers step once per frame, the
//! [`Surface`] drawing contract, [`FrameDriver`] loop bookkeeping, color
//! types (`Srgb`, `Rgba`), the `Xorshift64` PRNG, the [`Scene`] description
//! and parameter helpers.

pub mod animation;
pub mod color;
pub mod driver;
pub mod error;
pub mod params;
pub mod prng;
pub mod scene;
pub mod surface;

pub use animation::Animation;
pub use color::{Rgba, Srgb};
pub use driver::{FrameDriver, FrameOutcome};
pub use error::DriftError;
pub use glam::DVec2;
pub use prng::Xorshift64;
pub use scene::Scene;
pub use surface::{DrawCommand, Glow, RecordingSurface, Stroke, Surface};
