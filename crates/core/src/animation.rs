//! The frame-driven `Animation` trait that drivers run.
//!
//! The trait is object-safe so a driver can hold a `Box<dyn Animation>`
//! without knowing which animation it is stepping.

use serde_json::Value;

use crate::error::DriftError;
use crate::surface::Surface;

/// A frame-driven animation that renders onto a [`Surface`].
///
/// Drivers call [`step`](Animation::step) once per display frame and
/// [`resize`](Animation::resize) between frames when the viewport changes.
/// Both take `&mut self`, so a resize can never be observed mid-step.
pub trait Animation {
    /// Advance one frame and draw it.
    ///
    /// An `Err` means this frame's output was abandoned part-way. The frame
    /// counter does not advance, but simulation state may already have
    /// partly advanced. The driver should keep scheduling frames.
    fn step(&mut self, surface: &mut dyn Surface) -> Result<(), DriftError>;

    /// Rebuild for new viewport dimensions.
    fn resize(&mut self, width: f64, height: f64);

    /// Number of frames completed since construction.
    fn frame(&self) -> u64;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing every parameter: type, range, default, description.
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use serde_json::json;

    /// Counts frames and remembers the last size it was given.
    struct Counter {
        frames: u64,
        size: (f64, f64),
    }

    impl Animation for Counter {
        fn step(&mut self, surface: &mut dyn Surface) -> Result<(), DriftError> {
            surface.clear()?;
            self.frames += 1;
            Ok(())
        }

        fn resize(&mut self, width: f64, height: f64) {
            self.size = (width, height);
        }

        fn frame(&self) -> u64 {
            self.frames
        }

        fn params(&self) -> Value {
            json!({"frames": self.frames})
        }

        fn param_schema(&self) -> Value {
            json!({"frames": {"type": "integer", "default": 0}})
        }
    }

    #[test]
    fn animation_trait_is_object_safe() {
        let mut anim: Box<dyn Animation> = Box::new(Counter {
            frames: 0,
            size: (0.0, 0.0),
        });
        let mut surface = RecordingSurface::new(8.0, 8.0);
        anim.step(&mut surface).unwrap();
        anim.step(&mut surface).unwrap();
        assert_eq!(anim.frame(), 2);
        assert_eq!(anim.params()["frames"], 2);
        assert_eq!(surface.clear_count(), 2);
    }

    #[test]
    fn resize_through_trait_object() {
        let mut counter = Counter {
            frames: 0,
            size: (0.0, 0.0),
        };
        let anim: &mut dyn Animation = &mut counter;
        anim.resize(640.0, 480.0);
        assert_eq!(counter.size, (640.0, 480.0));
    }
}
