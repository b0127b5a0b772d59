//! Host-agnostic frame loop bookkeeping.
//!
//! Hosts deliver resize notifications whenever they like, but an animation
//! must only ever see them between frames. [`FrameDriver`] queues the
//! latest requested size and applies it at the start of the next tick,
//! and it turns a failed step into a dropped frame instead of a dead loop.
//!
//! The host scheduler must invoke ticks single-flight (one completes
//! before the next begins), which display-refresh callbacks guarantee.

use log::warn;

use crate::animation::Animation;
use crate::error::DriftError;
use crate::surface::Surface;

/// What happened during one [`FrameDriver::tick`].
#[derive(Debug)]
pub enum FrameOutcome {
    /// The step completed and the frame is on the surface.
    Rendered,
    /// The step failed; the frame was abandoned and the loop goes on.
    Dropped(DriftError),
}

/// Runs an [`Animation`] one tick at a time on behalf of a host loop.
pub struct FrameDriver<A> {
    animation: A,
    pending_resize: Option<(f64, f64)>,
    dropped: u64,
}

impl<A: Animation> FrameDriver<A> {
    /// Wraps `animation` with no resize pending.
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            pending_resize: None,
            dropped: 0,
        }
    }

    /// The driven animation.
    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Queues a resize for the next tick. Later requests replace earlier
    /// ones, so a burst of resize events costs a single rebuild.
    pub fn request_resize(&mut self, width: f64, height: f64) {
        self.pending_resize = Some((width, height));
    }

    /// Whether a resize is waiting for the next tick.
    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_some()
    }

    /// Frames abandoned because the step failed.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped
    }

    /// Applies any queued resize, then steps the animation once.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> FrameOutcome {
        if let Some((width, height)) = self.pending_resize.take() {
            self.animation.resize(width, height);
        }
        match self.animation.step(surface) {
            Ok(()) => FrameOutcome::Rendered,
            Err(e) => {
                self.dropped += 1;
                warn!("dropped frame {}: {e}", self.animation.frame());
                FrameOutcome::Dropped(e)
            }
        }
    }
}
