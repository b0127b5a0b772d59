//! Running a [`Scene`] to completion on a [`Raster`].

use log::{debug, info};
use quiet_drift_core::{Animation, DriftError, Scene, Srgb, Surface};
use quiet_drift_network::Field;

use crate::raster::Raster;

/// Background used when a scene does not name one.
pub fn default_background() -> Srgb {
    Srgb::from_rgb8(0x10, 0x14, 0x18)
}

/// A validated scene bound to its Field and raster.
pub struct SceneRenderer {
    field: Field,
    raster: Raster,
    background: Srgb,
}

impl SceneRenderer {
    pub fn new(scene: &Scene) -> Result<Self, DriftError> {
        scene.validate()?;
        let raster = Raster::new(scene.width as usize, scene.height as usize)?;
        let field = Field::from_json(raster.width(), raster.height(), scene.seed, &scene.params);
        debug!(
            "scene {}x{} seed {} with {} nodes",
            scene.width,
            scene.height,
            scene.seed,
            field.nodes().len()
        );
        Ok(Self {
            field,
            raster,
            background: scene.background.unwrap_or_else(default_background),
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn background(&self) -> Srgb {
        self.background
    }

    /// Renders one frame.
    pub fn step(&mut self) -> Result<(), DriftError> {
        self.field.step(&mut self.raster)
    }

    /// Renders `frames` frames, handing every `every`-th one (1-based) to
    /// `sink`. `every` of 0 is treated as 1.
    pub fn run(
        &mut self,
        frames: usize,
        every: usize,
        mut sink: impl FnMut(usize, &Raster) -> Result<(), DriftError>,
    ) -> Result<(), DriftError> {
        let every = every.max(1);
        for n in 1..=frames {
            self.step()?;
            if n % every == 0 {
                sink(n, &self.raster)?;
            }
        }
        info!(
            "rendered {frames} frames, {} signals in flight",
            self.field.signals().len()
        );
        Ok(())
    }
}

/// Renders every frame of `scene` and returns the raster holding the last one.
///
/// A scene with zero frames still renders once so the output is never blank.
pub fn render_scene(scene: &Scene) -> Result<Raster, DriftError> {
    let mut renderer = SceneRenderer::new(scene)?;
    renderer.run(scene.frames.max(1), usize::MAX, |_, _| Ok(()))?;
    Ok(renderer.raster)
}
