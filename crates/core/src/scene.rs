//! Reproducible description of a rendered frame.
//!
//! A [`Scene`] captures everything needed to recreate an image: viewport
//! size, PRNG seed, frame count, parameter overrides and an optional
//! background. Two identical scenes produce bit-identical frames.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::DriftError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Srgb>,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Creates a scene with empty params, zero frames and no background.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            frames: 0,
            params: empty_params(),
            background: None,
        }
    }

    /// Checks that the scene can be rasterized: non-zero dimensions whose
    /// RGBA byte count fits in `usize`, and object-shaped params.
    pub fn validate(&self) -> Result<(), DriftError> {
        if self.width == 0 || self.height == 0 {
            return Err(DriftError::InvalidDimensions);
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(DriftError::InvalidDimensions)?;
        if !self.params.is_object() {
            return Err(DriftError::Scene("params must be a JSON object".into()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, DriftError> {
        serde_json::from_str(json).map_err(|e| DriftError::Scene(e.to_string()))
    }

    /// Reads and validates a scene file.
    pub fn load(path: &Path) -> Result<Self, DriftError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DriftError::Io(format!("{}: {e}", path.display())))?;
        let scene = Self::from_json_str(&text)?;
        scene.validate()?;
        Ok(scene)
    }
}
