//! Error types for the quiet-drift core.

use thiserror::Error;

/// Errors produced while building, stepping, or rendering an animation.
#[derive(Debug, Error)]
pub enum DriftError {
    /// Width or height was zero (or overflowed) where a raster is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The drawing surface rejected a call. Fatal to the current frame only.
    #[error("surface error: {0}")]
    Surface(String),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// A scene description was malformed.
    #[error("invalid scene: {0}")]
    Scene(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = DriftError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = DriftError::InvalidColor("bad hex".into()).to_string();
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn surface_error_includes_cause() {
        let msg = DriftError::Surface("arc failed".into()).to_string();
        assert!(msg.starts_with("surface error"), "unexpected prefix: {msg}");
        assert!(msg.contains("arc failed"), "missing cause in: {msg}");
    }

    #[test]
    fn io_and_scene_errors_include_message() {
        assert!(DriftError::Io("disk full".into())
            .to_string()
            .contains("disk full"));
        assert!(DriftError::Scene("missing width".into())
            .to_string()
            .contains("missing width"));
    }

    #[test]
    fn drift_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DriftError>();
    }

    #[test]
    fn drift_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<DriftError>();
    }
}
