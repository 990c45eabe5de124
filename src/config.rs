//! Startup options for a viewer instance.

use std::path::PathBuf;

use crate::error::VocviewError;
use crate::render::{display_bytes, DisplaySize, OverlayStyle, MAX_DISPLAY_BYTES};

/// Options a [`Viewer`](crate::viewer::Viewer) is created with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Directory to list on startup, if any.
    pub initial_dir: Option<PathBuf>,
    /// Fixed display extents; missing axes keep the natural image size.
    pub display: DisplaySize,
    /// Box stroke.
    pub style: OverlayStyle,
}

impl ViewerConfig {
    /// Builds a config from raw startup values and validates it.
    pub fn new(
        initial_dir: Option<PathBuf>,
        width: Option<u32>,
        height: Option<u32>,
        thickness: u32,
    ) -> Result<Self, VocviewError> {
        let config = Self {
            initial_dir,
            display: DisplaySize { width, height },
            style: OverlayStyle::with_thickness(thickness),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero display extents, zero stroke width, and display sizes
    /// whose RGBA buffer would exceed [`MAX_DISPLAY_BYTES`].
    ///
    /// A missing axis counts as one pixel here; [`load_display_image`]
    /// checks the resolved size once the natural extent is known.
    ///
    /// [`load_display_image`]: crate::render::load_display_image
    pub fn validate(&self) -> Result<(), VocviewError> {
        if self.display.width == Some(0) {
            return Err(VocviewError::InvalidConfig(
                "display width must be positive".to_string(),
            ));
        }
        if self.display.height == Some(0) {
            return Err(VocviewError::InvalidConfig(
                "display height must be positive".to_string(),
            ));
        }
        let width = self.display.width.unwrap_or(1);
        let height = self.display.height.unwrap_or(1);
        match display_bytes(width, height) {
            Some(bytes) if bytes <= MAX_DISPLAY_BYTES => {}
            _ => {
                return Err(VocviewError::InvalidConfig(format!(
                    "display size {width}x{height} exceeds {MAX_DISPLAY_BYTES} bytes"
                )));
            }
        }
        if self.style.thickness == 0 {
            return Err(VocviewError::InvalidConfig(
                "box thickness must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.style.thickness, 1);
        assert_eq!(config.display, DisplaySize::NATURAL);
        assert!(config.initial_dir.is_none());
    }

    #[test]
    fn zero_values_are_rejected() {
        for (width, height, thickness, needle) in [
            (Some(0), None, 1, "width"),
            (None, Some(0), 1, "height"),
            (None, None, 0, "thickness"),
        ] {
            let err = ViewerConfig::new(None, width, height, thickness).unwrap_err();
            assert!(err.to_string().contains(needle), "{err}");
        }
    }

    #[test]
    fn new_keeps_values() {
        let config = ViewerConfig::new(Some(PathBuf::from("imgs")), Some(800), None, 2)
            .expect("valid config");
        assert_eq!(config.initial_dir, Some(PathBuf::from("imgs")));
        assert_eq!(config.display.width, Some(800));
        assert_eq!(config.display.height, None);
        assert_eq!(config.style.thickness, 2);
    }

    #[test]
    fn oversized_display_is_rejected() {
        let err = ViewerConfig::new(None, Some(u32::MAX), Some(u32::MAX), 1).unwrap_err();
        assert!(matches!(err, VocviewError::InvalidConfig(_)), "{err:?}");
        assert!(err.to_string().contains("exceeds"), "{err}");

        assert!(ViewerConfig::new(None, Some(u32::MAX), None, 1).is_err());
        assert!(ViewerConfig::new(None, Some(16_384), Some(16_384), 1).is_ok());
        assert!(ViewerConfig::new(None, Some(16_385), Some(16_384), 1).is_err());
    }
}
