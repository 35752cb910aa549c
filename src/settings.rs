//! Document-wide color and raster settings.
//!
//! SVG has no notion of a document color mode or of raster-effects
//! settings, so they are carried as `data-*` attributes on the root element.

use std::fmt;
use std::str::FromStr;

use crate::ast::Element;

pub const COLOR_MODE_ATTR: &str = "data-color-mode";
pub const RASTER_COLOR_MODEL_ATTR: &str = "data-raster-color-model";
pub const RASTER_RESOLUTION_ATTR: &str = "data-raster-resolution";

/// Screen resolution assumed when a document does not say otherwise.
pub const DEFAULT_RASTER_RESOLUTION: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Rgb,
    Cmyk,
}

/// Color model used when effects are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterColorModel {
    #[default]
    Rgb,
    Cmyk,
    Grayscale,
    Bitmap,
}

impl FromStr for ColorMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "cmyk" => Ok(Self::Cmyk),
            _ => Err(()),
        }
    }
}

impl FromStr for RasterColorModel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "cmyk" => Ok(Self::Cmyk),
            "grayscale" => Ok(Self::Grayscale),
            "bitmap" => Ok(Self::Bitmap),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rgb => "rgb",
            Self::Cmyk => "cmyk",
        })
    }
}

impl fmt::Display for RasterColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rgb => "rgb",
            Self::Cmyk => "cmyk",
            Self::Grayscale => "grayscale",
            Self::Bitmap => "bitmap",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentSettings {
    pub color_mode: ColorMode,
    pub raster_color_model: RasterColorModel,
    /// Raster effects resolution in ppi.
    pub raster_resolution: f64,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            raster_color_model: RasterColorModel::default(),
            raster_resolution: DEFAULT_RASTER_RESOLUTION,
        }
    }
}

impl DocumentSettings {
    /// Read settings from the root `<svg>` element. Unrecognized values fall
    /// back to the defaults with a warning.
    pub fn from_root(root: &Element) -> Self {
        let mut settings = Self::default();
        if let Some(value) = root.get_attr(COLOR_MODE_ATTR) {
            match value.parse() {
                Ok(mode) => settings.color_mode = mode,
                Err(()) => log::warn!("Ignoring unknown {}={:?}", COLOR_MODE_ATTR, value),
            }
        }
        if let Some(value) = root.get_attr(RASTER_COLOR_MODEL_ATTR) {
            match value.parse() {
                Ok(model) => settings.raster_color_model = model,
                Err(()) => log::warn!("Ignoring unknown {}={:?}", RASTER_COLOR_MODEL_ATTR, value),
            }
        }
        if let Some(value) = root.get_attr(RASTER_RESOLUTION_ATTR) {
            match value.trim().parse::<f64>() {
                Ok(ppi) if ppi.is_finite() && ppi > 0.0 => settings.raster_resolution = ppi,
                _ => log::warn!("Ignoring invalid {}={:?}", RASTER_RESOLUTION_ATTR, value),
            }
        }
        settings
    }

    /// Write the settings that differ from what `root` already says.
    ///
    /// Attributes the source never had are only added when the value is no
    /// longer the default, so an untouched document keeps its root as is.
    pub fn write_to(&self, root: &mut Element) {
        let source = Self::from_root(root);
        if source.color_mode != self.color_mode {
            root.set_attr(COLOR_MODE_ATTR, self.color_mode.to_string());
        }
        if source.raster_color_model != self.raster_color_model {
            root.set_attr(RASTER_COLOR_MODEL_ATTR, self.raster_color_model.to_string());
        }
        if source.raster_resolution != self.raster_resolution {
            root.set_attr(
                RASTER_RESOLUTION_ATTR,
                crate::path::format_coord(self.raster_resolution, None),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let root = Element::new("svg");
        assert_eq!(DocumentSettings::from_root(&root), DocumentSettings::default());
    }

    #[test]
    fn test_reads_root_attributes() {
        let mut root = Element::new("svg");
        root.set_attr(COLOR_MODE_ATTR, "CMYK");
        root.set_attr(RASTER_COLOR_MODEL_ATTR, "grayscale");
        root.set_attr(RASTER_RESOLUTION_ATTR, "300");
        let settings = DocumentSettings::from_root(&root);
        assert_eq!(settings.color_mode, ColorMode::Cmyk);
        assert_eq!(settings.raster_color_model, RasterColorModel::Grayscale);
        assert_eq!(settings.raster_resolution, 300.0);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut root = Element::new("svg");
        root.set_attr(RASTER_COLOR_MODEL_ATTR, "sepia");
        root.set_attr(RASTER_RESOLUTION_ATTR, "-5");
        assert_eq!(DocumentSettings::from_root(&root), DocumentSettings::default());
    }

    #[test]
    fn test_write_only_changes() {
        let mut root = Element::new("svg");
        DocumentSettings::default().write_to(&mut root);
        assert!(root.attributes.is_empty());

        let settings = DocumentSettings {
            raster_color_model: RasterColorModel::Grayscale,
            raster_resolution: 350.0,
            ..DocumentSettings::default()
        };
        settings.write_to(&mut root);
        assert_eq!(root.get_attr(RASTER_COLOR_MODEL_ATTR), Some("grayscale"));
        assert_eq!(root.get_attr(RASTER_RESOLUTION_ATTR), Some("350"));
        assert_eq!(root.get_attr(COLOR_MODE_ATTR), None);
    }
}
