//! Map view configuration.
//!
//! Values come from an optional configuration file (any format the `config`
//! crate recognises by extension) overlaid with `MESH_MAP_*` environment
//! variables. Every field has a default, so an absent file is fine.

use crate::viewport::{InitialView, Viewport};
use common::error::{ConfigError, ConfigResult};
use common::geo::LngLat;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_CENTER: LngLat = LngLat::new(-73.9595798, 40.7031809);
pub const DEFAULT_PADDING_DIVISOR: f64 = 10.0;
pub const DEFAULT_TITLE_SUFFIX: &str = "Map - NYC Mesh";
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

const ENV_PREFIX: &str = "MESH_MAP";
const MAX_ZOOM: u8 = 22;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    /// Zoom level before any selection moves the camera
    pub default_zoom: u8,
    /// `[lng, lat]` the map opens on
    pub default_center: LngLat,
    /// Camera padding is the viewport width divided by this
    pub padding_divisor: f64,
    /// Appended to the selected node ids in the document title
    pub title_suffix: String,
    /// Width assumed by hosts that do not report one
    pub viewport_width: f64,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            default_center: DEFAULT_CENTER,
            padding_divisor: DEFAULT_PADDING_DIVISOR,
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

impl MapViewConfig {
    /// Load from an optional file plus environment overrides, then validate.
    pub fn load(config_file: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.padding_divisor > 0.0) {
            return Err(ConfigError::InvalidPaddingDivisor(self.padding_divisor));
        }
        let LngLat { lng, lat } = self.default_center;
        if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
            return Err(ConfigError::InvalidCenter { lat, lng });
        }
        if self.default_zoom > MAX_ZOOM {
            return Err(ConfigError::InvalidZoom(self.default_zoom));
        }
        Ok(())
    }

    pub fn initial_view(&self) -> InitialView {
        InitialView {
            center: self.default_center,
            zoom: self.default_zoom,
        }
    }

    pub fn viewport(&self, width: f64) -> Viewport {
        Viewport {
            width,
            padding_divisor: self.padding_divisor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MapViewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_zoom, 13);
        assert_eq!(config.viewport(1000.0).padding(), 100.0);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let config = MapViewConfig::load(None).unwrap();
        assert_eq!(config.title_suffix, DEFAULT_TITLE_SUFFIX);
    }

    #[test]
    fn load_yaml_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.yaml");
        std::fs::write(
            &path,
            "padding_divisor: 8\ntitle_suffix: Map - Test Mesh\ndefault_center: [-0.1, 51.5]\n",
        )
        .unwrap();

        let config = MapViewConfig::load(Some(&path)).unwrap();
        assert_eq!(config.padding_divisor, 8.0);
        assert_eq!(config.title_suffix, "Map - Test Mesh");
        assert_eq!(config.default_center, LngLat::new(-0.1, 51.5));
        assert_eq!(config.default_zoom, DEFAULT_ZOOM);
        assert_eq!(
            config.initial_view(),
            InitialView {
                center: LngLat::new(-0.1, 51.5),
                zoom: 13,
            }
        );
    }

    #[test]
    fn load_missing_file_fails() {
        let result = MapViewConfig::load(Some(Path::new("nonexistent.yaml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn zero_padding_divisor_rejected() {
        let config = MapViewConfig {
            padding_divisor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPaddingDivisor(_))
        ));
    }

    #[test]
    fn out_of_range_center_rejected() {
        let config = MapViewConfig {
            default_center: LngLat::new(-200.0, 40.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCenter { .. })
        ));
    }
}
