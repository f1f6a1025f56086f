//! Atlas composition settings.

use crate::atlas::gutter::validate_gutter;
use crate::atlas::layout::{atlas_dimensions, check_cell_size};
use crate::error::Result;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default cell size when none is given.
pub const DEFAULT_CELL_SIZE: u32 = 128;

/// Default gutter width in pixels.
pub const DEFAULT_GUTTER_SIZE: u32 = 2;

/// Transparent border reserved around each face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gutter {
    pub enabled: bool,
    /// Border width in pixels on each side.
    pub size: u32,
}

impl Default for Gutter {
    fn default() -> Self {
        Self {
            enabled: false,
            size: DEFAULT_GUTTER_SIZE,
        }
    }
}

impl Gutter {
    /// An enabled gutter of the given width.
    pub fn new(size: u32) -> Self {
        Self {
            enabled: true,
            size,
        }
    }

    /// Width actually applied: zero when disabled.
    pub fn effective_size(&self) -> u32 {
        if self.enabled {
            self.size
        } else {
            0
        }
    }
}

/// Resampling filter used when resizing faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Command-line values layered over a loaded configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub cell_size: Option<u32>,
    /// Enables the gutter. Never disables one set in a file.
    pub gutter: bool,
    /// Width to use if the gutter is enabled.
    pub gutter_size: Option<u32>,
}

/// Main atlas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Width and height of one grid cell in pixels.
    pub cell_size: u32,
    /// Optional transparent inset around each face.
    pub gutter: Gutter,
    /// RGBA fill for the six unused cells.
    pub background: [u8; 4],
    /// Filter used to normalize faces to the cell size.
    pub filter: ResizeFilter,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            gutter: Gutter::default(),
            background: [0, 0, 0, 0],
            filter: ResizeFilter::default(),
        }
    }
}

impl AtlasConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_gutter(mut self, gutter: Gutter) -> Self {
        self.gutter = gutter;
        self
    }

    pub fn with_background(mut self, background: [u8; 4]) -> Self {
        self.background = background;
        self
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Apply command-line overrides on top of this configuration.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(cell_size) = overrides.cell_size {
            self.cell_size = cell_size;
        }
        if overrides.gutter {
            self.gutter.enabled = true;
        }
        if let Some(size) = overrides.gutter_size {
            self.gutter.size = size;
        }
        self
    }

    /// Load `path` (or start from defaults with `default_cell_size`), apply
    /// overrides, then validate.
    ///
    /// A file without `cell_size` uses [`DEFAULT_CELL_SIZE`], not `default_cell_size`.
    pub fn resolve(
        path: Option<&Path>,
        default_cell_size: u32,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default().with_cell_size(default_cell_size),
        };
        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Check cell size and gutter geometry. Does not touch the filesystem.
    pub fn validate(&self) -> Result<()> {
        check_cell_size(self.cell_size)?;
        validate_gutter(self.cell_size, self.gutter.effective_size())
    }

    /// Atlas dimensions produced by this configuration.
    pub fn atlas_size(&self) -> Result<(u32, u32)> {
        atlas_dimensions(self.cell_size)
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` color.
pub fn parse_hex_color(s: &str) -> Option<[u8; 4]> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some([channel(0)?, channel(2)?, channel(4)?, 255]),
        8 => Some([channel(0)?, channel(2)?, channel(4)?, channel(6)?]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;

    #[test]
    fn test_defaults() {
        let config = AtlasConfig::default();
        assert_eq!(config.cell_size, 128);
        assert!(!config.gutter.enabled);
        assert_eq!(config.gutter.size, 2);
        assert_eq!(config.gutter.effective_size(), 0);
        assert_eq!(config.background[3], 0);
        assert_eq!(config.atlas_size().unwrap(), (512, 384));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let config = AtlasConfig::default().with_cell_size(0);
        assert!(matches!(config.validate(), Err(AtlasError::InvalidCellSize(0))));
    }

    #[test]
    fn test_huge_cell_size_rejected() {
        let config = AtlasConfig::default().with_cell_size(1 << 30);
        assert!(matches!(config.validate(), Err(AtlasError::InvalidCellSize(_))));
        assert!(config.atlas_size().is_err());
    }

    #[test]
    fn test_oversized_gutter_rejected() {
        let config = AtlasConfig::default()
            .with_cell_size(100)
            .with_gutter(Gutter::new(64));
        assert!(matches!(
            config.validate(),
            Err(AtlasError::InvalidGutter {
                gutter_size: 64,
                cell_size: 100
            })
        ));
    }

    #[test]
    fn test_disabled_gutter_ignores_size() {
        let config = AtlasConfig::default().with_cell_size(8).with_gutter(Gutter {
            enabled: false,
            size: 64,
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: AtlasConfig =
            serde_json::from_str(r#"{"cell_size": 64, "gutter": {"enabled": true}, "filter": "nearest"}"#)
                .unwrap();
        assert_eq!(config.cell_size, 64);
        assert_eq!(config.gutter, Gutter::new(2));
        assert_eq!(config.filter, ResizeFilter::Nearest);
        assert_eq!(config.background, [0, 0, 0, 0]);
    }

    fn write_config(dir: &Path, json: &str) -> std::path::PathBuf {
        let path = dir.join("atlas.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_resolve_without_file_uses_command_default() {
        let config = AtlasConfig::resolve(None, 256, ConfigOverrides::default()).unwrap();
        assert_eq!(config.cell_size, 256);
        assert!(!config.gutter.enabled);
    }

    #[test]
    fn test_resolve_file_cell_size_applies() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"cell_size": 64}"#);
        let config =
            AtlasConfig::resolve(Some(path.as_path()), 256, ConfigOverrides::default()).unwrap();
        assert_eq!(config.cell_size, 64);

        let path = write_config(dir.path(), r#"{"filter": "nearest"}"#);
        let config =
            AtlasConfig::resolve(Some(path.as_path()), 256, ConfigOverrides::default()).unwrap();
        assert_eq!(config.cell_size, DEFAULT_CELL_SIZE);
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{"cell_size": 64, "gutter": {"enabled": false, "size": 4}}"#,
        );
        let overrides = ConfigOverrides {
            cell_size: Some(32),
            gutter: true,
            gutter_size: Some(3),
        };
        let config = AtlasConfig::resolve(Some(path.as_path()), 256, overrides).unwrap();
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.gutter, Gutter::new(3));
    }

    #[test]
    fn test_gutter_size_alone_keeps_gutter_disabled() {
        let overrides = ConfigOverrides {
            gutter_size: Some(8),
            ..Default::default()
        };
        let config = AtlasConfig::resolve(None, 128, overrides).unwrap();
        assert!(!config.gutter.enabled);
        assert_eq!(config.gutter.size, 8);
        assert_eq!(config.gutter.effective_size(), 0);
    }

    #[test]
    fn test_file_gutter_survives_missing_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"gutter": {"enabled": true, "size": 5}}"#);
        let config =
            AtlasConfig::resolve(Some(path.as_path()), 128, ConfigOverrides::default()).unwrap();
        assert_eq!(config.gutter, Gutter::new(5));
    }

    #[test]
    fn test_resolve_validates_merged_config() {
        let overrides = ConfigOverrides {
            cell_size: Some(10),
            gutter: true,
            gutter_size: Some(5),
        };
        assert!(matches!(
            AtlasConfig::resolve(None, 128, overrides),
            Err(AtlasError::InvalidGutter { .. })
        ));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0, 255]));
        assert_eq!(parse_hex_color("00ff0080"), Some([0, 255, 0, 128]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
