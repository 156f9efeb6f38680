use std::path::{Path, PathBuf};

use abysspath_common::{Color, LineStyle};
use abysspath_render::ConnectionLimits;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LINE_COLOR: Color = Color::rgba(0, 200, 0, 150);

/// Errors from loading or validating overlay settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("unsupported settings format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// User-facing overlay configuration.
///
/// Widths are in pixels, distances in grid units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    pub enable: bool,
    pub map_color: Color,
    pub map_width: u32,
    pub world_color: Color,
    pub world_width: u32,
    pub max_world_draw_distance: u32,
    pub max_connection_distance: u32,
    pub draw_map: bool,
    pub draw_world: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            enable: false,
            map_color: DEFAULT_LINE_COLOR,
            map_width: 3,
            world_color: DEFAULT_LINE_COLOR,
            world_width: 8,
            max_world_draw_distance: 160,
            max_connection_distance: 100,
            draw_map: true,
            draw_world: false,
        }
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), SettingsError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl OverlaySettings {
    /// Load settings from a `.yaml`, `.yml` or `.json` file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(
            path = %path.display(),
            enable = settings.enable,
            "loaded overlay settings"
        );
        Ok(settings)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("map_width", self.map_width, 1, 100)?;
        check_range("world_width", self.world_width, 1, 100)?;
        check_range("max_world_draw_distance", self.max_world_draw_distance, 1, 600)?;
        check_range("max_connection_distance", self.max_connection_distance, 1, 1000)?;
        Ok(())
    }

    pub fn map_style(&self) -> LineStyle {
        LineStyle::new(self.map_width as f32, self.map_color)
    }

    pub fn world_style(&self) -> LineStyle {
        LineStyle::new(self.world_width as f32, self.world_color)
    }

    pub fn limits(&self) -> ConnectionLimits {
        ConnectionLimits {
            max_connection_distance: self.max_connection_distance as f32,
            max_world_distance: self.max_world_draw_distance as f32,
            draw_map: self.draw_map,
            draw_world: self.draw_world,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let s = OverlaySettings::default();
        assert!(s.validate().is_ok());
        assert!(!s.enable);
        assert_eq!(s.map_style(), LineStyle::new(3.0, DEFAULT_LINE_COLOR));
        assert_eq!(s.world_style().width, 8.0);
    }

    #[test]
    fn limits_mirror_settings() {
        let s = OverlaySettings {
            max_connection_distance: 42,
            max_world_draw_distance: 300,
            draw_world: true,
            ..OverlaySettings::default()
        };
        let l = s.limits();
        assert_eq!(l.max_connection_distance, 42.0);
        assert_eq!(l.max_world_distance, 300.0);
        assert!(l.draw_map && l.draw_world);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let s = OverlaySettings::from_yaml_str("enable: true\nworld_width: 12\n").unwrap();
        assert!(s.enable);
        assert_eq!(s.world_width, 12);
        assert_eq!(s.map_width, 3);
        assert_eq!(s.max_world_draw_distance, 160);
    }

    #[test]
    fn json_colors_parse() {
        let s = OverlaySettings::from_json_str(
            r#"{"map_color": {"r": 255, "g": 0, "b": 0, "a": 255}, "draw_map": false}"#,
        )
        .unwrap();
        assert_eq!(s.map_color, Color::rgba(255, 0, 0, 255));
        assert!(!s.draw_map);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let err = OverlaySettings::from_yaml_str("map_width: 0\n").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "map_width",
                value: 0,
                ..
            }
        ));

        let s = OverlaySettings {
            max_world_draw_distance: 601,
            ..OverlaySettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = OverlaySettings::from_yaml_str("enable: [not, a, bool]").unwrap_err();
        assert!(matches!(err, SettingsError::Yaml(_)));
    }

    #[test]
    fn load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "enable: true\ndraw_world: true\nmax_connection_distance: 250").unwrap();
        let s = OverlaySettings::load(file.path()).unwrap();
        assert!(s.enable && s.draw_world);
        assert_eq!(s.max_connection_distance, 250);
    }

    #[test]
    fn load_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = serde_json::to_string(&OverlaySettings {
            enable: true,
            ..OverlaySettings::default()
        })
        .unwrap();
        file.write_all(json.as_bytes()).unwrap();
        assert!(OverlaySettings::load(file.path()).unwrap().enable);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            OverlaySettings::load(file.path()),
            Err(SettingsError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OverlaySettings::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
