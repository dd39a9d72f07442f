// filepath: src/config.rs
//! Configuration handling for hypr-clock
//!
//! This file defines the configuration structure and provides
//! functionality to load and save configuration from/to files.
//! The ClockConfig struct contains all configurable parameters.

use crate::draw::Color;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Which widget to show on the layer surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    #[default]
    Analog,
    Text,
}

/// Minute offset from UTC as written by the user
///
/// Only finite whole numbers are honored; anything else means "use the
/// local zone". Strings may be decimal, exponent or unsigned `0x`/`0o`/`0b`
/// literals, so `"0x5A"` is 90 minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffsetSetting {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OffsetSetting {
    /// The offset in minutes, or None to fall back to the local zone
    pub fn minutes(&self) -> Option<i64> {
        match self {
            Self::Integer(minutes) => Some(*minutes),
            Self::Float(value) => whole_minutes(*value),
            Self::Text(text) => parse_number(text.trim()).and_then(whole_minutes),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return text.parse::<f64>().ok(),
    };
    let digits = &text[2..];
    if digits.starts_with('+') {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|value| value as f64)
}

fn whole_minutes(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    // out-of-range floats are still whole numbers; saturate
    Some(value as i64)
}

/// Colors of the static clock face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceStyle {
    pub outline_color: Color,
    pub fill_color: Color,
    pub long_tick_color: Color,
    pub short_tick_color: Color,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            outline_color: [0, 0, 0, 255],
            fill_color: [255, 255, 255, 255],
            long_tick_color: [0xDB, 0xBA, 0x73, 255],
            short_tick_color: [0x1A, 0x12, 0x66, 255],
        }
    }
}

/// Colors of the clock hands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandStyle {
    pub hour_color: Color,
    pub minute_color: Color,
    pub second_color: Color,
}

impl Default for HandStyle {
    fn default() -> Self {
        Self {
            hour_color: [0x1A, 0x12, 0x66, 255],
            minute_color: [0x1A, 0x12, 0x66, 255],
            second_color: [0xD3, 0x04, 0x49, 255],
        }
    }
}

/// Font and color for the text widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: 64.0,
            color: [0x1A, 0x12, 0x66, 255],
        }
    }
}

/// Configuration for the clock surface and its widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub widget: WidgetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<OffsetSetting>,
    /// Logical size of the surface
    pub width: u32,
    pub height: u32,
    /// "background", "bottom", "top" or "overlay"
    pub layer: String,
    /// Any of "top", "bottom", "left", "right"
    pub anchor: Vec<String>,
    /// Top, right, bottom, left
    pub margin: [i32; 4],
    pub face: FaceStyle,
    pub hands: HandStyle,
    pub text: TextStyle,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            widget: WidgetKind::Analog,
            offset: None,
            width: 240,
            height: 240,
            layer: "top".to_string(),
            anchor: vec!["top".to_string(), "right".to_string()],
            margin: [16, 16, 0, 0],
            face: FaceStyle::default(),
            hands: HandStyle::default(),
            text: TextStyle::default(),
        }
    }
}

impl ClockConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("hypr-clock")
        } else {
            PathBuf::from(".config/hypr-clock")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from the default location, creating it if missing
    pub fn load_from_file() -> Result<Self, ConfigError> {
        Self::load_or_create(&Self::get_config_path())
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::default();
                default_config.save_to(path)?;
                Ok(default_config)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load configuration from an explicit path; the file must exist
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// The configured offset in minutes, if it is a whole number
    pub fn offset_minutes(&self) -> Option<i64> {
        self.offset.as_ref().and_then(OffsetSetting::minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whole_offsets_are_honored() {
        assert_eq!(OffsetSetting::Integer(90).minutes(), Some(90));
        assert_eq!(OffsetSetting::Integer(-300).minutes(), Some(-300));
        assert_eq!(OffsetSetting::Float(90.0).minutes(), Some(90));
        assert_eq!(OffsetSetting::Text(" -30 ".to_string()).minutes(), Some(-30));
        assert_eq!(OffsetSetting::Text("120.0".to_string()).minutes(), Some(120));
    }

    #[test]
    fn non_integer_offsets_fall_back() {
        assert_eq!(OffsetSetting::Float(1.5).minutes(), None);
        assert_eq!(OffsetSetting::Float(f64::NAN).minutes(), None);
        assert_eq!(OffsetSetting::Float(f64::INFINITY).minutes(), None);
        assert_eq!(OffsetSetting::Text("1.5".to_string()).minutes(), None);
        assert_eq!(OffsetSetting::Text("abc".to_string()).minutes(), None);
        assert_eq!(OffsetSetting::Text(String::new()).minutes(), None);
    }

    #[test]
    fn offset_parses_from_any_toml_form() {
        let integer: ClockConfig = toml::from_str("offset = 90").unwrap();
        assert_eq!(integer.offset_minutes(), Some(90));

        let float: ClockConfig = toml::from_str("offset = 1.5").unwrap();
        assert_eq!(float.offset, Some(OffsetSetting::Float(1.5)));
        assert_eq!(float.offset_minutes(), None);

        let text: ClockConfig = toml::from_str("offset = \"-60\"").unwrap();
        assert_eq!(text.offset_minutes(), Some(-60));

        let absent: ClockConfig = toml::from_str("").unwrap();
        assert_eq!(absent.offset_minutes(), None);
    }

    #[test]
    fn prefixed_text_offsets_use_their_radix() {
        let text = |s: &str| OffsetSetting::Text(s.to_string()).minutes();
        assert_eq!(text("0x5A"), Some(90));
        assert_eq!(text(" 0X5a "), Some(90));
        assert_eq!(text("0o17"), Some(15));
        assert_eq!(text("0b11"), Some(3));
        assert_eq!(text("0xZZ"), None);
        assert_eq!(text("0x"), None);
        assert_eq!(text("-0x5A"), None);
        assert_eq!(text("0x+5A"), None);
        assert_eq!(text("1e2"), Some(100));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: ClockConfig = toml::from_str(
            r#"
            widget = "text"
            width = 320

            [hands]
            second_color = [0, 255, 0, 255]
            "#,
        )
        .unwrap();
        assert_eq!(config.widget, WidgetKind::Text);
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert_eq!(config.hands.second_color, [0, 255, 0, 255]);
        assert_eq!(config.hands.hour_color, HandStyle::default().hour_color);
        assert_eq!(config.face, FaceStyle::default());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ClockConfig::load_or_create(&path).unwrap();
        assert_eq!(config, ClockConfig::default());
        assert!(path.exists());

        let reloaded = ClockConfig::load_from_path(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClockConfig::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "width = \"wide\"").unwrap();
        let err = ClockConfig::load_or_create(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
