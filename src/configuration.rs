use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::range_feedback::RangeControl;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Slider attributes, written the way the markup carries them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RangeSettings {
    #[serde(default = "default_range_min")]
    pub min: String,
    #[serde(default = "default_range_max")]
    pub max: String,
    #[serde(default = "default_range_value")]
    pub default: String,
}

fn default_range_min() -> String {
    "1".into()
}

fn default_range_max() -> String {
    "10".into()
}

fn default_range_value() -> String {
    "5".into()
}

impl Default for RangeSettings {
    fn default() -> Self {
        Self {
            min: default_range_min(),
            max: default_range_max(),
            default: default_range_value(),
        }
    }
}

impl RangeSettings {
    pub fn control(&self) -> RangeControl {
        RangeControl::from_attributes(&self.min, &self.max, &self.default)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
    #[serde(default = "default_exit_duration_ms")]
    pub exit_duration_ms: u64,
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    #[serde(default = "default_glow_alpha")]
    pub glow_alpha: f32,
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default)]
    pub range: RangeSettings,
}

fn default_transition_delay_ms() -> u64 {
    270
}

fn default_exit_duration_ms() -> u64 {
    250
}

fn default_password_min_length() -> usize {
    4
}

fn default_glow_alpha() -> f32 {
    0.25
}

fn default_color() -> String {
    "#6c63ff".into()
}

fn default_palette() -> Vec<String> {
    [
        "#6c63ff", "#f472b6", "#a5b4fc", "#34d399", "#fbbf24", "#f87171", "#38bdf8",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition_delay_ms: default_transition_delay_ms(),
            exit_duration_ms: default_exit_duration_ms(),
            password_min_length: default_password_min_length(),
            glow_alpha: default_glow_alpha(),
            default_color: default_color(),
            palette: default_palette(),
            range: RangeSettings::default(),
        }
    }
}

impl Settings {
    pub fn settings_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("signup-flow")
            .join("settings.toml")
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Settings from the user's config directory, or defaults when the file
    /// is absent or broken.
    pub fn load() -> Self {
        let path = Self::settings_file_path();
        if !path.exists() {
            log::info!(
                "[settings] no settings file at {}, using defaults",
                path.display()
            );
            return Self::default();
        }
        match Self::read(&path) {
            Ok(settings) => {
                log::info!("[settings] loaded from {}", path.display());
                settings
            }
            Err(error) => {
                log::warn!("[settings] {error}; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::parse("", Path::new("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.transition_delay(), Duration::from_millis(270));
        assert_eq!(settings.password_min_length, 4);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings = Settings::parse(
            "transition_delay_ms = 400\n[range]\nmax = \"20\"\n",
            Path::new("settings.toml"),
        )
        .unwrap();
        assert_eq!(settings.transition_delay_ms, 400);
        assert_eq!(settings.exit_duration_ms, 250);
        assert_eq!(settings.range.min, "1");
        assert_eq!(settings.range.max, "20");
        assert_eq!(settings.range.control().max(), 20.0);
    }

    #[test]
    fn broken_range_attributes_fall_back() {
        let settings =
            Settings::parse("[range]\nmin = \"low\"\n", Path::new("settings.toml")).unwrap();
        let range = settings.range.control();
        assert_eq!(range.min(), 1.0);
        assert_eq!(range.value(), 5.0);
    }

    #[test]
    fn huge_range_bounds_fall_back() {
        let settings =
            Settings::parse("[range]\nmax = \"1e300\"\n", Path::new("settings.toml")).unwrap();
        let range = settings.range.control();
        assert_eq!(range.max(), 10.0);
        assert_eq!(range.stops().len(), 10);
    }

    #[test]
    fn malformed_file_reports_path() {
        let error = Settings::parse("palette = 3", Path::new("/tmp/settings.toml")).unwrap_err();
        assert!(matches!(error, SettingsError::Parse { .. }));
        assert!(error.to_string().contains("/tmp/settings.toml"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = Settings::read(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(error, SettingsError::Read { .. }));
    }

    #[test]
    fn default_palette_contains_default_color() {
        let settings = Settings::default();
        assert!(settings.palette.contains(&settings.default_color));
    }
}
