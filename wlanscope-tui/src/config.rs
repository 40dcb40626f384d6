use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MIN_POLL_INTERVAL_MS: u64 = 50;
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;
pub const MIN_COLUMN_WIDTH: usize = 1;
pub const MAX_COLUMN_WIDTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Sleep between two passes over the adapters.
    pub poll_interval_ms: u64,
    pub sort_enabled: bool,
    pub columns: ColumnWidths,
    /// Highest threshold first. The last band also catches everything below it.
    pub color_bands: Vec<ColorBand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub ssid: usize,
    pub signal: usize,
    pub bar: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorBand {
    /// Quality must be strictly greater than this to land in the band.
    pub above: u8,
    pub color: Color,
}

impl ColorBand {
    pub const fn new(above: u8, color: Color) -> Self {
        Self { above, color }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            sort_enabled: true,
            columns: ColumnWidths::default(),
            color_bands: vec![
                ColorBand::new(90, Color::LightGreen),
                ColorBand::new(80, Color::Green),
                ColorBand::new(60, Color::Magenta),
                ColorBand::new(30, Color::LightRed),
                ColorBand::new(0, Color::Red),
            ],
        }
    }
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            ssid: 25,
            signal: 4,
            bar: 25,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                config.validate()?;
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                // Create default config if not found
                let config = Self::default();
                if let Ok(content) = toml::to_string_pretty(&config) {
                    if let Err(err) = fs::write(path, content) {
                        tracing::warn!("Could not write default config to {}: {}", path.display(), err);
                    }
                }
                Ok(config)
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "poll_interval_ms must be between {MIN_POLL_INTERVAL_MS} and {MAX_POLL_INTERVAL_MS}, got {}",
                self.poll_interval_ms
            )));
        }

        let ColumnWidths { ssid, signal, bar } = self.columns;
        for (name, width) in [("ssid", ssid), ("signal", signal), ("bar", bar)] {
            if !(MIN_COLUMN_WIDTH..=MAX_COLUMN_WIDTH).contains(&width) {
                return Err(ConfigError::Invalid(format!(
                    "columns.{name} must be between {MIN_COLUMN_WIDTH} and {MAX_COLUMN_WIDTH}, got {width}"
                )));
            }
        }

        if self.color_bands.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one color band is required".to_string(),
            ));
        }
        if self
            .color_bands
            .windows(2)
            .any(|pair| pair[0].above <= pair[1].above)
        {
            return Err(ConfigError::Invalid(
                "color bands must be ordered by strictly descending threshold".to_string(),
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
        DashboardConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: DashboardConfig = toml::from_str(
            r#"
            poll_interval_ms = 250

            [columns]
            bar = 40
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.columns.bar, 40);
        assert_eq!(config.columns.ssid, 25);
        assert!(config.sort_enabled);
        assert_eq!(config.color_bands, DashboardConfig::default().color_bands);
    }

    #[test]
    fn color_bands_parse_from_names() {
        let config: DashboardConfig = toml::from_str(
            r#"
            sort_enabled = false

            [[color_bands]]
            above = 50
            color = "green"

            [[color_bands]]
            above = 0
            color = "red"
            "#,
        )
        .unwrap();

        assert!(!config.sort_enabled);
        assert_eq!(
            config.color_bands,
            vec![
                ColorBand::new(50, Color::Green),
                ColorBand::new(0, Color::Red)
            ]
        );
        config.validate().unwrap();
    }

    #[test]
    fn default_survives_toml_round_trip() {
        let text = toml::to_string_pretty(&DashboardConfig::default()).unwrap();
        let parsed: DashboardConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, DashboardConfig::default());
    }

    #[test]
    fn rejects_out_of_order_bands() {
        let mut config = DashboardConfig::default();
        config.color_bands = vec![
            ColorBand::new(30, Color::Red),
            ColorBand::new(60, Color::Green),
        ];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_oversized_widths() {
        let mut config = DashboardConfig::default();
        config.columns.bar = usize::MAX / 2;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.columns.ssid = MAX_COLUMN_WIDTH + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("columns.ssid"));

        let mut config = DashboardConfig::default();
        config.columns.signal = MAX_COLUMN_WIDTH + 1;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.columns.bar = MAX_COLUMN_WIDTH;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_width_and_bad_interval() {
        let mut config = DashboardConfig::default();
        config.columns.bar = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.poll_interval_ms = 10;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.color_bands.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let path = std::env::temp_dir().join(format!("wlanscope-config-{}.toml", std::process::id()));
        let _ = fs::remove_file(&path);

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(path.exists());

        let reloaded = DashboardConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("wlanscope-bad-{}.toml", std::process::id()));
        fs::write(&path, "poll_interval_ms = \"fast\"").unwrap();
        let err = DashboardConfig::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
