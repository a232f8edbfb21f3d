//! Optional TOML configuration for the command-line front end.
//!
//! ```toml
//! [display]
//! view = "yearly"   # or "monthly"
//! chart = "pie"     # or "bar"
//! words = true      # spell amounts out next to the figures
//!
//! [logging]
//! level = "debug"
//! file = "commute.log"
//! stderr = false
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::path::{Path, PathBuf};

use commute_core::{ChartStyle, ViewMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Initial state of the display toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub view: ViewMode,
    pub chart: ChartStyle,
    pub words: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive, e.g. `"warn"` or `"info,commute_core=debug"`.
    /// When unset, `RUST_LOG` or the built-in `info` default stays active.
    pub level: Option<String>,

    /// Append log records to this file.
    pub file: Option<PathBuf>,

    /// Echo log records to stderr.
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            stderr: true,
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or is not valid
    /// configuration TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.display.view, ViewMode::Monthly);
        assert_eq!(config.display.chart, ChartStyle::Bar);
        assert_eq!(config.logging.level, None);
        assert!(config.logging.stderr);
    }

    #[test]
    fn full_file_overrides_every_key() {
        let config = AppConfig::from_toml_str(
            r#"
            [display]
            view = "yearly"
            chart = "pie"
            words = true

            [logging]
            level = "debug"
            file = "commute.log"
            stderr = false
            "#,
        )
        .unwrap();

        assert_eq!(
            config.display,
            DisplayConfig {
                view: ViewMode::Yearly,
                chart: ChartStyle::Pie,
                words: true,
            }
        );
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file, Some(PathBuf::from("commute.log")));
        assert!(!config.logging.stderr);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[display]\nchart = \"pie\"\n").unwrap();

        assert_eq!(config.display.chart, ChartStyle::Pie);
        assert_eq!(config.display.view, ViewMode::Monthly);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!(AppConfig::from_toml_str("[display]\nview = \"weekly\"\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/no/such/commute.toml")).unwrap_err();

        assert!(err.to_string().contains("/no/such/commute.toml"));
    }
}
