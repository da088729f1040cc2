//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (later wins)
//! 1. Defaults (this file)
//! 2. Config file (`<config dir>/pocket.toml`, or `--config PATH`)
//! 3. Environment variables (`POCKET_*`)
//! 4. Command line flags (`--data-dir`, `map --geojson`)
//!
//! ## Example `pocket.toml`
//! ```toml
//! data_dir = "/home/me/.pocket"
//! geojson_path = "/home/me/maps/campus.geojson"
//! currency_symbol = "$"
//! currency_name = "pesos"
//! currency_decimals = 0
//! ```
//!
//! Configuration is read-only after startup, so no mutex.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use pocket_core::Money;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "pocket.toml";

/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "pocket.db";

/// Failures loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },
}

/// Fields of `pocket.toml`. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub geojson_path: Option<PathBuf>,
    pub currency_symbol: Option<String>,
    pub currency_name: Option<String>,
    pub currency_decimals: Option<u8>,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Holds `pocket.db` and `qr_image.png`.
    pub data_dir: PathBuf,

    /// GeoJSON shown on the map screen. `None` uses the bundled campus file.
    pub geojson_path: Option<PathBuf>,

    /// Printed before amounts (empty by default)
    pub currency_symbol: String,

    /// Printed after amounts ("pesos")
    pub currency_name: String,

    /// Decimal places shown for amounts
    pub currency_decimals: u8,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Data dir: platform data directory, else `./pocket-data`
    /// - Map: bundled GeoJSON
    /// - Currency: whole pesos, no symbol
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            geojson_path: None,
            currency_symbol: String::new(),
            currency_name: "pesos".to_string(),
            currency_decimals: 0,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "pocket", "business")
}

/// Platform data directory.
///
/// - **Linux**: `~/.local/share/business`
/// - **macOS**: `~/Library/Application Support/com.pocket.business`
/// - **Windows**: `%APPDATA%\pocket\business\data`
fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("pocket-data"))
}

/// `<platform config dir>/pocket.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl AppConfig {
    /// Loads defaults, then the config file, then `POCKET_*` variables.
    ///
    /// An explicit `path` must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        match path {
            Some(path) => config.apply_file(&read_config_file(path)?),
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    config.apply_file(&read_config_file(&path)?);
                }
            }
        }

        config.apply_env(|var| std::env::var(var).ok())?;

        info!(data_dir = %config.data_dir.display(), "Configuration loaded");
        Ok(config)
    }

    /// Overlays the values present in a config file.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(dir) = &file.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(path) = &file.geojson_path {
            self.geojson_path = Some(path.clone());
        }
        if let Some(symbol) = &file.currency_symbol {
            self.currency_symbol = symbol.clone();
        }
        if let Some(name) = &file.currency_name {
            self.currency_name = name.clone();
        }
        if let Some(decimals) = file.currency_decimals {
            self.currency_decimals = decimals;
        }
    }

    /// Overlays environment variables read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `POCKET_DATA_DIR`
    /// - `POCKET_GEOJSON_PATH`
    /// - `POCKET_CURRENCY_SYMBOL`
    /// - `POCKET_CURRENCY_NAME`
    /// - `POCKET_CURRENCY_DECIMALS`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("POCKET_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("POCKET_GEOJSON_PATH") {
            self.geojson_path = Some(PathBuf::from(path));
        }
        if let Some(symbol) = lookup("POCKET_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
        if let Some(name) = lookup("POCKET_CURRENCY_NAME") {
            self.currency_name = name;
        }
        if let Some(raw) = lookup("POCKET_CURRENCY_DECIMALS") {
            self.currency_decimals = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "POCKET_CURRENCY_DECIMALS".to_string(),
                value: raw,
            })?;
        }
        Ok(())
    }

    /// Path of the SQLite database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_major(110)), "110 pesos");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let whole = amount.major().abs();

        let number = match self.currency_decimals {
            0 => whole.to_string(),
            decimals => {
                // Money carries two decimals; extra places are zero padded.
                let frac = amount.minor_part().abs();
                let shown = usize::from(decimals);
                let digits = format!("{:02}", frac);
                let digits = if shown <= 2 {
                    digits[..shown].to_string()
                } else {
                    format!("{:0<width$}", digits, width = shown)
                };
                format!("{}.{}", whole, digits)
            }
        };

        let amount = format!("{}{}{}", sign, self.currency_symbol, number);
        if self.currency_name.is_empty() {
            amount
        } else {
            format!("{} {}", amount, self.currency_name)
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    debug!(path = %path.display(), "Reading config file");

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> AppConfig {
        AppConfig {
            data_dir: PathBuf::from("/data"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_format_currency_default_is_whole_pesos() {
        let config = base();
        assert_eq!(config.format_currency(Money::from_major(110)), "110 pesos");
        assert_eq!(config.format_currency(Money::zero()), "0 pesos");
    }

    #[test]
    fn test_format_currency_with_symbol_and_decimals() {
        let config = AppConfig {
            currency_symbol: "$".to_string(),
            currency_name: String::new(),
            currency_decimals: 2,
            ..base()
        };
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_currency(Money::from_cents(5)), "$0.05");

        let three = AppConfig {
            currency_decimals: 3,
            ..config
        };
        assert_eq!(three.format_currency(Money::from_cents(1234)), "$12.340");
    }

    #[test]
    fn test_file_then_env_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "data_dir = \"/from-file\"\ncurrency_name = \"CUP\"\ncurrency_decimals = 2\n",
        )
        .unwrap();

        let mut config = base();
        config.apply_file(&read_config_file(&path).unwrap());
        assert_eq!(config.data_dir, PathBuf::from("/from-file"));
        assert_eq!(config.currency_name, "CUP");

        let env: HashMap<&str, &str> = [
            ("POCKET_DATA_DIR", "/from-env"),
            ("POCKET_GEOJSON_PATH", "/maps/uci.geojson"),
        ]
        .into_iter()
        .collect();
        config
            .apply_env(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from-env"));
        assert_eq!(config.geojson_path, Some(PathBuf::from("/maps/uci.geojson")));
        assert_eq!(config.currency_decimals, 2);
        assert_eq!(config.database_path(), PathBuf::from("/from-env/pocket.db"));
    }

    #[test]
    fn test_bad_env_decimals_is_error() {
        let mut config = base();
        let err = config
            .apply_env(|var| (var == "POCKET_CURRENCY_DECIMALS").then(|| "two".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn test_unknown_key_and_missing_explicit_file_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "colour = \"red\"\n").unwrap();

        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            AppConfig::load(Some(&dir.path().join("missing.toml"))),
            Err(ConfigError::Read { .. })
        ));
    }
}
