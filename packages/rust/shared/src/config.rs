//! Application configuration for filingdigest.
//!
//! User config lives at `~/.filingdigest/filingdigest.toml`.
//! CLI arguments override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FilingDigestError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "filingdigest.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".filingdigest";

// ---------------------------------------------------------------------------
// Config structs (matching filingdigest.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default input/output locations.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Outbound request settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Source/output table layout.
    #[serde(default)]
    pub table: TableConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Source table read when no input path is given.
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Output table written when no output path is given.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
        }
    }
}

fn default_input_path() -> String {
    "filtered_with_parsed.csv".into()
}
fn default_output_path() -> String {
    "example_of_final_output.csv".into()
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Static `User-Agent` header sent with every document request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    "GitHub Actions Bot <actions@github.com>".into()
}
fn default_timeout_secs() -> u64 {
    20
}

/// `[table]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Column of the source table holding per-row document URLs.
    #[serde(default = "default_source_column")]
    pub source_column: String,

    /// Field delimiter for both the source and output tables.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            source_column: default_source_column(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_source_column() -> String {
    "Source File".into()
}
fn default_delimiter() -> char {
    ','
}

impl TableConfig {
    /// The delimiter as a single byte, as the CSV reader/writer expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(FilingDigestError::config(format!(
                "table delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.filingdigest/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FilingDigestError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.filingdigest/filingdigest.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "no home directory, using default config");
            return Ok(AppConfig::default());
        }
    };

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FilingDigestError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        FilingDigestError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.table.delimiter_byte()?;

    Ok(config)
}
