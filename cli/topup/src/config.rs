//! Report configuration loaded via OrthoConfig.

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_USERS_PATH: &str = "users.json";
const DEFAULT_COMPANIES_PATH: &str = "companies.json";
const DEFAULT_OUTPUT_PATH: &str = "output.txt";

/// Error produced when the configuration layers fail to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load configuration: {message}")]
pub struct ConfigError {
    /// Description of the underlying configuration error.
    pub message: String,
}

/// Configuration values controlling report generation.
///
/// Paths default to the fixed dataset names in the working directory and
/// may be overridden by CLI flags, `TOPUP_*` environment variables, or a
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TOPUP")]
pub struct ReportSettings {
    /// Optional override for the users dataset path.
    pub users_path: Option<Utf8PathBuf>,
    /// Optional override for the companies dataset path.
    pub companies_path: Option<Utf8PathBuf>,
    /// Optional override for the report output path.
    pub output_path: Option<Utf8PathBuf>,
}

impl ReportSettings {
    /// Load settings from CLI arguments, the environment, and config files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any configuration layer fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_iter(std::env::args_os()).map_err(|err| ConfigError {
            message: err.to_string(),
        })
    }

    /// Return the configured users dataset path, falling back to the default.
    #[must_use]
    pub fn users_path(&self) -> Utf8PathBuf {
        self.users_path
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_USERS_PATH))
    }

    /// Return the configured companies dataset path, falling back to the default.
    #[must_use]
    pub fn companies_path(&self) -> Utf8PathBuf {
        self.companies_path
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_COMPANIES_PATH))
    }

    /// Return the configured report output path, falling back to the default.
    #[must_use]
    pub fn output_path(&self) -> Utf8PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_PATH))
    }
}
