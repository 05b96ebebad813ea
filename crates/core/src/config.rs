//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handlers and wizard steps never read process-wide environment variables themselves.

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_DATA_DIR, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SELECTION_FILE,
};
use crate::validation::validate_base_url;
use crate::{PharmaError, PharmaResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    api_base_url: String,
    http_timeout: Duration,
    selection_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The base URL is validated and stored without a trailing slash.
    pub fn new(
        data_dir: PathBuf,
        api_base_url: &str,
        http_timeout_secs: u64,
        selection_file: PathBuf,
    ) -> PharmaResult<Self> {
        validate_base_url(api_base_url)?;

        if http_timeout_secs == 0 {
            return Err(PharmaError::InvalidInput(
                "http timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            data_dir,
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(http_timeout_secs),
            selection_file,
        })
    }

    /// Build a configuration from raw environment values, applying defaults for missing ones.
    ///
    /// Takes the values rather than reading `std::env` so tests can exercise it without touching
    /// process-wide state.
    pub fn from_env_values(
        data_dir: Option<String>,
        api_base_url: Option<String>,
        http_timeout_secs: Option<String>,
        selection_file: Option<String>,
    ) -> PharmaResult<Self> {
        let data_dir = non_blank(data_dir).unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        let api_base_url = non_blank(api_base_url).unwrap_or_else(|| DEFAULT_API_URL.into());
        let selection_file =
            non_blank(selection_file).unwrap_or_else(|| DEFAULT_SELECTION_FILE.into());
        let timeout = http_timeout_from_env_value(http_timeout_secs)?;

        Self::new(
            PathBuf::from(data_dir),
            &api_base_url,
            timeout,
            PathBuf::from(selection_file),
        )
    }

    /// Read `PHARMA_*` variables from the process environment.
    pub fn from_env() -> PharmaResult<Self> {
        Self::from_env_values(
            std::env::var("PHARMA_DATA_DIR").ok(),
            std::env::var("PHARMA_API_URL").ok(),
            std::env::var("PHARMA_HTTP_TIMEOUT_SECS").ok(),
            std::env::var("PHARMA_SELECTION_FILE").ok(),
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    pub fn selection_file(&self) -> &Path {
        &self.selection_file
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the HTTP timeout from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn http_timeout_from_env_value(value: Option<String>) -> PharmaResult<u64> {
    match non_blank(value) {
        None => Ok(DEFAULT_HTTP_TIMEOUT_SECS),
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            PharmaError::InvalidInput(format!("PHARMA_HTTP_TIMEOUT_SECS is not a number: {raw}"))
        }),
    }
}
