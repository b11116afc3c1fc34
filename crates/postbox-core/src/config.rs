//! Client configuration.
//!
//! Values are resolved from defaults, then an optional TOML file, then
//! environment variables. Front ends apply their own overrides last.

use std::path::{Path, PathBuf};
use std::time::Duration;

use postbox_api::{HttpTransport, MailApi};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "POSTBOX_BASE_URL";

/// Environment variable overriding [`ClientConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "POSTBOX_TIMEOUT_SECS";

/// Connection settings for the mail API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against.
    pub base_url: String,
    /// Timeout for each network call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: HttpTransport::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Default config file location, `<config dir>/postbox/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("postbox").join("config.toml"))
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this type.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded configuration");
        Self::from_toml(&content)
    }

    /// Loads `path` if given, else the default file if it exists, else
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing or any file fails to
    /// parse.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout override is not a number.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let timeout_secs = lookup(TIMEOUT_ENV)
            .map(|timeout| {
                timeout.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!(
                        "{TIMEOUT_ENV} must be a number of seconds, got {timeout:?}"
                    ))
                })
            })
            .transpose()?;
        let base_url = lookup(BASE_URL_ENV);

        // Nothing is applied unless every override parsed.
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }

        Ok(())
    }

    /// Per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL or the timeout
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout must be at least one second".into()));
        }
        Ok(())
    }

    /// Builds an HTTP API client from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the client cannot be built.
    pub fn connect(&self) -> Result<MailApi<HttpTransport>> {
        self.validate()?;
        Ok(MailApi::connect(&self.base_url, self.timeout())?)
    }
}
