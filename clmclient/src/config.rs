//! Client configuration
//!
//! [`ClientConfig`] is the immutable record the client is built from:
//! credentials, endpoint and request timeout. It can be assembled in code or
//! loaded from YAML, with environment variables taking precedence:
//!
//! ```yaml
//! username: partner-login
//! password: partner-secret
//! uri: https://clm.example.com/services/LoyaltyService
//! timeout_secs: 30
//! ```
//!
//! | Variable                  | Overrides      |
//! |---------------------------|----------------|
//! | `CLMCLIENT__USERNAME`     | `username`     |
//! | `CLMCLIENT__PASSWORD`     | `password`     |
//! | `CLMCLIENT__URI`          | `uri`          |
//! | `CLMCLIENT__TIMEOUT_SECS` | `timeout_secs` |

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::{env, fmt, fs, path::Path, time::Duration};
use tracing::debug;
use url::Url;

const ENV_PREFIX: &str = "CLMCLIENT__";

/// Immutable client configuration
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    username: String,
    password: String,
    uri: String,
    timeout: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    timeout_secs: Option<f64>,
}

impl ClientConfig {
    /// Creates a configuration without request timeout
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            uri: uri.into(),
            timeout: None,
        }
    }

    /// Returns a copy bounded by `timeout` per request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Parses a YAML document, then applies environment overrides
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawConfig =
            serde_yaml::from_str(yaml).context("Failed to parse client configuration")?;
        Self::from_raw(raw, env_lookup)
    }

    /// Reads a YAML file, then applies environment overrides
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        debug!("Loading client configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Builds the configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::from_raw(RawConfig::default(), env_lookup)
    }

    fn from_raw(mut raw: RawConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = lookup("USERNAME") {
            raw.username = Some(v);
        }
        if let Some(v) = lookup("PASSWORD") {
            raw.password = Some(v);
        }
        if let Some(v) = lookup("URI") {
            raw.uri = Some(v);
        }
        if let Some(v) = lookup("TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid {}TIMEOUT_SECS: {}", ENV_PREFIX, v))?;
            raw.timeout_secs = Some(secs);
        }

        let mut config = Self::new(
            raw.username.ok_or_else(|| anyhow!("Missing username"))?,
            raw.password.ok_or_else(|| anyhow!("Missing password"))?,
            raw.uri.ok_or_else(|| anyhow!("Missing uri"))?,
        );

        if let Some(secs) = raw.timeout_secs {
            if !secs.is_finite() || secs <= 0.0 {
                bail!("timeout_secs must be a positive number, got {}", secs);
            }
            config = config.with_timeout(Duration::from_secs_f64(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks credentials and endpoint
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            bail!("username must not be empty");
        }
        if self.password.is_empty() {
            bail!("password must not be empty");
        }

        let url = Url::parse(&self.uri).with_context(|| format!("Invalid uri: {}", self.uri))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("uri must use http or https, got {}", url.scheme());
        }
        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                bail!("timeout must not be zero");
            }
        }
        Ok(())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("uri", &self.uri)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(format!("{}{}", ENV_PREFIX, key)).ok()
}
