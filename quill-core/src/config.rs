//! Configuration management for Quill
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (QUILL_*)
//! 3. Config file (~/.config/quill/config.toml)
//! 4. Default values
//!
//! Credentials never live here; see [`crate::Secrets`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// The site hosting the blog creation endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the site, e.g. `https://stackmoneyup.com`
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stackmoneyup.com".to_string(),
        }
    }
}

/// Password-grant identity provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Base URL of the identity service
    pub base_url: String,

    /// Public (anonymous) API key sent in the `apikey` header
    pub api_key: String,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Timeout applied to each outbound request
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Background generation service
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address to bind
    pub bind_address: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// External article generator command
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Executable to run
    pub command: String,

    /// Arguments placed before the prompt
    pub args: Vec<String>,

    /// Model to pass with `--model`
    pub model: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
            args: vec!["--print".to_string()],
            model: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub identity: IdentityConfig,
    pub http: HttpConfig,
    pub service: ServiceConfig,
    pub generator: GeneratorConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/quill/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quill").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - QUILL_SITE_URL: Site base URL
    /// - QUILL_IDENTITY_URL: Identity service base URL
    /// - QUILL_IDENTITY_KEY: Identity service public key
    /// - QUILL_HTTP_TIMEOUT: Per-request timeout, e.g. `30s`
    /// - QUILL_PORT (or PORT): Service port
    /// - QUILL_GENERATOR_COMMAND: Generator executable
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var("QUILL_SITE_URL") {
            self.site.base_url = url;
        }

        if let Some(url) = var("QUILL_IDENTITY_URL") {
            self.identity.base_url = url;
        }

        if let Some(key) = var("QUILL_IDENTITY_KEY") {
            self.identity.api_key = key;
        }

        if let Some(timeout) = var("QUILL_HTTP_TIMEOUT") {
            match humantime_serde::re::humantime::parse_duration(&timeout) {
                Ok(timeout) => self.http.timeout = timeout,
                Err(e) => tracing::warn!(value = %timeout, error = %e, "Ignoring invalid QUILL_HTTP_TIMEOUT"),
            }
        }

        if let Some(port) = var("QUILL_PORT").or_else(|| var("PORT")) {
            match port.parse() {
                Ok(port) => self.service.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid port"),
            }
        }

        if let Some(command) = var("QUILL_GENERATOR_COMMAND") {
            self.generator.command = command;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, site_url: Option<String>, port: Option<u16>) -> Self {
        if let Some(url) = site_url {
            self.site.base_url = url;
        }

        if let Some(port) = port {
            self.service.port = port;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(site_url: Option<String>, port: Option<u16>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(site_url, port))
    }

    /// Parsed site base URL
    pub fn site_url(&self) -> Result<Url> {
        parse_base_url("site.base_url", &self.site.base_url)
    }

    /// Parsed identity base URL
    ///
    /// Fails when the identity service has not been configured.
    pub fn identity_url(&self) -> Result<Url> {
        if self.identity.base_url.trim().is_empty() {
            return Err(Error::Config(
                "identity.base_url is not set. Add it to ~/.config/quill/config.toml \
                 or set QUILL_IDENTITY_URL"
                    .to_string(),
            ));
        }
        parse_base_url("identity.base_url", &self.identity.base_url)
    }
}

fn parse_base_url(name: &str, value: &str) -> Result<Url> {
    Url::parse(value.trim()).map_err(|e| Error::Config(format!("Invalid {} '{}': {}", name, value, e)))
}
