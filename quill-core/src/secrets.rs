//! Secrets management for Quill
//!
//! Account credentials are stored separately from configuration to avoid
//! accidental sharing. The secrets file is located at
//! `~/.config/quill/secrets.toml` and must have restrictive permissions
//! (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variables (QUILL_EMAIL, QUILL_PASSWORD, QUILL_TOKEN)
//! 2. Secrets file (~/.config/quill/secrets.toml)

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Site account
    pub account: AccountSecrets,
}

/// Site account secrets
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AccountSecrets {
    /// Account email
    pub email: Option<String>,

    /// Account password
    pub password: Option<String>,

    /// Pre-issued bearer token, used instead of logging in
    pub token: Option<String>,
}

impl fmt::Debug for AccountSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSecrets")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Email and password for the password-grant login
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Names of the blank fields, if any
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.password.trim().is_empty() {
            missing.push("password");
        }
        missing
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        // Check file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            // Check if file is readable by group or others (mode & 0o077)
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        let account = &mut secrets.account;
        for value in [&mut account.email, &mut account.password, &mut account.token] {
            *value = value
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/quill/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quill").join("secrets.toml"))
    }

    fn resolve(&self, env_var: &str, from_file: &Option<String>) -> Option<String> {
        if let Ok(value) = std::env::var(env_var) {
            let value = value.trim().to_string();
            if !value.is_empty() {
                debug!(var = env_var, "Using value from environment");
                return Some(value);
            }
        }

        from_file
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().to_string())
    }

    /// Account email. Priority: QUILL_EMAIL env var > secrets file
    pub fn email(&self) -> Option<String> {
        self.resolve("QUILL_EMAIL", &self.account.email)
    }

    /// Account password. Priority: QUILL_PASSWORD env var > secrets file
    pub fn password(&self) -> Option<String> {
        self.resolve("QUILL_PASSWORD", &self.account.password)
    }

    /// Pre-issued bearer token. Priority: QUILL_TOKEN env var > secrets file
    pub fn token(&self) -> Option<String> {
        self.resolve("QUILL_TOKEN", &self.account.token)
    }

    /// Login credentials
    ///
    /// Fails with a configuration error naming whatever is missing.
    pub fn credentials(&self) -> Result<Credentials> {
        let credentials = Credentials::new(
            self.email().unwrap_or_default(),
            self.password().unwrap_or_default(),
        );

        let missing = credentials.missing();
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "Missing account {}. Set QUILL_EMAIL and QUILL_PASSWORD \
                 or add them to ~/.config/quill/secrets.toml",
                missing.join(" and ")
            )));
        }

        Ok(credentials)
    }

    /// Create a template secrets file at the default location
    ///
    /// Creates parent directories if needed and sets secure permissions
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;
        Self::create_template_at(&path)?;
        Ok(path)
    }

    fn create_template_at(path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        // Don't overwrite existing file
        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }

        let template = r#"# Quill Secrets
# This file contains sensitive credentials - do not share or commit to version control
#
# IMPORTANT: This file must have restrictive permissions (chmod 600)

[account]
# Site account used to log in. The account needs the 'editor' or 'admin' role.
email = ""
password = ""

# Optional pre-issued bearer token, used instead of logging in
token = ""
"#;

        std::fs::write(path, template).map_err(Error::Io)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms).map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets template - please edit and add your credentials");

        Ok(())
    }
}
