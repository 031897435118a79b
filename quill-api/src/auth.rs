//! Password-grant login against the identity service

use std::time::Duration;

use quill_core::{Config, Credentials};
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::http::{build_client, endpoint, error_text};
use crate::types::{TokenResponse, PUBLISHING_ROLES};
use crate::{Error, Result, Session};

/// Keys that may hold the identity service's error description
const ERROR_KEYS: &[&str] = &["error_description", "msg", "error", "message"];

/// Exchanges an email and password for a bearer token
#[derive(Clone)]
pub struct Authenticator {
    client: reqwest::Client,
    token_url: Url,
    api_key: String,
}

impl Authenticator {
    /// Create an authenticator for the identity service at `base_url`
    pub fn new(base_url: &Url, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut token_url = endpoint(base_url, "auth/v1/token")?;
        token_url.set_query(Some("grant_type=password"));

        Ok(Self {
            client: build_client(timeout)?,
            token_url,
            api_key: api_key.into(),
        })
    }

    /// Create an authenticator from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.identity_url()?;
        if config.identity.api_key.trim().is_empty() {
            return Err(Error::Configuration(
                "identity.api_key is not set. Add it to ~/.config/quill/config.toml \
                 or set QUILL_IDENTITY_KEY"
                    .to_string(),
            ));
        }

        Self::new(&base_url, config.identity.api_key.trim(), config.http.timeout)
    }

    /// The token endpoint this authenticator calls
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Log in and return a session
    ///
    /// Blank credentials fail before any request is made. A role outside
    /// [`PUBLISHING_ROLES`] only produces a warning; the site enforces roles.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let missing = credentials.missing();
        if !missing.is_empty() {
            return Err(Error::Configuration(format!(
                "Missing account {}",
                missing.join(" and ")
            )));
        }

        debug!(email = %credentials.email, url = %self.token_url, "Logging in");

        let response = self
            .client
            .post(self.token_url.clone())
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": credentials.email.trim(),
                "password": credentials.password,
            }))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message =
                error_text(&body, ERROR_KEYS).unwrap_or_else(|| "unknown error".to_string());
            warn!(status = status.as_u16(), error = %message, "Login rejected");
            return Err(Error::Authentication {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("login response: {}", e)))?;

        let user = token.user;
        let email = user.as_ref().and_then(|u| u.email.clone());
        let role = user
            .and_then(|u| u.user_metadata)
            .and_then(|m| m.role)
            .unwrap_or_else(|| "user".to_string());

        info!(email = ?email, role = %role, "Login successful");

        if !PUBLISHING_ROLES.contains(&role.as_str()) {
            warn!(
                role = %role,
                "Account role cannot create posts; 'editor' or 'admin' is required. Ask an admin to upgrade the account"
            );
        }

        Ok(Session::new(token.access_token, email, role))
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("token_url", &self.token_url.as_str())
            .finish_non_exhaustive()
    }
}
