//! Shared HTTP plumbing

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Build a client that bounds every request by `timeout`
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Join `path` onto `base`, keeping any path prefix the base already has
///
/// `Url::join` drops the last segment of a base without a trailing slash,
/// so `https://host/prefix` + `api/x` would otherwise become `https://host/api/x`.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }

    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::Configuration(format!("Invalid endpoint {}{}: {}", base, path, e)))
}

/// Read an error description from a JSON body
///
/// Looks at each key in order and returns the first string value.
pub(crate) fn error_text(body: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_on_bare_host() {
        let base = Url::parse("https://stackmoneyup.com").unwrap();
        assert_eq!(
            endpoint(&base, "/api/blog/create").unwrap().as_str(),
            "https://stackmoneyup.com/api/blog/create"
        );
    }

    #[test]
    fn test_endpoint_keeps_prefix() {
        let base = Url::parse("http://localhost:3000/staging").unwrap();
        assert_eq!(
            endpoint(&base, "api/blog/create").unwrap().as_str(),
            "http://localhost:3000/staging/api/blog/create"
        );
    }

    #[test]
    fn test_error_text_order() {
        let body = json!({"msg": "Invalid login credentials", "error": "invalid_grant"});
        assert_eq!(
            error_text(&body, &["error_description", "msg", "error"]).as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(error_text(&json!({}), &["error"]), None);
        assert_eq!(error_text(&json!({"error": 42}), &["error"]), None);
    }
}
