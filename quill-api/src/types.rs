//! Wire types for the identity and publish endpoints

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Roles allowed to create posts
pub const PUBLISHING_ROLES: &[&str] = &["editor", "admin"];

/// Bearer credential for one run
///
/// Never persisted and never refreshed.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    email: Option<String>,
    role: Option<String>,
}

impl Session {
    pub(crate) fn new(access_token: String, email: Option<String>, role: String) -> Self {
        Self {
            access_token,
            email,
            role: Some(role),
        }
    }

    /// Wrap a pre-issued token; the account's role is unknown
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into().trim().to_string(),
            email: None,
            role: None,
        }
    }

    /// The bearer token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Account email, when known from login
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Role claim, when known from login
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Whether the role claim allows publishing
    ///
    /// `None` when the role is unknown. This is advisory; the site decides.
    pub fn can_publish(&self) -> Option<bool> {
        self.role.as_deref().map(|r| PUBLISHING_ROLES.contains(&r))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

/// Successful `POST /api/blog/create` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub post: PublishedPost,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

impl PublishResult {
    /// Dashboard URL for editing the draft
    pub fn edit_url(&self, site: &Url) -> String {
        format!(
            "{}/dashboard/edit/{}",
            site.as_str().trim_end_matches('/'),
            self.post.slug
        )
    }
}

/// The created post as reported by the site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedPost {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub slug: String,
    /// Plain string or a per-language object, depending on the site version
    #[serde(default)]
    pub title: serde_json::Value,
    #[serde(default)]
    pub category: String,
    /// Always false: posts are created as drafts
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PublishedPost {
    /// English title when the site returns one per language
    pub fn display_title(&self) -> String {
        match &self.title {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(map) => map
                .get("en")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Password-grant response from the identity service
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// Error body returned by the publish endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PublishErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
    pub your_role: Option<String>,
    pub required_role: Option<String>,
    pub missing_fields: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new("eyJsecret".to_string(), None, "editor".to_string());
        assert!(!format!("{:?}", session).contains("eyJsecret"));
    }

    #[test]
    fn test_can_publish() {
        let editor = Session::new("t".to_string(), None, "editor".to_string());
        let user = Session::new("t".to_string(), None, "user".to_string());
        assert_eq!(editor.can_publish(), Some(true));
        assert_eq!(user.can_publish(), Some(false));
        assert_eq!(Session::from_token(" t ").can_publish(), None);
        assert_eq!(Session::from_token(" t ").access_token(), "t");
    }

    #[test]
    fn test_publish_result_parses_site_response() {
        let body = json!({
            "success": true,
            "message": "Post created successfully as DRAFT. Manual review required before publishing.",
            "post": {
                "id": "3f2a",
                "slug": "the-compound-effect",
                "title": {"en": "The Compound Effect", "it": "L'Effetto Composto"},
                "category": "Investing",
                "published": false,
                "created_at": "2026-10-19T08:00:00Z"
            },
            "next_steps": ["Review the post in the dashboard", "Publish manually when ready"]
        });

        let result: PublishResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.post.slug, "the-compound-effect");
        assert_eq!(result.post.display_title(), "The Compound Effect");
        assert!(!result.post.published);
        assert_eq!(result.next_steps.len(), 2);

        let site = Url::parse("https://stackmoneyup.com/").unwrap();
        assert_eq!(
            result.edit_url(&site),
            "https://stackmoneyup.com/dashboard/edit/the-compound-effect"
        );
    }

    #[test]
    fn test_numeric_post_id() {
        let post: PublishedPost =
            serde_json::from_value(json!({"id": 42, "slug": "s", "title": "T"})).unwrap();
        assert_eq!(post.id, "42");
        assert_eq!(post.display_title(), "T");
    }
}
