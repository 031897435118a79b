//! Submission of articles to the blog creation endpoint

use std::time::Duration;

use quill_core::{Config, ValidatedArticle};
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use url::Url;

use crate::http::{build_client, endpoint};
use crate::types::PublishErrorBody;
use crate::{Error, PublishResult, Result, Session};

const CREATE_PATH: &str = "api/blog/create";

/// Creates draft posts on the site
///
/// One attempt per call: nothing is retried and nothing is deduplicated, so
/// publishing the same article twice creates two drafts.
#[derive(Clone)]
pub struct Publisher {
    client: reqwest::Client,
    site_url: Url,
    create_url: Url,
}

impl Publisher {
    /// Create a publisher for the site at `site_url`
    pub fn new(site_url: &Url, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            create_url: endpoint(site_url, CREATE_PATH)?,
            site_url: site_url.clone(),
        })
    }

    /// Create a publisher from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.site_url()?, config.http.timeout)
    }

    /// The site base URL
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// The endpoint articles are posted to
    pub fn create_url(&self) -> &Url {
        &self.create_url
    }

    /// Submit an article as a draft
    pub async fn publish(&self, session: &Session, article: &ValidatedArticle) -> Result<PublishResult> {
        if session.access_token().is_empty() {
            return Err(Error::Configuration("Bearer token is empty".to_string()));
        }

        let payload = article.payload();
        debug!(
            url = %self.create_url,
            title = %payload.title_en,
            category = %payload.category,
            tags = ?payload.tags,
            "Creating blog post"
        );

        let response = self
            .client
            .post(self.create_url.clone())
            .bearer_auth(session.access_token())
            .json(article)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if status == StatusCode::CREATED {
            let result: PublishResult = response
                .json()
                .await
                .map_err(|e| Error::Decode(format!("publish response: {}", e)))?;

            info!(
                id = %result.post.id,
                slug = %result.post.slug,
                published = result.post.published,
                "Created draft post"
            );
            return Ok(result);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let body: PublishErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
        let err = map_failure(status, body);
        warn!(status = status.as_u16(), error = %err, "Publish rejected");
        Err(err)
    }
}

fn map_failure(status: StatusCode, body: PublishErrorBody) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::Unauthorized(
            body.error
                .unwrap_or_else(|| "invalid or expired token".to_string()),
        ),
        StatusCode::FORBIDDEN => Error::Authorization {
            message: body.error.unwrap_or_else(|| "Access denied".to_string()),
            your_role: body.your_role.unwrap_or_else(|| "unknown".to_string()),
            required_role: body
                .required_role
                .unwrap_or_else(|| "editor or admin".to_string()),
        },
        StatusCode::BAD_REQUEST => Error::RemoteValidation {
            message: body.error.unwrap_or_else(|| "Invalid request".to_string()),
            missing_fields: body.missing_fields.unwrap_or_default(),
        },
        other => Error::Remote {
            status: other.as_u16(),
            message: body
                .error
                .or(body.message)
                .unwrap_or_else(|| "unknown error".to_string()),
        },
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("create_url", &self.create_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use quill_core::ArticlePayload;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn publisher(server: &MockServer) -> Publisher {
        let base = Url::parse(&server.uri()).unwrap();
        Publisher::new(&base, Duration::from_secs(5)).unwrap()
    }

    fn article() -> ValidatedArticle {
        ArticlePayload::connection_test().validate().unwrap()
    }

    fn created(id: &str, slug: &str) -> ResponseTemplate {
        ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Post created successfully as DRAFT. Manual review required before publishing.",
            "post": {
                "id": id,
                "slug": slug,
                "title": "Test Connection Article",
                "category": "Investing",
                "published": false,
                "created_at": "2026-10-19T08:00:00Z"
            },
            "next_steps": [
                "Review the post in the dashboard",
                format!("Edit at: /dashboard/edit/{}", slug),
                "Publish manually when ready"
            ]
        }))
    }

    async fn publish_with(response: ResponseTemplate) -> Error {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/blog/create"))
            .respond_with(response)
            .mount(&server)
            .await;

        publisher(&server)
            .publish(&Session::from_token("tok"), &article())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_created_exposes_slug_unmodified() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/blog/create"))
            .and(header("authorization", "Bearer tok"))
            .and(header("content-type", "application/json"))
            .respond_with(created("p-1", "Test-Connection_Article--2"))
            .expect(1)
            .mount(&server)
            .await;

        let result = publisher(&server)
            .publish(&Session::from_token("tok"), &article())
            .await
            .unwrap();

        assert_eq!(result.post.slug, "Test-Connection_Article--2");
        assert!(!result.post.published);
        assert_eq!(result.next_steps.len(), 3);
    }

    #[tokio::test]
    async fn test_body_is_the_normalized_payload() {
        let server = MockServer::start().await;

        let mut payload = ArticlePayload::connection_test();
        payload.title_en = "  Padded Title  ".to_string();
        let validated = payload.validate().unwrap();
        let expected = serde_json::to_value(validated.payload()).unwrap();

        Mock::given(method("POST"))
            .and(path("/api/blog/create"))
            .and(wiremock::matchers::body_json(expected))
            .respond_with(created("p-1", "padded-title"))
            .expect(1)
            .mount(&server)
            .await;

        publisher(&server)
            .publish(&Session::from_token("tok"), &validated)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_same_payload_twice_creates_two_posts() {
        struct Sequential(AtomicUsize);

        impl Respond for Sequential {
            fn respond(&self, _: &Request) -> ResponseTemplate {
                let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
                created(&format!("post-{}", n), &format!("test-connection-article-{}", n))
            }
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/blog/create"))
            .respond_with(Sequential(AtomicUsize::new(0)))
            .expect(2)
            .mount(&server)
            .await;

        let publisher = publisher(&server);
        let session = Session::from_token("tok");
        let first = publisher.publish(&session, &article()).await.unwrap();
        let second = publisher.publish(&session, &article()).await.unwrap();

        assert_ne!(first.post.id, second.post.id);
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let err =
            publish_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized. Please log in."})))
                .await;
        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert!(err.to_string().contains("Log in again"));
    }

    #[tokio::test]
    async fn test_forbidden_surfaces_both_roles() {
        let err = publish_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "Forbidden",
            "your_role": "user",
            "required_role": "editor"
        })))
        .await;

        assert_eq!(err.kind(), ErrorKind::Authorization);
        let msg = err.to_string();
        assert!(msg.contains("user"), "{}", msg);
        assert!(msg.contains("editor"), "{}", msg);
    }

    #[tokio::test]
    async fn test_bad_request_lists_missing_fields() {
        let err = publish_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Missing required fields",
            "missing_fields": ["title_it", "content_es"]
        })))
        .await;

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.missing_fields(), vec!["title_it", "content_es"]);
    }

    #[tokio::test]
    async fn test_bad_request_without_field_list() {
        let err = publish_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Invalid category",
            "received": "Crypto"
        })))
        .await;

        assert!(matches!(err, Error::RemoteValidation { ref missing_fields, .. } if missing_fields.is_empty()));
        assert!(err.to_string().contains("Invalid category"));
    }

    #[tokio::test]
    async fn test_server_error_with_message() {
        let err = publish_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal server error",
            "message": "db down"
        })))
        .await;

        match err {
            Error::Remote { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal server error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_body_defaults_to_unknown_error() {
        let err = publish_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>")).await;

        match err {
            Error::Remote { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "unknown error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_site_is_transport_error() {
        let base = Url::parse("http://127.0.0.1:1").unwrap();
        let publisher = Publisher::new(&base, Duration::from_secs(2)).unwrap();

        let err = publisher
            .publish(&Session::from_token("tok"), &article())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_empty_token_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = publisher(&server)
            .publish(&Session::from_token("   "), &article())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
