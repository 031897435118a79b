//! Generate-and-publish job runner

use std::sync::Arc;

use async_trait::async_trait;
use quill_api::{Authenticator, Publisher, Session};
use quill_core::{ArticleGenerator, CommandGenerator, Config, Credentials, Secrets};
use tracing::{debug, info, warn};

use crate::{GenerateJob, JobRunner, Result, ServiceError};

/// Writes an article, validates it, and creates a draft on the site
pub struct PublishRunner {
    generator: Arc<dyn ArticleGenerator>,
    publisher: Publisher,
    authenticator: Option<Authenticator>,
    credentials: Option<Credentials>,
}

impl PublishRunner {
    pub fn new(generator: Arc<dyn ArticleGenerator>, publisher: Publisher) -> Self {
        Self {
            generator,
            publisher,
            authenticator: None,
            credentials: None,
        }
    }

    /// Log in with these credentials when a job carries no token
    pub fn with_login(mut self, authenticator: Authenticator, credentials: Credentials) -> Self {
        self.authenticator = Some(authenticator);
        self.credentials = Some(credentials);
        self
    }

    /// Build a runner from configuration and secrets
    ///
    /// Login is optional: without an identity service or credentials, only
    /// jobs that forward a token can publish.
    pub fn from_config(config: &Config, secrets: &Secrets) -> Result<Self> {
        let generator = Arc::new(CommandGenerator::from_config(&config.generator));
        let runner = Self::new(generator, Publisher::from_config(config)?);

        let authenticator = match Authenticator::from_config(config) {
            Ok(auth) => auth,
            Err(e) => {
                warn!(error = %e, "Identity service not configured; jobs need X-Auth-Token");
                return Ok(runner);
            }
        };

        match secrets.credentials() {
            Ok(credentials) => Ok(runner.with_login(authenticator, credentials)),
            Err(e) => {
                warn!(error = %e, "No account credentials; jobs need X-Auth-Token");
                Ok(runner)
            }
        }
    }

    async fn session(&self, job: &GenerateJob) -> Result<Session> {
        if let Some(ref token) = job.token {
            debug!("Using forwarded token");
            return Ok(Session::from_token(token.as_str()));
        }

        match (&self.authenticator, &self.credentials) {
            (Some(auth), Some(credentials)) => Ok(auth.login(credentials).await?),
            _ => Err(ServiceError::Api(quill_api::Error::Configuration(
                "No token forwarded and no login configured".to_string(),
            ))),
        }
    }
}

#[async_trait]
impl JobRunner for PublishRunner {
    async fn run(&self, job: &GenerateJob) -> Result<String> {
        info!(generator = self.generator.name(), topic = %job.brief.topic, "Generating article");
        let payload = self.generator.generate(&job.brief).await?;

        let article = payload.validate().map_err(quill_api::Error::from)?;
        for warning in article.warnings() {
            warn!(topic = %job.brief.topic, "{}", warning);
        }

        let session = self.session(job).await?;
        let result = self.publisher.publish(&session, &article).await?;

        Ok(format!("created draft {} ({})", result.post.slug, result.post.id))
    }
}

impl std::fmt::Debug for PublishRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishRunner")
            .field("generator", &self.generator.name())
            .field("publisher", &self.publisher)
            .field("login", &self.authenticator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{ArticleBrief, ArticlePayload, Category};
    use serde_json::json;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedGenerator(ArticlePayload);

    #[async_trait]
    impl ArticleGenerator for FixedGenerator {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn generate(&self, brief: &ArticleBrief) -> quill_core::Result<ArticlePayload> {
            let mut payload = self.0.clone();
            brief.apply_to(&mut payload);
            Ok(payload)
        }
    }

    fn publisher(server: &MockServer) -> Publisher {
        let base = Url::parse(&server.uri()).unwrap();
        Publisher::new(&base, Duration::from_secs(5)).unwrap()
    }

    fn created() -> ResponseTemplate {
        ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Post created successfully as DRAFT",
            "post": {"id": "42", "slug": "the-compound-effect", "title": "T", "category": "Investing", "published": false},
            "next_steps": []
        }))
    }

    fn job_with_token() -> GenerateJob {
        GenerateJob {
            token: Some("forwarded".to_string()),
            ..GenerateJob::new(ArticleBrief::new("compound interest").with_category(Category::Investing))
        }
    }

    #[tokio::test]
    async fn test_forwarded_token_publishes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/blog/create"))
            .and(header("authorization", "Bearer forwarded"))
            .respond_with(created())
            .expect(1)
            .mount(&server)
            .await;

        let runner = PublishRunner::new(
            Arc::new(FixedGenerator(ArticlePayload::sample())),
            publisher(&server),
        );

        let summary = runner.run(&job_with_token()).await.unwrap();
        assert_eq!(summary, "created draft the-compound-effect (42)");
    }

    #[tokio::test]
    async fn test_logs_in_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh",
                "user": {"email": "editor@example.com", "user_metadata": {"role": "editor"}}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/blog/create"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(created())
            .expect(1)
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).unwrap();
        let auth = Authenticator::new(&base, "anon", Duration::from_secs(5)).unwrap();
        let runner = PublishRunner::new(
            Arc::new(FixedGenerator(ArticlePayload::sample())),
            publisher(&server),
        )
        .with_login(auth, Credentials::new("editor@example.com", "pw"));

        let job = GenerateJob::new(ArticleBrief::new("compound interest"));
        assert!(runner.run(&job).await.is_ok());
    }

    #[tokio::test]
    async fn test_incomplete_article_is_not_published() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(created())
            .expect(0)
            .mount(&server)
            .await;

        let mut payload = ArticlePayload::sample();
        payload.content_es.clear();
        let runner = PublishRunner::new(Arc::new(FixedGenerator(payload)), publisher(&server));

        let err = runner.run(&job_with_token()).await.unwrap_err();
        assert!(err.to_string().contains("content_es"), "{}", err);
    }

    #[tokio::test]
    async fn test_no_token_and_no_login() {
        let server = MockServer::start().await;
        let runner = PublishRunner::new(
            Arc::new(FixedGenerator(ArticlePayload::sample())),
            publisher(&server),
        );

        let job = GenerateJob::new(ArticleBrief::new("x"));
        let err = runner.run(&job).await.unwrap_err();
        assert!(err.to_string().contains("no login configured"));
    }

    #[tokio::test]
    async fn test_forbidden_surfaces_role() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/blog/create"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": "Forbidden",
                "your_role": "user",
                "required_role": "editor"
            })))
            .mount(&server)
            .await;

        let runner = PublishRunner::new(
            Arc::new(FixedGenerator(ArticlePayload::sample())),
            publisher(&server),
        );

        let err = runner.run(&job_with_token()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("user") && msg.contains("editor"), "{}", msg);
    }
}
