//! HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use quill_core::{ArticleBrief, Category, JobId, JobRecord, JobStatus};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppState, GenerateJob, Result, ServiceError};

/// Header carrying a pre-issued bearer token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Body of `POST /generate`
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
}

impl GenerateRequest {
    fn into_brief(self) -> Result<(ArticleBrief, Option<String>)> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(ServiceError::BadRequest("topic is required".to_string()));
        }

        let category = match self.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.parse::<Category>()?,
            _ => Category::default(),
        };

        let mut brief = ArticleBrief::new(topic).with_category(category);
        if let Some(tags) = self.tags {
            let tags: Vec<String> = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            brief = brief.with_tags(tags);
        }
        if let Some(cover) = self.cover_image.filter(|c| !c.trim().is_empty()) {
            brief = brief.with_cover_image(cover.trim());
        }

        let callback_url = self.callback_url.filter(|u| !u.trim().is_empty());
        Ok((brief, callback_url))
    }
}

/// Body of the 202 response
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub job_id: JobId,
    pub status: JobStatus,
    pub message: String,
}

/// Token from `X-Auth-Token`, with or without a `Bearer ` prefix
fn forwarded_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTH_TOKEN_HEADER)?.to_str().ok()?.trim();
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };

    (!token.is_empty()).then(|| token.to_string())
}

/// POST /generate - Start a background generation job
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = body.map_err(|e| ServiceError::BadRequest(e.body_text()))?;
    let (brief, callback_url) = request.into_brief()?;
    let topic = brief.topic.clone();

    let job = GenerateJob {
        brief,
        token: forwarded_token(&headers),
        callback_url,
    };
    let record = state.tracker.submit(job).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(GenerateResponse {
            job_id: record.id,
            status: record.status,
            message: format!("Article generation started for topic: {}", topic),
        }),
    ))
}

/// GET /status/:job_id - Current job record
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobRecord>> {
    // A malformed id cannot name a job
    let id: JobId = job_id.parse().map_err(|_| ServiceError::JobNotFound)?;

    state
        .tracker
        .status(&id)
        .await?
        .map(Json)
        .ok_or(ServiceError::JobNotFound)
}

/// GET /health - Health check
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "quill-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
