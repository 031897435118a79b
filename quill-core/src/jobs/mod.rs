//! Background generation jobs
//!
//! A job moves `processing → running → completed | failed`. Terminal states
//! are final: a finished record stays readable but never changes again.

mod store;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

pub use store::{JobStore, MemoryJobStore, RecordChange};

/// Unique job identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Allocate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for JobId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::Job(format!("Invalid job id '{}': {}", s, e)))
    }
}

/// Job lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted, background work not yet started
    Processing,
    /// Background work in progress
    Running,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether the job has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Check if moving to `next` is allowed
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Processing, JobStatus::Running)
                | (JobStatus::Running, JobStatus::Completed)
                | (JobStatus::Running, JobStatus::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status record for one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub topic: String,
    pub status: JobStatus,
    /// Accepted for compatibility; notifications are not sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Summary on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Error text on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobRecord {
    /// New record in the `processing` state
    pub fn new(topic: impl Into<String>, callback_url: Option<String>) -> Self {
        Self {
            id: JobId::new(),
            topic: topic.into(),
            status: JobStatus::Processing,
            callback_url,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            result: None,
            error: None,
        }
    }

    fn transition(&mut self, next: JobStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(Error::Job(format!(
                "Invalid transition for job {} from {} to {}",
                self.id, self.status, next
            )));
        }

        tracing::debug!(job_id = %self.id, from = %self.status, to = %next, "Job status transition");
        self.status = next;
        Ok(())
    }

    /// Mark the background work as started
    pub fn start(&mut self) -> Result<()> {
        self.transition(JobStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Record a successful finish
    pub fn complete(&mut self, result: impl Into<String>) -> Result<()> {
        self.transition(JobStatus::Completed)?;
        self.finished_at = Some(Utc::now());
        self.result = Some(result.into());
        Ok(())
    }

    /// Record a failed finish
    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(JobStatus::Failed)?;
        self.finished_at = Some(Utc::now());
        self.error = Some(error.into());
        Ok(())
    }
}
