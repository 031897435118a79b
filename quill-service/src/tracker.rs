//! Background job tracking
//!
//! [`JobTracker::submit`] records the job and returns immediately; the work
//! runs on its own tokio task. The store holds the only copy of each job's
//! state, and every record receives exactly one terminal write.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use quill_core::{ArticleBrief, JobId, JobRecord, JobStore, RecordChange};
use tracing::{error, info, warn};

use crate::Result;

/// One accepted generation request
#[derive(Clone)]
pub struct GenerateJob {
    pub brief: ArticleBrief,
    /// Pre-issued bearer token forwarded by the caller
    pub token: Option<String>,
    /// Stored on the record; never called
    pub callback_url: Option<String>,
}

impl GenerateJob {
    pub fn new(brief: ArticleBrief) -> Self {
        Self {
            brief,
            token: None,
            callback_url: None,
        }
    }
}

impl fmt::Debug for GenerateJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateJob")
            .field("brief", &self.brief)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// The work a job performs
///
/// Returns a short summary on success. Any error is stored on the record as
/// its display text.
#[async_trait]
pub trait JobRunner: Send + Sync {
    async fn run(&self, job: &GenerateJob) -> Result<String>;
}

/// Accepts jobs and reports their status
#[derive(Clone)]
pub struct JobTracker {
    store: Arc<dyn JobStore>,
    runner: Arc<dyn JobRunner>,
}

impl JobTracker {
    pub fn new(store: Arc<dyn JobStore>, runner: Arc<dyn JobRunner>) -> Self {
        Self { store, runner }
    }

    /// Record a new job and start it in the background
    ///
    /// The returned record is in the `processing` state.
    pub async fn submit(&self, job: GenerateJob) -> Result<JobRecord> {
        let record = JobRecord::new(job.brief.topic.clone(), job.callback_url.clone());
        let id = record.id;
        self.store.put(record.clone()).await?;

        info!(job_id = %id, topic = %job.brief.topic, category = %job.brief.category, "Job accepted");
        if let Some(ref url) = job.callback_url {
            info!(job_id = %id, callback_url = %url, "Callback URL stored; notifications are not sent");
        }

        let store = Arc::clone(&self.store);
        let runner = Arc::clone(&self.runner);
        tokio::spawn(run_job(store, runner, id, job));

        Ok(record)
    }

    /// Current record for a job, or `None` if the id is unknown
    pub async fn status(&self, id: &JobId) -> Result<Option<JobRecord>> {
        Ok(self.store.get(id).await?)
    }
}

impl fmt::Debug for JobTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobTracker").finish_non_exhaustive()
    }
}

async fn run_job(store: Arc<dyn JobStore>, runner: Arc<dyn JobRunner>, id: JobId, job: GenerateJob) {
    if let Err(e) = store.update(&id, Box::new(|r: &mut JobRecord| r.start())).await {
        error!(job_id = %id, error = %e, "Failed to start job");
        return;
    }
    info!(job_id = %id, "Job running");

    // A panicking runner still ends in `failed`
    let outcome = tokio::spawn(async move { runner.run(&job).await }).await;

    let change: RecordChange = match outcome {
        Ok(Ok(summary)) => {
            info!(job_id = %id, result = %summary, "Job completed");
            Box::new(move |r: &mut JobRecord| r.complete(summary))
        }
        Ok(Err(e)) => {
            let message = e.to_string();
            warn!(job_id = %id, error = %message, "Job failed");
            Box::new(move |r: &mut JobRecord| r.fail(message))
        }
        Err(e) => {
            let message = format!("job task aborted: {}", e);
            error!(job_id = %id, error = %message, "Job failed");
            Box::new(move |r: &mut JobRecord| r.fail(message))
        }
    };

    if let Err(e) = store.update(&id, change).await {
        error!(job_id = %id, error = %e, "Failed to record job outcome");
    }
}
