//! Runners and helpers shared by the service tests

use std::time::Duration;

use async_trait::async_trait;
use quill_core::{JobId, JobRecord};
use tokio::sync::Notify;

use crate::{GenerateJob, JobRunner, JobTracker, Result, ServiceError};

/// Blocks inside `run` until released
pub(crate) struct GatedRunner {
    started: Notify,
    gate: Notify,
}

impl GatedRunner {
    pub(crate) fn new() -> Self {
        Self {
            started: Notify::new(),
            gate: Notify::new(),
        }
    }

    pub(crate) async fn wait_started(&self) {
        tokio::time::timeout(Duration::from_secs(5), self.started.notified())
            .await
            .expect("runner never started");
    }

    pub(crate) fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl JobRunner for GatedRunner {
    async fn run(&self, _job: &GenerateJob) -> Result<String> {
        self.started.notify_one();
        self.gate.notified().await;
        Ok("released".to_string())
    }
}

/// Returns a fixed outcome
pub(crate) struct ScriptedRunner(std::result::Result<String, String>);

impl ScriptedRunner {
    pub(crate) fn succeeding(summary: &str) -> Self {
        Self(Ok(summary.to_string()))
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self(Err(message.to_string()))
    }
}

#[async_trait]
impl JobRunner for ScriptedRunner {
    async fn run(&self, _job: &GenerateJob) -> Result<String> {
        self.0.clone().map_err(ServiceError::Server)
    }
}

/// Poll until the job reaches a terminal state
pub(crate) async fn wait_for_terminal(tracker: &JobTracker, id: &JobId) -> JobRecord {
    for _ in 0..500 {
        let record = tracker.status(id).await.unwrap().expect("job exists");
        if record.status.is_terminal() {
            return record;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {} did not finish", id);
}
