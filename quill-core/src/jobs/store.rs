//! Job record storage

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{JobId, JobRecord};
use crate::{Error, Result};

/// Storage for job records
///
/// The store is the single source of truth for job state. Implementations
/// must refuse to overwrite a record that already reached a terminal state.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert or replace a record
    async fn put(&self, record: JobRecord) -> Result<()>;

    /// Fetch a record by id
    async fn get(&self, id: &JobId) -> Result<Option<JobRecord>>;

    /// Apply `change` to a stored record and return the new version
    ///
    /// The change runs under the store's lock. If it fails, or the record
    /// is missing, nothing is written.
    async fn update(&self, id: &JobId, change: RecordChange) -> Result<JobRecord>;
}

/// A mutation applied by [`JobStore::update`]
pub type RecordChange = Box<dyn FnOnce(&mut JobRecord) -> Result<()> + Send>;

/// In-memory store; records live for the life of the process
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<JobId, JobRecord>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn put(&self, record: JobRecord) -> Result<()> {
        let mut jobs = self.jobs.write().await;

        if let Some(existing) = jobs.get(&record.id) {
            if existing.status.is_terminal() {
                return Err(Error::Job(format!(
                    "Job {} already {}",
                    record.id, existing.status
                )));
            }
        }

        jobs.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: &JobId) -> Result<Option<JobRecord>> {
        Ok(self.jobs.read().await.get(id).cloned())
    }

    async fn update(&self, id: &JobId, change: RecordChange) -> Result<JobRecord> {
        let mut jobs = self.jobs.write().await;
        let record = jobs
            .get_mut(id)
            .ok_or_else(|| Error::Job(format!("Job {} not found", id)))?;

        let mut next = record.clone();
        change(&mut next)?;
        *record = next.clone();
        Ok(next)
    }
}
