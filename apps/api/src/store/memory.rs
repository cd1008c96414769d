use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{Application, EvaluationRecord};
use crate::models::candidate::CandidateProfile;
use crate::models::job::{JobPosting, JobStatus};
use crate::store::{ApplicationStore, JobCorpus};

/// In-process store used when no `DATABASE_URL` is configured, and by tests.
/// Jobs keep insertion order so similar-job lookups are stable. Outside tests it starts
/// and stays empty: similar-job lookups find nothing and stored applications 404.
#[derive(Default)]
pub struct MemoryStore {
    jobs: RwLock<Vec<JobPosting>>,
    candidates: RwLock<HashMap<Uuid, CandidateProfile>>,
    applications: RwLock<HashMap<Uuid, Application>>,
}

#[cfg(test)]
impl MemoryStore {
    /// Stores the posting, assigning an id if it has none. Returns the id.
    pub async fn insert_job(&self, mut job: JobPosting) -> Uuid {
        let id = *job.id.get_or_insert_with(Uuid::new_v4);
        self.jobs.write().await.push(job);
        id
    }

    pub async fn insert_candidate(&self, mut candidate: CandidateProfile) -> Uuid {
        let id = *candidate.id.get_or_insert_with(Uuid::new_v4);
        self.candidates.write().await.insert(id, candidate);
        id
    }

    pub async fn insert_application(&self, application: Application) -> Uuid {
        let id = application.id;
        self.applications.write().await.insert(id, application);
        id
    }
}

#[async_trait]
impl JobCorpus for MemoryStore {
    async fn find_similar(&self, title: &str, limit: usize) -> Result<Vec<JobPosting>, AppError> {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .filter(|job| job.status == JobStatus::Active)
            .filter(|job| job.title.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError> {
        Ok(self
            .jobs
            .read()
            .await
            .iter()
            .find(|job| job.id == Some(id))
            .cloned())
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateProfile>, AppError> {
        Ok(self.candidates.read().await.get(&id).cloned())
    }

    async fn record_evaluation(
        &self,
        id: Uuid,
        record: &EvaluationRecord,
    ) -> Result<(), AppError> {
        let mut applications = self.applications.write().await;
        let application = applications
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

        application.ai_score = record.ai_score;
        application.ai_analysis = record.ai_analysis.clone();
        application.ai_color = record.ai_color;
        Ok(())
    }
}
