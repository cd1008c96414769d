//! Store: the records the evaluators read and the results they write back.
//!
//! Two traits, so similar-job retrieval can move to a real search index without
//! touching the application workflow. `AppState` holds both as trait objects; the
//! Postgres and in-memory backends implement both.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{Application, EvaluationRecord};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;

pub mod memory;
pub mod postgres;

/// Retrieval of postings comparable to a draft.
#[async_trait]
pub trait JobCorpus: Send + Sync {
    /// Active postings whose title contains `title`, case-insensitively. At most `limit`.
    async fn find_similar(&self, title: &str, limit: usize) -> Result<Vec<JobPosting>, AppError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, AppError>;

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError>;

    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateProfile>, AppError>;

    /// Overwrites aiScore, aiAnalysis and aiColor. Status is left to recruiters.
    async fn record_evaluation(&self, id: Uuid, record: &EvaluationRecord)
        -> Result<(), AppError>;
}
