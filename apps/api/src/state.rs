use std::sync::Arc;

use crate::llm_client::ChatCompletion;
use crate::store::{ApplicationStore, JobCorpus};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `CompletionClient` in production, scripted in tests.
    pub llm: Arc<dyn ChatCompletion>,
    /// Postings searched for similar jobs.
    pub jobs: Arc<dyn JobCorpus>,
    pub applications: Arc<dyn ApplicationStore>,
}
