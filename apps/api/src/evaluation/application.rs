//! Scores a stored application and writes the result back onto it.

use chrono::NaiveDate;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::candidate::{score_candidate, CandidateEvaluation};
use crate::llm_client::ChatCompletion;
use crate::models::application::EvaluationRecord;
use crate::store::ApplicationStore;

/// Loads application `id` with its job and candidate, scores it, and records the result.
///
/// A scoring failure clears aiScore, aiAnalysis and aiColor before the error is returned.
pub async fn evaluate_application(
    id: Uuid,
    store: &dyn ApplicationStore,
    llm: &dyn ChatCompletion,
    today: NaiveDate,
) -> Result<CandidateEvaluation, AppError> {
    let application = store
        .get_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let job = store
        .get_job(application.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", application.job_id)))?;

    let candidate = store
        .get_candidate(application.candidate_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Candidate {} not found", application.candidate_id))
        })?;

    match score_candidate(&job, &candidate, llm, today).await {
        Ok(evaluation) => {
            store
                .record_evaluation(id, &EvaluationRecord::from_evaluation(&evaluation))
                .await?;
            info!("Application {id} scored {}", evaluation.overall_score);
            Ok(evaluation)
        }
        Err(e) => {
            let cleared = store
                .record_evaluation(id, &EvaluationRecord::cleared())
                .await;
            if let Err(store_err) = cleared {
                error!("Failed to clear evaluation on application {id}: {store_err}");
            }
            Err(e)
        }
    }
}
