//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::application::evaluate_application;
use crate::evaluation::candidate::{score_candidate, CandidateEvaluation};
use crate::evaluation::job_posting::{
    evaluate_job_posting, JobPostingDraft, JobPostingEvaluation,
};
use crate::extract::AppJson;
use crate::models::application::Application;
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CandidateScoreRequest {
    #[serde(default)]
    pub job: Option<JobPosting>,
    #[serde(default)]
    pub candidate: Option<CandidateProfile>,
}

/// POST /api/v1/evaluations/job-posting
pub async fn handle_evaluate_job_posting(
    State(state): State<AppState>,
    AppJson(draft): AppJson<JobPostingDraft>,
) -> Result<Json<JobPostingEvaluation>, AppError> {
    let evaluation =
        evaluate_job_posting(&draft, state.llm.as_ref(), state.jobs.as_ref()).await?;
    Ok(Json(evaluation))
}

/// POST /api/v1/evaluations/candidate
///
/// Both `job` and `candidate` are required; nothing is sent upstream without them.
pub async fn handle_score_candidate(
    State(state): State<AppState>,
    AppJson(request): AppJson<CandidateScoreRequest>,
) -> Result<Json<CandidateEvaluation>, AppError> {
    let (Some(job), Some(candidate)) = (request.job, request.candidate) else {
        return Err(AppError::Validation(
            "Both job and candidate are required".to_string(),
        ));
    };

    let evaluation =
        score_candidate(&job, &candidate, state.llm.as_ref(), Utc::now().date_naive()).await?;
    Ok(Json(evaluation))
}

/// POST /api/v1/applications/:id/evaluate
pub async fn handle_evaluate_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateEvaluation>, AppError> {
    let evaluation = evaluate_application(
        id,
        state.applications.as_ref(),
        state.llm.as_ref(),
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(evaluation))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = state
        .applications
        .get_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(application))
}
