use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::candidate::CandidateEvaluation;
use crate::evaluation::color::ColorCode;
use crate::models::application::{Application, ApplicationStatus, EvaluationRecord};
use crate::models::candidate::CandidateProfile;
use crate::models::job::{JobPosting, JobStatus};
use crate::store::{ApplicationStore, JobCorpus};

/// Postgres-backed store. Postings and profiles live in JSONB `data`/`profile` columns;
/// `title` and `status` are duplicated into plain columns for filtering.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct JobRow {
    id: Uuid,
    data: Value,
}

impl JobRow {
    fn into_posting(self) -> Result<JobPosting, AppError> {
        let mut job: JobPosting = serde_json::from_value(self.data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Job {} has bad data: {e}", self.id)))?;
        job.id = Some(self.id);
        Ok(job)
    }
}

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: Uuid,
    profile: Value,
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    candidate_id: Uuid,
    company_id: Option<Uuid>,
    status: String,
    ai_score: Option<f64>,
    ai_analysis: Option<Value>,
    ai_color: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        let status = ApplicationStatus::parse(&row.status).unwrap_or_else(|| {
            warn!("Application {} has unknown status '{}'", row.id, row.status);
            ApplicationStatus::default()
        });
        let ai_analysis = row.ai_analysis.and_then(|value| {
            serde_json::from_value::<CandidateEvaluation>(value)
                .map_err(|e| warn!("Application {} has unreadable aiAnalysis: {e}", row.id))
                .ok()
        });

        Application {
            id: row.id,
            job_id: row.job_id,
            candidate_id: row.candidate_id,
            company_id: row.company_id,
            status,
            ai_score: row.ai_score,
            ai_analysis,
            ai_color: row.ai_color.as_deref().and_then(ColorCode::parse),
            created_at: row.created_at,
        }
    }
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE.
fn like_pattern(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 2);
    escaped.push('%');
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl JobCorpus for PgStore {
    async fn find_similar(&self, title: &str, limit: usize) -> Result<Vec<JobPosting>, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT id, data
            FROM jobs
            WHERE status = $1 AND title ILIKE $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(JobStatus::Active.as_str())
        .bind(like_pattern(title))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(JobRow::into_posting).collect()
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let row: Option<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT id, job_id, candidate_id, company_id, status,
                   ai_score, ai_analysis, ai_color, created_at
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Application::from))
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError> {
        let row: Option<JobRow> = sqlx::query_as("SELECT id, data FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(JobRow::into_posting).transpose()
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateProfile>, AppError> {
        let row: Option<CandidateRow> = sqlx::query_as(
            "SELECT id, profile FROM users WHERE id = $1 AND role = 'candidate'",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut candidate: CandidateProfile = serde_json::from_value(row.profile).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Candidate {} has bad profile: {e}", row.id))
        })?;
        candidate.id = Some(row.id);
        Ok(Some(candidate))
    }

    async fn record_evaluation(
        &self,
        id: Uuid,
        record: &EvaluationRecord,
    ) -> Result<(), AppError> {
        let analysis = record
            .ai_analysis
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(e.into()))?;

        let result = sqlx::query(
            r#"
            UPDATE applications
            SET ai_score = $1, ai_analysis = $2, ai_color = $3
            WHERE id = $4
            "#,
        )
        .bind(record.ai_score)
        .bind(analysis)
        .bind(record.ai_color.map(ColorCode::as_str))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Application {id} not found")));
        }
        Ok(())
    }
}
