//! Job-Posting Evaluator: grades a draft posting for quality and competitiveness.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::evaluation::parser::{parse_completion, ParseOutcome};
use crate::evaluation::prompts::{build_job_evaluation_prompt, JOB_EVALUATION_SYSTEM};
use crate::llm_client::{ChatCompletion, CompletionOutcome, CompletionRequest};
use crate::models::lenient;
use crate::store::JobCorpus;

const SIMILAR_JOBS_LIMIT: usize = 3;

/// Requirements arrive either as free text or as a list of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirements {
    Text(String),
    List(Vec<String>),
}

impl Requirements {
    pub fn render(&self) -> String {
        match self {
            Requirements::Text(text) => text.trim().to_string(),
            Requirements::List(items) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// The draft a company is about to publish. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPostingDraft {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub title: String,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub description: String,
    pub requirements: Option<Requirements>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub salary_min: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub salary_max: Option<f64>,
    pub currency: Option<String>,
    pub location: Option<String>,
}

/// Only `score` is required of the model; the other fields tolerate loose shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingEvaluation {
    #[serde(deserialize_with = "lenient::number")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub salary_analysis: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub demand_level: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub suggestions: Vec<String>,
}

impl JobPostingEvaluation {
    /// Returned when no completion API key is configured.
    pub fn mock() -> Self {
        Self {
            score: 75.0,
            salary_analysis: "El salario parece competitivo para el mercado actual (Mock)"
                .to_string(),
            demand_level: "Medio (Mock)".to_string(),
            suggestions: vec![
                "Añade más detalles sobre las responsabilidades del puesto (Mock)".to_string(),
                "Incluye los beneficios que ofrece la empresa (Mock)".to_string(),
                "Especifica el nivel de experiencia requerido (Mock)".to_string(),
            ],
        }
    }

    /// Returned when the model's answer cannot be parsed. Reported with HTTP 200.
    pub fn unparseable() -> Self {
        Self {
            score: 0.0,
            salary_analysis: "No se pudo analizar la respuesta del modelo".to_string(),
            demand_level: "Desconocido".to_string(),
            suggestions: vec!["Inténtalo de nuevo más tarde".to_string()],
        }
    }
}

/// Evaluates a draft posting against up to three similar postings from the corpus.
///
/// An unparseable model answer is not an error here: it yields a zero score.
pub async fn evaluate_job_posting(
    draft: &JobPostingDraft,
    llm: &dyn ChatCompletion,
    corpus: &dyn JobCorpus,
) -> Result<JobPostingEvaluation, AppError> {
    if let (Some(min), Some(max)) = (draft.salary_min, draft.salary_max) {
        if min > max {
            warn!("Evaluating posting with salaryMin {min} above salaryMax {max}");
        }
    }

    let similar = if draft.title.trim().is_empty() {
        Vec::new()
    } else {
        corpus
            .find_similar(&draft.title, SIMILAR_JOBS_LIMIT)
            .await
            .unwrap_or_else(|e| {
                warn!("Similar jobs lookup failed, continuing without: {e}");
                Vec::new()
            })
    };

    let prompt = build_job_evaluation_prompt(draft, &similar);
    let outcome = llm
        .complete(CompletionRequest {
            system: JOB_EVALUATION_SYSTEM,
            user: &prompt,
            json_output: true,
        })
        .await
        .map_err(|e| AppError::Llm(format!("Job posting evaluation failed: {e}")))?;

    let evaluation = match outcome {
        CompletionOutcome::Unconfigured => {
            info!("No completion API key; returning mock job posting evaluation");
            JobPostingEvaluation::mock()
        }
        CompletionOutcome::Generated(text) => match parse_completion(&text) {
            ParseOutcome::Parsed(evaluation) => evaluation,
            ParseOutcome::Fallback(failure) => {
                warn!(
                    "Job posting evaluation unparseable ({}); raw: {}",
                    failure.reason, failure.raw
                );
                JobPostingEvaluation::unparseable()
            }
        },
    };

    info!(
        "Job posting '{}' evaluated: score={} similar_jobs={}",
        draft.title,
        evaluation.score,
        similar.len()
    );
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::testing::ScriptedCompletion;
    use crate::models::job::{JobPosting, JobStatus};
    use crate::store::memory::MemoryStore;

    struct UnreachableCorpus;

    #[async_trait]
    impl JobCorpus for UnreachableCorpus {
        async fn find_similar(
            &self,
            _title: &str,
            _limit: usize,
        ) -> Result<Vec<JobPosting>, AppError> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    fn draft(title: &str) -> JobPostingDraft {
        JobPostingDraft {
            title: title.to_string(),
            description: "Construir APIs".to_string(),
            requirements: Some(Requirements::Text("Rust, SQL".to_string())),
            salary_min: Some(30000.0),
            salary_max: Some(40000.0),
            currency: Some("EUR".to_string()),
            location: Some("Valencia".to_string()),
        }
    }

    async fn corpus_with(titles: &[&str]) -> MemoryStore {
        let store = MemoryStore::default();
        for title in titles {
            store
                .insert_job(JobPosting {
                    title: title.to_string(),
                    status: JobStatus::Active,
                    ..Default::default()
                })
                .await;
        }
        store
    }

    #[test]
    fn test_requirements_accept_text_or_list() {
        let text: Requirements = serde_json::from_str(r#""  Rust y SQL ""#).unwrap();
        assert_eq!(text.render(), "Rust y SQL");
        let list: Requirements = serde_json::from_str(r#"["Rust", " ", "SQL"]"#).unwrap();
        assert_eq!(list.render(), "Rust, SQL");
    }

    #[test]
    fn test_mock_carries_marker() {
        let mock = JobPostingEvaluation::mock();
        assert!(mock.demand_level.contains("(Mock)"));
        assert!(mock.suggestions.iter().all(|s| s.contains("(Mock)")));
    }

    #[tokio::test]
    async fn test_parsed_answer_is_returned_verbatim() {
        let llm = ScriptedCompletion::replying(
            r#"{"score": 82, "salaryAnalysis": "En línea", "demandLevel": "Alto", "suggestions": ["Nada"]}"#,
        );
        let corpus = corpus_with(&[]).await;

        let evaluation = evaluate_job_posting(&draft("Backend"), &llm, &corpus)
            .await
            .unwrap();

        assert_eq!(evaluation.score, 82.0);
        assert_eq!(evaluation.salary_analysis, "En línea");
        assert_eq!(evaluation.demand_level, "Alto");
        assert_eq!(evaluation.suggestions, vec!["Nada".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_key_returns_mock() {
        let llm = ScriptedCompletion::unconfigured();
        let corpus = corpus_with(&[]).await;

        let evaluation = evaluate_job_posting(&draft("Backend"), &llm, &corpus)
            .await
            .unwrap();

        assert_eq!(evaluation, JobPostingEvaluation::mock());
    }

    #[tokio::test]
    async fn test_unparseable_answer_yields_zero_score() {
        let llm = ScriptedCompletion::replying("esto no es JSON");
        let corpus = corpus_with(&[]).await;

        let evaluation = evaluate_job_posting(&draft("Backend"), &llm, &corpus)
            .await
            .unwrap();

        assert_eq!(evaluation.score, 0.0);
        assert_eq!(evaluation, JobPostingEvaluation::unparseable());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_llm_error() {
        let llm = ScriptedCompletion::failing(502, "bad gateway");
        let corpus = corpus_with(&[]).await;

        let err = evaluate_job_posting(&draft("Backend"), &llm, &corpus)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_similar_jobs_reach_the_prompt() {
        let llm = ScriptedCompletion::replying(r#"{"score": 50}"#);
        let corpus = corpus_with(&[
            "Senior Backend Engineer",
            "Backend Developer",
            "Diseñador UX",
        ])
        .await;

        evaluate_job_posting(&draft("backend"), &llm, &corpus)
            .await
            .unwrap();

        let prompt = llm.last_user_prompt().unwrap();
        assert!(prompt.contains("Senior Backend Engineer"));
        assert!(prompt.contains("Backend Developer"));
        assert!(!prompt.contains("Diseñador UX"));
    }

    #[tokio::test]
    async fn test_loosely_typed_answer_keeps_its_score() {
        let llm = ScriptedCompletion::replying(
            r#"{"score": "70", "salaryAnalysis": null, "demandLevel": 3, "suggestions": "Añade beneficios"}"#,
        );
        let corpus = corpus_with(&[]).await;

        let evaluation = evaluate_job_posting(&draft("Backend"), &llm, &corpus)
            .await
            .unwrap();

        assert_eq!(evaluation.score, 70.0);
        assert_eq!(evaluation.salary_analysis, "");
        assert_eq!(evaluation.demand_level, "3");
        assert_eq!(evaluation.suggestions, vec!["Añade beneficios".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_similar_jobs_lookup_continues_without_them() {
        let llm = ScriptedCompletion::replying(r#"{"score": 64}"#);

        let evaluation = evaluate_job_posting(&draft("Backend"), &llm, &UnreachableCorpus)
            .await
            .unwrap();

        assert_eq!(evaluation.score, 64.0);
        let prompt = llm.last_user_prompt().unwrap();
        assert!(prompt.contains("OFERTAS SIMILARES:\nNo especificados"));
    }
}
