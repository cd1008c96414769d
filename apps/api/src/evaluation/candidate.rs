//! Candidate-Job Match Scorer: weighted, multi-dimension compatibility score.
//!
//! Unlike the job-posting evaluator, an unparseable model answer is an error here
//! (HTTP 500), not a low score.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::evaluation::color::ColorCode;
use crate::evaluation::parser::parse_completion;
use crate::evaluation::prompts::{
    build_candidate_prompt, CANDIDATE_SCORING_SYSTEM, SCORING_DIMENSIONS,
};
use crate::llm_client::{ChatCompletion, CompletionOutcome, CompletionRequest};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;
use crate::models::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Hire,
    Consider,
    Reject,
}

impl Recommendation {
    /// Case-insensitive; also takes the Spanish verbs the model sometimes answers with.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "hire" | "contratar" => Some(Self::Hire),
            "consider" | "considerar" => Some(Self::Consider),
            "reject" | "rechazar" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Unknown recommendation values become `None` instead of failing the whole answer.
fn lenient_recommendation<'de, D>(deserializer: D) -> Result<Option<Recommendation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(Recommendation::parse))
}

/// The color is recomputed after parsing, so a malformed value is simply dropped.
fn lenient_color<'de, D>(deserializer: D) -> Result<Option<ColorCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(ColorCode::parse))
}

/// Dimensions may arrive as `{"score": .., ..}` or as a bare number. Unusable entries
/// are dropped rather than failing the whole answer.
fn lenient_scores<'de, D>(deserializer: D) -> Result<BTreeMap<String, DimensionScore>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Object(entries)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| {
            let dimension = match value {
                Value::Object(_) => serde_json::from_value::<DimensionScore>(value).ok(),
                other => lenient::number(other).ok().map(|score| DimensionScore {
                    score,
                    justification: String::new(),
                    details: Map::new(),
                }),
            };
            if dimension.is_none() {
                warn!("Dropping unusable score for dimension '{key}'");
            }
            dimension.map(|d| (key, d))
        })
        .collect())
}

/// Score for one rubric dimension. Extra fields the model adds are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    #[serde(deserialize_with = "lenient::number")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub justification: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Only `overallScore` is required of the model; every other field tolerates loose shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEvaluation {
    #[serde(default, deserialize_with = "lenient_scores")]
    pub scores: BTreeMap<String, DimensionScore>,
    #[serde(deserialize_with = "lenient::number")]
    pub overall_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_recommendation",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommendation: Option<Recommendation>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub suggestions: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub hiring_probability: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: String,
    /// Always recomputed from `overall_score`; whatever the model sends is ignored.
    #[serde(
        default,
        deserialize_with = "lenient_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_code: Option<ColorCode>,
}

impl CandidateEvaluation {
    /// Returned when no completion API key is configured.
    pub fn mock() -> Self {
        let scores = SCORING_DIMENSIONS
            .iter()
            .map(|d| {
                (
                    d.key.to_string(),
                    DimensionScore {
                        score: 70.0,
                        justification: "Evaluación simulada (Mock)".to_string(),
                        details: Map::new(),
                    },
                )
            })
            .collect();

        Self {
            scores,
            overall_score: 70.0,
            breakdown: None,
            recommendation: Some(Recommendation::Consider),
            strengths: vec!["Perfil pendiente de evaluación real (Mock)".to_string()],
            weaknesses: Vec::new(),
            suggestions: vec![
                "Configura COMPLETION_API_KEY para obtener evaluaciones reales (Mock)".to_string(),
            ],
            hiring_probability: Some(50.0),
            summary: "Evaluación simulada: no hay clave de API configurada (Mock)".to_string(),
            color_code: None,
        }
    }

    fn with_color(mut self) -> Self {
        self.color_code = Some(ColorCode::from_score(self.overall_score));
        self
    }
}

/// Scores `candidate` against `job`. `today` closes open-ended experiences.
pub async fn score_candidate(
    job: &JobPosting,
    candidate: &CandidateProfile,
    llm: &dyn ChatCompletion,
    today: NaiveDate,
) -> Result<CandidateEvaluation, AppError> {
    let prompt = build_candidate_prompt(job, candidate, today);
    let outcome = llm
        .complete(CompletionRequest {
            system: CANDIDATE_SCORING_SYSTEM,
            user: &prompt,
            json_output: true,
        })
        .await
        .map_err(|e| AppError::Llm(format!("Candidate scoring failed: {e}")))?;

    let evaluation = match outcome {
        CompletionOutcome::Unconfigured => {
            info!("No completion API key; returning mock candidate evaluation");
            CandidateEvaluation::mock()
        }
        CompletionOutcome::Generated(text) => parse_completion::<CandidateEvaluation>(&text)
            .into_result()
            .map_err(|failure| {
                warn!("Candidate evaluation unparseable; raw: {}", failure.raw);
                AppError::UnparseableEvaluation(failure.reason)
            })?,
    }
    .with_color();

    info!(
        "Candidate '{}' scored for '{}': overall={} color={:?}",
        candidate.name, job.title, evaluation.overall_score, evaluation.color_code
    );
    Ok(evaluation)
}
