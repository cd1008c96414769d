use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluation::candidate::CandidateEvaluation;
use crate::evaluation::color::ColorCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    New,
    Saved,
    Contacted,
    Rejected,
    Offer,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "new" => Some(Self::New),
            "saved" => Some(Self::Saved),
            "contacted" => Some(Self::Contacted),
            "rejected" => Some(Self::Rejected),
            "offer" => Some(Self::Offer),
            _ => None,
        }
    }
}

/// A candidate's submission against a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub company_id: Option<Uuid>,
    pub status: ApplicationStatus,
    pub ai_score: Option<f64>,
    pub ai_analysis: Option<CandidateEvaluation>,
    pub ai_color: Option<ColorCode>,
    pub created_at: DateTime<Utc>,
}

/// The AI fields written back onto an application after scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationRecord {
    pub ai_score: Option<f64>,
    pub ai_analysis: Option<CandidateEvaluation>,
    pub ai_color: Option<ColorCode>,
}

impl EvaluationRecord {
    pub fn from_evaluation(evaluation: &CandidateEvaluation) -> Self {
        Self {
            ai_score: Some(evaluation.overall_score),
            ai_analysis: Some(evaluation.clone()),
            ai_color: Some(ColorCode::from_score(evaluation.overall_score)),
        }
    }

    /// Failed scoring leaves `aiScore = null` and nothing else.
    pub fn cleared() -> Self {
        Self::default()
    }
}
