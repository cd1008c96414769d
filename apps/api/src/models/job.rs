use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lenient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    #[default]
    Draft,
    Closed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Draft => "draft",
            JobStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Free,
    Paid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredSkill {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub name: String,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferredSkill {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub name: String,
}

/// A job posting as stored in the `jobs` collection.
///
/// `salary_min <= salary_max` is not enforced anywhere; postings are evaluated as written.
/// Explicit `null`s read as absent and numeric fields also accept numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub title: String,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub description: String,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub responsibilities: Vec<String>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub required_skills: Vec<RequiredSkill>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub preferred_skills: Vec<PreferredSkill>,
    #[serde(deserialize_with = "lenient::optional_count")]
    pub years_experience: Option<u32>,
    pub education_level: Option<String>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub salary_min: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub salary_max: Option<f64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub work_mode: Option<String>,
    pub company_id: Option<Uuid>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub status: JobStatus,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub min_score: Option<f64>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub enable_avatar_interview: bool,
    #[serde(deserialize_with = "lenient::optional_count")]
    pub max_applicants: Option<u32>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub plan_type: PlanType,
}
