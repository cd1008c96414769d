use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub title: String,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub company: String,
    /// `YYYY-MM-DD`, `YYYY-MM` or RFC 3339.
    pub start_date: Option<String>,
    /// Absent for the current position.
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub institution: String,
    pub field_of_study: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub name: String,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub name: String,
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub name: String,
    pub level: Option<String>,
}

/// Candidate profile snapshot read from the `users` collection. Never mutated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub experiences: Vec<Experience>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "lenient::default_on_null")]
    pub languages: Vec<Language>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub expected_salary: Option<f64>,
    pub availability: Option<String>,
}
