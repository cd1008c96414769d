//! Prompt Builder: pure rendering of evaluation prompts from structured input.
//!
//! Nothing here performs I/O or reads the clock; "today" is passed in by the caller so
//! identical input always renders byte-identical text. Missing values render as fixed
//! placeholders and every section is always present, so the prompt layout the model
//! sees never changes shape.

use chrono::{DateTime, Datelike, NaiveDate};

use crate::evaluation::job_posting::JobPostingDraft;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::candidate::{CandidateProfile, Experience};
use crate::models::job::JobPosting;

/// Placeholder for a missing scalar value.
pub const NOT_SPECIFIED: &str = "No especificado";
/// Placeholder for a missing or empty list.
pub const NONE_SPECIFIED: &str = "No especificados";
const UNKNOWN_DURATION: &str = "duración no especificada";

/// One weighted dimension of the candidate rubric.
#[derive(Debug, Clone, Copy)]
pub struct ScoringDimension {
    /// Key the model must use under `scores`.
    pub key: &'static str,
    pub label: &'static str,
    /// Percentage of the overall score.
    pub weight: u32,
}

pub const SCORING_DIMENSIONS: [ScoringDimension; 8] = [
    ScoringDimension {
        key: "skills",
        label: "Habilidades técnicas",
        weight: 30,
    },
    ScoringDimension {
        key: "experience",
        label: "Experiencia relevante",
        weight: 25,
    },
    ScoringDimension {
        key: "education",
        label: "Formación académica",
        weight: 15,
    },
    ScoringDimension {
        key: "culturalFit",
        label: "Encaje cultural",
        weight: 10,
    },
    ScoringDimension {
        key: "salaryAlignment",
        label: "Alineación salarial",
        weight: 8,
    },
    ScoringDimension {
        key: "locationAvailability",
        label: "Ubicación y disponibilidad",
        weight: 5,
    },
    ScoringDimension {
        key: "careerGrowth",
        label: "Potencial de crecimiento",
        weight: 4,
    },
    ScoringDimension {
        key: "communication",
        label: "Comunicación",
        weight: 3,
    },
];

pub const JOB_EVALUATION_SYSTEM: &str = "Eres un experto en reclutamiento y en el mercado \
    laboral. Evalúas ofertas de empleo por su calidad y competitividad. \
    DEBES responder únicamente con un objeto JSON válido. \
    NO incluyas texto fuera del objeto JSON. \
    NO uses bloques de código markdown.";

/// Replace: {title}, {description}, {requirements}, {salary_range}, {location},
///          {similar_jobs}, {json_only}
pub const JOB_EVALUATION_PROMPT_TEMPLATE: &str = r#"Evalúa la siguiente oferta de empleo y compárala con ofertas similares publicadas en la plataforma.

OFERTA:
- Título: {title}
- Descripción: {description}
- Requisitos: {requirements}
- Rango salarial: {salary_range}
- Ubicación: {location}

OFERTAS SIMILARES:
{similar_jobs}

CRITERIOS:
1. Claridad y completitud de la descripción
2. Competitividad del salario frente a las ofertas similares y al mercado
3. Realismo de los requisitos para el puesto
4. Atractivo general para candidatos cualificados

Devuelve un objeto JSON con este esquema EXACTO:
{
  "score": 0-100,
  "salaryAnalysis": "análisis breve del salario frente al mercado",
  "demandLevel": "Alto" | "Medio" | "Bajo",
  "suggestions": ["sugerencia concreta", "..."]
}

{json_only}"#;

pub const CANDIDATE_SCORING_SYSTEM: &str = "Eres un reclutador senior que evalúa la \
    compatibilidad entre candidatos y ofertas de empleo de forma objetiva y justificada. \
    DEBES responder únicamente con un objeto JSON válido. \
    NO incluyas texto fuera del objeto JSON. \
    NO uses bloques de código markdown.";

/// Replace: {job_title}, {job_description}, {responsibilities}, {required_skills},
///          {preferred_skills}, {years_experience}, {education_level}, {salary_range},
///          {location}, {work_mode}, {candidate_name}, {headline}, {bio}, {experiences},
///          {education}, {skills}, {certifications}, {languages}, {expected_salary},
///          {availability}, {rubric}, {score_schema}, {json_only}
pub const CANDIDATE_SCORING_PROMPT_TEMPLATE: &str = r#"Evalúa la compatibilidad entre el candidato y la oferta de empleo.

OFERTA DE EMPLEO:
- Título: {job_title}
- Descripción: {job_description}
- Responsabilidades: {responsibilities}
- Habilidades requeridas: {required_skills}
- Habilidades deseables: {preferred_skills}
- Años de experiencia requeridos: {years_experience}
- Nivel educativo: {education_level}
- Rango salarial: {salary_range}
- Ubicación: {location}
- Modalidad: {work_mode}

PERFIL DEL CANDIDATO:
- Nombre: {candidate_name}
- Titular: {headline}
- Resumen: {bio}
- Experiencia:
{experiences}
- Educación:
{education}
- Habilidades: {skills}
- Certificaciones: {certifications}
- Idiomas: {languages}
- Expectativa salarial: {expected_salary}
- Disponibilidad: {availability}

CRITERIOS DE EVALUACIÓN (peso sobre el total):
{rubric}

Puntúa cada dimensión de 0 a 100 y calcula overallScore como la media ponderada con los pesos anteriores.

Devuelve un objeto JSON con este esquema EXACTO:
{
  "scores": {
{score_schema}
  },
  "overallScore": 0-100,
  "breakdown": {"technicalFit": 0-100, "experienceFit": 0-100, "culturalFit": 0-100},
  "recommendation": "hire" | "consider" | "reject",
  "strengths": ["..."],
  "weaknesses": ["..."],
  "suggestions": ["..."],
  "hiringProbability": 0-100,
  "summary": "resumen de dos o tres frases"
}

{json_only}"#;

/// Renders the job-posting evaluation prompt. `similar` is truncated to the first three.
pub fn build_job_evaluation_prompt(draft: &JobPostingDraft, similar: &[JobPosting]) -> String {
    let requirements = draft
        .requirements
        .as_ref()
        .map(|r| r.render())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| NONE_SPECIFIED.to_string());

    render(
        JOB_EVALUATION_PROMPT_TEMPLATE,
        &[
            ("title", text_or_placeholder(&draft.title)),
            ("description", text_or_placeholder(&draft.description)),
            ("requirements", requirements),
            (
                "salary_range",
                format_salary_range(draft.salary_min, draft.salary_max, draft.currency.as_deref()),
            ),
            ("location", optional_or_placeholder(draft.location.as_deref())),
            ("similar_jobs", format_similar_jobs(similar)),
            ("json_only", JSON_ONLY_INSTRUCTION.to_string()),
        ],
    )
}

/// Renders the candidate scoring prompt. Open-ended experiences are measured up to `today`.
pub fn build_candidate_prompt(
    job: &JobPosting,
    candidate: &CandidateProfile,
    today: NaiveDate,
) -> String {
    let required_skills = join_or_placeholder(
        job.required_skills
            .iter()
            .map(|s| with_level(&s.name, s.level.as_deref())),
    );
    let preferred_skills = join_or_placeholder(job.preferred_skills.iter().map(|s| s.name.clone()));
    let skills = join_or_placeholder(
        candidate
            .skills
            .iter()
            .map(|s| with_level(&s.name, s.level.as_deref())),
    );
    let certifications = join_or_placeholder(candidate.certifications.iter().map(|c| {
        match c.issuer.as_deref().filter(|i| !i.trim().is_empty()) {
            Some(issuer) => format!("{} ({issuer})", c.name),
            None => c.name.clone(),
        }
    }));
    let languages = join_or_placeholder(
        candidate
            .languages
            .iter()
            .map(|l| with_level(&l.name, l.level.as_deref())),
    );
    let years_experience = job
        .years_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let expected_salary = candidate
        .expected_salary
        .map(|s| match job.currency.as_deref() {
            Some(currency) => format!("{} {currency}", format_amount(s)),
            None => format_amount(s),
        })
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    render(
        CANDIDATE_SCORING_PROMPT_TEMPLATE,
        &[
            ("job_title", text_or_placeholder(&job.title)),
            ("job_description", text_or_placeholder(&job.description)),
            (
                "responsibilities",
                join_or_placeholder(job.responsibilities.iter().cloned()),
            ),
            ("required_skills", required_skills),
            ("preferred_skills", preferred_skills),
            ("years_experience", years_experience),
            (
                "education_level",
                optional_or_placeholder(job.education_level.as_deref()),
            ),
            (
                "salary_range",
                format_salary_range(job.salary_min, job.salary_max, job.currency.as_deref()),
            ),
            ("location", optional_or_placeholder(job.location.as_deref())),
            ("work_mode", optional_or_placeholder(job.work_mode.as_deref())),
            ("candidate_name", text_or_placeholder(&candidate.name)),
            ("headline", optional_or_placeholder(candidate.headline.as_deref())),
            ("bio", optional_or_placeholder(candidate.bio.as_deref())),
            ("experiences", format_experiences(&candidate.experiences, today)),
            ("education", format_education(candidate)),
            ("skills", skills),
            ("certifications", certifications),
            ("languages", languages),
            ("expected_salary", expected_salary),
            (
                "availability",
                optional_or_placeholder(candidate.availability.as_deref()),
            ),
            ("rubric", format_rubric()),
            ("score_schema", format_score_schema()),
            ("json_only", JSON_ONLY_INSTRUCTION.to_string()),
        ],
    )
}

/// Single-pass `{key}` substitution. Inserted values are never re-scanned, so user text
/// that happens to contain `{title}` stays literal. Unknown braces pass through.
fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = vars.iter().find(|(key, _)| {
            tail[1..].starts_with(key) && tail[1 + key.len()..].starts_with('}')
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn text_or_placeholder(value: &str) -> String {
    optional_or_placeholder(Some(value))
}

fn optional_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_SPECIFIED.to_string(),
    }
}

fn join_or_placeholder<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        NONE_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

fn with_level(name: &str, level: Option<&str>) -> String {
    match level.map(str::trim).filter(|l| !l.is_empty()) {
        Some(level) => format!("{name} ({level})"),
        None => name.to_string(),
    }
}

/// Whole numbers print without a fractional part: 45000.0 → "45000".
fn format_amount(amount: f64) -> String {
    format!("{amount}")
}

pub(crate) fn format_salary_range(
    min: Option<f64>,
    max: Option<f64>,
    currency: Option<&str>,
) -> String {
    let range = match (min, max) {
        (Some(min), Some(max)) => format!("{} - {}", format_amount(min), format_amount(max)),
        (Some(min), None) => format!("Desde {}", format_amount(min)),
        (None, Some(max)) => format!("Hasta {}", format_amount(max)),
        (None, None) => return NOT_SPECIFIED.to_string(),
    };
    match currency.map(str::trim).filter(|c| !c.is_empty()) {
        Some(currency) => format!("{range} {currency}"),
        None => range,
    }
}

fn format_similar_jobs(similar: &[JobPosting]) -> String {
    if similar.is_empty() {
        return NONE_SPECIFIED.to_string();
    }
    similar
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, job)| {
            format!(
                "{}. {} | Salario: {} | Ubicación: {}",
                i + 1,
                text_or_placeholder(&job.title),
                format_salary_range(job.salary_min, job.salary_max, job.currency.as_deref()),
                optional_or_placeholder(job.location.as_deref()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_experiences(experiences: &[Experience], today: NaiveDate) -> String {
    if experiences.is_empty() {
        return format!("  {NONE_SPECIFIED}");
    }
    experiences
        .iter()
        .map(|exp| {
            let period = match (&exp.start_date, &exp.end_date) {
                (Some(start), Some(end)) => format!("{start} - {end}"),
                (Some(start), None) => format!("{start} - actualidad"),
                _ => NOT_SPECIFIED.to_string(),
            };
            format!(
                "  - {} en {} ({period}; {})",
                text_or_placeholder(&exp.title),
                text_or_placeholder(&exp.company),
                describe_duration(exp, today),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_education(candidate: &CandidateProfile) -> String {
    if candidate.education.is_empty() {
        return format!("  {NONE_SPECIFIED}");
    }
    candidate
        .education
        .iter()
        .map(|edu| {
            let degree = match edu.field_of_study.as_deref().filter(|f| !f.trim().is_empty()) {
                Some(field) => format!("{} en {field}", text_or_placeholder(&edu.degree)),
                None => text_or_placeholder(&edu.degree),
            };
            let mut line = format!("  - {degree}, {}", text_or_placeholder(&edu.institution));
            if let Some(end) = edu.end_date.as_deref().filter(|e| !e.trim().is_empty()) {
                line.push_str(&format!(" ({end})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_rubric() -> String {
    SCORING_DIMENSIONS
        .iter()
        .map(|d| format!("- {} ({}): {}%", d.label, d.key, d.weight))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_score_schema() -> String {
    SCORING_DIMENSIONS
        .iter()
        .map(|d| {
            format!(
                "    \"{}\": {{\"score\": 0-100, \"justification\": \"...\"}}",
                d.key
            )
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

fn describe_duration(exp: &Experience, today: NaiveDate) -> String {
    let start = exp.start_date.as_deref().and_then(parse_profile_date);
    let end = match exp.end_date.as_deref() {
        Some(raw) => parse_profile_date(raw),
        None => Some(today),
    };
    match (start, end) {
        (Some(start), Some(end)) => match whole_years_between(start, end) {
            1 => "1 año".to_string(),
            n => format!("{n} años"),
        },
        _ => UNKNOWN_DURATION.to_string(),
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, `YYYY-MM` and bare `YYYY`.
pub(crate) fn parse_profile_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d").ok())
}

/// Completed years between two dates, rounded down. Never negative.
pub(crate) fn whole_years_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::job_posting::Requirements;
    use crate::models::candidate::{Certification, Education, Language, Skill};
    use crate::models::job::{PreferredSkill, RequiredSkill};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn draft() -> JobPostingDraft {
        JobPostingDraft {
            title: "Desarrollador Backend".to_string(),
            description: "Servicios de pagos en Rust".to_string(),
            requirements: Some(Requirements::List(vec![
                "3 años de Rust".to_string(),
                "PostgreSQL".to_string(),
            ])),
            salary_min: Some(40000.0),
            salary_max: Some(55000.0),
            currency: Some("EUR".to_string()),
            location: Some("Madrid".to_string()),
        }
    }

    fn similar(title: &str, min: f64, max: f64) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            salary_min: Some(min),
            salary_max: Some(max),
            currency: Some("EUR".to_string()),
            location: Some("Barcelona".to_string()),
            ..Default::default()
        }
    }

    fn job() -> JobPosting {
        JobPosting {
            title: "Data Engineer".to_string(),
            description: "Pipelines de datos".to_string(),
            responsibilities: vec!["Diseñar ETLs".to_string()],
            required_skills: vec![RequiredSkill {
                name: "Python".to_string(),
                level: Some("avanzado".to_string()),
            }],
            preferred_skills: vec![PreferredSkill {
                name: "Airflow".to_string(),
            }],
            years_experience: Some(3),
            salary_min: Some(35000.0),
            salary_max: Some(45000.0),
            currency: Some("EUR".to_string()),
            work_mode: Some("remoto".to_string()),
            ..Default::default()
        }
    }

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            name: "Ana Torres".to_string(),
            headline: Some("Ingeniera de datos".to_string()),
            experiences: vec![
                Experience {
                    title: "Data Engineer".to_string(),
                    company: "Acme".to_string(),
                    start_date: Some("2021-03-01".to_string()),
                    end_date: None,
                    description: None,
                },
                Experience {
                    title: "Analista".to_string(),
                    company: "Globex".to_string(),
                    start_date: Some("2018-09".to_string()),
                    end_date: Some("2021-02".to_string()),
                    description: None,
                },
            ],
            education: vec![Education {
                degree: "Grado".to_string(),
                institution: "UPM".to_string(),
                field_of_study: Some("Informática".to_string()),
                end_date: Some("2018".to_string()),
            }],
            skills: vec![
                Skill {
                    name: "Python".to_string(),
                    level: Some("experto".to_string()),
                },
                Skill {
                    name: "SQL".to_string(),
                    level: None,
                },
            ],
            certifications: vec![Certification {
                name: "GCP Data Engineer".to_string(),
                issuer: Some("Google".to_string()),
            }],
            languages: vec![Language {
                name: "Inglés".to_string(),
                level: Some("C1".to_string()),
            }],
            expected_salary: Some(42000.0),
            availability: Some("Inmediata".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_weights_sum_to_100() {
        let total: u32 = SCORING_DIMENSIONS.iter().map(|d| d.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_job_prompt_is_deterministic() {
        let similar = vec![similar("Backend Rust", 45000.0, 60000.0)];
        let first = build_job_evaluation_prompt(&draft(), &similar);
        let second = build_job_evaluation_prompt(&draft(), &similar);
        assert_eq!(first, second);
    }

    #[test]
    fn test_candidate_prompt_is_deterministic() {
        let first = build_candidate_prompt(&job(), &candidate(), today());
        let second = build_candidate_prompt(&job(), &candidate(), today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_job_prompt_renders_inputs() {
        let prompt = build_job_evaluation_prompt(&draft(), &[]);
        assert!(prompt.contains("- Título: Desarrollador Backend"));
        assert!(prompt.contains("- Requisitos: 3 años de Rust, PostgreSQL"));
        assert!(prompt.contains("- Rango salarial: 40000 - 55000 EUR"));
        assert!(prompt.contains("- Ubicación: Madrid"));
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
        assert!(!prompt.contains("{json_only}"));
    }

    #[test]
    fn test_job_prompt_with_empty_draft_uses_placeholders() {
        let prompt = build_job_evaluation_prompt(&JobPostingDraft::default(), &[]);
        assert!(prompt.contains("- Título: No especificado"));
        assert!(prompt.contains("- Requisitos: No especificados"));
        assert!(prompt.contains("- Rango salarial: No especificado"));
        assert!(prompt.contains("OFERTAS SIMILARES:\nNo especificados"));
    }

    #[test]
    fn test_job_prompt_lists_at_most_three_similar_jobs() {
        let corpus: Vec<JobPosting> = (1..=5)
            .map(|i| similar(&format!("Backend {i}"), 30000.0, 40000.0))
            .collect();
        let prompt = build_job_evaluation_prompt(&draft(), &corpus);
        assert!(
            prompt.contains("1. Backend 1 | Salario: 30000 - 40000 EUR | Ubicación: Barcelona")
        );
        assert!(prompt.contains("3. Backend 3"));
        assert!(!prompt.contains("Backend 4"));
    }

    #[test]
    fn test_placeholder_lookalikes_in_user_text_stay_literal() {
        let mut draft = draft();
        draft.description = "Trae tu {location} y tu {title}".to_string();
        let prompt = build_job_evaluation_prompt(&draft, &[]);
        assert!(prompt.contains("- Descripción: Trae tu {location} y tu {title}"));
    }

    #[test]
    fn test_candidate_prompt_contains_rubric_and_schema() {
        let prompt = build_candidate_prompt(&job(), &candidate(), today());
        assert!(prompt.contains("- Habilidades técnicas (skills): 30%"));
        assert!(prompt.contains("- Comunicación (communication): 3%"));
        assert!(prompt.contains("\"culturalFit\": {\"score\": 0-100"));
        assert!(prompt.contains("\"recommendation\": \"hire\" | \"consider\" | \"reject\""));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_candidate_prompt_renders_profile() {
        let prompt = build_candidate_prompt(&job(), &candidate(), today());
        assert!(prompt.contains("- Habilidades requeridas: Python (avanzado)"));
        assert!(prompt.contains("- Habilidades: Python (experto), SQL"));
        assert!(prompt.contains("- Certificaciones: GCP Data Engineer (Google)"));
        assert!(prompt.contains("- Idiomas: Inglés (C1)"));
        assert!(prompt.contains("- Expectativa salarial: 42000 EUR"));
        assert!(prompt.contains("  - Grado en Informática, UPM (2018)"));
    }

    #[test]
    fn test_experience_durations_round_down_to_whole_years() {
        let prompt = build_candidate_prompt(&job(), &candidate(), today());
        // 2021-03-01 → 2024-06-15 (current)
        assert!(prompt.contains("  - Data Engineer en Acme (2021-03-01 - actualidad; 3 años)"));
        // 2018-09-01 → 2021-02-01 is two years and five months
        assert!(prompt.contains("  - Analista en Globex (2018-09 - 2021-02; 2 años)"));
    }

    #[test]
    fn test_empty_profile_keeps_every_section() {
        let prompt =
            build_candidate_prompt(&JobPosting::default(), &CandidateProfile::default(), today());
        assert!(prompt.contains("- Experiencia:\n  No especificados"));
        assert!(prompt.contains("- Educación:\n  No especificados"));
        assert!(prompt.contains("- Habilidades: No especificados"));
        assert!(prompt.contains("- Responsabilidades: No especificados"));
        assert!(prompt.contains("- Expectativa salarial: No especificado"));
        assert!(prompt.contains("- Años de experiencia requeridos: No especificado"));
    }

    #[test]
    fn test_unparseable_dates_render_unknown_duration() {
        let exp = Experience {
            title: "Dev".to_string(),
            company: "X".to_string(),
            start_date: Some("hace tiempo".to_string()),
            end_date: None,
            description: None,
        };
        assert_eq!(describe_duration(&exp, today()), UNKNOWN_DURATION);
    }

    #[test]
    fn test_parse_profile_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        assert_eq!(parse_profile_date("2020-05-01"), Some(expected));
        assert_eq!(parse_profile_date("2020-05"), Some(expected));
        assert_eq!(parse_profile_date("2020-05-01T10:00:00Z"), Some(expected));
        assert_eq!(
            parse_profile_date("2020"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(parse_profile_date("mayo"), None);
    }

    #[test]
    fn test_whole_years_between() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(whole_years_between(d(2020, 6, 15), d(2024, 6, 15)), 4);
        assert_eq!(whole_years_between(d(2020, 6, 16), d(2024, 6, 15)), 3);
        assert_eq!(whole_years_between(d(2024, 1, 1), d(2024, 12, 31)), 0);
        assert_eq!(whole_years_between(d(2025, 1, 1), d(2024, 1, 1)), 0);
    }

    #[test]
    fn test_salary_range_variants() {
        assert_eq!(format_salary_range(Some(1000.0), None, Some("USD")), "Desde 1000 USD");
        assert_eq!(format_salary_range(None, Some(2500.5), None), "Hasta 2500.5");
        assert_eq!(format_salary_range(None, None, Some("USD")), NOT_SPECIFIED);
    }

    #[test]
    fn test_render_leaves_unknown_braces() {
        let out = render(
            "{a} {\"x\": 1} {b}",
            &[("a", "1".to_string()), ("b", "2".to_string())],
        );
        assert_eq!(out, "1 {\"x\": 1} 2");
    }
}
