use anyhow::{Context, Result};

pub const DEFAULT_COMPLETION_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "openai/gpt-4o-mini";

/// Application configuration loaded from environment variables.
///
/// Nothing here is mandatory: without `COMPLETION_API_KEY` the evaluators answer
/// with labelled mock results, and without `DATABASE_URL` records live in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub completion_api_key: Option<String>,
    pub completion_api_url: String,
    pub completion_model: String,
    pub completion_timeout_secs: u64,
    pub max_concurrent_completions: usize,
    pub public_app_url: Option<String>,
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_concurrent_completions = parse_or(&get, "MAX_CONCURRENT_COMPLETIONS", 8usize)?;
        anyhow::ensure!(
            max_concurrent_completions > 0,
            "MAX_CONCURRENT_COMPLETIONS must be at least 1"
        );

        Ok(Config {
            completion_api_key: get("COMPLETION_API_KEY"),
            completion_api_url: get("COMPLETION_API_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_model: get("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            completion_timeout_secs: parse_or(&get, "COMPLETION_TIMEOUT_SECS", 120u64)?,
            max_concurrent_completions,
            public_app_url: get("PUBLIC_APP_URL"),
            database_url: get("DATABASE_URL"),
            port: parse_or(&get, "PORT", 8080u16)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.completion_api_key.is_none());
        assert!(config.database_url.is_none());
        assert_eq!(config.completion_api_url, DEFAULT_COMPLETION_API_URL);
        assert_eq!(config.completion_model, DEFAULT_COMPLETION_MODEL);
        assert_eq!(config.port, 8080);
        assert_eq!(config.completion_timeout_secs, 120);
        assert_eq!(config.max_concurrent_completions, 8);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = config_from(&[("COMPLETION_API_KEY", "   ")]).unwrap();
        assert!(config.completion_api_key.is_none());
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = config_from(&[
            ("COMPLETION_API_KEY", "sk-test"),
            ("COMPLETION_MODEL", "anthropic/claude-3.5-haiku"),
            ("PUBLIC_APP_URL", "https://jobs.example.com"),
            ("PORT", "3000"),
            ("MAX_CONCURRENT_COMPLETIONS", "2"),
        ])
        .unwrap();
        assert_eq!(config.completion_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.completion_model, "anthropic/claude-3.5-haiku");
        assert_eq!(config.public_app_url.as_deref(), Some("https://jobs.example.com"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_concurrent_completions, 2);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        assert!(config_from(&[("MAX_CONCURRENT_COMPLETIONS", "0")]).is_err());
    }
}
