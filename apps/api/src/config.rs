use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::grammar::DEFAULT_GRAMMAR_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub job_profiles_path: PathBuf,
    /// Overrides the built-in keyword tables when set.
    pub skills_vocabulary_path: Option<PathBuf>,
    pub grammar_api_url: String,
    pub grammar_language: String,
    pub grammar_timeout_secs: u64,
    /// Named-entity service; the name heuristic alone is used when unset.
    pub ner_api_url: Option<String>,
    pub batch_concurrency: usize,
    pub max_upload_mb: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            job_profiles_path: require_env("JOB_PROFILES_PATH")?.into(),
            skills_vocabulary_path: optional_env("SKILLS_VOCABULARY_PATH").map(PathBuf::from),
            grammar_api_url: optional_env("GRAMMAR_API_URL")
                .unwrap_or_else(|| DEFAULT_GRAMMAR_URL.to_string()),
            grammar_language: optional_env("GRAMMAR_LANGUAGE").unwrap_or_else(|| "en-US".to_string()),
            grammar_timeout_secs: parse_env("GRAMMAR_TIMEOUT_SECS", 10)?,
            ner_api_url: optional_env("NER_API_URL"),
            batch_concurrency: parse_env("BATCH_CONCURRENCY", 4)?,
            max_upload_mb: parse_env("MAX_UPLOAD_MB", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Defaults for handler tests; nothing is read from the environment.
    pub fn for_tests() -> Self {
        Config {
            job_profiles_path: PathBuf::from("job_profiles.json"),
            skills_vocabulary_path: None,
            grammar_api_url: DEFAULT_GRAMMAR_URL.to_string(),
            grammar_language: "en-US".to_string(),
            grammar_timeout_secs: 1,
            ner_api_url: None,
            batch_concurrency: 2,
            max_upload_mb: 10,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}
