//! Grammar checking capability used by the optimization scorer.
//!
//! The scorer only needs an issue count. A failure of any kind is recovered by
//! the caller with a fixed fallback and an explicit `GrammarIssues::Unavailable`
//! marker; it never fails the score.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

/// Text sent to the grammar service is cut to this many characters.
pub const MAX_GRAMMAR_CHARS: usize = 2000;

pub const DEFAULT_GRAMMAR_URL: &str = "https://api.languagetool.org/v2/check";

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Grammar API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Grammar check timed out after {0:?}")]
    Timeout(Duration),
}

/// Issue count, or the failure sentinel. Serializes as a number or `"API failed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarIssues {
    Count(usize),
    Unavailable,
}

impl Serialize for GrammarIssues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GrammarIssues::Count(n) => serializer.serialize_u64(*n as u64),
            GrammarIssues::Unavailable => serializer.serialize_str("API failed"),
        }
    }
}

#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Returns the number of spelling/grammar issues in `text`.
    async fn check(&self, text: &str, language: &str) -> Result<usize, GrammarError>;
}

#[derive(Debug, Serialize)]
struct CheckForm<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<serde_json::Value>,
}

/// LanguageTool `/v2/check` client.
#[derive(Clone)]
pub struct LanguageToolClient {
    client: Client,
    url: String,
}

impl LanguageToolClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, GrammarError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolClient {
    async fn check(&self, text: &str, language: &str) -> Result<usize, GrammarError> {
        let response = self
            .client
            .post(&self.url)
            .form(&CheckForm { text, language })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GrammarError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CheckResponse = response.json().await?;
        debug!("Grammar check found {} issues", body.matches.len());
        Ok(body.matches.len())
    }
}

/// First `MAX_GRAMMAR_CHARS` characters of `text`, cut on a char boundary.
pub fn grammar_excerpt(text: &str) -> &str {
    match text.char_indices().nth(MAX_GRAMMAR_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_is_capped_in_chars() {
        let text = "é".repeat(MAX_GRAMMAR_CHARS + 10);
        assert_eq!(grammar_excerpt(&text).chars().count(), MAX_GRAMMAR_CHARS);
        assert_eq!(grammar_excerpt("short"), "short");
    }

    #[test]
    fn test_issues_serialization() {
        assert_eq!(serde_json::to_string(&GrammarIssues::Count(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&GrammarIssues::Unavailable).unwrap(),
            "\"API failed\""
        );
    }

    #[test]
    fn test_response_counts_matches() {
        let body: CheckResponse =
            serde_json::from_str(r#"{"software": {}, "matches": [{"message": "a"}, {"message": "b"}]}"#)
                .unwrap();
        assert_eq!(body.matches.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let client =
            LanguageToolClient::new("http://127.0.0.1:9/v2/check".into(), Duration::from_millis(200))
                .unwrap();
        assert!(client.check("Some text", "en-US").await.is_err());
    }
}
