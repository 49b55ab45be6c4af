//! Named-entity recognition capability.
//!
//! The extractor only needs labelled spans; where they come from is pluggable.
//! `AppState` carries an `Arc<dyn NamedEntityRecognizer>` chosen at startup:
//! `HttpEntityRecognizer` when `NER_API_URL` is set, `NoopRecognizer` otherwise.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const PERSON_LABEL: &str = "PERSON";

#[derive(Debug, Error)]
pub enum NerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NER service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }

    pub fn is_person(&self) -> bool {
        self.label.eq_ignore_ascii_case(PERSON_LABEL)
    }
}

#[async_trait]
pub trait NamedEntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, NerError>;
}

/// Recognizes nothing. The extractor's name heuristic takes over.
pub struct NoopRecognizer;

#[async_trait]
impl NamedEntityRecognizer for NoopRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, NerError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Vec<EntitySpan>,
}

/// Client for an HTTP NER service: `POST { "text" }` returning
/// `{ "entities": [{ "text", "label" }] }`.
#[derive(Clone)]
pub struct HttpEntityRecognizer {
    client: Client,
    url: String,
}

impl HttpEntityRecognizer {
    pub fn new(url: String, timeout: Duration) -> Result<Self, NerError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl NamedEntityRecognizer for HttpEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, NerError> {
        let response = self
            .client
            .post(&self.url)
            .json(&NerRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: NerResponse = response.json().await?;
        debug!("NER returned {} entities", body.entities.len());
        Ok(body.entities)
    }
}
