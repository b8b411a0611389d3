//! HTTP client for the generative-language classification endpoint.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::normalizer::{NormalizedClassification, Normalizer};
use crate::prompt::{build_prompt, extract_candidate_text, request_body};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("response carried no candidate text")]
    EmptyResponse,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL without trailing slash, e.g. `https://host/v1beta`.
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub initial_backoff: Duration,
}

impl ClassifierConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            max_retries: 5,
            initial_backoff: Duration::from_secs(1),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    /// Delay before retry number `retry` (0-based).
    fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry))
    }
}

/// Classifies grievances through the remote model and normalizes the reply.
pub struct ClassifierClient {
    client: reqwest::Client,
    config: ClassifierConfig,
    normalizer: Normalizer,
}

impl ClassifierClient {
    pub fn new(config: ClassifierConfig, normalizer: Normalizer) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            normalizer,
        }
    }

    /// Classify a grievance. Never fails: if every attempt fails the
    /// normalizer's fallback classification is returned.
    pub async fn classify(&self, title: &str, description: &str) -> NormalizedClassification {
        match self.request_text(title, description).await {
            Ok(text) => self.normalizer.normalize_text(Some(&text)),
            Err(e) => {
                warn!(error = %e, "classification failed, using defaults");
                self.normalizer.normalize_text(None)
            }
        }
    }

    /// Send the prompt, retrying any failure with exponential backoff, and
    /// return the model's raw reply text.
    pub async fn request_text(&self, title: &str, description: &str) -> Result<String, ClassifyError> {
        let body = request_body(&build_prompt(title, description));
        let mut retry = 0;
        loop {
            match self.attempt(&body).await {
                Ok(text) => return Ok(text),
                Err(e) if retry < self.config.max_retries => {
                    let delay = self.config.backoff(retry);
                    warn!(error = %e, retry = retry + 1, delay_ms = delay.as_millis() as u64, "classification attempt failed, retrying");
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(&self, body: &Value) -> Result<String, ClassifyError> {
        info!(model = %self.config.model, "requesting classification");
        let resp = self
            .client
            .post(self.config.endpoint())
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifyError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = resp.json().await?;
        extract_candidate_text(&envelope)
            .map(str::to_string)
            .ok_or(ClassifyError::EmptyResponse)
    }
}
