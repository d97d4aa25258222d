//! Lightweight Gemini client for text generation.
//!
//! This module implements a thin client for the generative-language REST API:
//! - `POST {endpoint}/v1beta/models/{model}:generateContent`
//!
//! The credential travels in the `x-goog-api-key` header; the client is
//! built once per handle with the configured timeout.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GeminiConfig;
use crate::error_handler::{GenerateError, make_snippet};
use crate::model::{ModelFactory, TextModel};

/// Result alias for Gemini client operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Thin client for one Gemini model.
///
/// Initialized from a [`GeminiConfig`] plus the model identifier to bind.
/// Reuses an HTTP client with a configured timeout.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    model: String,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] bound to `model`.
    ///
    /// # Errors
    /// - [`GenerateError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`GenerateError::Decode`] if the credential is not a valid header
    /// - [`GenerateError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: &GeminiConfig, model: &str) -> Result<Self> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(GenerateError::InvalidEndpoint(cfg.endpoint.clone()));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&cfg.api_key)
            .map_err(|e| GenerateError::Decode(format!("invalid API key header: {e}")))?;
        headers.insert("x-goog-api-key", key);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_generate = format!("{base}/v1beta/models/{model}:generateContent");

        Ok(Self {
            client,
            model: model.to_string(),
            url_generate,
        })
    }

    /// Performs a `generateContent` request and returns the first text part.
    ///
    /// # Errors
    /// - [`GenerateError::HttpStatus`] for non-2xx responses
    /// - [`GenerateError::Transport`] for client errors
    /// - [`GenerateError::Decode`] if the response cannot be parsed
    /// - [`GenerateError::EmptyResponse`] if no candidate carries text
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest::from_prompt(prompt);

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(GenerateError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let out: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenerateError::Decode(format!("serde error: {e}")))?;

        match out.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenerateError::EmptyResponse),
        }
    }
}

#[async_trait::async_trait]
impl TextModel for GeminiService {
    fn id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        // Inherent method takes precedence; no recursion.
        self.generate(prompt).await
    }
}

/// [`ModelFactory`] backed by the live REST API.
pub struct GeminiFactory {
    cfg: GeminiConfig,
}

impl GeminiFactory {
    /// Creates a factory producing [`GeminiService`] handles from `cfg`.
    pub fn new(cfg: GeminiConfig) -> Self {
        Self { cfg }
    }
}

impl ModelFactory for GeminiFactory {
    fn open(&self, model: &str) -> Result<Arc<dyn TextModel>> {
        Ok(Arc::new(GeminiService::new(&self.cfg, model)?))
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    /// Builds a single-turn request from a prompt.
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response body for `generateContent`.
///
/// Minimal shape: the generated text lives in
/// `candidates[0].content.parts[*].text`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// First non-absent text part of the first candidate, if any.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
