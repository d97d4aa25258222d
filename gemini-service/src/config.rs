//! Gemini config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`    = API credential (mandatory)
//! - `GEMINI_API_URL`    = endpoint base URL (optional)
//! - `GEMINI_MODELS`     = comma-separated candidate model list (optional)
//! - `LLM_TIMEOUT_SECS`  = per-request timeout in seconds (optional)
//!
//! The candidate list is a priority order: the first entry is the preferred
//! default, later entries are fallbacks for deprecations, quota issues, and
//! naming drift on the provider side.

use crate::error_handler::{ConfigError, LlmError, env_opt_u64, must_env};

/// Default API endpoint for the generative-language service.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default candidate chain, preferred first.
pub const DEFAULT_CANDIDATES: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];

/// Default per-request timeout (seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Gemini client and resolver.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Endpoint base URL (scheme + host, no trailing path).
    pub endpoint: String,

    /// API credential sent as `x-goog-api-key`.
    pub api_key: String,

    /// Ordered candidate model identifiers, preferred first.
    pub candidates: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Loads the configuration from environment variables.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if `GEMINI_API_KEY` is absent or empty
    /// - [`ConfigError::InvalidFormat`] if `GEMINI_API_URL` has no http scheme
    /// - [`ConfigError::EmptyModelList`] if `GEMINI_MODELS` is set but blank
    /// - [`ConfigError::InvalidNumber`] if `LLM_TIMEOUT_SECS` is not a u64
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = must_env("GEMINI_API_KEY")?;

        let endpoint = match std::env::var("GEMINI_API_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let url = url.trim().to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidFormat {
                        var: "GEMINI_API_URL",
                        reason: "must start with http:// or https://",
                    }
                    .into());
                }
                url
            }
            _ => DEFAULT_ENDPOINT.to_string(),
        };

        let candidates = match std::env::var("GEMINI_MODELS") {
            Ok(raw) => {
                let parsed = parse_candidates(&raw);
                if parsed.is_empty() {
                    return Err(ConfigError::EmptyModelList.into());
                }
                parsed
            }
            Err(_) => DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
        };

        let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            endpoint,
            api_key,
            candidates,
            timeout_secs,
        })
    }
}

/// Splits a comma-separated model list, dropping blanks.
pub(crate) fn parse_candidates(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
