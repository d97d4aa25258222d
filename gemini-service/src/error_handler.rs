//! Unified error handling for `gemini-service`.
//!
//! This module exposes a single top-level error type [`LlmError`] for the
//! whole crate, and groups domain-specific errors in nested enums
//! ([`ConfigError`], [`GenerateError`], [`ResolveError`]). Small helpers for
//! reading environment variables return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[Gemini Service]` to simplify attribution
//! in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, LlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `gemini-service` crate.
///
/// Variants wrap domain-specific enums. Prefer adding new sub-enums for
/// distinct domains instead of growing this type indefinitely.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generation/transport/decoding errors on the wire.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Candidate-resolution errors.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[Gemini Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like timeouts).
    #[error("[Gemini Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Gemini Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_API_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// The candidate list was configured but contained no model names.
    #[error("[Gemini Service] candidate model list must not be empty")]
    EmptyModelList,
}

/* ------------------------------------------------------------------------- */
/* Generation errors                                                         */
/* ------------------------------------------------------------------------- */

/// Error enum for `generateContent` calls.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The endpoint is empty or does not start with http/https.
    #[error("[Gemini Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("[Gemini Service] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[Gemini Service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response.
    #[error("[Gemini Service] failed to decode response: {0}")]
    Decode(String),

    /// The API responded without a usable text payload.
    #[error("[Gemini Service] response contained no text payload")]
    EmptyResponse,
}

/* ------------------------------------------------------------------------- */
/* Resolution errors                                                         */
/* ------------------------------------------------------------------------- */

/// Error enum for candidate-model resolution.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every candidate failed its smoke test; terminal for the process.
    #[error("[Gemini Service] no working model: every candidate failed its smoke test")]
    NoWorkingModel,
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`LlmError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`LlmError::Config`] with [`ConfigError::InvalidNumber`] if the
/// variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse::<u64>().map(Some).map_err(|_| {
            LlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/// Trims a response body down to a short, log-friendly snippet.
pub fn make_snippet(text: &str) -> String {
    text.chars().take(240).collect()
}
