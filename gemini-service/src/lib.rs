//! Gemini text-generation service with candidate-model resolution.
//!
//! This crate wraps the Google generative-language REST API behind a small
//! typed surface:
//!
//! - [`GeminiService`] — thin HTTP client for `generateContent`
//! - [`ModelResolver`] — probes an ordered candidate list once per process
//!   and caches the winning model (or the terminal failure)
//! - [`normalize`](normalize::normalize) — answer cleanup matching
//!   assignment-answer-box conventions
//! - [`build_prompt`](prompt::build_prompt) — fixed instructional template
//!
//! The external surface is abstracted behind the [`TextModel`] and
//! [`ModelFactory`] traits so callers can test against stubs.

pub mod config;
pub mod error_handler;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod resolver;
pub mod services;

pub use config::GeminiConfig;
pub use error_handler::{ConfigError, GenerateError, LlmError, ResolveError};
pub use model::{ModelFactory, TextModel};
pub use resolver::ModelResolver;
pub use services::gemini_service::{GeminiFactory, GeminiService};
