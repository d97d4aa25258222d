//! Trait seams over the external generation API.
//!
//! The resolver and the request pipeline talk to these traits instead of the
//! concrete HTTP client, so tests can substitute deterministic stubs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error_handler::GenerateError;

/// A live handle bound to exactly one model identifier.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// The model identifier this handle is bound to.
    fn id(&self) -> &str;

    /// Generates text for `prompt`.
    ///
    /// # Errors
    /// Returns [`GenerateError`] on transport failures, non-2xx statuses,
    /// undecodable payloads, or responses without usable text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Constructs a [`TextModel`] for a candidate identifier.
pub trait ModelFactory: Send + Sync {
    /// Opens a handle for `model`.
    ///
    /// # Errors
    /// Returns [`GenerateError`] when a client cannot be constructed
    /// (invalid endpoint, malformed credential).
    fn open(&self, model: &str) -> Result<Arc<dyn TextModel>, GenerateError>;
}
