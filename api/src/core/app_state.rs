use std::sync::Arc;

use gemini_service::{GeminiConfig, GeminiFactory, LlmError, ModelFactory, ModelResolver};

use crate::core::history::InteractionHistory;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Whether a Gemini credential was configured at boot.
    pub api_key_configured: bool,
    /// Process-wide model resolver (probes once, then reuses the handle).
    pub resolver: ModelResolver,
    /// Bounded question/answer history backing the dashboard.
    pub history: InteractionHistory,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, LlmError> {
        let cfg = GeminiConfig::from_env()?;
        Ok(Self::new(cfg))
    }

    /// State over the live Gemini factory.
    pub fn new(cfg: GeminiConfig) -> Self {
        let candidates = cfg.candidates.clone();
        let api_key_configured = !cfg.api_key.trim().is_empty();
        let factory: Arc<dyn ModelFactory> = Arc::new(GeminiFactory::new(cfg));
        Self {
            api_key_configured,
            resolver: ModelResolver::new(factory, candidates),
            history: InteractionHistory::default(),
        }
    }

    /// State over a custom model factory; used by tests to stub the API.
    pub fn with_factory(factory: Arc<dyn ModelFactory>, candidates: Vec<String>) -> Self {
        Self {
            api_key_configured: true,
            resolver: ModelResolver::new(factory, candidates),
            history: InteractionHistory::default(),
        }
    }
}
