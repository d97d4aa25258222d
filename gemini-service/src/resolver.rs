//! Candidate-model resolution with process-lifetime caching.
//!
//! External model availability is unpredictable (deprecations, quota, naming
//! drift), so the resolver probes a priority-ordered fallback list with a
//! minimal smoke-test prompt and binds the first candidate that answers.
//! Probing happens once per process: the outcome, success or terminal
//! failure, is cached and reused by every subsequent request.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use crate::error_handler::{GenerateError, ResolveError};
use crate::model::{ModelFactory, TextModel};

/// Minimal prompt used to smoke-test a candidate.
pub const SMOKE_TEST_PROMPT: &str = "Test";

/// Probes an ordered candidate list and caches the winning handle.
///
/// The `OnceCell` gives the write a single-writer discipline: concurrent
/// first requests wait on one probe run instead of racing their own.
pub struct ModelResolver {
    factory: Arc<dyn ModelFactory>,
    candidates: Vec<String>,
    resolved: OnceCell<Option<Arc<dyn TextModel>>>,
}

impl ModelResolver {
    /// Creates a resolver over `candidates`, tried in list order.
    pub fn new(factory: Arc<dyn ModelFactory>, candidates: Vec<String>) -> Self {
        Self {
            factory,
            candidates,
            resolved: OnceCell::new(),
        }
    }

    /// Returns the process-wide resolved handle, probing on first call.
    ///
    /// A candidate is accepted on the first response with non-empty text;
    /// resolution short-circuits there. A candidate that errors or returns
    /// an empty payload is logged and skipped, never retried. Once every
    /// candidate has failed, the terminal failure is cached too: repeated
    /// calls do not re-probe.
    ///
    /// # Errors
    /// [`ResolveError::NoWorkingModel`] when no candidate passed its smoke
    /// test.
    pub async fn resolve(&self) -> Result<Arc<dyn TextModel>, ResolveError> {
        let slot = self
            .resolved
            .get_or_init(|| self.probe_candidates())
            .await;
        slot.clone().ok_or(ResolveError::NoWorkingModel)
    }

    /// Identifier of the bound model, if resolution has succeeded.
    pub fn resolved_id(&self) -> Option<String> {
        self.resolved
            .get()
            .and_then(|slot| slot.as_ref().map(|m| m.id().to_string()))
    }

    /// Whether a handle is currently bound.
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolved.get(), Some(Some(_)))
    }

    async fn probe_candidates(&self) -> Option<Arc<dyn TextModel>> {
        for candidate in &self.candidates {
            match self.probe(candidate).await {
                Ok(model) => {
                    info!(model = %candidate, "model resolved");
                    return Some(model);
                }
                Err(err) => {
                    warn!(model = %candidate, error = %err, "candidate failed smoke test; trying next");
                }
            }
        }
        error!("no candidate model passed the smoke test");
        None
    }

    async fn probe(&self, candidate: &str) -> Result<Arc<dyn TextModel>, GenerateError> {
        let model = self.factory.open(candidate)?;
        let text = model.generate(SMOKE_TEST_PROMPT).await?;
        if text.trim().is_empty() {
            return Err(GenerateError::EmptyResponse);
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Per-model behavior for the stub factory.
    #[derive(Clone)]
    enum Behavior {
        Reply(&'static str),
        Fail,
    }

    struct StubModel {
        id: String,
        behavior: Behavior,
        probes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextModel for StubModel {
        fn id(&self) -> &str {
            &self.id
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::Fail => Err(GenerateError::EmptyResponse),
            }
        }
    }

    struct StubFactory {
        behaviors: Vec<(&'static str, Behavior)>,
        probes: Arc<AtomicUsize>,
    }

    impl ModelFactory for StubFactory {
        fn open(&self, model: &str) -> Result<Arc<dyn TextModel>, GenerateError> {
            let behavior = self
                .behaviors
                .iter()
                .find(|(id, _)| *id == model)
                .map(|(_, b)| b.clone())
                .expect("unknown stub model");
            Ok(Arc::new(StubModel {
                id: model.to_string(),
                behavior,
                probes: self.probes.clone(),
            }))
        }
    }

    fn resolver(behaviors: Vec<(&'static str, Behavior)>) -> (ModelResolver, Arc<AtomicUsize>) {
        let probes = Arc::new(AtomicUsize::new(0));
        let candidates = behaviors.iter().map(|(id, _)| id.to_string()).collect();
        let factory = Arc::new(StubFactory {
            behaviors,
            probes: probes.clone(),
        });
        (ModelResolver::new(factory, candidates), probes)
    }

    #[tokio::test]
    async fn binds_first_working_candidate() {
        let (resolver, probes) = resolver(vec![
            ("alpha", Behavior::Reply("ok")),
            ("beta", Behavior::Reply("ok")),
        ]);
        let model = resolver.resolve().await.unwrap();
        assert_eq!(model.id(), "alpha");
        // Short-circuit: beta was never probed.
        assert_eq!(probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_through_failing_candidates_in_order() {
        let (resolver, probes) = resolver(vec![
            ("alpha", Behavior::Fail),
            ("beta", Behavior::Fail),
            ("gamma", Behavior::Reply("ok")),
        ]);
        let model = resolver.resolve().await.unwrap();
        assert_eq!(model.id(), "gamma");
        assert_eq!(probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn caches_successful_resolution() {
        let (resolver, probes) = resolver(vec![("alpha", Behavior::Reply("ok"))]);
        resolver.resolve().await.unwrap();
        resolver.resolve().await.unwrap();
        assert_eq!(probes.load(Ordering::SeqCst), 1);
        assert!(resolver.is_resolved());
        assert_eq!(resolver.resolved_id().as_deref(), Some("alpha"));
    }

    #[tokio::test]
    async fn caches_terminal_failure() {
        let (resolver, probes) = resolver(vec![
            ("alpha", Behavior::Fail),
            ("beta", Behavior::Fail),
        ]);
        assert!(matches!(
            resolver.resolve().await,
            Err(ResolveError::NoWorkingModel)
        ));
        assert!(matches!(
            resolver.resolve().await,
            Err(ResolveError::NoWorkingModel)
        ));
        // Both candidates probed exactly once across both calls.
        assert_eq!(probes.load(Ordering::SeqCst), 2);
        assert!(!resolver.is_resolved());
        assert_eq!(resolver.resolved_id(), None);
    }

    #[tokio::test]
    async fn blank_reply_is_a_failure() {
        let (resolver, _probes) = resolver(vec![
            ("alpha", Behavior::Reply("   ")),
            ("beta", Behavior::Reply("4")),
        ]);
        let model = resolver.resolve().await.unwrap();
        assert_eq!(model.id(), "beta");
    }
}
