//! Per-request answer pipeline.
//!
//! Terminal on first success:
//! 1. Attached file → archive scan; a hit answers the request and the model
//!    is never invoked.
//! 2. Otherwise resolve the process-wide model handle, build the prompt,
//!    generate, and normalize.
//!
//! The history append happens only after an answer is finalized, never
//! speculatively.

use tracing::{error, info, warn};

use gemini_service::{normalize::normalize, prompt::build_prompt};

use crate::core::app_state::AppState;
use crate::error_handler::AppError;

/// Where the final answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// Pre-computed value found in the uploaded archive.
    Archive,
    /// Generated by the resolved model.
    Model,
}

/// Final answer plus its provenance.
#[derive(Debug)]
pub struct AnswerOutcome {
    pub answer: String,
    pub source: AnswerSource,
}

/// Resolves a question into an answer, preferring archive-derived answers
/// over model-derived ones.
///
/// An attachment that is not a readable archive is logged and treated as
/// "no answer found"; the request falls through to the model path.
///
/// # Errors
/// - [`AppError::NoWorkingModel`] when resolution fails
/// - [`AppError::Generation`] when the resolved model fails to generate
pub async fn answer_question(
    state: &AppState,
    question: &str,
    attachment: Option<&[u8]>,
) -> Result<AnswerOutcome, AppError> {
    let had_attached_file = attachment.is_some();

    if let Some(bytes) = attachment {
        match archive_scan::scan(bytes) {
            Ok(Some(answer)) => {
                info!(question, "answer found in uploaded archive");
                state.history.append(question, &answer, true);
                return Ok(AnswerOutcome {
                    answer,
                    source: AnswerSource::Archive,
                });
            }
            Ok(None) => {}
            Err(err) => {
                warn!(
                    question,
                    error = %err,
                    "attachment is not a scannable archive; falling through to the model"
                );
            }
        }
    }

    let model = state.resolver.resolve().await.map_err(|err| {
        error!(question, error = %err, "model resolution failed");
        AppError::from(err)
    })?;

    let prompt = build_prompt(question);
    let raw = model.generate(&prompt).await.map_err(|err| {
        error!(question, error = %err, "generation failed");
        AppError::from(err)
    })?;

    let answer = normalize(&raw);
    info!(question, model = model.id(), "generated answer");
    state.history.append(question, &answer, had_attached_file);

    Ok(AnswerOutcome {
        answer,
        source: AnswerSource::Model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gemini_service::{GenerateError, ModelFactory, TextModel};
    use std::io::{Cursor, Write};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use zip::write::SimpleFileOptions;

    struct StubModel {
        id: String,
        reply: Result<&'static str, ()>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextModel for StubModel {
        fn id(&self) -> &str {
            &self.id
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(GenerateError::EmptyResponse),
            }
        }
    }

    struct StubFactory {
        reply: Result<&'static str, ()>,
        calls: Arc<AtomicUsize>,
    }

    impl ModelFactory for StubFactory {
        fn open(&self, model: &str) -> Result<Arc<dyn TextModel>, GenerateError> {
            Ok(Arc::new(StubModel {
                id: model.to_string(),
                reply: self.reply,
                calls: self.calls.clone(),
            }))
        }
    }

    fn stub_state(reply: Result<&'static str, ()>) -> (AppState, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory = Arc::new(StubFactory {
            reply,
            calls: calls.clone(),
        });
        (
            AppState::with_factory(factory, vec!["stub-model".into()]),
            calls,
        )
    }

    fn answer_zip() -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        writer
            .start_file("answers.csv", SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(b"answer,other_column\n42,some data\n")
            .unwrap();
        writer.finish().unwrap();
        cursor.into_inner()
    }

    #[tokio::test]
    async fn archive_answer_wins_and_model_is_never_invoked() {
        let (state, calls) = stub_state(Ok("model answer"));
        let zip_bytes = answer_zip();

        let outcome = answer_question(&state, "the big question", Some(&zip_bytes))
            .await
            .unwrap();

        assert_eq!(outcome.answer, "42");
        assert_eq!(outcome.source, AnswerSource::Archive);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let recent = state.history.recent(1);
        assert_eq!(recent[0].question, "the big question");
        assert!(recent[0].had_attached_file);
    }

    #[tokio::test]
    async fn non_archive_attachment_falls_through_to_model() {
        let (state, calls) = stub_state(Ok(" \"Paris\" "));

        let outcome = answer_question(&state, "capital of France?", Some(b"not a zip"))
            .await
            .unwrap();

        assert_eq!(outcome.answer, "Paris");
        assert_eq!(outcome.source, AnswerSource::Model);
        // One smoke-test call plus one generation call.
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let recent = state.history.recent(1);
        assert!(recent[0].had_attached_file);
    }

    #[tokio::test]
    async fn plain_question_uses_model_and_records_history() {
        let (state, _calls) = stub_state(Ok("```4```"));

        let outcome = answer_question(&state, "What is 2+2?", None).await.unwrap();

        assert_eq!(outcome.answer, "4");
        let recent = state.history.recent(1);
        assert_eq!(recent[0].answer, "4");
        assert!(!recent[0].had_attached_file);
    }

    #[tokio::test]
    async fn failing_model_surfaces_no_working_model() {
        let (state, _calls) = stub_state(Err(()));

        let err = answer_question(&state, "anything", None).await.unwrap_err();

        assert!(matches!(err, AppError::NoWorkingModel));
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn columnless_archive_falls_through_to_model() {
        let (state, _calls) = stub_state(Ok("fallback"));

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        writer
            .start_file("table.csv", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"a,b\n1,2\n").unwrap();
        writer.finish().unwrap();
        let zip_bytes = cursor.into_inner();

        let outcome = answer_question(&state, "q", Some(&zip_bytes)).await.unwrap();

        assert_eq!(outcome.answer, "fallback");
        assert_eq!(outcome.source, AnswerSource::Model);
    }
}
