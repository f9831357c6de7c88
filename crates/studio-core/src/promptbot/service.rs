//! Service port traits for the prompt builder.
//!
//! Uses RPITIT (native async fn in traits, Rust 2024 edition) consistent
//! with all project traits. Implementations live in `studio-infra`.

use std::future::Future;
use std::sync::Arc;

use studio_types::error::{SuggestionError, SynthesisError};
use studio_types::prompt::{AnswerSet, CameraAngle};

/// Port for fetching up to five per-step answer suggestions.
///
/// Callers must tolerate fewer than five results, an empty result set,
/// and a generic service failure.
pub trait SuggestionService: Send + Sync {
    fn suggestions(
        &self,
        context: &str,
        step_prompt: &str,
    ) -> impl Future<Output = Result<Vec<String>, SuggestionError>> + Send;
}

/// Port for synthesizing the collected answers into one final prompt.
///
/// On success the returned text is non-empty (service contract, not
/// enforced locally).
pub trait PromptSynthesizer: Send + Sync {
    fn synthesize(
        &self,
        answers: &AnswerSet,
        camera_angle: CameraAngle,
    ) -> impl Future<Output = Result<String, SynthesisError>> + Send;
}

// Arc delegation so a single shared provider can back both ports.

impl<T: SuggestionService> SuggestionService for Arc<T> {
    fn suggestions(
        &self,
        context: &str,
        step_prompt: &str,
    ) -> impl Future<Output = Result<Vec<String>, SuggestionError>> + Send {
        (**self).suggestions(context, step_prompt)
    }
}

impl<T: PromptSynthesizer> PromptSynthesizer for Arc<T> {
    fn synthesize(
        &self,
        answers: &AnswerSet,
        camera_angle: CameraAngle,
    ) -> impl Future<Output = Result<String, SynthesisError>> + Send {
        (**self).synthesize(answers, camera_angle)
    }
}
