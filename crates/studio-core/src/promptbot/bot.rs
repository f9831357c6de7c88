//! Async driver that wires a [`PromptSession`] to its service ports.
//!
//! Each user-facing operation runs to completion: it applies the state
//! transition, performs whatever provider call the session asked for,
//! and feeds the outcome back before returning. Stale-response handling
//! still lives in the session; the bot just moves data.

use tracing::instrument;

use studio_types::error::CopyError;
use studio_types::prompt::CameraAngle;

use crate::clipboard::Clipboard;
use crate::promptbot::service::{PromptSynthesizer, SuggestionService};
use crate::promptbot::session::{CopyReceipt, PromptSession, ServiceCall};

/// A prompt-builder session bound to concrete suggestion and synthesis
/// services.
pub struct PromptBot<S, P> {
    session: PromptSession,
    suggestions: S,
    synthesizer: P,
}

impl<S, P> PromptBot<S, P>
where
    S: SuggestionService,
    P: PromptSynthesizer,
{
    pub fn new(suggestions: S, synthesizer: P) -> Self {
        Self {
            session: PromptSession::new(),
            suggestions,
            synthesizer,
        }
    }

    /// Read access to the underlying session state.
    pub fn session(&self) -> &PromptSession {
        &self.session
    }

    /// Begin the flow with the initial subject, fetching the first
    /// question's suggestions before returning.
    #[instrument(skip(self, initial_subject))]
    pub async fn start(&mut self, initial_subject: &str) {
        if let Some(call) = self.session.start(initial_subject) {
            self.dispatch(call).await;
        }
    }

    /// Answer the current question (suggested or custom) and advance,
    /// performing the follow-up fetch or the final synthesis.
    #[instrument(skip(self, value))]
    pub async fn select_option(&mut self, value: &str) {
        if let Some(call) = self.session.select_option(value) {
            self.dispatch(call).await;
        }
    }

    pub fn set_camera_angle(&mut self, angle: CameraAngle) {
        self.session.set_camera_angle(angle);
    }

    pub fn enter_custom_input(&mut self) {
        self.session.enter_custom_input();
    }

    pub fn cancel_custom_input(&mut self) {
        self.session.cancel_custom_input();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn copy_final_text<C: Clipboard>(
        &self,
        turn_index: usize,
        clipboard: &C,
    ) -> Result<CopyReceipt, CopyError> {
        self.session.copy_final_text(turn_index, clipboard)
    }

    async fn dispatch(&mut self, call: ServiceCall) {
        match call {
            ServiceCall::FetchSuggestions {
                token,
                context,
                step_prompt,
            } => {
                let result = self.suggestions.suggestions(&context, &step_prompt).await;
                self.session.resolve_suggestions(token, result);
            }
            ServiceCall::Synthesize {
                token,
                answers,
                camera_angle,
            } => {
                let result = self.synthesizer.synthesize(&answers, camera_angle).await;
                self.session.resolve_synthesis(token, result);
            }
        }
    }
}
