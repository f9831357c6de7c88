//! The prompt-builder state machine.
//!
//! `PromptSession` holds the full conversational state: flow position,
//! answer set, option set, camera angle, transcript, and busy flags.
//! Operations that need a provider call do not perform it themselves --
//! they return a [`ServiceCall`] descriptor carrying a [`CallToken`], and
//! the host feeds the outcome back through `resolve_suggestions` /
//! `resolve_synthesis`. A token whose epoch or launch state no longer
//! matches the session is discarded as stale, which is what makes a
//! reset-during-fetch race a no-op instead of a corruption.
//!
//! The async driver that wires these descriptors to real services is
//! [`super::bot::PromptBot`].

use serde::Serialize;
use tracing::{debug, warn};

use studio_types::chat::{Sender, Transcript};
use studio_types::error::CopyError;
use studio_types::prompt::{AnswerSet, CameraAngle, FlowState, StepKey};

use crate::clipboard::Clipboard;
use crate::promptbot::steps::{self, STEP_COUNT};

/// Assistant turn appended when synthesis begins.
pub const SYNTHESIZING_MESSAGE: &str =
    "Perfect! Let me craft that into a detailed prompt for you...";

/// Assistant turn appended when the option fetch fails.
pub const OPTIONS_FAILURE_MESSAGE: &str =
    "I had trouble thinking of options. Please try starting over.";

/// Assistant turn appended when synthesis fails.
pub const SYNTHESIS_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't generate the final prompt. Please try again.";

/// Maximum number of suggestions kept per step.
const MAX_OPTIONS: usize = 5;

/// Identifies which in-flight service call a response belongs to.
///
/// Carries the session epoch and the flow state the call was launched
/// for; a response whose token no longer matches is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallToken {
    epoch: u64,
    flow: FlowState,
}

/// A provider call the host must perform on the session's behalf.
#[derive(Debug)]
pub enum ServiceCall {
    /// Fetch up to five suggestions for the current question step.
    FetchSuggestions {
        token: CallToken,
        context: String,
        step_prompt: String,
    },
    /// Synthesize the final prompt from the collected answers.
    Synthesize {
        token: CallToken,
        answers: AnswerSet,
        camera_angle: CameraAngle,
    },
}

/// Acknowledgment returned by a successful `copy_final_text`, consumable
/// by the caller for transient "copied" feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyReceipt {
    pub turn_index: usize,
}

/// One guided prompt-building conversation.
#[derive(Debug)]
pub struct PromptSession {
    flow: FlowState,
    answers: AnswerSet,
    options: Vec<String>,
    camera_angle: CameraAngle,
    transcript: Transcript,
    fetching_options: bool,
    synthesizing: bool,
    custom_input_active: bool,
    /// Bumped on every reset; outstanding call tokens from before the
    /// bump no longer match and their responses are dropped.
    epoch: u64,
}

impl PromptSession {
    pub fn new() -> Self {
        Self {
            flow: FlowState::NotStarted,
            answers: AnswerSet::new(),
            options: Vec::new(),
            camera_angle: CameraAngle::default(),
            transcript: Transcript::seeded(),
            fetching_options: false,
            synthesizing: false,
            custom_input_active: false,
            epoch: 0,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn flow(&self) -> FlowState {
        self.flow
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn camera_angle(&self) -> CameraAngle {
        self.camera_angle
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn fetching_options(&self) -> bool {
        self.fetching_options
    }

    pub fn synthesizing(&self) -> bool {
        self.synthesizing
    }

    pub fn custom_input_active(&self) -> bool {
        self.custom_input_active
    }

    // -- user operations ----------------------------------------------------

    /// Begin the flow with the initial subject. Valid only in
    /// `NotStarted`; empty or whitespace-only input is a silent no-op.
    pub fn start(&mut self, initial_subject: &str) -> Option<ServiceCall> {
        if self.flow != FlowState::NotStarted {
            return None;
        }
        let subject = initial_subject.trim();
        if subject.is_empty() {
            return None;
        }

        self.transcript.push_user(subject);
        self.answers.record(StepKey::Subject, subject);
        Some(self.enter_question(1))
    }

    /// Record the answer for the current question step and advance.
    ///
    /// Shared path for suggested-option clicks and custom free-text
    /// submission. Valid in any `Question(n)` state regardless of whether
    /// the option set is populated; empty input is a silent no-op.
    pub fn select_option(&mut self, value: &str) -> Option<ServiceCall> {
        let step = self.flow.question_step()?;
        let answer = value.trim();
        if answer.is_empty() {
            return None;
        }

        self.transcript.push_user(answer);
        self.answers.record(steps::step(step).key, answer);
        self.custom_input_active = false;

        if step < STEP_COUNT {
            Some(self.enter_question(step + 1))
        } else {
            Some(self.enter_synthesizing())
        }
    }

    /// Switch the current step to free-text entry mode. Presentational
    /// gating only; no other state change.
    pub fn enter_custom_input(&mut self) {
        if self.flow.is_question() {
            self.custom_input_active = true;
        }
    }

    pub fn cancel_custom_input(&mut self) {
        self.custom_input_active = false;
    }

    /// Select the framing used at synthesis time. Accepted any time
    /// before synthesis begins; a no-op afterwards so a late change can
    /// never affect an in-flight or finished synthesis.
    pub fn set_camera_angle(&mut self, angle: CameraAngle) {
        match self.flow {
            FlowState::NotStarted | FlowState::Question { .. } => {
                self.camera_angle = angle;
            }
            FlowState::Synthesizing | FlowState::Done => {}
        }
    }

    /// Clear the conversation back to the initial state, atomically. The
    /// camera angle is a sidebar selection, not conversation state, and
    /// survives a restart.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.flow = FlowState::NotStarted;
        self.answers = AnswerSet::new();
        self.options.clear();
        self.transcript = Transcript::seeded();
        self.fetching_options = false;
        self.synthesizing = false;
        self.custom_input_active = false;
    }

    /// Copy the finished prompt to the platform clipboard.
    ///
    /// Valid only in `Done`, for the final assistant turn. Purely a read:
    /// no session state changes.
    pub fn copy_final_text<C: Clipboard>(
        &self,
        turn_index: usize,
        clipboard: &C,
    ) -> Result<CopyReceipt, CopyError> {
        if self.flow != FlowState::Done {
            return Err(CopyError::NotDone);
        }
        if self.synthesizing {
            return Err(CopyError::SynthesisInProgress);
        }
        let last_index = self.transcript.len() - 1;
        let turn = self
            .transcript
            .get(turn_index)
            .ok_or(CopyError::NotFinalTurn(turn_index))?;
        if turn_index != last_index || turn.sender != Sender::Assistant {
            return Err(CopyError::NotFinalTurn(turn_index));
        }

        clipboard.write(&turn.text)?;
        Ok(CopyReceipt { turn_index })
    }

    // -- service responses --------------------------------------------------

    /// Apply the outcome of a suggestion fetch. Returns `false` when the
    /// response was stale and discarded.
    pub fn resolve_suggestions(
        &mut self,
        token: CallToken,
        result: Result<Vec<String>, studio_types::error::SuggestionError>,
    ) -> bool {
        if !self.token_is_current(token) {
            debug!(?token, flow = %self.flow, "discarding stale suggestion response");
            return false;
        }

        match result {
            Ok(suggestions) => {
                self.options = suggestions.into_iter().take(MAX_OPTIONS).collect();
            }
            Err(e) => {
                warn!(error = %e, "suggestion fetch failed; step stalled until reset");
                self.transcript.push_assistant(OPTIONS_FAILURE_MESSAGE);
            }
        }
        self.fetching_options = false;
        true
    }

    /// Apply the outcome of the synthesis call. The flow completes to
    /// `Done` on success and failure alike; only the final transcript
    /// turn differs. Returns `false` when the response was stale.
    pub fn resolve_synthesis(
        &mut self,
        token: CallToken,
        result: Result<String, studio_types::error::SynthesisError>,
    ) -> bool {
        if !self.token_is_current(token) {
            debug!(?token, flow = %self.flow, "discarding stale synthesis response");
            return false;
        }

        match result {
            Ok(text) => self.transcript.push_assistant(text),
            Err(e) => {
                warn!(error = %e, "prompt synthesis failed");
                self.transcript.push_assistant(SYNTHESIS_FAILURE_MESSAGE);
            }
        }
        self.synthesizing = false;
        self.flow = FlowState::Done;
        true
    }

    // -- transitions --------------------------------------------------------

    fn enter_question(&mut self, step: u8) -> ServiceCall {
        self.flow = FlowState::Question { step };
        self.fetching_options = true;
        self.options.clear();

        let def = steps::step(step);
        let subject = self.answers.subject().unwrap_or_default().to_string();
        self.transcript.push_assistant(def.question(&subject));

        let context = self.answers.context();
        let step_prompt = def.suggestion_prompt(&context);
        ServiceCall::FetchSuggestions {
            token: self.current_token(),
            context,
            step_prompt,
        }
    }

    fn enter_synthesizing(&mut self) -> ServiceCall {
        self.flow = FlowState::Synthesizing;
        self.synthesizing = true;
        self.options.clear();
        self.transcript.push_assistant(SYNTHESIZING_MESSAGE);

        ServiceCall::Synthesize {
            token: self.current_token(),
            answers: self.answers.clone(),
            camera_angle: self.camera_angle,
        }
    }

    fn current_token(&self) -> CallToken {
        CallToken {
            epoch: self.epoch,
            flow: self.flow,
        }
    }

    fn token_is_current(&self, token: CallToken) -> bool {
        token.epoch == self.epoch && token.flow == self.flow
    }
}

impl Default for PromptSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_types::chat::GREETING;
    use studio_types::error::{ClipboardError, SuggestionError, SynthesisError};

    use std::cell::RefCell;

    struct RecordingClipboard {
        writes: RefCell<Vec<String>>,
        fail: bool,
    }

    impl RecordingClipboard {
        fn new() -> Self {
            Self {
                writes: RefCell::new(Vec::new()),
                fail: false,
            }
        }
    }

    impl Clipboard for RecordingClipboard {
        fn write(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Write("denied".to_string()));
            }
            self.writes.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn five_options() -> Vec<String> {
        ["running", "sleeping", "jumping", "barking", "playing"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn token_of(call: &ServiceCall) -> CallToken {
        match call {
            ServiceCall::FetchSuggestions { token, .. } => *token,
            ServiceCall::Synthesize { token, .. } => *token,
        }
    }

    /// Drive a session through all four steps to `Synthesizing`,
    /// resolving each fetch with canned options.
    fn advance_to_synthesizing(session: &mut PromptSession) -> ServiceCall {
        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        let mut last = None;
        for answer in ["running", "a beach", "like a real photo", "bright and sunny"] {
            let call = session.select_option(answer).unwrap();
            match &call {
                ServiceCall::FetchSuggestions { token, .. } => {
                    session.resolve_suggestions(*token, Ok(five_options()));
                }
                ServiceCall::Synthesize { .. } => {
                    last = Some(call);
                    break;
                }
            }
        }
        last.expect("flow should reach synthesis after four answers")
    }

    #[test]
    fn test_start_transitions_to_first_question() {
        let mut session = PromptSession::new();
        let call = session.start("a dog").unwrap();

        assert_eq!(session.flow(), FlowState::Question { step: 1 });
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.answers().subject(), Some("a dog"));
        assert!(session.fetching_options());

        // Transcript: greeting, user subject, step-1 question.
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript().get(1).unwrap().text, "a dog");
        assert_eq!(
            session.transcript().get(2).unwrap().text,
            "Great start! What should the a dog be doing?"
        );

        match call {
            ServiceCall::FetchSuggestions { context, step_prompt, .. } => {
                assert_eq!(context, "a dog");
                assert!(step_prompt.contains("a dog"));
            }
            other => panic!("expected FetchSuggestions, got {other:?}"),
        }
    }

    #[test]
    fn test_start_rejects_blank_input() {
        let mut session = PromptSession::new();
        assert!(session.start("").is_none());
        assert!(session.start("   ").is_none());

        assert_eq!(session.flow(), FlowState::NotStarted);
        assert!(session.answers().is_empty());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut session = PromptSession::new();
        session.start("a dog").unwrap();
        assert!(session.start("a cat").is_none());
        assert_eq!(session.answers().subject(), Some("a dog"));
    }

    #[test]
    fn test_select_option_rejects_blank_input() {
        let mut session = PromptSession::new();
        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        let transcript_len = session.transcript().len();

        assert!(session.select_option("").is_none());
        assert!(session.select_option("  \t ").is_none());

        assert_eq!(session.flow(), FlowState::Question { step: 1 });
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.transcript().len(), transcript_len);
    }

    #[test]
    fn test_select_option_outside_question_is_noop() {
        let mut session = PromptSession::new();
        assert!(session.select_option("running").is_none());
    }

    #[test]
    fn test_linear_progression_visits_every_state_once() {
        let mut session = PromptSession::new();
        let mut visited = vec![session.flow()];

        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        visited.push(session.flow());

        let mut synth = None;
        for answer in ["running", "a beach", "oil painting", "moody"] {
            let call = session.select_option(answer).unwrap();
            visited.push(session.flow());
            match call {
                ServiceCall::FetchSuggestions { token, .. } => {
                    session.resolve_suggestions(token, Ok(vec![]));
                }
                ServiceCall::Synthesize { token, .. } => synth = Some(token),
            }
        }
        session.resolve_synthesis(synth.unwrap(), Ok("final".to_string()));
        visited.push(session.flow());

        assert_eq!(
            visited,
            vec![
                FlowState::NotStarted,
                FlowState::Question { step: 1 },
                FlowState::Question { step: 2 },
                FlowState::Question { step: 3 },
                FlowState::Question { step: 4 },
                FlowState::Synthesizing,
                FlowState::Done,
            ]
        );
    }

    #[test]
    fn test_answer_cardinality_matches_step() {
        let mut session = PromptSession::new();
        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));

        for (i, answer) in ["running", "a beach", "anime"].iter().enumerate() {
            assert_eq!(session.flow(), FlowState::Question { step: i as u8 + 1 });
            assert_eq!(session.answers().len(), i + 1);

            let call = session.select_option(answer).unwrap();
            if let ServiceCall::FetchSuggestions { token, .. } = call {
                session.resolve_suggestions(token, Ok(vec![]));
            }
        }
        assert_eq!(session.flow(), FlowState::Question { step: 4 });
        assert_eq!(session.answers().len(), 4);
    }

    #[test]
    fn test_question_state_implies_last_assistant_turn_is_question() {
        let mut session = PromptSession::new();
        let call = session.start("a fox").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        session.select_option("leaping");

        assert_eq!(session.flow(), FlowState::Question { step: 2 });
        assert_eq!(
            session.transcript().last_assistant().unwrap().text,
            "And where is this scene taking place?"
        );
    }

    #[test]
    fn test_options_truncated_to_five() {
        let mut session = PromptSession::new();
        let call = session.start("a dog").unwrap();
        let many: Vec<String> = (0..8).map(|i| format!("option {i}")).collect();
        session.resolve_suggestions(token_of(&call), Ok(many));
        assert_eq!(session.options().len(), 5);
    }

    #[test]
    fn test_advancing_clears_option_set() {
        let mut session = PromptSession::new();
        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        assert_eq!(session.options().len(), 5);

        // A new fetch begins immediately, so options are cleared.
        session.select_option("running");
        assert!(session.options().is_empty());
        assert!(session.fetching_options());
    }

    #[test]
    fn test_suggestion_failure_stalls_step() {
        let mut session = PromptSession::new();
        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(
            token_of(&call),
            Err(SuggestionError::Http("connection refused".to_string())),
        );

        // Stalled: still in the step, no options, apology appended.
        assert_eq!(session.flow(), FlowState::Question { step: 1 });
        assert!(!session.fetching_options());
        assert!(session.options().is_empty());
        assert_eq!(
            session.transcript().last().unwrap().text,
            OPTIONS_FAILURE_MESSAGE
        );

        // Custom free-text submission still works as the way forward.
        assert!(session.select_option("chasing a ball").is_some());
        assert_eq!(session.flow(), FlowState::Question { step: 2 });
    }

    #[test]
    fn test_stale_response_after_reset_is_discarded() {
        let mut session = PromptSession::new();
        let call = session.start("a dog").unwrap();
        let token = token_of(&call);

        session.reset();
        let applied = session.resolve_suggestions(token, Ok(five_options()));

        assert!(!applied);
        assert_eq!(session.flow(), FlowState::NotStarted);
        assert!(session.options().is_empty());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_stale_response_after_advance_is_discarded() {
        let mut session = PromptSession::new();
        let first = session.start("a dog").unwrap();
        let stale = token_of(&first);

        // User answers before the step-1 fetch resolves.
        session.select_option("running");
        assert_eq!(session.flow(), FlowState::Question { step: 2 });

        let applied = session.resolve_suggestions(stale, Ok(five_options()));
        assert!(!applied);
        assert!(session.options().is_empty());
    }

    #[test]
    fn test_reset_clears_exactly() {
        let mut session = PromptSession::new();
        session.set_camera_angle(CameraAngle::WideShot);
        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        session.enter_custom_input();
        session.select_option("running");

        session.reset();

        assert_eq!(session.flow(), FlowState::NotStarted);
        assert!(session.answers().is_empty());
        assert!(session.options().is_empty());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().last().unwrap().text, GREETING);
        assert!(!session.fetching_options());
        assert!(!session.synthesizing());
        assert!(!session.custom_input_active());
    }

    #[test]
    fn test_reset_preserves_camera_angle() {
        let mut session = PromptSession::new();
        session.set_camera_angle(CameraAngle::WideShot);
        session.start("a dog").unwrap();

        session.reset();

        assert_eq!(session.camera_angle(), CameraAngle::WideShot);
        // And it is still live for the next flow.
        let synth = advance_to_synthesizing(&mut session);
        match synth {
            ServiceCall::Synthesize { camera_angle, .. } => {
                assert_eq!(camera_angle, CameraAngle::WideShot);
            }
            other => panic!("expected Synthesize, got {other:?}"),
        }
    }

    #[test]
    fn test_synthesis_success_completes_flow() {
        let mut session = PromptSession::new();
        let synth = advance_to_synthesizing(&mut session);
        assert!(session.synthesizing());
        assert_eq!(
            session.transcript().last().unwrap().text,
            SYNTHESIZING_MESSAGE
        );

        match &synth {
            ServiceCall::Synthesize { answers, camera_angle, .. } => {
                assert_eq!(answers.len(), 5);
                assert_eq!(*camera_angle, CameraAngle::default());
            }
            other => panic!("expected Synthesize, got {other:?}"),
        }

        session.resolve_synthesis(
            token_of(&synth),
            Ok("A dog running joyfully, golden hour light...".to_string()),
        );

        assert_eq!(session.flow(), FlowState::Done);
        assert!(!session.synthesizing());
        assert_eq!(
            session.transcript().last().unwrap().text,
            "A dog running joyfully, golden hour light..."
        );
    }

    #[test]
    fn test_synthesis_failure_still_completes_flow() {
        let mut session = PromptSession::new();
        let synth = advance_to_synthesizing(&mut session);
        session.resolve_synthesis(
            token_of(&synth),
            Err(SynthesisError::Provider {
                status: 500,
                message: "internal".to_string(),
            }),
        );

        assert_eq!(session.flow(), FlowState::Done);
        assert!(!session.synthesizing());
        assert_eq!(
            session.transcript().last().unwrap().text,
            SYNTHESIS_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_camera_angle_ignored_once_synthesizing() {
        let mut session = PromptSession::new();
        session.set_camera_angle(CameraAngle::LowAngle);
        let synth = advance_to_synthesizing(&mut session);

        session.set_camera_angle(CameraAngle::WideShot);
        assert_eq!(session.camera_angle(), CameraAngle::LowAngle);

        session.resolve_synthesis(token_of(&synth), Ok("done".to_string()));
        session.set_camera_angle(CameraAngle::WideShot);
        assert_eq!(session.camera_angle(), CameraAngle::LowAngle);
    }

    #[test]
    fn test_custom_input_gating() {
        let mut session = PromptSession::new();

        // Not in a question state: no effect.
        session.enter_custom_input();
        assert!(!session.custom_input_active());

        let call = session.start("a dog").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        session.enter_custom_input();
        assert!(session.custom_input_active());
        session.cancel_custom_input();
        assert!(!session.custom_input_active());

        // Submitting an answer clears the gate.
        session.enter_custom_input();
        session.select_option("my own idea");
        assert!(!session.custom_input_active());
    }

    #[test]
    fn test_copy_rejected_before_done() {
        let session = PromptSession::new();
        let clipboard = RecordingClipboard::new();
        let err = session.copy_final_text(0, &clipboard).unwrap_err();
        assert!(matches!(err, CopyError::NotDone));
        assert!(clipboard.writes.borrow().is_empty());
    }

    #[test]
    fn test_copy_rejected_for_non_final_turn() {
        let mut session = PromptSession::new();
        let synth = advance_to_synthesizing(&mut session);
        session.resolve_synthesis(token_of(&synth), Ok("the prompt".to_string()));

        let clipboard = RecordingClipboard::new();
        let err = session.copy_final_text(0, &clipboard).unwrap_err();
        assert!(matches!(err, CopyError::NotFinalTurn(0)));
        let err = session
            .copy_final_text(session.transcript().len(), &clipboard)
            .unwrap_err();
        assert!(matches!(err, CopyError::NotFinalTurn(_)));
        assert!(clipboard.writes.borrow().is_empty());
    }

    #[test]
    fn test_copy_final_text_writes_prompt() {
        let mut session = PromptSession::new();
        let synth = advance_to_synthesizing(&mut session);
        session.resolve_synthesis(token_of(&synth), Ok("the prompt".to_string()));

        let clipboard = RecordingClipboard::new();
        let last = session.transcript().len() - 1;
        let receipt = session.copy_final_text(last, &clipboard).unwrap();

        assert_eq!(receipt.turn_index, last);
        assert_eq!(*clipboard.writes.borrow(), vec!["the prompt".to_string()]);
    }

    #[test]
    fn test_copy_clipboard_failure_propagates() {
        let mut session = PromptSession::new();
        let synth = advance_to_synthesizing(&mut session);
        session.resolve_synthesis(token_of(&synth), Ok("the prompt".to_string()));

        let clipboard = RecordingClipboard {
            writes: RefCell::new(Vec::new()),
            fail: true,
        };
        let last = session.transcript().len() - 1;
        let err = session.copy_final_text(last, &clipboard).unwrap_err();
        assert!(matches!(err, CopyError::Clipboard(_)));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut session = PromptSession::new();

        let call = session.start("a dog").unwrap();
        assert_eq!(session.flow(), FlowState::Question { step: 1 });
        // Greeting survives alongside the user's subject.
        assert_eq!(session.transcript().get(0).unwrap().text, GREETING);
        assert_eq!(session.transcript().get(1).unwrap().text, "a dog");

        session.resolve_suggestions(token_of(&call), Ok(five_options()));
        assert_eq!(session.options(), five_options().as_slice());

        let call = session.select_option("running").unwrap();
        assert_eq!(session.flow(), FlowState::Question { step: 2 });
        assert_eq!(session.answers().get(StepKey::Action), Some("running"));
        session.resolve_suggestions(token_of(&call), Ok(vec!["a park".to_string()]));

        let call = session.select_option("a park").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(vec![]));
        let call = session.select_option("watercolor").unwrap();
        session.resolve_suggestions(token_of(&call), Ok(vec![]));
        let synth = session.select_option("joyful and bright").unwrap();
        assert_eq!(session.flow(), FlowState::Synthesizing);

        session.resolve_synthesis(
            token_of(&synth),
            Ok("A dog running joyfully, ...".to_string()),
        );
        assert_eq!(session.flow(), FlowState::Done);
        assert_eq!(
            session.transcript().last().unwrap().text,
            "A dog running joyfully, ..."
        );
    }
}
