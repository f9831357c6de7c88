//! Prompt-builder state types: step keys, answer accumulation, flow
//! position, and camera angles.
//!
//! These are pure data shapes; the state machine that mutates them lives
//! in `studio-core`.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Key of one slot in the guided prompt: the seeded subject plus the four
/// question steps, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKey {
    Subject,
    Action,
    Setting,
    Style,
    Mood,
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKey::Subject => write!(f, "subject"),
            StepKey::Action => write!(f, "action"),
            StepKey::Setting => write!(f, "setting"),
            StepKey::Style => write!(f, "style"),
            StepKey::Mood => write!(f, "mood"),
        }
    }
}

impl FromStr for StepKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "subject" => Ok(StepKey::Subject),
            "action" => Ok(StepKey::Action),
            "setting" => Ok(StepKey::Setting),
            "style" => Ok(StepKey::Style),
            "mood" => Ok(StepKey::Mood),
            other => Err(format!("invalid step key: '{other}'")),
        }
    }
}

/// Append-only ordered mapping from step key to the user's answer.
///
/// Each key is written exactly once; insertion order follows flow order
/// (subject first, then the four question steps). Never shrinks except by
/// being replaced wholesale on a full reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    entries: Vec<(StepKey, String)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for a key. Keys are written exactly once; the
    /// session guarantees no key repeats within a flow.
    pub fn record(&mut self, key: StepKey, value: impl Into<String>) {
        debug_assert!(
            self.get(key).is_none(),
            "step key '{key}' answered twice"
        );
        self.entries.push((key, value.into()));
    }

    pub fn get(&self, key: StepKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn subject(&self) -> Option<&str> {
        self.get(StepKey::Subject)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Comma-joined answer values in flow order, used to ground suggestion
    /// requests ("context" in the conversation protocol).
    pub fn context(&self) -> String {
        self.entries
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn iter(&self) -> impl Iterator<Item = (StepKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Position along the linear prompt-building flow.
///
/// Transitions are strictly forward (`NotStarted` through `Done`); the
/// only backward transition is a full reset to `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    NotStarted,
    /// Asking question `step` (1-based, 1..=4).
    Question { step: u8 },
    Synthesizing,
    Done,
}

impl FlowState {
    pub fn is_question(&self) -> bool {
        matches!(self, FlowState::Question { .. })
    }

    /// The 1-based question number, when in a question state.
    pub fn question_step(&self) -> Option<u8> {
        match self {
            FlowState::Question { step } => Some(*step),
            _ => None,
        }
    }
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::NotStarted
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::NotStarted => write!(f, "not_started"),
            FlowState::Question { step } => write!(f, "question_{step}"),
            FlowState::Synthesizing => write!(f, "synthesizing"),
            FlowState::Done => write!(f, "done"),
        }
    }
}

/// Framing descriptor appended to the synthesis context, selectable at any
/// point before synthesis. Independent of the question flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraAngle {
    #[serde(rename = "Eye-Level")]
    EyeLevel,
    #[serde(rename = "High-Angle")]
    HighAngle,
    #[serde(rename = "Low-Angle")]
    LowAngle,
    #[serde(rename = "Dutch-Angle")]
    DutchAngle,
    #[serde(rename = "Bird's-Eye-View")]
    BirdsEyeView,
    #[serde(rename = "Worm's-Eye-View")]
    WormsEyeView,
    #[serde(rename = "Point-of-View (POV)")]
    PointOfView,
    #[serde(rename = "Over-the-Shoulder")]
    OverTheShoulder,
    #[serde(rename = "Close-Up Shot")]
    CloseUp,
    #[serde(rename = "Wide Shot")]
    WideShot,
    #[serde(rename = "Medium Shot")]
    MediumShot,
    #[serde(rename = "Full Shot")]
    FullShot,
}

impl CameraAngle {
    /// All angles in display order (the first is the default).
    pub const ALL: [CameraAngle; 12] = [
        CameraAngle::EyeLevel,
        CameraAngle::HighAngle,
        CameraAngle::LowAngle,
        CameraAngle::DutchAngle,
        CameraAngle::BirdsEyeView,
        CameraAngle::WormsEyeView,
        CameraAngle::PointOfView,
        CameraAngle::OverTheShoulder,
        CameraAngle::CloseUp,
        CameraAngle::WideShot,
        CameraAngle::MediumShot,
        CameraAngle::FullShot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CameraAngle::EyeLevel => "Eye-Level",
            CameraAngle::HighAngle => "High-Angle",
            CameraAngle::LowAngle => "Low-Angle",
            CameraAngle::DutchAngle => "Dutch-Angle",
            CameraAngle::BirdsEyeView => "Bird's-Eye-View",
            CameraAngle::WormsEyeView => "Worm's-Eye-View",
            CameraAngle::PointOfView => "Point-of-View (POV)",
            CameraAngle::OverTheShoulder => "Over-the-Shoulder",
            CameraAngle::CloseUp => "Close-Up Shot",
            CameraAngle::WideShot => "Wide Shot",
            CameraAngle::MediumShot => "Medium Shot",
            CameraAngle::FullShot => "Full Shot",
        }
    }
}

impl Default for CameraAngle {
    fn default() -> Self {
        CameraAngle::EyeLevel
    }
}

impl fmt::Display for CameraAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CameraAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CameraAngle::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid camera angle: '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_key_roundtrip() {
        for key in [
            StepKey::Subject,
            StepKey::Action,
            StepKey::Setting,
            StepKey::Style,
            StepKey::Mood,
        ] {
            let s = key.to_string();
            let parsed: StepKey = s.parse().unwrap();
            assert_eq!(key, parsed);
        }
    }

    #[test]
    fn test_answer_set_records_in_order() {
        let mut answers = AnswerSet::new();
        answers.record(StepKey::Subject, "a dog");
        answers.record(StepKey::Action, "running");
        answers.record(StepKey::Setting, "a beach");

        assert_eq!(answers.len(), 3);
        assert_eq!(answers.subject(), Some("a dog"));
        assert_eq!(answers.get(StepKey::Setting), Some("a beach"));
        assert_eq!(answers.context(), "a dog, running, a beach");
    }

    #[test]
    fn test_answer_set_empty_context() {
        let answers = AnswerSet::new();
        assert!(answers.is_empty());
        assert_eq!(answers.context(), "");
    }

    #[test]
    fn test_flow_state_question_step() {
        assert_eq!(FlowState::Question { step: 3 }.question_step(), Some(3));
        assert_eq!(FlowState::Synthesizing.question_step(), None);
        assert!(FlowState::Question { step: 1 }.is_question());
        assert!(!FlowState::Done.is_question());
    }

    #[test]
    fn test_flow_state_serde_tagged() {
        let json = serde_json::to_string(&FlowState::Question { step: 2 }).unwrap();
        assert_eq!(json, r#"{"state":"question","step":2}"#);
        let parsed: FlowState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, FlowState::Question { step: 2 });
    }

    #[test]
    fn test_camera_angle_default_is_first() {
        assert_eq!(CameraAngle::default(), CameraAngle::ALL[0]);
    }

    #[test]
    fn test_camera_angle_roundtrip() {
        for angle in CameraAngle::ALL {
            let parsed: CameraAngle = angle.label().parse().unwrap();
            assert_eq!(angle, parsed);
        }
    }

    #[test]
    fn test_camera_angle_serde_matches_label() {
        let json = serde_json::to_string(&CameraAngle::BirdsEyeView).unwrap();
        assert_eq!(json, "\"Bird's-Eye-View\"");
        let parsed: CameraAngle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, CameraAngle::BirdsEyeView);
    }
}
