//! The fixed four-step question table.
//!
//! Each step pairs the question shown to the user with the prompt sent to
//! the suggestion service. This table is configuration, not state: the
//! session walks it in order after the subject is seeded.

use studio_types::prompt::StepKey;

/// One question step: its answer key, the question template (a function
/// of the subject), and the suggestion-prompt template (a function of the
/// accumulated context).
pub struct StepDef {
    pub key: StepKey,
    question_fn: fn(&str) -> String,
    suggestion_fn: fn(&str) -> String,
}

impl StepDef {
    /// The question shown to the user at this step.
    pub fn question(&self, subject: &str) -> String {
        (self.question_fn)(subject)
    }

    /// The prompt sent to the suggestion service, grounded on the
    /// comma-joined answers collected so far.
    pub fn suggestion_prompt(&self, context: &str) -> String {
        (self.suggestion_fn)(context)
    }
}

fn action_question(subject: &str) -> String {
    format!("Great start! What should the {subject} be doing?")
}

fn action_suggestions(context: &str) -> String {
    format!(
        "Generate 5 creative, simple, easy-to-understand ideas for what a {context} could be doing in a picture. Each idea should be a short phrase."
    )
}

fn setting_question(_subject: &str) -> String {
    "And where is this scene taking place?".to_string()
}

fn setting_suggestions(context: &str) -> String {
    format!(
        "For the scene \"{context}\", suggest 5 different places or backgrounds. Keep the descriptions simple and clear."
    )
}

fn style_question(_subject: &str) -> String {
    "What artistic style are you imagining?".to_string()
}

fn style_suggestions(context: &str) -> String {
    format!(
        "For the scene \"{context}\", list 5 different art styles. Use simple terms. Include common styles like 'like a real photo' and creative ones."
    )
}

fn mood_question(_subject: &str) -> String {
    "Finally, what's the mood or lighting?".to_string()
}

fn mood_suggestions(context: &str) -> String {
    format!(
        "Based on \"{context}\", suggest 5 simple options for the feeling or lighting of the scene. For example, 'dark and mysterious' or 'bright and sunny'."
    )
}

/// The four question steps, in flow order.
pub const STEPS: [StepDef; 4] = [
    StepDef {
        key: StepKey::Action,
        question_fn: action_question,
        suggestion_fn: action_suggestions,
    },
    StepDef {
        key: StepKey::Setting,
        question_fn: setting_question,
        suggestion_fn: setting_suggestions,
    },
    StepDef {
        key: StepKey::Style,
        question_fn: style_question,
        suggestion_fn: style_suggestions,
    },
    StepDef {
        key: StepKey::Mood,
        question_fn: mood_question,
        suggestion_fn: mood_suggestions,
    },
];

/// Number of question steps after the seeded subject.
pub const STEP_COUNT: u8 = STEPS.len() as u8;

/// Look up a step by its 1-based flow position.
pub fn step(n: u8) -> &'static StepDef {
    // The session only holds 1..=STEP_COUNT in a Question state.
    &STEPS[usize::from(n - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_keys_in_flow_order() {
        let keys: Vec<StepKey> = STEPS.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![StepKey::Action, StepKey::Setting, StepKey::Style, StepKey::Mood]
        );
    }

    #[test]
    fn test_first_question_interpolates_subject() {
        let q = step(1).question("a dog");
        assert_eq!(q, "Great start! What should the a dog be doing?");
    }

    #[test]
    fn test_later_questions_are_fixed() {
        assert_eq!(step(2).question("a dog"), "And where is this scene taking place?");
        assert_eq!(step(3).question("ignored"), "What artistic style are you imagining?");
        assert_eq!(step(4).question("ignored"), "Finally, what's the mood or lighting?");
    }

    #[test]
    fn test_suggestion_prompts_embed_context() {
        let prompt = step(2).suggestion_prompt("a dog, running");
        assert!(prompt.contains("\"a dog, running\""));
        assert!(prompt.contains("5 different places"));
    }
}
