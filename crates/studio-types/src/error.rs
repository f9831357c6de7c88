use thiserror::Error;

/// Errors from the suggestion service (per-step option fetch).
///
/// These never reach the prompt-builder's caller as errors; the session
/// converts them into an apology transcript turn and stalls the step.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("http error: {0}")]
    Http(String),

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the prompt synthesis service (final polish call).
///
/// Converted into an apology turn; the flow still completes to `Done`.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("http error: {0}")]
    Http(String),

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the platform clipboard collaborator.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Why a `copy_final_text` request was rejected.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("prompt is not finished yet")]
    NotDone,

    #[error("synthesis still in progress")]
    SynthesisInProgress,

    #[error("turn {0} is not the final assistant turn")]
    NotFinalTurn(usize),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Errors from image and video operations against the provider.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("http error: {0}")]
    Http(String),

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("the model did not return any media, possibly due to safety filters")]
    NoMedia,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unsupported model: {0}")]
    UnsupportedModel(String),
}

/// Errors from persistence operations (used by trait definitions in studio-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_error_display() {
        let err = SuggestionError::Provider {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "provider error (429): quota exceeded");
    }

    #[test]
    fn test_copy_error_display() {
        assert_eq!(
            CopyError::NotFinalTurn(3).to_string(),
            "turn 3 is not the final assistant turn"
        );
    }

    #[test]
    fn test_copy_error_from_clipboard() {
        let err: CopyError = ClipboardError::Write("denied".to_string()).into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_media_error_display() {
        let err = MediaError::UnsupportedModel("dall-e".to_string());
        assert_eq!(err.to_string(), "unsupported model: dall-e");
    }
}
