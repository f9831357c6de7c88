//! Gemini REST client: suggestions, prompt polish, image, video, and
//! analysis calls against the Generative Language API.

mod client;
mod prompts;
mod types;

pub use client::GeminiClient;
pub use types::InlineData;
