//! The guided prompt-builder conversation.
//!
//! `session` holds the explicit state machine, `steps` the fixed question
//! table, `service` the two provider ports, and `bot` the async
//! orchestrator that wires them together.

pub mod bot;
pub mod service;
pub mod session;
pub mod steps;

pub use bot::PromptBot;
pub use service::{PromptSynthesizer, SuggestionService};
pub use session::{CallToken, CopyReceipt, PromptSession, ServiceCall};
