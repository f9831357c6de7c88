//! Shared domain types for Creator Studio.
//!
//! This crate contains the core domain types used across the studio
//! backend: transcript turns, prompt-builder state, media parameters,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod media;
pub mod prompt;
