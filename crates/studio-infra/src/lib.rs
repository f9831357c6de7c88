//! Infrastructure implementations for Creator Studio.
//!
//! Provides the Gemini HTTP client backing the core service ports and
//! the SQLite generation-history store.

pub mod gemini;
pub mod history;
