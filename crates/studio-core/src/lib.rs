//! Business logic and port definitions for Creator Studio.
//!
//! This crate holds the guided prompt-builder state machine and the
//! "ports" (service traits) that the infrastructure layer implements.
//! It depends only on `studio-types` -- never on `studio-infra` or any
//! HTTP/database crate.

pub mod clipboard;
pub mod history;
pub mod promptbot;
