//! Observability setup for Creator Studio.

pub mod tracing_setup;
