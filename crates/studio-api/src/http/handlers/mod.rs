//! HTTP request handlers for the REST API.

pub mod history;
pub mod images;
pub mod promptbot;
pub mod videos;
