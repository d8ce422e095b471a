//! Shared domain types for filechat.
//!
//! Chat records, completion request/response shapes, configuration, and the
//! error enums shared by every layer.
//!
//! No infrastructure dependencies, only serde, chrono and thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod record;
