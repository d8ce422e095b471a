//! Chat handling logic and trait definitions for filechat.
//!
//! This crate defines the "ports" (repository and completion provider traits)
//! that the infrastructure layer implements, plus the chat service that runs
//! the submit-query flow. It never depends on `filechat-infra` or any
//! database or HTTP crate.

pub mod chat;
pub mod llm;
