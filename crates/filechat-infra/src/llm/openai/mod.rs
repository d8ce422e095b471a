//! OpenAI-style text completion provider.
//!
//! This module provides the [`OpenAiCompletionProvider`] which implements the
//! [`CompletionProvider`](filechat_core::llm::provider::CompletionProvider)
//! trait for the `/completions` endpoint of OpenAI and compatible servers.

pub mod client;
pub mod types;

pub use client::OpenAiCompletionProvider;
