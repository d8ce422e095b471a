//! Infrastructure layer for filechat.
//!
//! Contains implementations of the traits defined in `filechat-core`:
//! SQLite chat record storage and the OpenAI-style completion provider,
//! plus configuration loading.

pub mod config;
pub mod llm;
pub mod sqlite;
