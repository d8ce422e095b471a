//! Chat query handling for filechat.
//!
//! - `repository`: the append-only `ChatRecordRepository` port
//! - `prompt`: file decoding and combined prompt construction
//! - `service`: `ChatService`, which runs build-prompt, complete, persist

pub mod prompt;
pub mod repository;
pub mod service;
