//! Chat record types for filechat.
//!
//! A [`ChatRecord`] is one persisted query/response exchange. Records are
//! append-only: they are created once per handled request and never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model response stored and returned when no completion provider is configured.
pub const MODEL_NOT_FOUND: &str = "Model not found";

/// A file uploaded alongside a chat query.
///
/// Name and content always travel together, which keeps the
/// `file_name`/`file_content` columns paired in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Client-supplied file name.
    pub name: String,
    /// Raw uploaded bytes, stored verbatim.
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// An incoming chat query, as submitted by a client.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Opaque caller identifier. Must be non-empty.
    pub user_id: String,
    /// Query text. May be empty.
    pub user_query: String,
    /// Optional uploaded file.
    pub attachment: Option<Attachment>,
}

/// A chat record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatRecord {
    pub user_id: String,
    /// The original query, before any file text was appended.
    pub user_query: String,
    pub attachment: Option<Attachment>,
    pub model_response: String,
    pub timestamp: DateTime<Utc>,
}

/// A persisted chat record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRecord {
    /// Store-assigned, monotonically increasing id.
    pub id: i64,
    pub user_id: String,
    pub user_query: String,
    pub attachment: Option<Attachment>,
    pub model_response: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    /// Attach a store-assigned id to a new record.
    pub fn from_new(id: i64, record: NewChatRecord) -> Self {
        Self {
            id,
            user_id: record.user_id,
            user_query: record.user_query,
            attachment: record.attachment,
            model_response: record.model_response,
            timestamp: record.timestamp,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.attachment.as_ref().map(|a| a.name.as_str())
    }

    pub fn file_content(&self) -> Option<&[u8]> {
        self.attachment.as_ref().map(|a| a.content.as_slice())
    }
}

/// Response payload returned to the client for a handled chat query.
///
/// `file_name` serializes as `null` when no file was attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub id: i64,
    pub file_name: Option<String>,
}
