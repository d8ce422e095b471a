//! SQLite chat record repository implementation.
//!
//! Implements `ChatRecordRepository` from `filechat-core` against the
//! `chat_history` table. Inserts go through the single-connection writer
//! pool, so `AUTOINCREMENT` ids are unique and increasing even when requests
//! arrive concurrently.

use chrono::{DateTime, Utc};

use filechat_core::chat::repository::ChatRecordRepository;
use filechat_types::error::RepositoryError;
use filechat_types::record::{ChatRecord, NewChatRecord};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRecordRepository`.
pub struct SqliteChatRecordRepository {
    pool: DatabasePool,
}

impl SqliteChatRecordRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ChatRecordRepository for SqliteChatRecordRepository {
    async fn insert(&self, record: &NewChatRecord) -> Result<ChatRecord, RepositoryError> {
        let file_name = record.attachment.as_ref().map(|a| a.name.as_str());
        let file_content = record.attachment.as_ref().map(|a| a.content.as_slice());

        let result = sqlx::query(
            r#"INSERT INTO chat_history (user_id, user_query, file_name, file_content, model_response, timestamp)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&record.user_id)
        .bind(&record.user_query)
        .bind(file_name)
        .bind(file_content)
        .bind(&record.model_response)
        .bind(format_datetime(&record.timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatRecord::from_new(result.last_insert_rowid(), record.clone()))
    }
}
