//! ChatRecordRepository trait definition.
//!
//! Chat records are append-only, so the only operation is `insert`.

use filechat_types::error::RepositoryError;
use filechat_types::record::{ChatRecord, NewChatRecord};

/// Repository trait for chat record persistence.
///
/// Implementations live in filechat-infra (e.g., `SqliteChatRecordRepository`).
/// Implementations must hand out unique, increasing ids even when inserts
/// arrive concurrently.
pub trait ChatRecordRepository: Send + Sync {
    /// Insert a new record and return it with its assigned id.
    fn insert(
        &self,
        record: &NewChatRecord,
    ) -> impl std::future::Future<Output = Result<ChatRecord, RepositoryError>> + Send;
}
