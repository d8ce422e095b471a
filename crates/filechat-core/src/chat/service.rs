//! Chat service running the submit-query flow.
//!
//! `ChatService::generate_response` builds the combined prompt, asks the
//! configured completion provider for a reply (or falls back to the
//! "Model not found" placeholder), waits out the pacing delay, persists the
//! exchange, and returns the reply payload.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use filechat_types::error::ChatError;
use filechat_types::llm::CompletionRequest;
use filechat_types::record::{ChatReply, ChatRequest, MODEL_NOT_FOUND, NewChatRecord};

use crate::chat::prompt::{FileDecode, build_prompt};
use crate::chat::repository::ChatRecordRepository;
use crate::llm::box_provider::BoxCompletionProvider;

/// Wait inserted between the completion step and persisting the record.
pub const COMPLETION_PACING_DELAY: Duration = Duration::from_secs(2);

/// Handles chat queries against an optional completion provider.
///
/// The provider is injected at construction; `None` means every query is
/// answered with [`MODEL_NOT_FOUND`].
pub struct ChatService<R: ChatRecordRepository> {
    repo: R,
    provider: Option<BoxCompletionProvider>,
    pacing_delay: Duration,
}

impl<R: ChatRecordRepository> ChatService<R> {
    /// Create a chat service with the default pacing delay.
    pub fn new(repo: R, provider: Option<BoxCompletionProvider>) -> Self {
        Self {
            repo,
            provider,
            pacing_delay: COMPLETION_PACING_DELAY,
        }
    }

    /// Override the pacing delay.
    pub fn with_pacing_delay(mut self, pacing_delay: Duration) -> Self {
        self.pacing_delay = pacing_delay;
        self
    }

    /// Access the record repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }

    /// Handle one chat query end to end.
    ///
    /// Provider failures propagate as [`ChatError::Provider`] and no record
    /// is written.
    pub async fn generate_response(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        if request.user_id.is_empty() {
            return Err(ChatError::Validation("user_id must not be empty".to_string()));
        }

        let built = build_prompt(&request.user_query, request.attachment.as_ref());
        match (&request.attachment, built.decode) {
            (Some(file), Some(FileDecode::Lossy { dropped_bytes })) => warn!(
                file_name = %file.name,
                dropped_bytes,
                "Attached file is not valid UTF-8, invalid bytes dropped from prompt"
            ),
            (Some(file), _) if !built.file_appended => debug!(
                file_name = %file.name,
                "Attached file is empty, nothing appended to prompt"
            ),
            _ => {}
        }

        let model_response = match &self.provider {
            Some(provider) => {
                let completion = CompletionRequest::chat(built.prompt);
                debug!(
                    provider = provider.name(),
                    prompt_chars = completion.prompt.len(),
                    "Requesting completion"
                );
                let response = provider.complete(&completion).await.map_err(|e| {
                    error!(provider = provider.name(), error = %e, "Completion request failed");
                    e
                })?;
                response.first_text()?.to_owned()
            }
            None => MODEL_NOT_FOUND.to_owned(),
        };

        if !self.pacing_delay.is_zero() {
            tokio::time::sleep(self.pacing_delay).await;
        }

        let record = NewChatRecord {
            user_id: request.user_id,
            user_query: request.user_query,
            attachment: request.attachment,
            model_response,
            timestamp: Utc::now(),
        };
        let stored = self.repo.insert(&record).await?;

        info!(
            record_id = stored.id,
            user_id = %stored.user_id,
            has_file = stored.attachment.is_some(),
            "Chat record stored"
        );

        Ok(ChatReply {
            file_name: stored.file_name().map(str::to_owned),
            response: stored.model_response,
            id: stored.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use filechat_types::error::RepositoryError;
    use filechat_types::llm::{Completion, CompletionResponse, LlmError};
    use filechat_types::record::{Attachment, ChatRecord};

    use super::*;
    use crate::llm::provider::CompletionProvider;

    /// In-memory repository assigning ids from 1.
    #[derive(Default)]
    struct MemoryRepo {
        records: Mutex<Vec<ChatRecord>>,
    }

    impl MemoryRepo {
        fn records(&self) -> Vec<ChatRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    impl ChatRecordRepository for MemoryRepo {
        async fn insert(&self, record: &NewChatRecord) -> Result<ChatRecord, RepositoryError> {
            let mut records = self.records.lock().unwrap();
            let stored = ChatRecord::from_new(records.len() as i64 + 1, record.clone());
            records.push(stored.clone());
            Ok(stored)
        }
    }

    struct FailingRepo;

    impl ChatRecordRepository for FailingRepo {
        async fn insert(&self, _record: &NewChatRecord) -> Result<ChatRecord, RepositoryError> {
            Err(RepositoryError::Connection)
        }
    }

    /// Provider that records every request and answers with a fixed text.
    struct ScriptedProvider {
        reply: Result<Vec<&'static str>, ()>,
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(texts) => Ok(CompletionResponse {
                    id: "cmpl-test".to_string(),
                    model: "scripted-1".to_string(),
                    choices: texts
                        .iter()
                        .map(|t| Completion {
                            text: t.to_string(),
                            index: 0,
                            finish_reason: Some("stop".to_string()),
                        })
                        .collect(),
                    usage: None,
                }),
                Err(()) => Err(LlmError::Provider {
                    message: "HTTP 500: upstream down".to_string(),
                }),
            }
        }
    }

    fn scripted(
        reply: Result<Vec<&'static str>, ()>,
    ) -> (BoxCompletionProvider, Arc<Mutex<Vec<CompletionRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider {
            reply,
            seen: Arc::clone(&seen),
        };
        (BoxCompletionProvider::new(provider), seen)
    }

    fn service(provider: Option<BoxCompletionProvider>) -> ChatService<MemoryRepo> {
        ChatService::new(MemoryRepo::default(), provider).with_pacing_delay(Duration::ZERO)
    }

    fn request(user_query: &str, attachment: Option<Attachment>) -> ChatRequest {
        ChatRequest {
            user_id: "u1".to_string(),
            user_query: user_query.to_string(),
            attachment,
        }
    }

    #[test]
    fn test_default_pacing_delay_is_two_seconds() {
        let svc = ChatService::new(MemoryRepo::default(), None);
        assert_eq!(svc.pacing_delay(), Duration::from_secs(2));
        assert!(svc.provider_name().is_none());
    }

    #[tokio::test]
    async fn test_no_provider_returns_placeholder() {
        let svc = service(None);

        let reply = svc.generate_response(request("Hello", None)).await.unwrap();
        assert_eq!(
            reply,
            ChatReply {
                response: "Model not found".to_string(),
                id: 1,
                file_name: None,
            }
        );

        let records = svc.repo().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_query, "Hello");
        assert_eq!(records[0].model_response, "Model not found");
        assert!(records[0].file_name().is_none());
        assert!(records[0].file_content().is_none());
    }

    #[tokio::test]
    async fn test_file_text_reaches_provider_but_not_record() {
        let (provider, seen) = scripted(Ok(vec!["  A short summary.\n"]));
        let svc = service(Some(provider));

        let file = Attachment::new("notes.txt", b"plain text".to_vec());
        let reply = svc
            .generate_response(request("Summarize", Some(file)))
            .await
            .unwrap();

        assert_eq!(reply.response, "A short summary.");
        assert_eq!(reply.file_name.as_deref(), Some("notes.txt"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt, "Summarize\n\nFile content:\nplain text");
        assert_eq!(seen[0].max_tokens, 128);
        assert_eq!(seen[0].temperature, Some(0.7));

        let records = svc.repo().records();
        assert_eq!(records[0].user_query, "Summarize");
        assert_eq!(records[0].file_name(), Some("notes.txt"));
        assert_eq!(records[0].file_content(), Some(&b"plain text"[..]));
        assert_eq!(records[0].model_response, "A short summary.");
    }

    #[tokio::test]
    async fn test_invalid_utf8_file_is_stored_verbatim() {
        let (provider, seen) = scripted(Ok(vec!["ok"]));
        let svc = service(Some(provider));

        let bytes = vec![b'h', b'i', 0xff, 0xfe];
        let file = Attachment::new("mixed.bin", bytes.clone());
        svc.generate_response(request("Read", Some(file)))
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap()[0].prompt, "Read\n\nFile content:\nhi");
        assert_eq!(svc.repo().records()[0].file_content(), Some(bytes.as_slice()));
    }

    #[tokio::test]
    async fn test_repeated_requests_get_increasing_ids() {
        let svc = service(None);

        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(svc.generate_response(request("same", None)).await.unwrap().id);
        }
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(svc.repo().records().len(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates_without_record() {
        let (provider, _) = scripted(Err(()));
        let svc = service(Some(provider));

        let err = svc.generate_response(request("Hi", None)).await.unwrap_err();
        assert!(matches!(err, ChatError::Provider(LlmError::Provider { .. })));
        assert!(svc.repo().records().is_empty());
    }

    #[tokio::test]
    async fn test_empty_completion_list_is_an_error() {
        let (provider, _) = scripted(Ok(vec![]));
        let svc = service(Some(provider));

        let err = svc.generate_response(request("Hi", None)).await.unwrap_err();
        assert!(matches!(err, ChatError::Provider(LlmError::EmptyResponse)));
        assert!(svc.repo().records().is_empty());
    }

    #[tokio::test]
    async fn test_empty_user_id_is_rejected() {
        let svc = service(None);
        let mut req = request("Hi", None);
        req.user_id = String::new();

        let err = svc.generate_response(req).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert!(svc.repo().records().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_user_id_is_stored_as_given() {
        let svc = service(None);
        let mut req = request("Hi", None);
        req.user_id = " ".to_string();

        let reply = svc.generate_response(req).await.unwrap();
        assert_eq!(reply.id, 1);
        assert_eq!(svc.repo().records()[0].user_id, " ");
    }

    #[tokio::test]
    async fn test_empty_query_is_accepted() {
        let svc = service(None);
        let reply = svc.generate_response(request("", None)).await.unwrap();
        assert_eq!(reply.id, 1);
        assert_eq!(svc.repo().records()[0].user_query, "");
    }

    #[tokio::test]
    async fn test_persistence_failure_propagates() {
        let svc = ChatService::new(FailingRepo, None).with_pacing_delay(Duration::ZERO);
        let err = svc.generate_response(request("Hi", None)).await.unwrap_err();
        assert!(matches!(err, ChatError::Repository(RepositoryError::Connection)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_delay_holds_response() {
        let svc = ChatService::new(MemoryRepo::default(), None);
        let start = tokio::time::Instant::now();
        svc.generate_response(request("Hi", None)).await.unwrap();
        assert!(start.elapsed() >= COMPLETION_PACING_DELAY);
    }
}
