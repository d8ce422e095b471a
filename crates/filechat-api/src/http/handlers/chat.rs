//! Chat generation handler.
//!
//! `POST /chat/generate` takes a multipart form with `user_id`, `user_query`
//! and an optional `file`, runs the chat service, and returns
//! `{"response": ..., "id": ..., "file_name": ...}`.

use axum::Json;
use axum::extract::{Multipart, State};
use tracing::{Instrument, debug};
use uuid::Uuid;

use filechat_types::record::{Attachment, ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct ChatForm {
    user_id: Option<String>,
    user_query: Option<String>,
    file: Option<Attachment>,
}

impl ChatForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = ChatForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "user_id" => {
                    form.user_id = Some(field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read user_id: {e}"))
                    })?);
                }
                "user_query" => {
                    form.user_query = Some(field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read user_query: {e}"))
                    })?);
                }
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content = field.bytes().await.map_err(|e| {
                        AppError::Internal(format!("Failed to read uploaded file: {e}"))
                    })?;

                    // An empty browser file input sends a nameless, empty part.
                    if file_name.is_empty() && content.is_empty() {
                        continue;
                    }

                    debug!(file_name = %file_name, file_bytes = content.len(), "Received file upload");
                    form.file = Some(Attachment::new(file_name, content.to_vec()));
                }
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    fn into_request(self) -> Result<ChatRequest, AppError> {
        let user_id = self
            .user_id
            .ok_or_else(|| AppError::Validation("Missing form field: user_id".to_string()))?;
        let user_query = self
            .user_query
            .ok_or_else(|| AppError::Validation("Missing form field: user_query".to_string()))?;

        Ok(ChatRequest {
            user_id,
            user_query,
            attachment: self.file,
        })
    }
}

/// POST /chat/generate - Answer a chat query, optionally with an attached file.
pub async fn generate_response(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ChatReply>, AppError> {
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("chat_generate", %request_id);

    async move {
        let request = ChatForm::read(&mut multipart).await?.into_request()?;
        let reply = state.chat_service.generate_response(request).await?;
        Ok(Json(reply))
    }
    .instrument(span)
    .await
}
