//! OpenAI completions API types.
//!
//! Wire-format request/response structures for `POST /completions`. They are
//! NOT the generic completion types from filechat-types -- those are
//! provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for the completions API.
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiCompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Non-streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<OpenAiChoice>,
    pub usage: Option<OpenAiUsage>,
}

/// One entry of `choices`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiChoice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorBody {
    pub error: OpenAiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorDetail {
    pub message: String,
}
