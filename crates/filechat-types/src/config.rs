//! Global configuration types for filechat.
//!
//! `GlobalConfig` represents the optional `config.toml` in the data directory
//! that controls storage location, pacing, CORS origins, and the completion
//! provider.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.filechat/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// SQLite URL override. Defaults to `filechat.db` in the data directory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Delay applied after the completion step, before the record is written.
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,

    /// Browser origins allowed to call the API.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Completion provider settings. When absent, every chat query is
    /// answered with the "Model not found" placeholder.
    #[serde(default)]
    pub completion: Option<CompletionSettings>,
}

fn default_pacing_delay_ms() -> u64 {
    2_000
}

fn default_cors_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:5173",
        "http://127.0.0.1:5173",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pacing_delay_ms: default_pacing_delay_ms(),
            cors_origins: default_cors_origins(),
            completion: None,
        }
    }
}

/// Settings for an OpenAI-style text completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// API base URL; `/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Upper bound on a single provider call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo-instruct".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
