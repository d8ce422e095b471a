//! Combined prompt construction.
//!
//! The prompt sent to the completion provider is the user's query, optionally
//! followed by the text of an attached file:
//!
//! ```text
//! {user_query}
//!
//! File content:
//! {decoded file text}
//! ```
//!
//! File bytes are decoded in two steps: a strict UTF-8 decode, then, if that
//! fails, a lossy decode that drops invalid byte sequences. Decoding never
//! fails a request.

use filechat_types::record::Attachment;

/// Header line placed between the query and the file text.
pub const FILE_CONTENT_HEADER: &str = "File content:";

/// How an attached file's bytes were turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDecode {
    /// The bytes were valid UTF-8.
    Utf8,
    /// The bytes contained invalid sequences, which were dropped.
    Lossy { dropped_bytes: usize },
}

/// Result of building the combined prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    /// Text to send to the completion provider.
    pub prompt: String,
    /// Whether file text was appended. False when no file was attached or
    /// the file was empty.
    pub file_appended: bool,
    /// Decode outcome, present only when file text was appended.
    pub decode: Option<FileDecode>,
}

/// Decode file bytes as UTF-8, dropping invalid sequences if the strict
/// decode fails.
pub fn decode_file_text(bytes: &[u8]) -> (String, FileDecode) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_owned(), FileDecode::Utf8),
        Err(_) => {
            let mut text = String::with_capacity(bytes.len());
            let mut dropped_bytes = 0;
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
                dropped_bytes += chunk.invalid().len();
            }
            (text, FileDecode::Lossy { dropped_bytes })
        }
    }
}

/// Build the prompt for a query and optional attachment.
pub fn build_prompt(user_query: &str, attachment: Option<&Attachment>) -> BuiltPrompt {
    let Some(file) = attachment.filter(|f| !f.content.is_empty()) else {
        return BuiltPrompt {
            prompt: user_query.to_owned(),
            file_appended: false,
            decode: None,
        };
    };

    let (text, decode) = decode_file_text(&file.content);
    BuiltPrompt {
        prompt: format!("{user_query}\n\n{FILE_CONTENT_HEADER}\n{text}"),
        file_appended: true,
        decode: Some(decode),
    }
}
