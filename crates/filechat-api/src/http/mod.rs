//! HTTP layer for filechat.
//!
//! Axum-based API: `POST /chat/generate` (multipart), `GET /`, and
//! `GET /health`, with CORS for the configured browser origins.

pub mod error;
pub mod handlers;
pub mod router;
