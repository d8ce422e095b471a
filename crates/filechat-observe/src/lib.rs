//! Observability setup for filechat: structured logging via `tracing`,
//! optionally bridged to OpenTelemetry.

pub mod tracing_setup;
