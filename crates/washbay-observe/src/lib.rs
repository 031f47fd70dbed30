//! Observability setup for Washbay: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
