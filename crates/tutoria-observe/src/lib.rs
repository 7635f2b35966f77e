//! Observability helpers for Tutoria hosts.

pub mod tracing_setup;
