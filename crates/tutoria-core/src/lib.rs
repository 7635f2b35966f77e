//! Session logic and port definitions for Tutoria.
//!
//! This crate defines the "ports" (the transcript store and chat gateway
//! traits) that the infrastructure layer implements, plus the pure pieces
//! that shape a request -- context budgeting and intent prompt profiles --
//! and the session controller that composes them. It depends only on
//! `tutoria-types`, never on `tutoria-infra` or any IO crate.

pub mod context;
pub mod gateway;
pub mod prompt;
pub mod session;
pub mod transcript;
