//! Shared domain types for Tutoria.
//!
//! This crate contains the core domain types used across the tutoring
//! session manager: chat messages, interaction intents, topic context,
//! the backend wire shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod topic;
