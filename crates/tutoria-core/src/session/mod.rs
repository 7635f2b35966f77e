//! Session orchestration.
//!
//! The controller that composes the transcript store, context budgeter,
//! intent profiles, and chat gateway into the interactive session state
//! machine.

pub mod controller;
