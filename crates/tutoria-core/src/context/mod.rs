//! Request context shaping.
//!
//! Pure functions that bound what is sent to the model: the history
//! budgeter and the article-context block builder.

pub mod article;
pub mod budget;
