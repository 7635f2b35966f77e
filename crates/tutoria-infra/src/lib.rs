//! Infrastructure implementations for Tutoria.
//!
//! Concrete adapters behind the ports defined in `tutoria-core`: the
//! SQLite-backed transcript store, the reqwest-backed chat gateway, and the
//! `config.toml` loader.

pub mod config;
pub mod http;
pub mod sqlite;
