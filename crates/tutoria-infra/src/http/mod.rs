//! HTTP chat gateway.

pub mod gateway;

pub use gateway::HttpChatGateway;
