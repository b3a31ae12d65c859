//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat completion over HTTP (OpenAI Chat Completions API)
//! - An offline, recording chat client for tests and dry runs

pub mod adapter;

pub use adapter::*;
