//! CompletionProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the
//! codebase from the specific LLM library, and to let tests substitute
//! a scripted provider.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM-backed text completion.
///
/// Used for the PRD-summary fallback and for generating the optional
/// review of an assembled context document.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a system/user prompt pair and return the raw response text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}
