//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `zen-core` (pure Rust).
//! Implementations live in `zen-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use zen_types::{
    Result,
    focus::{CueKind, GuidanceRequest},
    message::Message,
};

// ─── LLM Port ────────────────────────────────────────────────

/// Request to send to an LLM. Model parameters come from the provider's config.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    /// Ask the provider for a JSON object response
    pub json_output: bool,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            json_output: false,
        }
    }

    pub fn json(messages: Vec<Message>) -> Self {
        Self {
            messages,
            json_output: true,
        }
    }
}

/// Complete (non-streaming) response from an LLM
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub message: Message,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait(?Send)]
pub trait LlmPort {
    /// Single-shot chat completion
    async fn chat_completion(&self, req: ChatRequest) -> Result<ChatResponse>;
}

// ─── Guidance Port ───────────────────────────────────────────

/// Produces a short advisory message for a focus session.
#[async_trait(?Send)]
pub trait GuidancePort {
    async fn request_guidance(&self, req: &GuidanceRequest) -> Result<String>;
}

// ─── Audio Port ──────────────────────────────────────────────

/// Plays a short cue at a phase boundary. Device lifecycle is the adapter's concern.
pub trait AudioPort {
    fn play_cue(&self, kind: CueKind);
}

// ─── Spawner Port ────────────────────────────────────────────

/// Runs a future out-of-band on the single-threaded event loop.
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
