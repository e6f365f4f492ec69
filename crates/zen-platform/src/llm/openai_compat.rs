//! OpenAI-compatible LLM adapter.
//!
//! Works with DeepSeek, OpenAI, Google's OpenAI endpoint and any provider
//! using the OpenAI chat completions API format.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use zen_core::ports::*;
use zen_types::{
    Result, ZenError,
    config::LlmConfig,
    message::{Message, Role},
};

/// Provider that speaks the OpenAI chat completions protocol.
pub struct OpenAiCompatProvider {
    config: LlmConfig,
    base_url: String,
}

impl OpenAiCompatProvider {
    pub fn new(config: LlmConfig) -> Self {
        let base_url = config.base_url().trim_end_matches('/').to_string();
        Self { config, base_url }
    }

    /// Full URL of the completions endpoint. Bases that already carry a
    /// version segment are used as-is.
    pub fn completions_url(&self) -> String {
        if self.base_url.ends_with("/v1") || self.base_url.ends_with("/openai") {
            format!("{}/chat/completions", self.base_url)
        } else {
            format!("{}/v1/chat/completions", self.base_url)
        }
    }

    pub fn build_request_body(&self, req: &ChatRequest) -> Value {
        let messages: Vec<Value> = req.messages.iter().map(message_to_json).collect();

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        if req.json_output {
            body["response_format"] = json!({ "type": "json_object" });
        }

        body
    }
}

#[async_trait(?Send)]
impl LlmPort for OpenAiCompatProvider {
    async fn chat_completion(&self, req: ChatRequest) -> Result<ChatResponse> {
        if self.config.api_key.trim().is_empty() {
            return Err(ZenError::Config("No API key configured".to_string()));
        }

        let url = self.completions_url();
        let body = self.build_request_body(&req);
        log::debug!("POST {} ({} messages)", url, req.messages.len());

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| ZenError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ZenError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ZenError::Llm(format!("HTTP {}: {}", status, text)));
        }

        let data: ApiResponse = response
            .json()
            .await
            .map_err(|e| ZenError::Llm(e.to_string()))?;

        parse_api_response(data)
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// ─── Serialization helpers ───────────────────────────────────

fn message_to_json(msg: &Message) -> Value {
    json!({
        "role": msg.role.as_str(),
        "content": msg.content,
    })
}

fn parse_api_response(data: ApiResponse) -> Result<ChatResponse> {
    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ZenError::Llm("No choices in response".to_string()))?;

    let role = match choice.message.role.as_str() {
        "system" => Role::System,
        "user" => Role::User,
        _ => Role::Assistant,
    };
    let message = Message {
        role,
        content: choice.message.content.unwrap_or_default(),
    };
    let usage = data.usage.map(|u| TokenUsage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    Ok(ChatResponse { message, usage })
}

/// Decode a raw completions payload. Exposed for tests.
pub fn parse_completion(raw: &str) -> Result<ChatResponse> {
    let data: ApiResponse = serde_json::from_str(raw)?;
    parse_api_response(data)
}
