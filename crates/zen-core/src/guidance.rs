//! LLM-backed guidance service for focus sessions.

use std::rc::Rc;
use async_trait::async_trait;
use serde::Deserialize;

use zen_types::{Result, ZenError, focus::GuidanceRequest, message::Message};
use crate::ports::{ChatRequest, GuidancePort, LlmPort};
use crate::prompts;

/// Structured reply the guidance prompt asks for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuidanceOutput {
    pub message: String,
    #[serde(rename = "nextAction", default)]
    pub next_action: Option<NextAction>,
    #[serde(rename = "timeRemaining", default)]
    pub time_remaining: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextAction {
    Focus,
    Break,
    SessionEnd,
}

pub struct LlmGuidance {
    llm: Rc<dyn LlmPort>,
}

impl LlmGuidance {
    pub fn new(llm: Rc<dyn LlmPort>) -> Self {
        Self { llm }
    }
}

#[async_trait(?Send)]
impl GuidancePort for LlmGuidance {
    async fn request_guidance(&self, req: &GuidanceRequest) -> Result<String> {
        let chat = ChatRequest::json(vec![
            Message::system(prompts::FOCUS_SYSTEM),
            Message::user(&prompts::focus_guidance(req)),
        ]);
        let response = self.llm.chat_completion(chat).await?;
        parse_guidance(&response.message.content)
    }
}

/// Pick the message out of a guidance reply.
///
/// Accepts the JSON object the prompt asks for (optionally inside a
/// markdown code fence) and falls back to the raw text otherwise.
pub fn parse_guidance(raw: &str) -> Result<String> {
    let text = strip_code_fence(raw.trim());
    if text.is_empty() {
        return Err(ZenError::Llm("Empty guidance response".to_string()));
    }

    match serde_json::from_str::<GuidanceOutput>(text) {
        Ok(output) if !output.message.trim().is_empty() => Ok(output.message.trim().to_string()),
        Ok(_) => Err(ZenError::Llm("Guidance response has an empty message".to_string())),
        Err(_) if text.starts_with('{') => {
            Err(ZenError::Llm("Malformed guidance response".to_string()))
        }
        Err(_) => Ok(text.to_string()),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
