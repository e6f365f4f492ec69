//! Study assistant chat: keyword routing onto single-shot prompts.

use zen_types::{
    Result, ZenError,
    event::ZenEvent,
    message::{ChatEntry, Message},
};
use crate::event_bus::EventBus;
use crate::ports::{ChatRequest, LlmPort};
use crate::prompts;

pub const GREETING: &str =
    "Hello! I'm StudyZen AI. How can I help you plan your studies, give tips, or answer academic questions?";

pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Which prompt a chat query is sent through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoute {
    AcademicQuestion,
    StudyTips,
    General,
}

pub fn route_query(input: &str) -> QueryRoute {
    let lower = input.to_lowercase();
    if ["question", "what is", "explain"].iter().any(|k| lower.contains(k)) {
        QueryRoute::AcademicQuestion
    } else if ["tip", "advice", "plan"].iter().any(|k| lower.contains(k)) {
        QueryRoute::StudyTips
    } else {
        QueryRoute::General
    }
}

/// A routed query, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatQuery {
    pub route: QueryRoute,
    pub input: String,
}

impl ChatQuery {
    pub fn new(input: &str) -> Self {
        Self {
            route: route_query(input),
            input: input.to_string(),
        }
    }

    pub fn to_request(&self) -> ChatRequest {
        let (system, prompt) = match self.route {
            QueryRoute::AcademicQuestion => {
                (prompts::ACADEMIC_SYSTEM, prompts::academic_answer(&self.input))
            }
            QueryRoute::StudyTips => (prompts::STUDY_COACH_SYSTEM, prompts::study_tips(&self.input)),
            QueryRoute::General => (
                prompts::STUDY_COACH_SYSTEM,
                prompts::study_tips(&format!("Respond to: {}", self.input)),
            ),
        };
        ChatRequest::new(vec![Message::system(system), Message::user(&prompt)])
    }

    /// Send the query and return the reply text.
    pub async fn send(&self, llm: &dyn LlmPort) -> Result<String> {
        let response = llm.chat_completion(self.to_request()).await?;
        let text = response.message.content.trim().to_string();
        if text.is_empty() {
            return Err(ZenError::Llm("Empty reply".to_string()));
        }
        Ok(text)
    }
}

/// Chat transcript with a single request in flight at a time.
pub struct ChatAssistant {
    entries: Vec<ChatEntry>,
    busy: bool,
    event_bus: EventBus,
}

impl ChatAssistant {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            entries: Vec::new(),
            busy: false,
            event_bus,
        }
    }

    /// Seed the greeting the first time the dialog opens.
    pub fn open(&mut self) {
        if self.entries.is_empty() {
            self.entries.push(ChatEntry::assistant(GREETING));
        }
    }

    /// Record the user's line and return the query to send, or None when
    /// the input is blank or a reply is still pending.
    pub fn submit(&mut self, input: &str) -> Option<ChatQuery> {
        let input = input.trim();
        if input.is_empty() || self.busy {
            return None;
        }
        self.entries.push(ChatEntry::user(input));
        self.busy = true;
        self.event_bus.emit(ZenEvent::ChatPending);
        Some(ChatQuery::new(input))
    }

    /// Record the reply (or the error line) for the pending query.
    pub fn complete(&mut self, result: Result<String>) {
        self.busy = false;
        match result {
            Ok(text) => {
                self.entries.push(ChatEntry::assistant(&text));
                self.event_bus.emit(ZenEvent::ChatReply { text });
            }
            Err(e) => {
                log::error!("Chat request failed: {}", e);
                self.entries.push(ChatEntry::assistant(CHAT_ERROR_REPLY));
                self.event_bus.emit(ZenEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}
