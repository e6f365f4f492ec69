use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::{Result, ZenError};

/// A free-form study note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check that both title and content are present.
    pub fn validate_fields(title: &str, content: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(ZenError::validation("Title is required"));
        }
        if content.trim().is_empty() {
            return Err(ZenError::validation("Content cannot be empty"));
        }
        Ok(())
    }
}
