use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub focus: FocusDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_key: String::new(),
            api_base: None,
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

impl LlmConfig {
    pub fn base_url(&self) -> String {
        self.api_base
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_base_url().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    DeepSeek,
    OpenAI,
    Google,
    Custom,
}

impl LlmProvider {
    pub fn default_base_url(&self) -> &str {
        match self {
            LlmProvider::DeepSeek => "https://api.deepseek.com",
            LlmProvider::OpenAI => "https://api.openai.com",
            LlmProvider::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
            LlmProvider::Custom => "",
        }
    }

    pub fn all() -> &'static [LlmProvider] {
        &[
            LlmProvider::DeepSeek,
            LlmProvider::OpenAI,
            LlmProvider::Google,
            LlmProvider::Custom,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            LlmProvider::DeepSeek => "DeepSeek",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Google => "Google",
            LlmProvider::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    IndexedDb,
}

/// Values the focus form is pre-filled with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusDefaults {
    pub focus_duration_minutes: u32,
    pub break_duration_minutes: u32,
    pub muted: bool,
}

impl Default for FocusDefaults {
    fn default() -> Self {
        Self {
            focus_duration_minutes: 25,
            break_duration_minutes: 5,
            muted: false,
        }
    }
}
