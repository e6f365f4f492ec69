//! UI-level state that drives rendering.
//! Form drafts plus a status/toast projection of the core state,
//! updated each frame by draining the EventBus.

use chrono::NaiveDate;
use zen_core::notes::NoteBook;
use zen_core::tasks::TaskBook;
use zen_types::{
    Result, ZenError,
    config::FocusDefaults,
    event::ZenEvent,
    focus::{CueKind, Phase, SessionConfig},
    task::Task,
};

pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Top-level navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Tasks,
    Notes,
    Focus,
    Chat,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Dashboard,
            Tab::Tasks,
            Tab::Notes,
            Tab::Focus,
            Tab::Chat,
            Tab::Settings,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Tasks => "Tasks",
            Tab::Notes => "Notes",
            Tab::Focus => "Focus Mode",
            Tab::Chat => "AI Chat",
            Tab::Settings => "Settings",
        }
    }
}

/// A short notification shown above the panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub is_error: bool,
}

impl Toast {
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            is_error: false,
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            is_error: true,
        }
    }
}

// ─── Form drafts ─────────────────────────────────────────────

/// Focus session setup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusForm {
    pub topic: String,
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub error: Option<String>,
}

impl FocusForm {
    pub fn from_defaults(defaults: &FocusDefaults) -> Self {
        Self {
            topic: String::new(),
            focus_minutes: defaults.focus_duration_minutes,
            break_minutes: defaults.break_duration_minutes,
            error: None,
        }
    }

    pub fn to_config(&self) -> SessionConfig {
        SessionConfig::new(
            self.topic.trim(),
            self.focus_minutes,
            self.break_minutes,
        )
    }
}

impl Default for FocusForm {
    fn default() -> Self {
        Self::from_defaults(&FocusDefaults::default())
    }
}

/// Add/edit task form. `editing` holds the id of the task being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub editing: Option<String>,
    pub title: String,
    pub description: String,
    pub deadline: String,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            deadline: task
                .deadline
                .map(|d| d.format(DEADLINE_FORMAT).to_string())
                .unwrap_or_default(),
            error: None,
        }
    }

    /// Build the task to save. Edits keep the id, completion flag and
    /// creation time of the original.
    pub fn build(&self, book: &TaskBook) -> Result<Task> {
        let deadline = parse_deadline(&self.deadline)?;
        let mut task = match self.editing.as_deref().and_then(|id| book.get(id)) {
            Some(existing) => existing.clone(),
            None => Task::new(""),
        };
        task.title = self.title.trim().to_string();
        task = task.with_description(self.description.trim());
        task.deadline = deadline;
        task.validate()?;
        Ok(task)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Blank means no deadline.
pub fn parse_deadline(input: &str) -> Result<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DEADLINE_FORMAT)
        .map(Some)
        .map_err(|_| ZenError::validation("Deadline must be a date like 2026-05-31"))
}

/// Note editor form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub editing: Option<String>,
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

impl NoteForm {
    pub fn edit(book: &NoteBook, id: &str) -> Option<Self> {
        book.get(id).map(|note| Self {
            editing: Some(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
            error: None,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ─── UiState ─────────────────────────────────────────────────

/// State visible to UI panels
pub struct UiState {
    pub tab: Tab,
    pub focus_form: FocusForm,
    pub task_form: TaskForm,
    pub note_form: NoteForm,
    /// Chat input field content
    pub chat_input: String,
    /// Waiting on a chat reply
    pub chat_waiting: bool,
    /// Status line text
    pub status_text: String,
    pub toast: Option<Toast>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            tab: Tab::Dashboard,
            focus_form: FocusForm::default(),
            task_form: TaskForm::default(),
            note_form: NoteForm::default(),
            chat_input: String::new(),
            chat_waiting: false,
            status_text: "Ready".to_string(),
            toast: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ZenEvent>) {
        for event in events {
            match event {
                ZenEvent::PhaseChanged { phase, .. } => {
                    self.status_text = match phase {
                        Phase::Idle => "Ready".to_string(),
                        Phase::Focusing => "Focusing".to_string(),
                        Phase::OnBreak => "On break".to_string(),
                        Phase::Ended => "Session ended".to_string(),
                    };
                }
                ZenEvent::CueSignalled { kind, .. } => {
                    self.toast = Some(match kind {
                        CueKind::FocusEnd => Toast::info("Focus Complete!", "Time for a break."),
                        CueKind::BreakEnd => {
                            Toast::info("Break Over!", "Ready for another focus session?")
                        }
                    });
                }
                ZenEvent::PauseToggled { paused } => {
                    self.status_text = if paused { "Paused" } else { "Resumed" }.to_string();
                }
                ZenEvent::GuidanceUpdated { .. } => {}
                ZenEvent::SessionReset => {
                    self.status_text = "Ready".to_string();
                    self.toast = None;
                }
                ZenEvent::ChatPending => {
                    self.chat_waiting = true;
                    self.status_text = "Thinking...".to_string();
                }
                ZenEvent::ChatReply { .. } => {
                    self.chat_waiting = false;
                    self.status_text = "Ready".to_string();
                }
                ZenEvent::Error { message } => {
                    self.chat_waiting = false;
                    self.status_text = format!("Error: {}", message);
                    self.toast = Some(Toast::error("Something went wrong", &message));
                }
            }
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
