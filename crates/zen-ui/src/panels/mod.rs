pub mod dashboard;
pub mod tasks;
pub mod notes;
pub mod focus;
pub mod chat;
pub mod settings;

pub use dashboard::dashboard_panel;
pub use tasks::{TaskAction, tasks_panel};
pub use notes::{NoteAction, notes_panel};
pub use focus::{FocusAction, focus_panel};
pub use chat::chat_panel;
pub use settings::{SaveFeedback, SettingsAction, settings_panel};
