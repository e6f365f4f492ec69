//! Note book — most recently updated first, persisted under one storage key.

use chrono::Utc;
use zen_types::{Result, ZenError, note::Note};
use crate::ports::StoragePort;

pub const NOTES_KEY: &str = "notes";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteBook {
    notes: Vec<Note>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub async fn load(storage: &dyn StoragePort) -> Result<Self> {
        match storage.get(NOTES_KEY).await? {
            Some(bytes) => Ok(Self::from_notes(serde_json::from_slice(&bytes)?)),
            None => Ok(Self::new()),
        }
    }

    pub async fn save(&self, storage: &dyn StoragePort) -> Result<()> {
        let bytes = serde_json::to_vec(&self.notes)?;
        storage.set(NOTES_KEY, &bytes).await
    }

    /// Create a note at the top of the list. Returns its id.
    pub fn create(&mut self, title: &str, content: &str) -> Result<String> {
        Note::validate_fields(title, content)?;
        let note = Note::new(title, content);
        let id = note.id.clone();
        self.notes.insert(0, note);
        Ok(id)
    }

    /// Edit a note in place and move it to the top of the list.
    pub fn update(&mut self, id: &str, title: &str, content: &str) -> Result<()> {
        Note::validate_fields(title, content)?;
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| ZenError::NotFound(format!("note {}", id)))?;
        let mut note = self.notes.remove(pos);
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = Utc::now();
        self.notes.insert(0, note);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| ZenError::NotFound(format!("note {}", id)))?;
        Ok(self.notes.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Display order: most recently updated first. Ties keep stored order.
    pub fn sorted(&self) -> Vec<&Note> {
        let mut sorted: Vec<&Note> = self.notes.iter().collect();
        sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sorted
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
