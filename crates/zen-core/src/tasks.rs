//! Task book — the ordered task list persisted under one storage key.

use std::cmp::Ordering;
use chrono::NaiveDate;
use zen_types::{Result, ZenError, task::Task};
use crate::ports::StoragePort;

pub const TASKS_KEY: &str = "tasks";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBook {
    tasks: Vec<Task>,
}

impl TaskBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Load from storage. A missing key is an empty book.
    pub async fn load(storage: &dyn StoragePort) -> Result<Self> {
        match storage.get(TASKS_KEY).await? {
            Some(bytes) => Ok(Self::from_tasks(serde_json::from_slice(&bytes)?)),
            None => Ok(Self::new()),
        }
    }

    pub async fn save(&self, storage: &dyn StoragePort) -> Result<()> {
        let bytes = serde_json::to_vec(&self.tasks)?;
        storage.set(TASKS_KEY, &bytes).await
    }

    /// Insert a new task or replace the one with the same id.
    pub fn save_task(&mut self, task: Task) -> Result<()> {
        task.validate()?;
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ZenError::NotFound(format!("task {}", id)))?;
        Ok(self.tasks.remove(pos))
    }

    /// Flip completion and return the new value.
    pub fn toggle_complete(&mut self, id: &str) -> Result<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ZenError::NotFound(format!("task {}", id)))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in stored (insertion) order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Display order: open before completed, then earliest deadline,
    /// dated before undated, then newest first.
    pub fn sorted(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by(|a, b| display_order(a, b));
        sorted
    }

    pub fn due_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.sorted()
            .into_iter()
            .filter(|t| t.is_due_on(date))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}
