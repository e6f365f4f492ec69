//! StudyZen core — focus session controller, study books, chat routing,
//! port traits and the event bus. No platform dependencies.

pub mod ports;
pub mod event_bus;
pub mod focus;
pub mod guidance;
pub mod prompts;
pub mod chat;
pub mod tasks;
pub mod notes;
pub mod quotes;

#[cfg(test)]
mod tests;
