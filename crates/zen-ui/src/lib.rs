//! egui panels for StudyZen. Panels render from borrowed core state and
//! return actions; the app applies them.

pub mod state;
pub mod theme;
pub mod panels;
