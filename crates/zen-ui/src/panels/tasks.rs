//! Tasks panel — add/edit form and the sorted task list.

use egui::{self, RichText, ScrollArea, Vec2};
use zen_core::tasks::TaskBook;
use zen_types::task::Task;
use crate::state::{DEADLINE_FORMAT, TaskForm};
use crate::theme::*;

#[derive(Debug, Clone, PartialEq)]
pub enum TaskAction {
    None,
    Save(Task),
    Delete(String),
    ToggleComplete(String),
}

pub fn tasks_panel(ui: &mut egui::Ui, book: &TaskBook, form: &mut TaskForm) -> TaskAction {
    let mut action = TaskAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("My Tasks").color(TEXT_PRIMARY).strong());
            ui.separator();

            if let Some(task) = task_form(ui, book, form) {
                action = TaskAction::Save(task);
            }

            ui.add_space(8.0);
            ui.separator();

            if book.is_empty() {
                ui.label(
                    RichText::new("No tasks yet. Add one above to get started!")
                        .color(TEXT_SECONDARY)
                        .italics(),
                );
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for task in book.sorted() {
                        if let Some(a) = task_row(ui, task, form) {
                            action = a;
                        }
                        ui.add_space(4.0);
                    }
                });
        });

    action
}

fn task_form(ui: &mut egui::Ui, book: &TaskBook, form: &mut TaskForm) -> Option<Task> {
    let mut saved = None;
    let heading = if form.editing.is_some() { "Edit Task" } else { "Add New Task" };
    ui.label(RichText::new(heading).color(ACCENT).strong());

    ui.label(RichText::new("Title").color(TEXT_SECONDARY).small());
    ui.add(
        egui::TextEdit::singleline(&mut form.title)
            .hint_text("e.g., Read Chapter 5")
            .desired_width(f32::INFINITY),
    );

    ui.label(RichText::new("Description (optional)").color(TEXT_SECONDARY).small());
    ui.add(
        egui::TextEdit::multiline(&mut form.description)
            .desired_rows(2)
            .desired_width(f32::INFINITY),
    );

    ui.label(RichText::new("Deadline (optional)").color(TEXT_SECONDARY).small());
    ui.add(egui::TextEdit::singleline(&mut form.deadline).hint_text("YYYY-MM-DD"));

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let label = if form.editing.is_some() { "Save Changes" } else { "Add Task" };
        let btn = ui.add(
            egui::Button::new(RichText::new(label).color(TEXT_PRIMARY))
                .fill(ACCENT)
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(100.0, 24.0)),
        );
        if btn.clicked() {
            match form.build(book) {
                Ok(task) => {
                    saved = Some(task);
                    form.clear();
                }
                Err(e) => form.error = Some(e.to_string()),
            }
        }
        if form.editing.is_some() && ui.button("Cancel").clicked() {
            form.clear();
        }
    });

    if let Some(err) = &form.error {
        ui.label(RichText::new(err).color(ERROR).small());
    }

    saved
}

fn task_row(ui: &mut egui::Ui, task: &Task, form: &mut TaskForm) -> Option<TaskAction> {
    let mut action = None;
    let title_color = if task.completed { DONE_COLOR } else { TEXT_PRIMARY };

    egui::Frame::default()
        .fill(BG_SURFACE)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let mut done = task.completed;
                if ui.checkbox(&mut done, "").changed() {
                    action = Some(TaskAction::ToggleComplete(task.id.clone()));
                }

                ui.vertical(|ui| {
                    let mut title = RichText::new(&task.title).color(title_color).strong();
                    if task.completed {
                        title = title.strikethrough();
                    }
                    ui.label(title);
                    if let Some(desc) = &task.description {
                        ui.label(RichText::new(desc).color(TEXT_SECONDARY).small());
                    }
                    if let Some(deadline) = task.deadline {
                        ui.label(
                            RichText::new(format!("Due: {}", deadline.format(DEADLINE_FORMAT)))
                                .color(WARNING)
                                .small(),
                        );
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Delete").clicked() {
                        action = Some(TaskAction::Delete(task.id.clone()));
                    }
                    if ui.button("Edit").clicked() {
                        *form = TaskForm::edit(task);
                    }
                });
            });
        });

    action
}
