//! Notes panel — editor plus the note list, most recently updated first.

use egui::{self, RichText, ScrollArea, Vec2};
use zen_core::notes::NoteBook;
use zen_types::note::Note;
use crate::state::NoteForm;
use crate::theme::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    None,
    Create { title: String, content: String },
    Update { id: String, title: String, content: String },
    Delete(String),
}

pub fn notes_panel(ui: &mut egui::Ui, book: &NoteBook, form: &mut NoteForm) -> NoteAction {
    let mut action = NoteAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("My Notes").color(TEXT_PRIMARY).strong());
            ui.separator();

            if let Some(a) = editor(ui, form) {
                action = a;
            }

            ui.add_space(8.0);
            ui.separator();

            if book.is_empty() {
                ui.label(
                    RichText::new("No notes yet. Write your first one above.")
                        .color(TEXT_SECONDARY)
                        .italics(),
                );
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for note in book.sorted() {
                        if let Some(a) = note_card(ui, book, note, form) {
                            action = a;
                        }
                        ui.add_space(4.0);
                    }
                });
        });

    action
}

fn editor(ui: &mut egui::Ui, form: &mut NoteForm) -> Option<NoteAction> {
    let mut action = None;
    let heading = if form.editing.is_some() { "Edit Note" } else { "New Note" };
    ui.label(RichText::new(heading).color(ACCENT).strong());

    ui.add(
        egui::TextEdit::singleline(&mut form.title)
            .hint_text("Title")
            .desired_width(f32::INFINITY),
    );
    ui.add(
        egui::TextEdit::multiline(&mut form.content)
            .hint_text("Start writing...")
            .desired_rows(6)
            .desired_width(f32::INFINITY),
    );

    ui.horizontal(|ui| {
        let btn = ui.add(
            egui::Button::new(RichText::new("Save Note").color(TEXT_PRIMARY))
                .fill(ACCENT)
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(100.0, 24.0)),
        );
        if btn.clicked() {
            let title = form.title.trim().to_string();
            let content = form.content.trim().to_string();
            action = Some(match form.editing.clone() {
                Some(id) => NoteAction::Update { id, title, content },
                None => NoteAction::Create { title, content },
            });
        }
        if form.editing.is_some() && ui.button("Cancel").clicked() {
            form.clear();
        }
    });

    if let Some(err) = &form.error {
        ui.label(RichText::new(err).color(ERROR).small());
    }

    action
}

fn note_card(
    ui: &mut egui::Ui,
    book: &NoteBook,
    note: &Note,
    form: &mut NoteForm,
) -> Option<NoteAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SURFACE)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&note.title).color(TEXT_PRIMARY).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Delete").clicked() {
                        action = Some(NoteAction::Delete(note.id.clone()));
                    }
                    if ui.button("Edit").clicked() {
                        if let Some(edit) = NoteForm::edit(book, &note.id) {
                            *form = edit;
                        }
                    }
                });
            });
            ui.label(RichText::new(preview(&note.content, 160)).color(TEXT_SECONDARY));
            ui.label(
                RichText::new(format!(
                    "Last updated {}",
                    note.updated_at.format("%b %-d, %Y %H:%M")
                ))
                .color(TEXT_SECONDARY)
                .small()
                .italics(),
            );
        });

    action
}

/// First `max_chars` characters of the content, with an ellipsis when cut.
pub fn preview(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
