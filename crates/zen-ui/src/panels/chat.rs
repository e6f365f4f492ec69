//! Chat panel — study assistant transcript and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use zen_types::message::{ChatEntry, Sender};
use crate::state::UiState;
use crate::theme::*;

/// Render the chat panel. Returns Some(message) when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, entries: &[ChatEntry], state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new("StudyZen AI Assistant")
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.chat_waiting { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });
                ui.label(
                    RichText::new("Ask for study tips, planning help, or academic questions.")
                        .color(TEXT_SECONDARY)
                        .small(),
                );

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in entries {
                            render_entry(ui, entry);
                            ui.add_space(4.0);
                        }

                        if state.chat_waiting {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Thinking...").color(TEXT_SECONDARY));
                            });
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.chat_input)
                        .hint_text("Type your message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add_enabled(!state.chat_waiting, input);

                    let send_enabled = !state.chat_input.trim().is_empty() && !state.chat_waiting;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        submitted = Some(state.chat_input.trim().to_string());
                        state.chat_input.clear();
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_entry(ui: &mut egui::Ui, entry: &ChatEntry) {
    let (label, label_color, layout) = match entry.sender {
        Sender::User => ("You", ACCENT, Layout::top_down(Align::Max)),
        Sender::Assistant => ("StudyZen AI", SUCCESS, Layout::top_down(Align::Min)),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(label).color(label_color).strong().small());
                ui.label(RichText::new(&entry.text).color(TEXT_PRIMARY));
            });
    });
}
