//! Dashboard — welcome card, rotating quote, today's tasks and the
//! running focus session at a glance.

use egui::{self, RichText, Vec2};
use zen_core::quotes::Quote;
use zen_types::focus::SessionState;
use zen_types::task::Task;
use crate::state::Tab;
use crate::theme::*;

/// Render the dashboard. Returns the tab to switch to when a shortcut is clicked.
pub fn dashboard_panel(
    ui: &mut egui::Ui,
    quote: &Quote,
    due_today: &[&Task],
    session: &SessionState,
) -> Option<Tab> {
    let mut goto = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Welcome to StudyZen!").color(ACCENT).strong());
            ui.label(
                RichText::new("Your AI-powered assistant for focused and productive study sessions.")
                    .color(TEXT_SECONDARY),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                for (tab, hint) in [
                    (Tab::Tasks, "Organize your to-dos"),
                    (Tab::Notes, "Capture your thoughts"),
                    (Tab::Focus, "Boost your concentration"),
                ] {
                    let btn = egui::Button::new(RichText::new(tab.label()).color(TEXT_PRIMARY))
                        .fill(BG_SURFACE)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(140.0, 32.0));
                    if ui.add(btn).on_hover_text(hint).clicked() {
                        goto = Some(tab);
                    }
                }
            });
        });

    ui.add_space(8.0);

    egui::Frame::default()
        .fill(BG_SURFACE)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("\u{201c}{}\u{201d}", quote.text))
                        .color(TEXT_PRIMARY)
                        .italics()
                        .size(18.0),
                );
                ui.label(RichText::new(format!("- {}", quote.author)).color(TEXT_SECONDARY));
            });
        });

    ui.add_space(8.0);

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.label(RichText::new("Due Today").color(ACCENT).strong());
            if due_today.is_empty() {
                ui.label(RichText::new("Nothing due today.").color(TEXT_SECONDARY).italics());
            }
            for task in due_today {
                let color = if task.completed { DONE_COLOR } else { TEXT_PRIMARY };
                ui.label(RichText::new(format!("• {}", task.title)).color(color));
            }

            if session.phase.is_live() {
                ui.add_space(8.0);
                ui.label(RichText::new("Focus Session").color(ACCENT).strong());
                let line = format!(
                    "{} · {}{}",
                    session.phase.label(),
                    session.format_remaining(),
                    if session.paused { " (paused)" } else { "" }
                );
                if ui
                    .link(RichText::new(line).color(phase_color(session.phase)))
                    .clicked()
                {
                    goto = Some(Tab::Focus);
                }
            }
        });

    goto
}
