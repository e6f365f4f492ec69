//! Focus panel — session setup form, countdown, controls and guidance.

use egui::{self, Align, Layout, ProgressBar, RichText, Vec2};
use zen_types::focus::{
    MAX_BREAK_MINUTES, MAX_FOCUS_MINUTES, MIN_BREAK_MINUTES, MIN_FOCUS_MINUTES, Phase,
    SessionConfig, SessionState,
};
use crate::state::FocusForm;
use crate::theme::*;

/// What the caller should do after rendering the focus panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusAction {
    None,
    Start(SessionConfig),
    TogglePause,
    Reset,
    ToggleMute,
}

pub fn focus_panel(
    ui: &mut egui::Ui,
    session: &SessionState,
    muted: bool,
    form: &mut FocusForm,
) -> FocusAction {
    let mut action = FocusAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Focus Mode").color(TEXT_PRIMARY).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let icon = if muted { "🔇" } else { "🔊" };
                    let hover = if muted { "Unmute sounds" } else { "Mute sounds" };
                    if ui.button(icon).on_hover_text(hover).clicked() {
                        action = FocusAction::ToggleMute;
                    }
                });
            });
            ui.separator();

            if session.phase.is_live() || session.phase == Phase::Ended {
                if let Some(a) = session_view(ui, session) {
                    action = a;
                }
            }
            if !session.phase.is_live() {
                if session.phase == Phase::Ended {
                    ui.add_space(8.0);
                    ui.separator();
                }
                if let Some(config) = setup_form(ui, form) {
                    action = FocusAction::Start(config);
                }
            }
        });

    action
}

fn setup_form(ui: &mut egui::Ui, form: &mut FocusForm) -> Option<SessionConfig> {
    let mut start = None;

    ui.label(RichText::new("Start a Focus Session").color(ACCENT).strong());
    ui.add_space(4.0);

    ui.label(RichText::new("Study Topic").color(TEXT_SECONDARY).small());
    ui.add(
        egui::TextEdit::singleline(&mut form.topic)
            .hint_text("e.g., Calculus Chapter 3")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(4.0);

    ui.label(RichText::new("Focus Duration (minutes)").color(TEXT_SECONDARY).small());
    ui.add(egui::Slider::new(
        &mut form.focus_minutes,
        MIN_FOCUS_MINUTES..=MAX_FOCUS_MINUTES,
    ));

    ui.label(RichText::new("Break Duration (minutes)").color(TEXT_SECONDARY).small());
    ui.add(egui::Slider::new(
        &mut form.break_minutes,
        MIN_BREAK_MINUTES..=MAX_BREAK_MINUTES,
    ));

    ui.add_space(8.0);
    let btn = ui.add(
        egui::Button::new(RichText::new("Start Focus Session").color(TEXT_PRIMARY).strong())
            .fill(ACCENT)
            .corner_radius(PANEL_ROUNDING)
            .min_size(Vec2::new(160.0, 28.0)),
    );
    if btn.clicked() {
        start = Some(form.to_config());
    }

    if let Some(err) = &form.error {
        ui.label(RichText::new(err).color(ERROR).small());
    }

    start
}

fn session_view(ui: &mut egui::Ui, session: &SessionState) -> Option<FocusAction> {
    let mut action = None;
    let color = phase_color(session.phase);

    ui.vertical_centered(|ui| {
        let title = match session.phase {
            Phase::Focusing => "Focus Time",
            Phase::OnBreak => "Break Time",
            _ => "Session Complete",
        };
        ui.label(RichText::new(title).color(color).strong().size(20.0));

        ui.label(
            RichText::new(session.format_remaining())
                .color(TEXT_PRIMARY)
                .monospace()
                .size(TIMER_FONT_SIZE),
        );

        ui.add(
            ProgressBar::new(session.progress())
                .fill(color)
                .desired_height(8.0),
        );

        if session.paused {
            ui.label(RichText::new("Paused").color(WARNING));
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if session.phase.is_live() {
                let label = if session.paused { "Resume" } else { "Pause" };
                if ui.button(label).clicked() {
                    action = Some(FocusAction::TogglePause);
                }
            }
            if ui.button("Reset").clicked() {
                action = Some(FocusAction::Reset);
            }
        });

        if let Some(message) = &session.guidance_message {
            ui.add_space(8.0);
            egui::Frame::default()
                .fill(BG_SURFACE)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(RichText::new("AI Assistant").color(ACCENT).small().strong());
                    ui.label(RichText::new(message).color(TEXT_PRIMARY));
                });
        }
    });

    action
}
