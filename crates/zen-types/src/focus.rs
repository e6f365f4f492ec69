//! Focus session types shared by the controller and the UI.

use serde::{Deserialize, Serialize};
use crate::{Result, ZenError};

pub const MIN_FOCUS_MINUTES: u32 = 1;
pub const MAX_FOCUS_MINUTES: u32 = 120;
pub const MIN_BREAK_MINUTES: u32 = 1;
pub const MAX_BREAK_MINUTES: u32 = 60;

/// User-supplied settings for one focus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub topic: String,
    pub focus_duration_minutes: u32,
    pub break_duration_minutes: u32,
}

impl SessionConfig {
    pub fn new(topic: impl Into<String>, focus_duration_minutes: u32, break_duration_minutes: u32) -> Self {
        Self {
            topic: topic.into(),
            focus_duration_minutes,
            break_duration_minutes,
        }
    }

    /// Check the topic and duration bounds.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(ZenError::validation("Study topic is required"));
        }
        if !(MIN_FOCUS_MINUTES..=MAX_FOCUS_MINUTES).contains(&self.focus_duration_minutes) {
            return Err(ZenError::Validation(format!(
                "Focus duration must be between {} and {} minutes",
                MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES
            )));
        }
        if !(MIN_BREAK_MINUTES..=MAX_BREAK_MINUTES).contains(&self.break_duration_minutes) {
            return Err(ZenError::Validation(format!(
                "Break duration must be between {} and {} minutes",
                MIN_BREAK_MINUTES, MAX_BREAK_MINUTES
            )));
        }
        Ok(())
    }

    pub fn focus_seconds(&self) -> u32 {
        self.focus_duration_minutes * 60
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_duration_minutes * 60
    }
}

/// Stage of a focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Focusing,
    OnBreak,
    Ended,
}

impl Phase {
    /// Focusing and OnBreak count down; Idle and Ended only accept start/reset.
    pub fn is_live(&self) -> bool {
        matches!(self, Phase::Focusing | Phase::OnBreak)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Focusing => "Focus",
            Phase::OnBreak => "Break",
            Phase::Ended => "Ended",
        }
    }

    /// Phase context sent along with guidance requests. Idle has none.
    pub fn hint(&self) -> Option<PhaseHint> {
        match self {
            Phase::Idle => None,
            Phase::Focusing => Some(PhaseHint::Focus),
            Phase::OnBreak => Some(PhaseHint::Break),
            Phase::Ended => Some(PhaseHint::Ended),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Read-only snapshot of the controller for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub total_phase_seconds: u32,
    pub paused: bool,
    pub guidance_message: Option<String>,
}

impl SessionState {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            seconds_remaining: 0,
            total_phase_seconds: 0,
            paused: false,
            guidance_message: None,
        }
    }

    /// True while the once-per-second tick source should be running.
    pub fn is_counting(&self) -> bool {
        self.phase.is_live() && !self.paused
    }

    /// Fraction of the current phase already elapsed (0.0 - 1.0).
    pub fn progress(&self) -> f32 {
        if self.total_phase_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_phase_seconds - self.seconds_remaining;
        elapsed as f32 / self.total_phase_seconds as f32
    }

    /// Remaining time as MM:SS.
    pub fn format_remaining(&self) -> String {
        format_mmss(self.seconds_remaining)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Format a number of seconds as MM:SS.
pub fn format_mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Audio cue played at a phase boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueKind {
    FocusEnd,
    BreakEnd,
}

/// Phase context for a guidance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseHint {
    Focus,
    Break,
    Ended,
}

impl PhaseHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseHint::Focus => "focus",
            PhaseHint::Break => "break",
            PhaseHint::Ended => "ended",
        }
    }
}

/// What the guidance service is asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceRequest {
    pub topic: String,
    pub focus_duration_minutes: u32,
    pub break_duration_minutes: u32,
    pub phase: PhaseHint,
}

impl GuidanceRequest {
    pub fn for_config(config: &SessionConfig, phase: PhaseHint) -> Self {
        Self {
            topic: config.topic.clone(),
            focus_duration_minutes: config.focus_duration_minutes,
            break_duration_minutes: config.break_duration_minutes,
            phase,
        }
    }
}
