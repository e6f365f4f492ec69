//! Focus session controller.
//!
//! Drives a single focus → break → ended cycle:
//! 1. `start` validates the config and enters Focusing
//! 2. `tick` counts the live phase down once per second
//! 3. Reaching zero expires the phase, signals a cue and moves on
//! 4. `reset` returns to Idle from anywhere
//!
//! Guidance requests are queued as tickets and run out-of-band by
//! `dispatch_guidance`. A response can only overwrite the guidance
//! message, and tickets from a previous session generation are dropped.

use std::cell::RefCell;
use std::rc::Rc;

use zen_types::{
    Result,
    event::ZenEvent,
    focus::{CueKind, GuidanceRequest, Phase, SessionConfig, SessionState},
};
use crate::event_bus::EventBus;
use crate::ports::{AudioPort, GuidancePort, Spawner};

/// Shown when the guidance service fails.
pub const GUIDANCE_FALLBACK: &str = "Error fetching guidance";

/// Shown locally as soon as the break expires.
pub const SESSION_ENDED_MESSAGE: &str = "Session ended! Great work. Reset to start a new session.";

/// A queued guidance request, tagged with the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceTicket {
    pub generation: u64,
    pub request: GuidanceRequest,
}

pub struct FocusController {
    config: Option<SessionConfig>,
    state: SessionState,
    generation: u64,
    muted: bool,
    pending: Vec<GuidanceTicket>,
    audio: Rc<dyn AudioPort>,
    event_bus: EventBus,
}

impl FocusController {
    pub fn new(audio: Rc<dyn AudioPort>, event_bus: EventBus) -> Self {
        Self {
            config: None,
            state: SessionState::idle(),
            generation: 0,
            muted: false,
            pending: Vec::new(),
            audio,
            event_bus,
        }
    }

    /// Begin a session. Only Idle and Ended accept a start; a live
    /// session ignores it.
    pub fn start(&mut self, config: SessionConfig) -> Result<()> {
        config.validate()?;

        if self.state.phase.is_live() {
            log::debug!("start ignored: session already {}", self.state.phase);
            return Ok(());
        }

        log::info!(
            "Focus session started: \"{}\" ({}m focus / {}m break)",
            config.topic,
            config.focus_duration_minutes,
            config.break_duration_minutes
        );

        let seconds = config.focus_seconds();
        self.generation += 1;
        self.pending.clear();
        self.config = Some(config);
        self.state.guidance_message = None;
        self.enter_phase(Phase::Focusing, seconds);
        self.queue_guidance();
        Ok(())
    }

    /// Consume one second of the live phase.
    pub fn tick(&mut self) {
        if !self.state.is_counting() {
            return;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.seconds_remaining == 0 {
            self.expire();
        }
    }

    /// Flip pause on a live session and re-request guidance for the
    /// current phase.
    pub fn toggle_pause(&mut self) {
        if !self.state.phase.is_live() {
            log::debug!("toggle_pause ignored in {}", self.state.phase);
            return;
        }

        self.state.paused = !self.state.paused;
        log::info!(
            "Focus session {}",
            if self.state.paused { "paused" } else { "resumed" }
        );
        self.event_bus.emit(ZenEvent::PauseToggled {
            paused: self.state.paused,
        });
        self.queue_guidance();
    }

    /// Clear config and state unconditionally. In-flight guidance is
    /// ignored from here on.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending.clear();
        self.config = None;
        self.state = SessionState::idle();
        log::info!("Focus session reset");
        self.event_bus.emit(ZenEvent::SessionReset);
    }

    /// Snapshot for presentation.
    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    /// Token identifying the current session; changes on start and reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Hand queued guidance requests to the caller.
    pub fn take_guidance_requests(&mut self) -> Vec<GuidanceTicket> {
        std::mem::take(&mut self.pending)
    }

    /// Apply a guidance response. Returns false when the ticket belongs
    /// to an earlier session and was discarded.
    pub fn apply_guidance(&mut self, generation: u64, result: Result<String>) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale guidance (generation {} != {})",
                generation,
                self.generation
            );
            return false;
        }

        let message = match result {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Guidance request failed: {}", e);
                GUIDANCE_FALLBACK.to_string()
            }
        };
        self.state.guidance_message = Some(message.clone());
        self.event_bus.emit(ZenEvent::GuidanceUpdated { message });
        true
    }

    fn expire(&mut self) {
        let Some(config) = self.config.as_ref() else {
            return;
        };

        match self.state.phase {
            Phase::Focusing => {
                let seconds = config.break_seconds();
                self.signal_cue(CueKind::FocusEnd);
                self.enter_phase(Phase::OnBreak, seconds);
                self.queue_guidance();
            }
            Phase::OnBreak => {
                self.signal_cue(CueKind::BreakEnd);
                self.state.phase = Phase::Ended;
                self.state.seconds_remaining = 0;
                self.state.paused = false;
                self.state.guidance_message = Some(SESSION_ENDED_MESSAGE.to_string());
                log::info!("Focus session ended");
                self.event_bus.emit(ZenEvent::PhaseChanged {
                    phase: Phase::Ended,
                    total_seconds: self.state.total_phase_seconds,
                });
                self.queue_guidance();
            }
            Phase::Idle | Phase::Ended => {}
        }
    }

    fn enter_phase(&mut self, phase: Phase, seconds: u32) {
        self.state.phase = phase;
        self.state.total_phase_seconds = seconds;
        self.state.seconds_remaining = seconds;
        self.state.paused = false;
        log::info!("Entered {} phase ({}s)", phase, seconds);
        self.event_bus.emit(ZenEvent::PhaseChanged {
            phase,
            total_seconds: seconds,
        });
    }

    fn signal_cue(&self, kind: CueKind) {
        if !self.muted {
            self.audio.play_cue(kind);
        }
        self.event_bus.emit(ZenEvent::CueSignalled {
            kind,
            muted: self.muted,
        });
    }

    fn queue_guidance(&mut self) {
        let (Some(config), Some(hint)) = (self.config.as_ref(), self.state.phase.hint()) else {
            return;
        };
        self.pending.push(GuidanceTicket {
            generation: self.generation,
            request: GuidanceRequest::for_config(config, hint),
        });
    }
}

/// Run every queued guidance request out-of-band.
///
/// The controller is only borrowed to drain the queue and again to apply
/// each result; no borrow is held across an await. Returns the number of
/// requests spawned.
pub fn dispatch_guidance(
    controller: &Rc<RefCell<FocusController>>,
    guidance: &Rc<dyn GuidancePort>,
    spawner: &dyn Spawner,
) -> usize {
    let tickets = controller.borrow_mut().take_guidance_requests();
    let count = tickets.len();

    for ticket in tickets {
        let controller = Rc::downgrade(controller);
        let guidance = guidance.clone();
        spawner.spawn(Box::pin(async move {
            let result = guidance.request_guidance(&ticket.request).await;
            if let Some(controller) = controller.upgrade() {
                controller
                    .borrow_mut()
                    .apply_guidance(ticket.generation, result);
            }
        }));
    }

    count
}
