use serde::{Deserialize, Serialize};
use crate::focus::{CueKind, Phase};

/// Events emitted by the core.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ZenEvent {
    /// The focus session entered a new phase
    PhaseChanged { phase: Phase, total_seconds: u32 },

    /// The session was paused or resumed
    PauseToggled { paused: bool },

    /// An end-of-phase cue was signalled (emitted even when muted)
    CueSignalled { kind: CueKind, muted: bool },

    /// A guidance message replaced the displayed one
    GuidanceUpdated { message: String },

    /// The session was cleared back to idle
    SessionReset,

    /// The chat assistant started working on a query
    ChatPending,

    /// The chat assistant produced a reply
    ChatReply { text: String },

    /// An error occurred
    Error { message: String },
}
