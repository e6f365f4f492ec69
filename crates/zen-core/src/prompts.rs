//! Single-shot prompt templates sent to the LLM.

use zen_types::focus::{GuidanceRequest, PhaseHint};

pub const STUDY_COACH_SYSTEM: &str =
    "You are a study coach providing study tips and productivity advice to students.";

pub const ACADEMIC_SYSTEM: &str =
    "You are a helpful AI assistant that answers questions about academic topics.";

pub const FOCUS_SYSTEM: &str =
    "You are a study assistant helping a student stay focused using the Pomodoro technique.";

/// Prompt for a focus-session guidance message. The model is asked for a
/// JSON object so the message can be picked out reliably.
pub fn focus_guidance(req: &GuidanceRequest) -> String {
    let situation = match req.phase {
        PhaseHint::Focus => {
            "The focus session is running. Encourage the student to focus on the material, \
             block distractions and avoid multitasking."
        }
        PhaseHint::Break => {
            "The break has started. Encourage the student to relax and avoid studying \
             during the break."
        }
        PhaseHint::Ended => {
            "The session has ended. Congratulate the student on completing the session."
        }
    };

    format!(
        "The student is currently studying {topic}.\n\n\
         The focus session lasts {focus} minutes, and the break lasts {brk} minutes.\n\n\
         Current phase: {phase}. {situation}\n\n\
         Output a JSON object with the following keys:\n\n\
         - message: A short message providing encouragement or a reminder.\n\
         - nextAction: The next action the user should take (FOCUS, BREAK, or SESSION_END).\n\
         - timeRemaining: The time remaining in the current phase in minutes.",
        topic = req.topic,
        focus = req.focus_duration_minutes,
        brk = req.break_duration_minutes,
        phase = req.phase.as_str(),
        situation = situation,
    )
}

pub fn study_tips(query: &str) -> String {
    format!(
        "Based on the user's query, provide relevant and helpful advice.\n\nQuery: {}",
        query
    )
}

pub fn academic_answer(question: &str) -> String {
    format!("Question: {}\nAnswer:", question)
}
