//! Web Audio cue player.
//!
//! A short oscillator tone per cue: sine A4 when a focus phase ends,
//! triangle E5 when the break ends. The AudioContext is created lazily
//! on the first cue; a browser without Web Audio just stays silent.

use std::cell::RefCell;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioScheduledSourceNode, OscillatorType};

use zen_core::ports::AudioPort;
use zen_types::{Result, ZenError, focus::CueKind};

const PEAK_GAIN: f32 = 0.3;
const FADE_IN_SECS: f64 = 0.05;
const CUE_SECS: f64 = 0.8;

/// Oscillator type and frequency (Hz) for a cue.
pub fn cue_tone(kind: CueKind) -> (OscillatorType, f32) {
    match kind {
        CueKind::FocusEnd => (OscillatorType::Sine, 440.0),
        CueKind::BreakEnd => (OscillatorType::Triangle, 660.0),
    }
}

#[derive(Default)]
pub struct WebAudioCue {
    ctx: RefCell<Option<AudioContext>>,
}

impl WebAudioCue {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&self) -> Result<AudioContext> {
        if let Some(ctx) = self.ctx.borrow().as_ref() {
            return Ok(ctx.clone());
        }
        let ctx = AudioContext::new().map_err(js_err)?;
        *self.ctx.borrow_mut() = Some(ctx.clone());
        Ok(ctx)
    }

    fn play(&self, kind: CueKind) -> Result<()> {
        let ctx = self.context()?;
        // Autoplay policy may leave the context suspended until a user gesture
        let _ = ctx.resume();

        let oscillator = ctx.create_oscillator().map_err(js_err)?;
        let gain = ctx.create_gain().map_err(js_err)?;
        oscillator.connect_with_audio_node(&gain).map_err(js_err)?;
        gain.connect_with_audio_node(&ctx.destination()).map_err(js_err)?;

        let now = ctx.current_time();
        let (wave, frequency) = cue_tone(kind);
        oscillator.set_type(wave);
        oscillator
            .frequency()
            .set_value_at_time(frequency, now)
            .map_err(js_err)?;

        let level = gain.gain();
        level.set_value_at_time(0.0, now).map_err(js_err)?;
        level
            .linear_ramp_to_value_at_time(PEAK_GAIN, now + FADE_IN_SECS)
            .map_err(js_err)?;
        level
            .exponential_ramp_to_value_at_time(0.00001, now + CUE_SECS)
            .map_err(js_err)?;

        let source: &AudioScheduledSourceNode = &oscillator;
        source.start().map_err(js_err)?;
        source.stop_with_when(now + CUE_SECS).map_err(js_err)?;
        Ok(())
    }
}

impl AudioPort for WebAudioCue {
    fn play_cue(&self, kind: CueKind) {
        if let Err(e) = self.play(kind) {
            log::warn!("Audio cue {:?} not played: {}", kind, e);
        }
    }
}

fn js_err(e: JsValue) -> ZenError {
    ZenError::JsInterop(format!("{:?}", e))
}
