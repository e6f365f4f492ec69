//! Once-per-second tick source backed by a browser interval.
//!
//! Dropping the gloo `Interval` cancels it, so `stop` just drops it.
//! Ticks missed while the tab is throttled are not replayed.

use gloo_timers::callback::Interval;

pub const TICK_MS: u32 = 1_000;

#[derive(Default)]
pub struct SecondTicker {
    interval: Option<Interval>,
}

impl SecondTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start calling `on_tick` every second. A running ticker is left alone.
    pub fn start<F>(&mut self, on_tick: F)
    where
        F: FnMut() + 'static,
    {
        if self.interval.is_some() {
            return;
        }
        log::debug!("Ticker started");
        self.interval = Some(Interval::new(TICK_MS, on_tick));
    }

    pub fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            let _ = interval.cancel();
            log::debug!("Ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}
