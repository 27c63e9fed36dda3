//! Session-level state that sits around the motor
//!
//! Pause handling decides whether the cursor is captured (and so whether
//! aim input is live). The frame-rate counter publishes a rate for whatever
//! HUD the host draws.

use crate::input::{InputSource, KeyBindings};

/// Pause / cursor capture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseState {
    paused: bool,
}

impl PauseState {
    pub fn new(paused: bool) -> Self {
        Self { paused }
    }

    /// Toggle when the pause key is released this frame. Returns true if toggled.
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &S, bindings: &KeyBindings) -> bool {
        if source.was_key_released(bindings.pause) {
            self.toggle();
            return true;
        }
        false
    }

    pub fn toggle(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Cursor is locked to the view while playing
    pub fn captured(&self) -> bool {
        !self.paused
    }

    /// Simulation time multiplier
    pub fn time_scale(&self) -> f32 {
        if self.paused { 0.0 } else { 1.0 }
    }
}

/// Averages frames over a fixed interval
#[derive(Debug, Clone)]
pub struct FrameRateCounter {
    interval: f32,
    elapsed: f32,
    frames: u32,
    rate: u32,
}

impl Default for FrameRateCounter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl FrameRateCounter {
    /// Publish interval (seconds)
    pub const DEFAULT_INTERVAL: f32 = 0.5;

    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            frames: 0,
            rate: 0,
        }
    }

    /// Count one frame of real (unscaled) duration `dt`.
    /// Returns the new rate when one is published.
    pub fn frame(&mut self, dt: f32) -> Option<u32> {
        self.frames += 1;
        self.elapsed += dt;

        if self.elapsed < self.interval {
            return None;
        }

        self.rate = (self.frames as f32 / self.interval) as u32;
        self.frames = 0;
        self.elapsed -= self.interval;
        Some(self.rate)
    }

    /// Last published rate for a HUD
    pub fn display(&self) -> String {
        format!("{} FPS", self.rate)
    }
}
