//! Smooth Moves - physics-driven first-person locomotion
//!
//! Core modules:
//! - `input`: Key bindings and per-frame move/aim mapping
//! - `motor`: Locomotion controller (ground probe, jump, stick-to-ground, view turn)
//! - `sim`: Minimal reference host (rigid body, planar world, fixed-step driver)
//! - `session`: Pause state and frame-rate counter
//! - `settings`: Tunables, presets and JSON persistence

pub mod input;
pub mod motor;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{InputMapper, InputSource, InputState, Key, KeyBindings};
pub use motor::{
    BodyTransform, Collider, GroundState, Hit, LocomotionController, LocomotionState, MotorConfig,
    OrientationState, RigidBody, SpatialQuery,
};
pub use session::{FrameRateCounter, PauseState};
pub use settings::{InputConfig, MotionPreset, Settings, SettingsError};

/// Simulation timing constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics)
    pub const FIXED_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the stepper will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default world gravity (m/s²)
    pub const GRAVITY: f32 = -9.81;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert_eq!(normalize_angle(0.25), 0.25);
    }
}
