//! Locomotion tunables.
//!
//! Supplied at construction and otherwise immutable. Minimums are enforced
//! where configs enter the program (`Settings::validate`), never inside
//! the per-step logic.

use serde::{Deserialize, Serialize};

/// Configuration for the physics motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Top speed the movement impulse drives towards (m/s). Minimum 1.
    pub max_speed: f32,

    /// Upward impulse applied on jump. Minimum 10.
    pub jump_force: f32,

    /// Extra probe distance below the capsule for the grounded check (m).
    pub ground_check_distance: f32,

    /// Extra probe distance used when sticking to ground after walking off a ledge (m).
    pub ground_stick_distance: f32,

    /// Drag applied while grounded; how quickly the body stops with no input. Minimum 1.
    pub deceleration_rate: f32,

    /// Fraction of the collider radius removed from probe spheres, in [0, 1).
    pub shell_offset: f32,

    /// Steepest surface (degrees from up) the body will stick to.
    pub max_stick_angle: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            jump_force: 50.0,
            ground_check_distance: 0.01,
            ground_stick_distance: 0.5,
            deceleration_rate: 5.0,
            shell_offset: 0.0,
            max_stick_angle: 85.0,
        }
    }
}

impl MotorConfig {
    /// Fast, floaty movement with a strong jump.
    pub fn arcade() -> Self {
        Self {
            max_speed: 14.0,
            jump_force: 70.0,
            deceleration_rate: 3.0,
            ..Default::default()
        }
    }

    /// Slow, planted movement that hugs terrain.
    pub fn heavy() -> Self {
        Self {
            max_speed: 6.0,
            jump_force: 35.0,
            ground_stick_distance: 0.8,
            deceleration_rate: 10.0,
            ..Default::default()
        }
    }
}
