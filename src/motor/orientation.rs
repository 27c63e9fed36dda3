//! Body yaw and head pitch accumulators

use glam::{EulerRot, Quat, Vec2};

/// Head pitch limit in degrees (either direction)
pub const PITCH_LIMIT_DEG: f32 = 90.0;

/// View rotation owned by the controller.
///
/// The body only ever carries yaw and the head only ever carries pitch, so
/// composing aim deltas never introduces roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    pub body_rotation: Quat,
    pub head_rotation: Quat,
}

impl Default for OrientationState {
    fn default() -> Self {
        Self {
            body_rotation: Quat::IDENTITY,
            head_rotation: Quat::IDENTITY,
        }
    }
}

impl OrientationState {
    pub fn new(body_rotation: Quat, head_rotation: Quat) -> Self {
        Self {
            body_rotation,
            head_rotation: clamp_pitch(head_rotation),
        }
    }

    /// Body yaw in radians, in (-π, π]
    pub fn yaw(&self) -> f32 {
        let (yaw, _, _) = self.body_rotation.to_euler(EulerRot::YXZ);
        yaw
    }

    /// Head pitch in degrees, positive looking up
    pub fn pitch_degrees(&self) -> f32 {
        pitch_angle(self.head_rotation).to_degrees()
    }

    /// Compose an aim delta (degrees) onto the current rotation.
    ///
    /// Positive `aim.x` turns right, positive `aim.y` looks up.
    pub fn apply_aim(&mut self, aim: Vec2) {
        self.body_rotation =
            (self.body_rotation * Quat::from_rotation_y(-aim.x.to_radians())).normalize();
        self.head_rotation = clamp_pitch(self.head_rotation * Quat::from_rotation_x(aim.y.to_radians()));
    }
}

/// Angle of a pitch-only quaternion from its x/w ratio (radians)
fn pitch_angle(q: Quat) -> f32 {
    2.0 * (q.x / q.w).atan()
}

/// Clamp a pitch-only rotation to ±[`PITCH_LIMIT_DEG`]
pub fn clamp_pitch(q: Quat) -> Quat {
    let angle = pitch_angle(q)
        .to_degrees()
        .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    Quat::from_rotation_x(angle.to_radians())
}
