//! Host engine capabilities consumed by the locomotion controller
//!
//! The controller never touches a concrete engine type. A host adapts its
//! rigid body, collider, transform hierarchy and scene queries to these
//! traits; `crate::sim` provides a minimal in-process implementation.

use glam::{Quat, Vec3};

/// Velocity and force access on the character's rigid body
pub trait RigidBody {
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    /// Instantaneous change in momentum (Δv = impulse / mass)
    fn add_impulse(&mut self, impulse: Vec3);
    /// Linear damping coefficient used by the host integrator
    fn set_drag(&mut self, drag: f32);
}

/// Capsule dimensions of the character collider
pub trait Collider {
    fn radius(&self) -> f32;
    /// Full capsule height, end cap to end cap
    fn height(&self) -> f32;

    /// Distance from the capsule center to the center of its bottom cap
    fn half_extent(&self) -> f32 {
        self.height() / 2.0 - self.radius()
    }
}

/// Result of a sphere-cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Surface normal at the impact point (unit length)
    pub normal: Vec3,
    /// Distance the sphere travelled before impact
    pub distance: f32,
    /// Impact point on the surface
    pub point: Vec3,
}

/// Scene queries
pub trait SpatialQuery {
    /// Sweep a sphere straight down from `origin`, reporting the first
    /// non-trigger surface within `max_distance`
    fn sphere_cast_down(&self, origin: Vec3, radius: f32, max_distance: f32) -> Option<Hit>;
}

/// Body (yaw) and head (pitch) nodes of the character transform hierarchy
///
/// Basis conventions: right-handed, +Y up, forward is -Z, right is +X.
pub trait BodyTransform {
    /// World-space origin of the body (capsule center)
    fn position(&self) -> Vec3;
    fn body_rotation(&self) -> Quat;
    fn set_body_rotation(&mut self, rotation: Quat);
    /// Head rotation, local to the body
    fn head_rotation(&self) -> Quat;
    fn set_head_rotation(&mut self, rotation: Quat);

    fn head_world_rotation(&self) -> Quat {
        self.body_rotation() * self.head_rotation()
    }

    fn head_forward(&self) -> Vec3 {
        self.head_world_rotation() * Vec3::NEG_Z
    }

    fn head_right(&self) -> Vec3 {
        self.head_world_rotation() * Vec3::X
    }
}
