//! Reference host
//!
//! A deliberately small stand-in for a host engine's physics, used by the
//! demo binary and tests:
//! - Fixed timestep only
//! - Point-mass bodies, planar surfaces, no rotation dynamics
//! - Scripts (the motor) run before integration each step

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Surface, clip_velocity, sphere_cast_down, sphere_surface_collision};
pub use state::{SimBody, SimWorld};
pub use tick::{FixedStepper, tick};
