//! Physics-driven first-person locomotion
//!
//! The motor decides what impulses, drag and velocity corrections to issue;
//! the host's rigid-body integrator resolves them. It must stay free of any
//! concrete engine type:
//! - Host services only through the traits in [`host`]
//! - No internal loop, thread or timer
//! - All "no hit" query results degrade to "not grounded" / "no correction"

mod config;
mod controller;
mod ground;
pub mod host;
mod orientation;

pub use config::MotorConfig;
pub use controller::{LocomotionController, StepOutcome};
pub use ground::{GroundProbe, GroundState, LocomotionState};
pub use host::{BodyTransform, Collider, Hit, RigidBody, SpatialQuery};
pub use orientation::{OrientationState, PITCH_LIMIT_DEG, clamp_pitch};
