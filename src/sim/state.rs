//! Reference host state: one capsule body and a world of surfaces
//!
//! Everything the motor needs from a host, and nothing more. Bodies are
//! point masses with a capsule footprint; only the bottom cap collides.

use glam::{Quat, Vec3};

use super::collision::{Surface, clip_velocity, sphere_cast_down, sphere_surface_collision};
use crate::consts::GRAVITY;
use crate::motor::{BodyTransform, Collider, Hit, RigidBody, SpatialQuery};

/// A capsule rigid body
#[derive(Debug, Clone)]
pub struct SimBody {
    /// Capsule center
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    /// Linear damping (per second)
    pub drag: f32,
    pub radius: f32,
    pub height: f32,
    pub body_rotation: Quat,
    pub head_rotation: Quat,
}

impl Default for SimBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass: 1.0,
            drag: 0.0,
            radius: 0.5,
            height: 2.0,
            body_rotation: Quat::IDENTITY,
            head_rotation: Quat::IDENTITY,
        }
    }
}

impl SimBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Place the body so its bottom cap rests on a floor at `height`
    pub fn standing_on(height: f32) -> Self {
        let body = Self::default();
        Self::new(Vec3::new(0.0, height + body.height / 2.0, 0.0))
    }

    /// Center of the bottom cap sphere
    pub fn foot(&self) -> Vec3 {
        self.position - Vec3::Y * self.half_extent()
    }

    /// Advance velocity and position by `dt`
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.velocity.y += gravity * dt;
        self.velocity *= (1.0 - self.drag * dt).clamp(0.0, 1.0);
        self.position += self.velocity * dt;
    }

    pub fn planar_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

impl RigidBody for SimBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }
}

impl Collider for SimBody {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn height(&self) -> f32 {
        self.height
    }
}

impl BodyTransform for SimBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn body_rotation(&self) -> Quat {
        self.body_rotation
    }

    fn set_body_rotation(&mut self, rotation: Quat) {
        self.body_rotation = rotation;
    }

    fn head_rotation(&self) -> Quat {
        self.head_rotation
    }

    fn set_head_rotation(&mut self, rotation: Quat) {
        self.head_rotation = rotation;
    }
}

/// Static level geometry
#[derive(Debug, Clone)]
pub struct SimWorld {
    pub surfaces: Vec<Surface>,
    /// Vertical acceleration (m/s², negative is down)
    pub gravity: f32,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SimWorld {
    pub fn new(surfaces: Vec<Surface>) -> Self {
        Self {
            surfaces,
            gravity: GRAVITY,
        }
    }

    /// Single unbounded floor at `height`
    pub fn flat(height: f32) -> Self {
        Self::new(vec![Surface::flat(height)])
    }

    pub fn add(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    /// Push the body's bottom cap out of any surface it sinks into
    pub fn resolve(&self, body: &mut SimBody) {
        for surface in &self.surfaces {
            let contact = sphere_surface_collision(body.foot(), body.radius, surface);
            if contact.hit {
                body.position += contact.normal * contact.penetration;
                body.velocity = clip_velocity(body.velocity, contact.normal);
            }
        }
    }
}

impl SpatialQuery for SimWorld {
    fn sphere_cast_down(&self, origin: Vec3, radius: f32, max_distance: f32) -> Option<Hit> {
        self.surfaces
            .iter()
            .filter_map(|s| sphere_cast_down(s, origin, radius, max_distance))
            .min_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
