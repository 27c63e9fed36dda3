//! Sphere queries against planar surface patches
//!
//! Enough geometry for the reference host: a downward sphere sweep for
//! ground probes and a sphere overlap test for resolving the capsule's
//! bottom cap against the floor.

use glam::{Vec2, Vec3};

use crate::motor::Hit;

/// Surfaces flatter than this (normal.y) are never hit by a downward sweep
const MIN_SWEEP_NORMAL_Y: f32 = 1e-4;

/// A plane, optionally bounded to an XZ rectangle
#[derive(Debug, Clone)]
pub struct Surface {
    /// Unit normal pointing out of the solid side
    pub normal: Vec3,
    /// Any point on the plane
    pub point: Vec3,
    /// XZ extent of the patch (min, max); unbounded when `None`
    pub bounds: Option<(Vec2, Vec2)>,
    /// Trigger volumes are ignored by queries and never block
    pub trigger: bool,
}

impl Surface {
    /// Horizontal floor at `height`
    pub fn flat(height: f32) -> Self {
        Self {
            normal: Vec3::Y,
            point: Vec3::new(0.0, height, 0.0),
            bounds: None,
            trigger: false,
        }
    }

    /// Slope through `point` rising `angle_deg` towards -Z
    pub fn ramp(point: Vec3, angle_deg: f32) -> Self {
        let a = angle_deg.to_radians();
        Self {
            normal: Vec3::new(0.0, a.cos(), a.sin()),
            point,
            bounds: None,
            trigger: false,
        }
    }

    /// Restrict the patch to an XZ rectangle
    pub fn bounded(mut self, min: Vec2, max: Vec2) -> Self {
        self.bounds = Some((min, max));
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// Signed distance from `p` to the plane (positive on the open side)
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p - self.point)
    }

    /// Whether a point on the plane lies inside the patch
    pub fn contains_xz(&self, p: Vec3) -> bool {
        match self.bounds {
            None => true,
            Some((min, max)) => p.x >= min.x && p.x <= max.x && p.z >= min.y && p.z <= max.y,
        }
    }
}

/// Result of a sphere overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at contact
    pub normal: Vec3,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Sweep a sphere straight down against one surface.
///
/// Spheres that already overlap the surface at `origin` do not report it,
/// matching typical engine sphere-cast behaviour.
pub fn sphere_cast_down(surface: &Surface, origin: Vec3, radius: f32, max_distance: f32) -> Option<Hit> {
    if surface.trigger || surface.normal.y <= MIN_SWEEP_NORMAL_Y {
        return None;
    }

    let start = surface.signed_distance(origin);
    if start < radius {
        return None;
    }

    // Moving along -Y closes the gap at rate normal.y
    let distance = (start - radius) / surface.normal.y;
    if distance > max_distance {
        return None;
    }

    let center = origin - Vec3::Y * distance;
    let point = center - surface.normal * radius;
    if !surface.contains_xz(point) {
        return None;
    }

    Some(Hit {
        normal: surface.normal,
        distance,
        point,
    })
}

/// Check a sphere against a surface for overlap.
///
/// Only shallow penetrations (center still above the plane) count, so a
/// body below a patch is not yanked up through it.
pub fn sphere_surface_collision(center: Vec3, radius: f32, surface: &Surface) -> CollisionResult {
    if surface.trigger {
        return CollisionResult::miss();
    }

    let dist = surface.signed_distance(center);
    if dist >= radius || dist < 0.0 {
        return CollisionResult::miss();
    }

    if !surface.contains_xz(center - surface.normal * dist) {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: surface.normal,
        penetration: radius - dist,
    }
}

/// Remove the part of `velocity` driving into a surface
#[inline]
pub fn clip_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - normal * into
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_hits_floor() {
        let floor = Surface::flat(0.0);
        let hit = sphere_cast_down(&floor, Vec3::new(0.0, 1.0, 0.0), 0.5, 1.0).unwrap();
        assert!((hit.distance - 0.5).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(hit.point.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_cast_out_of_range() {
        let floor = Surface::flat(0.0);
        assert!(sphere_cast_down(&floor, Vec3::new(0.0, 3.0, 0.0), 0.5, 1.0).is_none());
    }

    #[test]
    fn test_cast_ignores_trigger_and_overlap() {
        let trigger = Surface::flat(0.0).as_trigger();
        assert!(sphere_cast_down(&trigger, Vec3::new(0.0, 1.0, 0.0), 0.5, 1.0).is_none());

        let floor = Surface::flat(0.0);
        assert!(sphere_cast_down(&floor, Vec3::new(0.0, 0.2, 0.0), 0.5, 1.0).is_none());
    }

    #[test]
    fn test_cast_respects_bounds() {
        let ledge = Surface::flat(0.0).bounded(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(sphere_cast_down(&ledge, Vec3::new(0.5, 1.0, 0.5), 0.5, 1.0).is_some());
        assert!(sphere_cast_down(&ledge, Vec3::new(0.0, 1.0, -1.5), 0.5, 1.0).is_none());
    }

    #[test]
    fn test_cast_on_ramp() {
        let ramp = Surface::ramp(Vec3::ZERO, 30.0);
        let hit = sphere_cast_down(&ramp, Vec3::new(0.0, 2.0, 0.0), 0.5, 5.0).unwrap();
        assert!((hit.normal.angle_between(Vec3::Y).to_degrees() - 30.0).abs() < 1e-3);
        // Contact point lies on the plane
        assert!(ramp.signed_distance(hit.point).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_overlap() {
        let floor = Surface::flat(0.0);
        let result = sphere_surface_collision(Vec3::new(0.0, 0.4, 0.0), 0.5, &floor);
        assert!(result.hit);
        assert!((result.penetration - 0.1).abs() < 1e-6);

        let result = sphere_surface_collision(Vec3::new(0.0, 0.6, 0.0), 0.5, &floor);
        assert!(!result.hit);
    }

    #[test]
    fn test_clip_velocity() {
        let v = clip_velocity(Vec3::new(2.0, -3.0, 1.0), Vec3::Y);
        assert_eq!(v, Vec3::new(2.0, 0.0, 1.0));

        // Moving away is untouched
        let v = clip_velocity(Vec3::new(0.0, 3.0, 0.0), Vec3::Y);
        assert_eq!(v, Vec3::new(0.0, 3.0, 0.0));
    }
}
