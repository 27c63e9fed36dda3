//! Grounded/jumping flags and the downward probe that drives them

use glam::Vec3;

use super::host::{Collider, Hit, SpatialQuery};

/// Coarse locomotion state derived from [`GroundState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionState {
    /// Probe found ground this step
    Grounded,
    /// No ground below (walked off, or still falling after a landing was missed)
    Airborne,
    /// Airborne after an explicit jump; ends only on landing
    Jumping,
}

/// Ground and jump flags, updated once per fixed step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroundState {
    pub is_grounded: bool,
    /// `is_grounded` from the previous fixed step
    pub was_grounded: bool,
    pub is_jumping: bool,
    /// Latched from input, consumed by the next fixed step
    pub jump_requested: bool,
}

impl GroundState {
    /// Record a fresh probe result. Returns true on the landing edge.
    ///
    /// The landing edge is the only transition that clears `is_jumping`.
    pub fn update(&mut self, grounded_now: bool) -> bool {
        self.was_grounded = self.is_grounded;
        self.is_grounded = grounded_now;

        let landed = !self.was_grounded && self.is_grounded;
        if landed && self.is_jumping {
            self.is_jumping = false;
        }
        landed
    }

    /// Latch a jump request; a pending request is left as is
    pub fn request_jump(&mut self) -> bool {
        if self.jump_requested {
            return false;
        }
        self.jump_requested = true;
        true
    }

    /// Walked off an edge this step rather than jumping
    pub fn left_ground_without_jump(&self) -> bool {
        self.was_grounded && !self.is_grounded && !self.is_jumping
    }

    pub fn state(&self) -> LocomotionState {
        if self.is_grounded {
            LocomotionState::Grounded
        } else if self.is_jumping {
            LocomotionState::Jumping
        } else {
            LocomotionState::Airborne
        }
    }
}

/// Downward sphere-cast sized from the character collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    /// Probe sphere radius (collider radius minus the shell offset)
    pub radius: f32,
    /// Distance from the body origin to the bottom cap center
    pub half_extent: f32,
}

impl GroundProbe {
    pub fn from_collider<C: Collider + ?Sized>(collider: &C, shell_offset: f32) -> Self {
        Self {
            radius: collider.radius() * (1.0 - shell_offset),
            half_extent: collider.half_extent(),
        }
    }

    /// Cast from `origin` down to `extra` below the bottom cap
    pub fn cast<Q: SpatialQuery + ?Sized>(&self, world: &Q, origin: Vec3, extra: f32) -> Option<Hit> {
        world.sphere_cast_down(origin, self.radius, self.half_extent + extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capsule;

    impl Collider for Capsule {
        fn radius(&self) -> f32 {
            0.5
        }
        fn height(&self) -> f32 {
            2.0
        }
    }

    #[test]
    fn test_landing_edge_clears_jump() {
        let mut g = GroundState {
            is_grounded: true,
            ..Default::default()
        };
        g.is_jumping = true;

        // Taking off: still jumping, not a walk-off
        assert!(!g.update(false));
        assert!(g.is_jumping);
        assert!(!g.left_ground_without_jump());
        assert_eq!(g.state(), LocomotionState::Jumping);

        // Still in the air
        assert!(!g.update(false));
        assert!(g.is_jumping);

        // Landing
        assert!(g.update(true));
        assert!(!g.is_jumping);
        assert_eq!(g.state(), LocomotionState::Grounded);
    }

    #[test]
    fn test_jump_survives_grounded_steps() {
        // A jump flagged while still touching ground persists until a real landing
        let mut g = GroundState {
            is_grounded: true,
            is_jumping: true,
            ..Default::default()
        };
        assert!(!g.update(true));
        assert!(g.is_jumping);
    }

    #[test]
    fn test_request_jump_debounced() {
        let mut g = GroundState::default();
        assert!(g.request_jump());
        assert!(!g.request_jump());
        assert!(g.jump_requested);
    }

    #[test]
    fn test_walk_off_detection() {
        let mut g = GroundState {
            is_grounded: true,
            ..Default::default()
        };
        g.update(false);
        assert!(g.left_ground_without_jump());
        assert_eq!(g.state(), LocomotionState::Airborne);

        g.update(false);
        assert!(!g.left_ground_without_jump());
    }

    #[test]
    fn test_probe_dimensions() {
        let probe = GroundProbe::from_collider(&Capsule, 0.1);
        assert!((probe.radius - 0.45).abs() < 1e-6);
        assert!((probe.half_extent - 0.5).abs() < 1e-6);
    }
}
