//! Locomotion controller.
//!
//! Driven by the host through two entry points:
//!
//! - [`LocomotionController::on_frame`] once per visual frame: view rotation
//!   and jump latching
//! - [`LocomotionController::on_fixed_step`] once per physics step: ground
//!   probe, movement impulse, drag, jump and ground-stick
//!
//! Both are invoked serially on the host's main thread.

use glam::{Quat, Vec2, Vec3};

use super::config::MotorConfig;
use super::ground::{GroundProbe, GroundState, LocomotionState};
use super::host::{BodyTransform, Collider, RigidBody, SpatialQuery};
use super::orientation::OrientationState;
use crate::input::InputMapper;
use crate::normalize_angle;

/// What a single fixed step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step was skipped (no input mapper wired)
    pub skipped: bool,
    /// Grounded state went false -> true
    pub landed: bool,
    /// Movement impulse was applied
    pub moved: bool,
    /// Jump impulse was applied
    pub jumped: bool,
    /// Velocity was projected onto the ground after walking off an edge
    pub stuck_to_ground: bool,
}

/// Physics-based first-person motor.
///
/// # Example
///
/// ```ignore
/// let mut motor = LocomotionController::from_transform(MotorConfig::default(), &body);
///
/// // Each visual frame:
/// mapper.update(&device, pause.captured());
/// motor.on_frame(Some(&mapper), &mut body, frame_dt);
///
/// // Each fixed step:
/// motor.on_fixed_step(Some(&mapper), &mut body, &world, FIXED_DT);
/// ```
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: MotorConfig,
    orientation: OrientationState,
    /// Orientation has been taken from the host transform
    aim_initialized: bool,
    ground: GroundState,
}

impl LocomotionController {
    pub fn new(config: MotorConfig) -> Self {
        Self {
            config,
            orientation: OrientationState::default(),
            aim_initialized: false,
            ground: GroundState::default(),
        }
    }

    /// Create a controller whose view starts from the transform's rotations
    pub fn from_transform<T: BodyTransform + ?Sized>(config: MotorConfig, transform: &T) -> Self {
        let mut motor = Self::new(config);
        motor.init_aim(transform);
        motor
    }

    /// Adopt the transform's current body and head rotations as the aim start.
    ///
    /// Head pitch beyond the limit is clamped. A controller that was never
    /// initialized adopts the transform on its first view update.
    pub fn init_aim<T: BodyTransform + ?Sized>(&mut self, transform: &T) {
        self.orientation = OrientationState::new(transform.body_rotation(), transform.head_rotation());
        self.aim_initialized = true;
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    pub fn orientation(&self) -> &OrientationState {
        &self.orientation
    }

    pub fn ground(&self) -> &GroundState {
        &self.ground
    }

    pub fn state(&self) -> LocomotionState {
        self.ground.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.ground.is_grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.ground.is_jumping
    }

    /// Visual-frame update: apply aim and latch a fresh jump press.
    ///
    /// Does nothing without an input mapper.
    pub fn on_frame<B>(&mut self, input: Option<&InputMapper>, body: &mut B, _dt: f32)
    where
        B: RigidBody + BodyTransform + ?Sized,
    {
        let Some(input) = input else {
            return;
        };

        self.rotate_view(input.aim(), body);

        // Polled here since a fixed step may not run on the frame of the press
        if input.jump_pressed() && self.ground.request_jump() {
            log::trace!("Jump requested");
        }
    }

    /// Compose `aim` onto the view and carry momentum into the new facing.
    pub fn rotate_view<B>(&mut self, aim: Vec2, body: &mut B)
    where
        B: RigidBody + BodyTransform + ?Sized,
    {
        if !self.aim_initialized {
            self.init_aim(&*body);
        }

        let old_yaw = self.orientation.yaw();
        self.orientation.apply_aim(aim);
        body.set_body_rotation(self.orientation.body_rotation);
        body.set_head_rotation(self.orientation.head_rotation);

        let yaw_delta = normalize_angle(self.orientation.yaw() - old_yaw);
        if yaw_delta != 0.0 {
            let turn = Quat::from_rotation_y(yaw_delta);
            body.set_velocity(turn * body.velocity());
        }
    }

    /// Fixed-step update. A no-op without an input mapper.
    pub fn on_fixed_step<B, Q>(
        &mut self,
        input: Option<&InputMapper>,
        body: &mut B,
        world: &Q,
        _dt: f32,
    ) -> StepOutcome
    where
        B: RigidBody + Collider + BodyTransform + ?Sized,
        Q: SpatialQuery + ?Sized,
    {
        let Some(input) = input else {
            return StepOutcome {
                skipped: true,
                ..Default::default()
            };
        };

        let mut outcome = StepOutcome {
            landed: self.ground_check(&*body, world),
            ..Default::default()
        };

        if input.is_moving() {
            // Relative to where the head is looking
            let move_dir = input.move_dir();
            let movement =
                (body.head_forward() * move_dir.y + body.head_right() * move_dir.x) * self.config.max_speed;

            // Soft cap on the full velocity, vertical included
            if body.velocity().length_squared() < self.config.max_speed * self.config.max_speed {
                body.add_impulse(movement);
                outcome.moved = true;
            }
        }

        if self.ground.is_grounded {
            body.set_drag(self.config.deceleration_rate);

            if self.ground.jump_requested {
                body.set_drag(0.0);
                let v = body.velocity();
                body.set_velocity(Vec3::new(v.x, 0.0, v.z));
                body.add_impulse(Vec3::new(0.0, self.config.jump_force, 0.0));
                self.ground.is_jumping = true;
                outcome.jumped = true;
                log::debug!("Jump (force {})", self.config.jump_force);
            }
        } else {
            body.set_drag(0.0);

            if self.ground.left_ground_without_jump() {
                outcome.stuck_to_ground = self.stick_to_ground(body, world);
            }
        }

        self.ground.jump_requested = false;

        log::trace!(
            "Fixed step: state={:?} vel={:?} {:?}",
            self.ground.state(),
            body.velocity(),
            outcome
        );
        outcome
    }

    /// Re-probe the ground. Returns true on the landing edge.
    fn ground_check<B, Q>(&mut self, body: &B, world: &Q) -> bool
    where
        B: Collider + BodyTransform + ?Sized,
        Q: SpatialQuery + ?Sized,
    {
        let probe = GroundProbe::from_collider(body, self.config.shell_offset);
        let grounded = probe
            .cast(world, body.position(), self.config.ground_check_distance)
            .is_some();

        let was_jumping = self.ground.is_jumping;
        let landed = self.ground.update(grounded);
        if landed {
            log::debug!("Landed (from jump: {})", was_jumping);
        }
        landed
    }

    /// Keep the body on shallow ground after walking off a small drop.
    fn stick_to_ground<B, Q>(&mut self, body: &mut B, world: &Q) -> bool
    where
        B: RigidBody + Collider + BodyTransform + ?Sized,
        Q: SpatialQuery + ?Sized,
    {
        let probe = GroundProbe::from_collider(&*body, self.config.shell_offset);
        let Some(hit) = probe.cast(world, body.position(), self.config.ground_stick_distance) else {
            return false;
        };

        if hit.normal.angle_between(Vec3::Y).to_degrees().abs() >= self.config.max_stick_angle {
            return false;
        }

        let normal = hit.normal.normalize_or_zero();
        let v = body.velocity();
        body.set_velocity(v - normal * v.dot(normal));
        log::debug!("Stuck to ground (normal {:?})", normal);
        true
    }
}
