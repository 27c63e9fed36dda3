//! Fixed timestep driver
//!
//! Splits variable frame time into fixed physics steps and advances the
//! reference host one step at a time.

use super::state::{SimBody, SimWorld};
use crate::consts::{FIXED_DT, MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::input::InputMapper;
use crate::motor::{LocomotionController, StepOutcome};

/// Accumulates frame time and hands out fixed steps
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's worth of time and return how many fixed steps to run.
    ///
    /// `time_scale` of 0 (paused) adds nothing. Time beyond
    /// [`MAX_SUBSTEPS`] steps is dropped rather than carried over.
    pub fn advance(&mut self, frame_dt: f32, time_scale: f32) -> u32 {
        self.accumulator += frame_dt.min(MAX_FRAME_DT) * time_scale;

        let mut substeps = 0;
        while self.accumulator >= FIXED_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= FIXED_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FIXED_DT);
        }
        substeps
    }
}

/// Advance the reference host by one fixed step.
///
/// Scripts run before the integrator, as in typical engine physics loops.
pub fn tick(
    motor: &mut LocomotionController,
    input: Option<&InputMapper>,
    body: &mut SimBody,
    world: &SimWorld,
    dt: f32,
) -> StepOutcome {
    let outcome = motor.on_fixed_step(input, body, world, dt);
    body.integrate(dt, world.gravity);
    world.resolve(body);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, ScriptedInput};
    use crate::motor::{LocomotionState, MotorConfig};
    use crate::sim::Surface;
    use glam::{Vec2, Vec3};

    fn mapper(source: &ScriptedInput) -> InputMapper {
        let mut m = InputMapper::default();
        m.update(source, true);
        m
    }

    #[test]
    fn test_stepper_counts_steps() {
        let mut stepper = FixedStepper::new();
        assert_eq!(stepper.advance(FIXED_DT * 0.5, 1.0), 0);
        assert_eq!(stepper.advance(FIXED_DT * 0.6, 1.0), 1);
        // Leftover is a tenth of a step
        assert_eq!(stepper.advance(FIXED_DT * 0.85, 1.0), 0);
    }

    #[test]
    fn test_stepper_paused() {
        let mut stepper = FixedStepper::new();
        assert_eq!(stepper.advance(1.0, 0.0), 0);
        // Nothing banked while paused
        assert_eq!(stepper.advance(FIXED_DT * 0.9, 1.0), 0);
    }

    #[test]
    fn test_stepper_caps_substeps() {
        let mut stepper = FixedStepper::new();
        // 0.1s clamp at 50 Hz is 5 steps, under the substep cap
        assert_eq!(stepper.advance(10.0, 1.0), 5);
        assert_eq!(stepper.advance(0.0, 1.0), 0);
    }

    #[test]
    fn test_body_grounded_on_floor() {
        let world = SimWorld::flat(0.0);
        let mut body = SimBody::standing_on(0.0);
        let mut motor = LocomotionController::new(MotorConfig::default());
        let input = mapper(&ScriptedInput::new());

        let first = tick(&mut motor, Some(&input), &mut body, &world, FIXED_DT);
        assert!(first.landed);
        for _ in 0..20 {
            tick(&mut motor, Some(&input), &mut body, &world, FIXED_DT);
        }
        assert_eq!(motor.state(), LocomotionState::Grounded);
        assert!((body.position.y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_jump_and_land() {
        let world = SimWorld::flat(0.0);
        let mut body = SimBody::standing_on(0.0).with_mass(10.0);
        let mut motor = LocomotionController::new(MotorConfig::default());
        let mut source = ScriptedInput::new();

        tick(&mut motor, Some(&mapper(&source)), &mut body, &world, FIXED_DT);

        source.press(Key::Space);
        let pressed = mapper(&source);
        motor.on_frame(Some(&pressed), &mut body, FIXED_DT);
        let outcome = tick(&mut motor, Some(&pressed), &mut body, &world, FIXED_DT);
        assert!(outcome.jumped);

        source.begin_frame();
        let held = mapper(&source);
        let mut landed = false;
        let mut peak: f32 = 0.0;
        for _ in 0..200 {
            let outcome = tick(&mut motor, Some(&held), &mut body, &world, FIXED_DT);
            peak = peak.max(body.position.y);
            assert!(!outcome.jumped);
            if outcome.landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(peak > 2.0);
        assert!(!motor.is_jumping());
    }

    #[test]
    fn test_walk_off_ledge_sticks_and_lands() {
        // Ledge ends at z = -1, lower floor 0.3 below
        let mut world = SimWorld::new(vec![
            Surface::flat(0.0).bounded(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 10.0)),
        ]);
        world.add(Surface::flat(-0.3));

        let mut body = SimBody::standing_on(0.0).with_mass(10.0);
        let mut motor = LocomotionController::new(MotorConfig::default());
        let mut source = ScriptedInput::new();
        source.press(Key::W);
        let walking = mapper(&source);

        let mut stuck = false;
        let mut landed_below = false;
        for _ in 0..300 {
            let outcome = tick(&mut motor, Some(&walking), &mut body, &world, FIXED_DT);
            stuck |= outcome.stuck_to_ground;
            if outcome.landed && body.position.y < 0.9 {
                landed_below = true;
                break;
            }
        }
        assert!(stuck);
        assert!(landed_below);
        assert!(!motor.is_jumping());
    }

    #[test]
    fn test_turning_keeps_momentum_in_sim() {
        let mut body = SimBody::standing_on(0.0);
        body.velocity = Vec3::new(0.0, 0.0, -5.0);
        let mut motor = LocomotionController::new(MotorConfig::default());

        motor.rotate_view(Vec2::new(90.0, 0.0), &mut body);
        assert!(body.velocity.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-4));
        assert!((body.body_rotation * Vec3::NEG_Z).abs_diff_eq(Vec3::X, 1e-5));
    }
}
