//! Smooth Moves entry point
//!
//! Runs a scripted, headless session of the motor on the reference host and
//! logs what the character does. Set `RUST_LOG=debug` to see jumps, landings
//! and ground-stick corrections.
//!
//! Usage: `smooth-moves [preset] [settings.json]`

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use smooth_moves::consts::FIXED_DT;
use smooth_moves::input::{InputMapper, ScriptedInput};
use smooth_moves::motor::LocomotionController;
use smooth_moves::session::{FrameRateCounter, PauseState};
use smooth_moves::settings::{MotionPreset, Settings};
use smooth_moves::sim::{FixedStepper, SimBody, SimWorld, Surface, tick};

/// Visual frame rate the script is played at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Script length (seconds)
const SESSION_SECS: f32 = 10.0;

/// Demo instance holding all state
struct Game {
    settings: Settings,
    mapper: InputMapper,
    motor: LocomotionController,
    body: SimBody,
    world: SimWorld,
    stepper: FixedStepper,
    pause: PauseState,
    fps: FrameRateCounter,
    device: ScriptedInput,
    rng: Pcg32,
    time: f32,
    steps: u64,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Self {
        let body = SimBody {
            position: Vec3::new(0.0, 0.9, 0.0),
            radius: 0.4,
            height: 1.8,
            ..Default::default()
        }
        .with_mass(10.0);

        let motor = LocomotionController::from_transform(settings.motor.clone(), &body);

        Self {
            mapper: InputMapper::new(settings.input.bindings.clone(), settings.input.aim_sensitivity),
            motor,
            body,
            world: build_level(),
            stepper: FixedStepper::new(),
            pause: PauseState::default(),
            fps: FrameRateCounter::default(),
            device: ScriptedInput::new(),
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            steps: 0,
            settings,
        }
    }

    /// Feed the scripted device for the frame starting at `self.time`
    fn script(&mut self) {
        let t = self.time;
        let bindings = self.settings.input.bindings.clone();
        self.device.begin_frame();

        // Walk forward, turn right, jump, then walk off the ledge
        if (0.5..2.0).contains(&t) || (3.5..6.0).contains(&t) {
            self.device.press(bindings.forward);
        } else {
            self.device.release(bindings.forward);
        }
        if (2.0..2.5).contains(&t) {
            self.device.move_pointer(Vec2::new(3.0, 0.0));
        }
        if crosses(t, 3.0) {
            self.device.press(bindings.jump);
        }
        if crosses(t, 3.2) {
            self.device.release(bindings.jump);
        }
        if (6.0..6.6).contains(&t) {
            self.device.press(bindings.strafe_right);
        } else {
            self.device.release(bindings.strafe_right);
        }

        // Pause and resume
        if crosses(t, 7.0) || crosses(t, 7.5) {
            self.device.press(bindings.pause);
        }
        if crosses(t, 7.1) || crosses(t, 7.6) {
            self.device.release(bindings.pause);
        }

        // Hand tremor on the pointer
        let jitter = Vec2::new(
            self.rng.random_range(-0.05..0.05),
            self.rng.random_range(-0.05..0.05),
        );
        self.device.move_pointer(jitter);
    }

    /// Run one visual frame and whatever fixed steps it owes
    fn update(&mut self, frame_dt: f32) {
        self.script();

        self.pause.update(&self.device, &self.settings.input.bindings);
        self.mapper.update(&self.device, self.pause.captured());

        if !self.pause.is_paused() {
            self.motor.on_frame(Some(&self.mapper), &mut self.body, frame_dt);
        }

        let substeps = self.stepper.advance(frame_dt, self.pause.time_scale());
        for _ in 0..substeps {
            let outcome = tick(
                &mut self.motor,
                Some(&self.mapper),
                &mut self.body,
                &self.world,
                FIXED_DT,
            );
            self.steps += 1;
            if outcome.jumped {
                log::info!("t={:.2}s jumped", self.time);
            }
            if outcome.stuck_to_ground {
                log::info!("t={:.2}s stuck to ground at {:?}", self.time, self.body.position);
            }
        }

        if self.fps.frame(frame_dt).is_some() && self.settings.show_fps {
            log::debug!("{}", self.fps.display());
        }

        let second = self.time.floor();
        self.time += frame_dt;
        if self.time.floor() > second {
            self.report();
        }
    }

    fn report(&self) {
        let p = self.body.position;
        log::info!(
            "t={:.0}s {:?} pos=({:.2}, {:.2}, {:.2}) speed={:.2} yaw={:.1} pitch={:.1}{}",
            self.time,
            self.motor.state(),
            p.x,
            p.y,
            p.z,
            self.body.planar_speed(),
            self.motor.orientation().yaw().to_degrees(),
            self.motor.orientation().pitch_degrees(),
            if self.pause.is_paused() { " [paused]" } else { "" }
        );
    }
}

/// True on the frame whose span contains `mark`
fn crosses(t: f32, mark: f32) -> bool {
    t <= mark && mark < t + FRAME_DT
}

/// Start platform with a drop to a lower floor, a shallow ramp and a trigger pad
fn build_level() -> SimWorld {
    let mut world = SimWorld::new(vec![
        Surface::flat(0.0).bounded(Vec2::new(-20.0, -20.0), Vec2::new(20.0, 20.0)),
        Surface::flat(-0.25),
        Surface::ramp(Vec3::new(0.0, -0.25, -30.0), 10.0)
            .bounded(Vec2::new(-5.0, -40.0), Vec2::new(5.0, -30.0)),
    ]);
    // Checkpoint volume above the start, must not count as ground
    world.add(
        Surface::flat(0.05)
            .bounded(Vec2::new(-1.0, -6.0), Vec2::new(1.0, -4.0))
            .as_trigger(),
    );
    world
}

/// Resolve `[preset] [settings.json]`.
///
/// A settings file keeps its own motor tunables; the preset only picks the
/// tunables when no file is given.
fn settings_from_args(args: &[String]) -> Settings {
    let preset = args.first().map(|name| (name, MotionPreset::from_str(name)));

    if let Some(path) = args.get(1) {
        let settings = Settings::load_or_default(path);
        if let Some((name, _)) = preset {
            log::warn!(
                "Ignoring preset '{}': motor tunables come from {} ({})",
                name,
                path,
                settings.preset.as_str()
            );
        }
        return settings;
    }

    let mut settings = Settings::default();
    match preset {
        Some((_, Some(preset))) => settings.apply_preset(preset),
        Some((name, None)) => log::warn!("Unknown preset '{}', using {}", name, settings.preset.as_str()),
        None => {}
    }
    settings
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = settings_from_args(&args);

    log::info!("Smooth Moves (headless) starting, preset {}", settings.preset.as_str());
    if settings.show_key_legend {
        for line in settings.input.bindings.legend() {
            log::info!("{}", line);
        }
    }

    let mut game = Game::new(settings, 0x5EED);
    let frames = (SESSION_SECS / FRAME_DT) as u32;
    for _ in 0..frames {
        game.update(FRAME_DT);
    }

    log::info!(
        "Done: {} fixed steps, final state {:?}",
        game.steps,
        game.motor.state()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use smooth_moves::motor::MotorConfig;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_preset_without_file() {
        assert_eq!(settings_from_args(&args(&[])), Settings::default());

        let settings = settings_from_args(&args(&["heavy"]));
        assert_eq!(settings.preset, MotionPreset::Heavy);
        assert_eq!(settings.motor, MotorConfig::heavy());

        let settings = settings_from_args(&args(&["floaty"]));
        assert_eq!(settings.motor, MotorConfig::default());
    }

    #[test]
    fn test_settings_file_keeps_its_tunables() {
        let path = std::env::temp_dir().join(format!("smooth_moves_args_{}.json", std::process::id()));
        let mut saved = Settings::from_preset(MotionPreset::Heavy);
        saved.motor.max_speed = 7.5;
        saved.save(&path).unwrap();

        let loaded = settings_from_args(&args(&["arcade", path.to_str().unwrap()]));
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, saved);
        assert_eq!(loaded.motor.max_speed, 7.5);
    }
}
