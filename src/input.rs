//! Player input mapping
//!
//! Converts raw key and pointer state from the host into the frame-local
//! move/aim vectors consumed by the locomotion controller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical keys the mapper can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
}

impl Key {
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::W => "W",
            Key::A => "A",
            Key::S => "S",
            Key::D => "D",
            Key::Up => "UpArrow",
            Key::Down => "DownArrow",
            Key::Left => "LeftArrow",
            Key::Right => "RightArrow",
            Key::Space => "Space",
            Key::Escape => "Escape",
        }
    }
}

/// Host device state queried once per visual frame
pub trait InputSource {
    /// Key is currently held
    fn is_key_down(&self, key: Key) -> bool;
    /// Key went down during this frame
    fn was_key_pressed(&self, key: Key) -> bool;
    /// Key went up during this frame
    fn was_key_released(&self, key: Key) -> bool;
    /// Raw pointer movement since the previous frame
    fn pointer_delta(&self) -> Vec2;
}

/// Key assignments for movement, jump and pause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub strafe_left: Key,
    pub strafe_right: Key,
    pub jump: Key,
    pub pause: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            strafe_left: Key::A,
            strafe_right: Key::D,
            jump: Key::Space,
            pause: Key::Escape,
        }
    }
}

impl KeyBindings {
    /// Human-readable key legend, one binding per line
    pub fn legend(&self) -> Vec<String> {
        vec![
            "INPUT KEYS".to_string(),
            format!("Menu: {}", self.pause.as_str()),
            format!("Forward: {}", self.forward.as_str()),
            format!("Backward: {}", self.backward.as_str()),
            format!("Strafe Left: {}", self.strafe_left.as_str()),
            format!("Strafe Right: {}", self.strafe_right.as_str()),
            format!("Jump: {}", self.jump.as_str()),
        ]
    }
}

/// Frame-local input snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// (right - left, forward - backward), each component in {-1, 0, 1}
    pub move_dir: Vec2,
    /// Pointer delta scaled by sensitivity (degrees), zero when not captured
    pub aim: Vec2,
    /// Jump key went down this frame
    pub jump_pressed: bool,
}

impl InputState {
    pub fn is_moving(&self) -> bool {
        self.move_dir.length_squared() > f32::EPSILON
    }

    pub fn is_aiming(&self) -> bool {
        self.aim.length_squared() > f32::EPSILON
    }
}

/// Centralized place that turns device state into movement intent
#[derive(Debug, Clone)]
pub struct InputMapper {
    pub bindings: KeyBindings,
    pub aim_sensitivity: f32,
    state: InputState,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(KeyBindings::default(), 1.0)
    }
}

impl InputMapper {
    pub fn new(bindings: KeyBindings, aim_sensitivity: f32) -> Self {
        Self {
            bindings,
            aim_sensitivity,
            state: InputState::default(),
        }
    }

    /// Refresh the snapshot for this visual frame
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &S, captured: bool) {
        self.state = InputState {
            move_dir: self.poll_movement(source),
            aim: Self::poll_aim(source, self.aim_sensitivity, captured),
            jump_pressed: source.was_key_pressed(self.bindings.jump),
        };
    }

    /// Directional keys as (right - left, forward - backward)
    pub fn poll_movement<S: InputSource + ?Sized>(&self, source: &S) -> Vec2 {
        let axis = |pos: Key, neg: Key| {
            let mut v = 0.0;
            if source.is_key_down(pos) {
                v += 1.0;
            }
            if source.is_key_down(neg) {
                v -= 1.0;
            }
            v
        };
        Vec2::new(
            axis(self.bindings.strafe_right, self.bindings.strafe_left),
            axis(self.bindings.forward, self.bindings.backward),
        )
    }

    /// Pointer delta scaled by `sensitivity`, or zero when the cursor is free
    pub fn poll_aim<S: InputSource + ?Sized>(source: &S, sensitivity: f32, captured: bool) -> Vec2 {
        if !captured {
            return Vec2::ZERO;
        }
        source.pointer_delta() * sensitivity
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn move_dir(&self) -> Vec2 {
        self.state.move_dir
    }

    pub fn aim(&self) -> Vec2 {
        self.state.aim
    }

    pub fn is_moving(&self) -> bool {
        self.state.is_moving()
    }

    pub fn is_aiming(&self) -> bool {
        self.state.is_aiming()
    }

    pub fn jump_pressed(&self) -> bool {
        self.state.jump_pressed
    }
}

/// Input source backed by plain key sets, for scripted play and tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: Vec<Key>,
    pressed: Vec<Key>,
    released: Vec<Key>,
    pointer: Vec2,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: edge events and pointer delta are cleared
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.pointer = Vec2::ZERO;
    }

    pub fn press(&mut self, key: Key) {
        if !self.held.contains(&key) {
            self.held.push(key);
            self.pressed.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        if let Some(i) = self.held.iter().position(|k| *k == key) {
            self.held.remove(i);
            self.released.push(key);
        }
    }

    pub fn move_pointer(&mut self, delta: Vec2) {
        self.pointer += delta;
    }
}

impl InputSource for ScriptedInput {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn was_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn was_key_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    fn pointer_delta(&self) -> Vec2 {
        self.pointer
    }
}
