//! Player input
//!
//! Keyboard and pointer events become [`Intent`]s; [`InputState`] holds the
//! latest one and hands the simulation a single [`TickInput`] snapshot per tick.

pub mod autopilot;

pub use autopilot::Autopilot;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    #[default]
    Stop,
}

impl Intent {
    /// Signed horizontal speed for this intent
    pub fn speed(self, move_speed: f32) -> f32 {
        match self {
            Intent::MoveLeft => -move_speed,
            Intent::MoveRight => move_speed,
            Intent::Stop => 0.0,
        }
    }
}

pub fn key_down(key: Key) -> Option<Intent> {
    match key {
        Key::ArrowLeft => Some(Intent::MoveLeft),
        Key::ArrowRight => Some(Intent::MoveRight),
        Key::Other => None,
    }
}

/// Releasing either arrow stops, even if the other one is still held
pub fn key_up(key: Key) -> Option<Intent> {
    match key {
        Key::ArrowLeft | Key::ArrowRight => Some(Intent::Stop),
        Key::Other => None,
    }
}

/// Press on the left half moves left, anywhere else moves right
pub fn pointer_down(x: f32, screen_width: f32) -> Intent {
    if x < screen_width / 2.0 {
        Intent::MoveLeft
    } else {
        Intent::MoveRight
    }
}

pub fn pointer_up() -> Intent {
    Intent::Stop
}

/// Latest movement intent, written by event handlers between ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    intent: Intent,
}

impl InputState {
    pub fn apply(&mut self, intent: Intent) {
        self.intent = intent;
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn reset(&mut self) {
        self.intent = Intent::Stop;
    }

    /// Snapshot for the next tick
    pub fn snapshot(&self, move_speed: f32) -> TickInput {
        TickInput::moving(self.intent.speed(move_speed))
    }
}
