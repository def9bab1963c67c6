//! Sky Hop - An endless vertical platform jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, landings, scrolling, platform stream)
//! - `driver`: Per-frame loop sequencing and run lifecycle
//! - `input`: Keyboard/pointer intents and the autopilot
//! - `renderer`: WebGPU rendering of the world as rectangles
//! - `tuning`: Data-driven gameplay constants and viewport validation

pub mod driver;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{DriverState, Host, LoopDriver};
pub use error::{Error, Result};
pub use tuning::{Tuning, Viewport};

/// Game configuration defaults (overridable through [`Tuning`])
pub mod consts {
    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity set on every safe landing (negative = up)
    pub const BOUNCE_VELOCITY: f32 = -15.0;
    /// Horizontal speed while a move intent is held
    pub const MOVE_SPEED: f32 = 5.0;

    /// Player square size
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Player spawn height above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 60.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const PLATFORM_THICKNESS: f32 = 10.0;
    pub const PLATFORM_COUNT: usize = 7;
    pub const HAZARD_CHANCE: f64 = 0.2;
    pub const DRIFT_MIN: f32 = 1.0;
    pub const DRIFT_MAX: f32 = 3.0;
    /// Vertical jitter as a fraction of platform spacing (applied ±)
    pub const JITTER_FRACTION: f32 = 0.3;

    /// Fraction of screen height above which the world scrolls instead of the player
    pub const SCROLL_THRESHOLD: f32 = 0.4;
}
