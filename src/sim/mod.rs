//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (one call = one frame of motion)
//! - Injected RNG only
//! - Stable platform order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod scroll;
pub mod state;
pub mod tick;

pub use collision::{clamp_to_screen, drift, lands_on, overlaps_horizontally};
pub use generator::PlatformGenerator;
pub use scroll::{RecycleReport, recycle};
pub use state::{GameEvent, Platform, Player, RunState, RunStats, World};
pub use tick::{TickInput, tick};
