//! Idle/demo mode
//!
//! Steers the player toward the nearest safe platform below its feet, leading
//! drifting platforms by a rough time-to-fall estimate. Produces the same
//! [`Intent`]s a human would, so the loop cannot tell the difference.

use super::Intent;
use crate::sim::{Platform, World};

/// Cap on how far ahead drift is extrapolated (ticks)
const MAX_LEAD_TICKS: f32 = 30.0;

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Fraction of platform width treated as "close enough"
    pub deadzone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { deadzone: 0.25 }
    }
}

impl Autopilot {
    /// Platform the autopilot is aiming for, if any safe one exists
    pub fn target<'a>(&self, world: &'a World) -> Option<&'a Platform> {
        let feet = world.player.bottom();

        let below = world
            .platforms
            .iter()
            .filter(|p| !p.hazard && p.pos.y >= feet)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        below.or_else(|| {
            world
                .platforms
                .iter()
                .filter(|p| !p.hazard)
                .min_by(|a, b| (a.pos.y - feet).abs().total_cmp(&(b.pos.y - feet).abs()))
        })
    }

    pub fn decide(&self, world: &World) -> Intent {
        let Some(target) = self.target(world) else {
            return Intent::Stop;
        };

        let player = &world.player;
        let fall_speed = player.vel.y.max(1.0);
        let lead = ((target.pos.y - player.bottom()).max(0.0) / fall_speed).min(MAX_LEAD_TICKS);
        let target_center = target.pos.x + target.width / 2.0 + target.speed * lead;
        let player_center = player.pos.x + player.size.x / 2.0;

        let dx = target_center - player_center;
        if dx.abs() <= target.width * self.deadzone {
            Intent::Stop
        } else if dx > 0.0 {
            Intent::MoveRight
        } else {
            Intent::MoveLeft
        }
    }
}
