//! Per-tick physics
//!
//! Advances the player, resolves landings and moves drifting platforms. The
//! camera scroll runs separately afterwards (see [`super::scroll`]).

use super::collision::{clamp_to_screen, drift, lands_on};
use super::state::{GameEvent, World};

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Signed horizontal speed requested by the player (0 = idle)
    pub move_x: f32,
}

impl TickInput {
    pub fn moving(move_x: f32) -> Self {
        Self { move_x }
    }
}

/// Advance the world by one physics tick.
///
/// Does nothing once the run is over.
pub fn tick(world: &mut World, input: &TickInput) {
    world.events.clear();
    if world.is_over() {
        return;
    }
    world.stats.ticks += 1;

    let gravity = world.tuning.gravity;
    let bounce = world.tuning.bounce_velocity;
    let max_x = world.player_max_x();
    let screen_width = world.viewport.width;
    let screen_height = world.viewport.height;

    // Integrate
    let player = &mut world.player;
    player.vel.x = input.move_x;
    player.vel.y += gravity;
    player.pos.y += player.vel.y;
    player.pos.x += player.vel.x;
    clamp_to_screen(player, max_x);

    // Landings: every platform is tested, a hazard anywhere wins
    let mut safe_landing = None;
    let mut hazard_landing = None;
    for platform in &world.platforms {
        if lands_on(&world.player, platform) {
            if platform.hazard {
                hazard_landing.get_or_insert(platform.id);
            } else {
                safe_landing = Some(platform.id);
            }
        }
    }

    if let Some(platform) = hazard_landing {
        world.end_run(GameEvent::HitHazard { platform });
    } else if let Some(platform) = safe_landing {
        world.player.vel.y = bounce;
        world.events.push(GameEvent::Bounced { platform });
    }

    for platform in &mut world.platforms {
        drift(platform, screen_width);
    }

    if !world.is_over() && world.player.pos.y > screen_height {
        world.end_run(GameEvent::FellOut);
    }
}
