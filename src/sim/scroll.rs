//! Camera scroll and platform recycling
//!
//! The player never climbs above the scroll line; instead the world moves down
//! by the overshoot. Platforms pushed off the bottom are dropped and new ones
//! are generated above the top-most survivor, so the active count never
//! changes.

use rand::Rng;

use super::generator::PlatformGenerator;
use super::state::{GameEvent, World};

/// What a single recycle pass did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecycleReport {
    /// Distance the world scrolled down (0 = no scroll)
    pub dy: f32,
    pub dropped: usize,
    pub spawned: usize,
}

/// Scroll the world if the player is above the scroll line and refill platforms
pub fn recycle<R: Rng>(world: &mut World, generator: &mut PlatformGenerator<R>) -> RecycleReport {
    let mut report = RecycleReport::default();
    if world.is_over() {
        return report;
    }

    let line = world.scroll_line();
    if world.player.pos.y >= line {
        return report;
    }

    let dy = line - world.player.pos.y;
    world.player.pos.y = line;
    for platform in &mut world.platforms {
        platform.pos.y += dy;
    }
    report.dy = dy;

    let height = world.viewport.height;
    let before = world.platforms.len();
    world.platforms.retain(|p| p.pos.y < height);
    report.dropped = before - world.platforms.len();

    let spacing = world.spacing();
    while world.platforms.len() < world.target_platform_count() {
        // Nothing left to stack on: restart from the lowest visible slot
        let anchor = world
            .topmost()
            .map_or(height - spacing, |top| top.pos.y - spacing);
        let platform = generator.generate(anchor, world.stats.spawned, spacing);
        world.platforms.push_front(platform);
        world.stats.spawned += 1;
        report.spawned += 1;
    }

    world.stats.dropped += report.dropped as u64;
    world.stats.climbed += dy;
    world.events.push(GameEvent::Scrolled { dy });
    if report.spawned > 0 || report.dropped > 0 {
        log::debug!(
            "Recycled {} platforms (scrolled {:.1}, {} spawned total)",
            report.dropped,
            dy,
            world.stats.spawned
        );
        world.events.push(GameEvent::Recycled {
            dropped: report.dropped,
            spawned: report.spawned,
        });
    }

    report
}
