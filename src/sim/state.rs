//! World state and core simulation types
//!
//! Everything one run needs lives in [`World`]; the loop passes it explicitly
//! to physics and recycling instead of keeping module-level state.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generator::PlatformGenerator;
use crate::tuning::{Tuning, Viewport};

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    /// Run ended (hazard or fall-out); only a reset leaves this state
    GameOver,
}

/// The player sprite (top-left anchored box)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Player {
    /// Centered horizontally near the bottom, already moving up
    pub fn spawn(viewport: &Viewport, tuning: &Tuning) -> Self {
        let size = Vec2::splat(tuning.player_size);
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - size.x / 2.0,
                viewport.height - tuning.player_spawn_offset,
            ),
            size,
            vel: Vec2::new(0.0, tuning.bounce_velocity),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A horizontal platform (landing surface is its top edge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Spawn index, unique within a run
    pub id: u64,
    pub pos: Vec2,
    pub width: f32,
    pub hazard: bool,
    /// Horizontal drift per tick (0 = static)
    pub speed: f32,
}

impl Platform {
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn is_static(&self) -> bool {
        self.speed == 0.0
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Bounced { platform: u64 },
    HitHazard { platform: u64 },
    FellOut,
    Scrolled { dy: f32 },
    Recycled { dropped: usize, spawned: usize },
}

/// Per-run counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Completed simulation ticks
    pub ticks: u64,
    /// Platforms ever generated (initial layout included)
    pub spawned: u64,
    /// Platforms dropped after scrolling off the bottom
    pub dropped: u64,
    /// Total distance the world scrolled down
    pub climbed: f32,
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub player: Player,
    /// Initial layout is bottom-first; replacements are pushed to the front
    pub platforms: VecDeque<Platform>,
    pub run_state: RunState,
    pub stats: RunStats,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl World {
    /// Fresh player plus a full platform layout drawn from `generator`.
    ///
    /// `viewport` and `tuning` must already be validated; [`crate::LoopDriver`]
    /// checks both before building a world.
    pub fn new<R: Rng>(
        viewport: Viewport,
        tuning: Tuning,
        generator: &mut PlatformGenerator<R>,
    ) -> Self {
        debug_assert!(viewport.validate().is_ok(), "invalid viewport {viewport:?}");
        debug_assert!(tuning.validate().is_ok(), "invalid tuning {tuning:?}");
        let count = tuning.platform_count;
        let spacing = viewport.spacing(count);

        let platforms: VecDeque<Platform> = (0..count)
            .map(|i| generator.generate(viewport.height - i as f32 * spacing, i as u64, spacing))
            .collect();

        Self {
            player: Player::spawn(&viewport, &tuning),
            platforms,
            run_state: RunState::Running,
            stats: RunStats {
                spawned: count as u64,
                ..Default::default()
            },
            events: Vec::new(),
            viewport,
            tuning,
        }
    }

    pub fn is_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    pub fn target_platform_count(&self) -> usize {
        self.tuning.platform_count
    }

    pub fn spacing(&self) -> f32 {
        self.viewport.spacing(self.tuning.platform_count)
    }

    pub fn scroll_line(&self) -> f32 {
        self.viewport.scroll_line(self.tuning.scroll_threshold)
    }

    /// Right-most x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        (self.viewport.width - self.player.size.x).max(0.0)
    }

    /// Highest platform on screen (smallest y)
    pub fn topmost(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }

    /// End the run; later calls keep the first cause
    pub fn end_run(&mut self, cause: GameEvent) {
        if self.run_state == RunState::Running {
            log::info!(
                "Run over after {} ticks ({:?}), climbed {:.0}",
                self.stats.ticks,
                cause,
                self.stats.climbed
            );
            self.run_state = RunState::GameOver;
        }
        self.events.push(cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(seed: u64) -> World {
        let viewport = Viewport::new(400.0, 800.0).unwrap();
        let tuning = Tuning::default();
        let mut generator = PlatformGenerator::seeded(seed, &viewport, &tuning);
        World::new(viewport, tuning, &mut generator)
    }

    #[test]
    fn test_initial_layout() {
        let world = world(7);
        assert_eq!(world.platforms.len(), 7);
        assert_eq!(world.stats.spawned, 7);
        assert_eq!(world.run_state, RunState::Running);

        let spacing = 800.0 / 7.0;
        let jitter = spacing * 0.3 + 0.001;
        for (i, platform) in world.platforms.iter().enumerate() {
            let anchor = 800.0 - i as f32 * spacing;
            assert!((platform.pos.y - anchor).abs() <= jitter);
            assert_eq!(platform.id, i as u64);
        }
        assert!(world.platforms[0].is_static());
    }

    #[test]
    fn test_player_spawn() {
        let world = world(1);
        assert_eq!(world.player.pos, Vec2::new(185.0, 740.0));
        assert_eq!(world.player.vel, Vec2::new(0.0, -15.0));
        assert_eq!(world.player.bottom(), 770.0);
    }

    #[test]
    fn test_topmost_is_last_generated() {
        let world = world(3);
        let top = world.topmost().unwrap();
        assert_eq!(top.id, 6);
    }

    #[test]
    fn test_end_run_is_one_way() {
        let mut world = world(2);
        world.end_run(GameEvent::FellOut);
        assert!(world.is_over());
        world.end_run(GameEvent::HitHazard { platform: 3 });
        assert!(world.is_over());
        assert_eq!(world.events.len(), 2);
    }
}
