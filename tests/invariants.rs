//! Whole-run invariants checked over random seeds and input sequences

use glam::Vec2;
use proptest::prelude::*;

use sky_hop::sim::{
    GameEvent, Platform, PlatformGenerator, RunState, TickInput, World, drift, recycle, tick,
};
use sky_hop::{Tuning, Viewport};

fn new_run(seed: u64, width: f32, height: f32, tuning: Tuning) -> (World, PlatformGenerator) {
    let viewport = Viewport::new(width, height).unwrap();
    let mut generator = PlatformGenerator::seeded(seed, &viewport, &tuning);
    let world = World::new(viewport, tuning, &mut generator);
    (world, generator)
}

/// Every platform sits within `[-spacing, height)`
fn platforms_in_range(world: &World) -> bool {
    let spacing = world.spacing();
    let height = world.viewport.height;
    world
        .platforms
        .iter()
        .all(|p| p.pos.y >= -spacing && p.pos.y < height)
}

proptest! {
    #[test]
    fn player_stays_on_screen_and_count_holds(
        seed in any::<u64>(),
        width in 200.0f32..1200.0,
        height in 400.0f32..1400.0,
        moves in prop::collection::vec(-1i8..=1, 1..600),
    ) {
        let (mut world, mut generator) = new_run(seed, width, height, Tuning::default());
        let max_x = width - world.player.size.x;
        prop_assert!(platforms_in_range(&world));

        for m in moves {
            tick(&mut world, &TickInput::moving(m as f32 * 5.0));
            prop_assert!(world.player.pos.x >= 0.0 && world.player.pos.x <= max_x);

            recycle(&mut world, &mut generator);
            prop_assert_eq!(world.platforms.len(), 7);
            prop_assert!(platforms_in_range(&world));
            prop_assert_eq!(
                world.stats.spawned,
                world.stats.dropped + world.platforms.len() as u64
            );
            if world.is_over() {
                break;
            }
        }
    }

    #[test]
    fn endless_climb_keeps_platform_count(seed in any::<u64>(), climbs in 1usize..200) {
        // Force a scroll every tick by keeping the player above the line
        let (mut world, mut generator) = new_run(seed, 400.0, 800.0, Tuning::default());
        for _ in 0..climbs {
            world.player.pos.y = world.scroll_line() - 40.0;
            recycle(&mut world, &mut generator);
            prop_assert_eq!(world.platforms.len(), 7);
            prop_assert!(platforms_in_range(&world));
            prop_assert_eq!(world.player.pos.y, world.scroll_line());
        }
        prop_assert_eq!(world.stats.spawned, world.stats.dropped + 7);
    }

    #[test]
    fn uneven_climb_keeps_platforms_in_range(
        seed in any::<u64>(),
        overshoots in prop::collection::vec(1.0f32..400.0, 1..300),
    ) {
        // Jitter compounds across refills when each new platform anchors on
        // the previous one; the range must hold regardless of scroll size
        let (mut world, mut generator) = new_run(seed, 400.0, 800.0, Tuning::default());
        for overshoot in overshoots {
            world.player.pos.y = world.scroll_line() - overshoot;
            recycle(&mut world, &mut generator);
            prop_assert_eq!(world.platforms.len(), 7);
            prop_assert!(platforms_in_range(&world));
        }
    }

    #[test]
    fn bounce_is_constant(incoming in 0.1f32..40.0, depth in 0.01f32..0.99) {
        let (mut world, _) = new_run(1, 400.0, 800.0, Tuning::default());
        world.platforms = vec![Platform {
            id: 1,
            pos: Vec2::new(90.0, 500.0),
            width: 80.0,
            hazard: false,
            speed: 0.0,
        }]
        .into();

        // After integration the bottom edge sits `depth` of the way into the sweep
        let fall = incoming + world.tuning.gravity;
        world.player.pos = Vec2::new(100.0, 500.0 - world.player.size.y - fall + depth * fall);
        world.player.vel = Vec2::new(0.0, incoming);

        tick(&mut world, &TickInput::default());
        prop_assert_eq!(world.player.vel.y, world.tuning.bounce_velocity);
        prop_assert_eq!(world.run_state, RunState::Running);
    }

    #[test]
    fn drift_overshoots_at_most_one_step(
        x in 0.0f32..320.0,
        speed in 1.0f32..3.0,
        left in any::<bool>(),
        ticks in 1usize..500,
    ) {
        let mut platform = Platform {
            id: 1,
            pos: Vec2::new(x, 0.0),
            width: 80.0,
            hazard: false,
            speed: if left { -speed } else { speed },
        };
        for _ in 0..ticks {
            drift(&mut platform, 400.0);
            prop_assert!(platform.pos.x >= -speed - 0.001);
            prop_assert!(platform.right() <= 400.0 + speed + 0.001);
            prop_assert_eq!(platform.speed.abs(), speed);
        }
    }
}

#[test]
fn initial_layout_for_tall_screen() {
    let (world, _) = new_run(2024, 400.0, 800.0, Tuning::default());
    let spacing = world.spacing();
    assert!((spacing - 114.2857).abs() < 0.001);

    let bottom = &world.platforms[0];
    assert_eq!(bottom.speed, 0.0);
    assert!((bottom.pos.y - 800.0).abs() <= spacing * 0.3 + 0.001);
    assert!(bottom.pos.y <= 790.0);
    assert!(platforms_in_range(&world));
    assert!(world.platforms.iter().skip(1).all(|p| p.speed != 0.0));
}

#[test]
fn starting_platform_is_static_for_every_seed() {
    for seed in 0..200 {
        let (world, _) = new_run(seed, 400.0, 800.0, Tuning::default());
        assert_eq!(world.platforms[0].speed, 0.0, "seed {seed}");
    }
}

#[test]
fn falling_without_platforms_ends_run() {
    let (mut world, mut generator) = new_run(5, 400.0, 800.0, Tuning::default());
    world.platforms.clear();

    let mut ticks = 0;
    while !world.is_over() {
        tick(&mut world, &TickInput::default());
        recycle(&mut world, &mut generator);
        ticks += 1;
        assert!(ticks < 200);
    }
    assert!(world.player.pos.y > 800.0);
    assert_eq!(world.events, vec![GameEvent::FellOut]);
}
