//! Landing detection and wall handling for axis-aligned boxes
//!
//! The landing test is swept over one tick of fall: the player's bottom edge
//! must lie between the platform's top edge and that edge plus this tick's
//! vertical displacement. It is approximate, not continuous collision.

use super::state::{Platform, Player};

/// Horizontal extents of player and platform overlap (open interval)
#[inline]
pub fn overlaps_horizontally(player: &Player, platform: &Platform) -> bool {
    player.right() > platform.pos.x && player.pos.x < platform.right()
}

/// Whether a descending player lands on `platform` this tick.
///
/// `player` is the post-integration state; `player.vel.y` is this tick's
/// vertical displacement.
pub fn lands_on(player: &Player, platform: &Platform) -> bool {
    let fall = player.vel.y;
    if fall <= 0.0 {
        return false;
    }
    let bottom = player.bottom();
    bottom >= platform.pos.y
        && bottom <= platform.pos.y + fall
        && overlaps_horizontally(player, platform)
}

/// Clamp the player inside `[0, max_x]`; velocity is left alone
#[inline]
pub fn clamp_to_screen(player: &mut Player, max_x: f32) {
    player.pos.x = player.pos.x.clamp(0.0, max_x);
}

/// Move a platform by its drift and reflect it off the side walls.
///
/// Returns true if the drift direction flipped this tick.
pub fn drift(platform: &mut Platform, screen_width: f32) -> bool {
    platform.pos.x += platform.speed;
    if platform.pos.x <= 0.0 || platform.right() >= screen_width {
        platform.speed = -platform.speed;
        return platform.speed != 0.0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player(x: f32, y: f32, vy: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            size: Vec2::splat(30.0),
            vel: Vec2::new(0.0, vy),
        }
    }

    fn platform(x: f32, y: f32, speed: f32) -> Platform {
        Platform {
            id: 1,
            pos: Vec2::new(x, y),
            width: 80.0,
            hazard: false,
            speed,
        }
    }

    #[test]
    fn test_lands_within_sweep() {
        // Bottom at 505, platform top at 500, fell 8 this tick
        assert!(lands_on(&player(100.0, 475.0, 8.0), &platform(90.0, 500.0, 0.0)));
        // Bottom exactly on the top edge
        assert!(lands_on(&player(100.0, 470.0, 8.0), &platform(90.0, 500.0, 0.0)));
        // Bottom exactly at the far end of the sweep
        assert!(lands_on(&player(100.0, 478.0, 8.0), &platform(90.0, 500.0, 0.0)));
    }

    #[test]
    fn test_misses_outside_sweep() {
        // Still above the platform
        assert!(!lands_on(&player(100.0, 460.0, 8.0), &platform(90.0, 500.0, 0.0)));
        // Already too far below it
        assert!(!lands_on(&player(100.0, 480.0, 8.0), &platform(90.0, 500.0, 0.0)));
    }

    #[test]
    fn test_no_landing_while_rising() {
        assert!(!lands_on(&player(100.0, 475.0, -8.0), &platform(90.0, 500.0, 0.0)));
        assert!(!lands_on(&player(100.0, 470.0, 0.0), &platform(90.0, 500.0, 0.0)));
    }

    #[test]
    fn test_horizontal_overlap_is_open() {
        // Player right edge touching platform left edge is not an overlap
        assert!(!lands_on(&player(60.0, 475.0, 8.0), &platform(90.0, 500.0, 0.0)));
        // Player left edge touching platform right edge
        assert!(!lands_on(&player(170.0, 475.0, 8.0), &platform(90.0, 500.0, 0.0)));
        // One unit of overlap is enough
        assert!(lands_on(&player(61.0, 475.0, 8.0), &platform(90.0, 500.0, 0.0)));
    }

    #[test]
    fn test_fast_fall_still_lands() {
        // 40 units of fall in one tick on a thin platform
        assert!(lands_on(&player(100.0, 495.0, 40.0), &platform(90.0, 500.0, 0.0)));
    }

    #[test]
    fn test_clamp_keeps_velocity() {
        let mut p = player(-12.0, 100.0, 0.0);
        p.vel.x = -5.0;
        clamp_to_screen(&mut p, 370.0);
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.vel.x, -5.0);

        p.pos.x = 400.0;
        clamp_to_screen(&mut p, 370.0);
        assert_eq!(p.pos.x, 370.0);
    }

    #[test]
    fn test_drift_reflects_on_exact_edge() {
        // Lands exactly on the left wall
        let mut p = platform(2.0, 100.0, -2.0);
        assert!(drift(&mut p, 400.0));
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.speed, 2.0);

        // Lands exactly on the right wall (400 - 80)
        let mut p = platform(317.0, 100.0, 3.0);
        assert!(drift(&mut p, 400.0));
        assert_eq!(p.pos.x, 320.0);
        assert_eq!(p.speed, -3.0);
    }

    #[test]
    fn test_drift_in_open_space() {
        let mut p = platform(100.0, 100.0, 1.5);
        assert!(!drift(&mut p, 400.0));
        assert_eq!(p.pos.x, 101.5);
        assert_eq!(p.speed, 1.5);
    }

    #[test]
    fn test_static_platform_never_moves() {
        let mut p = platform(0.0, 100.0, 0.0);
        assert!(!drift(&mut p, 400.0));
        assert_eq!(p.pos.x, 0.0);
    }
}
