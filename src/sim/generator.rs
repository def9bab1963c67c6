//! Procedural platform stream
//!
//! Randomness comes from an injected [`Rng`]; runs use a seeded [`Pcg32`] so a
//! seed fully determines the layout.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Platform;
use crate::tuning::{Tuning, Viewport};

/// Draws new platforms around a vertical anchor
#[derive(Debug, Clone)]
pub struct PlatformGenerator<R = Pcg32> {
    rng: R,
    screen_width: f32,
    screen_height: f32,
    platform_width: f32,
    platform_thickness: f32,
    hazard_chance: f64,
    drift_min: f32,
    drift_max: f32,
    jitter_fraction: f32,
}

impl PlatformGenerator<Pcg32> {
    pub fn seeded(seed: u64, viewport: &Viewport, tuning: &Tuning) -> Self {
        Self::new(Pcg32::seed_from_u64(seed), viewport, tuning)
    }
}

impl<R: Rng> PlatformGenerator<R> {
    pub fn new(rng: R, viewport: &Viewport, tuning: &Tuning) -> Self {
        let mut generator = Self {
            rng,
            screen_width: 0.0,
            screen_height: 0.0,
            platform_width: 0.0,
            platform_thickness: 0.0,
            hazard_chance: 0.0,
            drift_min: 0.0,
            drift_max: 0.0,
            jitter_fraction: 0.0,
        };
        generator.configure(viewport, tuning);
        generator
    }

    /// Pick up new dimensions/tuning without disturbing the random stream
    pub fn configure(&mut self, viewport: &Viewport, tuning: &Tuning) {
        self.screen_width = viewport.width;
        self.screen_height = viewport.height;
        self.platform_width = tuning.platform_width;
        self.platform_thickness = tuning.platform_thickness;
        self.hazard_chance = tuning.hazard_chance;
        self.drift_min = tuning.drift_min;
        self.drift_max = tuning.drift_max;
        self.jitter_fraction = tuning.jitter_fraction;
    }

    /// Generate the platform with spawn index `index` near `anchor_y`.
    ///
    /// Index 0 is the starting platform and never drifts. The jittered y is
    /// kept within `[-spacing, screen_height - thickness]` so anchoring on an
    /// already jittered neighbour cannot walk a platform out of range.
    pub fn generate(&mut self, anchor_y: f32, index: u64, spacing: f32) -> Platform {
        let max_x = (self.screen_width - self.platform_width).max(0.0);
        let x = self.rng.random_range(0.0..=max_x);

        let jitter = spacing * self.jitter_fraction;
        let floor = -spacing;
        let ceiling = (self.screen_height - self.platform_thickness).max(floor);
        let y = (anchor_y + self.rng.random_range(-jitter..=jitter)).clamp(floor, ceiling);

        let hazard = self.rng.random_bool(self.hazard_chance);

        let speed = if index == 0 {
            0.0
        } else {
            let magnitude = self.rng.random_range(self.drift_min..=self.drift_max);
            if self.rng.random_bool(0.5) {
                magnitude
            } else {
                -magnitude
            }
        };

        Platform {
            id: index,
            pos: Vec2::new(x, y),
            width: self.platform_width,
            hazard,
            speed,
        }
    }
}
