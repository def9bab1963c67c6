//! Shape generation for 2D primitives
//!
//! Everything in the world is an axis-aligned rectangle in screen space
//! (top-left origin, y down). Conversion to device coordinates happens in
//! [`super::pipeline::RenderState`].

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::driver::Frame;
use crate::sim::{Platform, World};

/// Two triangles covering the rectangle at `pos` (top-left) with `size`
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let tl = pos;
    let tr = pos + Vec2::new(size.x, 0.0);
    let bl = pos + Vec2::new(0.0, size.y);
    let br = pos + size;
    [
        Vertex::at(tl, color),
        Vertex::at(bl, color),
        Vertex::at(tr, color),
        Vertex::at(tr, color),
        Vertex::at(bl, color),
        Vertex::at(br, color),
    ]
}

pub fn platform_color(platform: &Platform) -> [f32; 4] {
    if platform.hazard {
        colors::PLATFORM_HAZARD
    } else {
        colors::PLATFORM_SAFE
    }
}

/// Geometry for one frame: platforms, then the player, then the game-over shade
pub fn world_vertices(world: &World, frame: Frame) -> Vec<Vertex> {
    let thickness = world.tuning.platform_thickness;
    let mut vertices = Vec::with_capacity((world.platforms.len() + 2) * 6);

    for platform in &world.platforms {
        vertices.extend(rect(
            platform.pos,
            Vec2::new(platform.width, thickness),
            platform_color(platform),
        ));
    }

    vertices.extend(rect(world.player.pos, world.player.size, colors::PLAYER));

    if frame == Frame::Terminal {
        let screen = Vec2::new(world.viewport.width, world.viewport.height);
        vertices.extend(rect(Vec2::ZERO, screen, colors::GAME_OVER_SHADE));
    }

    vertices
}
