//! CPU mesh rendering
//!
//! Tessellates each [`Scene`] into one batch of colored triangles in field
//! pixel coordinates, ready to upload as a vertex buffer.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use crate::consts::{AVATAR_SIZE, BEAM_SIZE, SHIELD_THICKNESS};
use crate::game_loop::Renderer;
use crate::sim::{AvatarLook, Scene, Sprite, SpriteDraw};

const BOMB_SEGMENTS: u32 = 20;
const EXPLOSION_SEGMENTS: u32 = 24;
/// Log batch stats every this many frames
const STATS_INTERVAL: u64 = 250;

/// Renderer that keeps the latest frame as a vertex batch
#[derive(Debug, Default)]
pub struct MeshRenderer {
    vertices: Vec<Vertex>,
    hud: String,
    frames: u64,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices of the last frame
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes of the last frame for GPU upload
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Score text of the last frame
    pub fn hud(&self) -> &str {
        &self.hud
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rebuild the batch from `scene`
    pub fn tessellate(&mut self, scene: &Scene) {
        self.vertices.clear();
        for draw in &scene.draws {
            push_sprite(&mut self.vertices, draw);
        }
        if self.hud != scene.score_text {
            self.hud.clone_from(&scene.score_text);
        }
    }
}

impl Renderer for MeshRenderer {
    fn render(&mut self, scene: &Scene) {
        self.tessellate(scene);
        self.frames += 1;
        if self.frames % STATS_INTERVAL == 0 || scene.game_over {
            log::debug!(
                "Frame {} (tick {}): {} sprites, {} vertices, {}",
                self.frames,
                scene.tick,
                scene.draws.len(),
                self.vertices.len(),
                self.hud
            );
        }
    }
}

fn push_sprite(out: &mut Vec<Vertex>, draw: &SpriteDraw) {
    let rect = &draw.rect;
    match draw.sprite {
        Sprite::Background => shapes::quad(out, rect, colors::BACKGROUND),
        Sprite::Avatar { look, hyper } => {
            let color = match look {
                AvatarLook::Facing(_) => colors::AVATAR,
                AvatarLook::Joy => colors::AVATAR_JOY,
                AvatarLook::Defeat => colors::AVATAR_DEFEAT,
            };
            shapes::quad(out, rect, color);
            if let AvatarLook::Facing(facing) = look {
                // Nose pointing where the avatar faces
                let tip = rect.center + facing.vector().normalize_or_zero() * (rect.size.x / 4.0);
                shapes::oriented_quad(
                    out,
                    tip,
                    rect.size.x / 2.0,
                    rect.size.y / 6.0,
                    facing.heading(),
                    colors::BACKGROUND,
                );
            }
            if hyper {
                let r = rect.size.max_element() / 2.0;
                shapes::ring(out, rect.center, r, r + 4.0, colors::HYPER, 24);
            }
        }
        Sprite::Beam { heading } => {
            shapes::oriented_quad(out, rect.center, BEAM_SIZE.x, BEAM_SIZE.y, heading, colors::BEAM)
        }
        Sprite::Enemy { variant, disabled } => {
            let color = if disabled {
                colors::ENEMY_DISABLED
            } else {
                colors::ENEMY[variant as usize % colors::ENEMY.len()]
            };
            shapes::quad(out, rect, color);
        }
        Sprite::Bomb { color, radius } => shapes::circle(
            out,
            rect.center,
            radius,
            colors::BOMB[color as usize % colors::BOMB.len()],
            BOMB_SEGMENTS,
        ),
        Sprite::Explosion { frame } => {
            let outer = rect.size.x / 2.0;
            let color = colors::EXPLOSION[frame as usize % colors::EXPLOSION.len()];
            shapes::ring(out, rect.center, outer * 0.4, outer, color, EXPLOSION_SEGMENTS);
        }
        Sprite::Shield { heading } => shapes::oriented_quad(
            out,
            rect.center,
            AVATAR_SIZE.y * 2.0,
            SHIELD_THICKNESS,
            heading + 90.0,
            colors::SHIELD,
        ),
        Sprite::GravityOverlay => shapes::quad(out, rect, colors::GRAVITY),
        Sprite::EmpOverlay => shapes::quad(out, rect, colors::EMP),
    }
}
