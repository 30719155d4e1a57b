//! Draw list handed to the rendering collaborator once per tick
//!
//! Sprites are opaque handles: the simulation says *what* sits *where*, and
//! the renderer decides what that looks like.

use super::avatar::{AvatarPose, Facing};
use super::bounds::{Bounds, Rect};
use super::state::GameState;
use glam::Vec2;

/// Avatar image selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarLook {
    /// One image per facing
    Facing(Facing),
    Joy,
    Defeat,
}

/// Drawable handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    Background,
    /// `hyper` asks for the hyper-mode filter
    Avatar { look: AvatarLook, hyper: bool },
    Beam { heading: f32 },
    /// `disabled` asks for the EMP filter
    Enemy { variant: u8, disabled: bool },
    Bomb { color: u8, radius: f32 },
    Explosion { frame: u8 },
    Shield { heading: f32 },
    GravityOverlay,
    EmpOverlay,
}

/// One sprite placed on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub rect: Rect,
    pub sprite: Sprite,
}

/// Everything visible after a tick, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub tick: u64,
    pub bounds: Bounds,
    pub draws: Vec<SpriteDraw>,
    pub score: u64,
    /// Score display text
    pub score_text: String,
    pub game_over: bool,
}

impl Scene {
    /// Snapshot the live entities of `state`
    pub fn capture(state: &GameState) -> Self {
        let bounds = state.bounds;
        let mut draws = Vec::with_capacity(
            2 + state.beams.len()
                + state.enemies.len()
                + state.bombs.len()
                + state.shields.len()
                + state.explosions.len()
                + state.gravity_fields.len(),
        );

        draws.push(SpriteDraw {
            rect: bounds.full_rect(),
            sprite: Sprite::Background,
        });

        draws.extend(state.beams.iter().map(|b| SpriteDraw {
            rect: b.rect,
            sprite: Sprite::Beam { heading: b.heading },
        }));
        draws.extend(state.enemies.iter().map(|e| SpriteDraw {
            rect: e.rect,
            sprite: Sprite::Enemy {
                variant: e.variant,
                disabled: e.disabled,
            },
        }));
        draws.extend(state.bombs.iter().map(|b| SpriteDraw {
            rect: b.rect,
            sprite: Sprite::Bomb {
                color: b.color,
                radius: b.radius,
            },
        }));
        draws.extend(state.shields.iter().map(|s| SpriteDraw {
            rect: s.rect,
            sprite: Sprite::Shield { heading: s.heading },
        }));
        draws.extend(state.explosions.iter().map(|e| SpriteDraw {
            rect: Rect::new(e.center, EXPLOSION_SIZE),
            sprite: Sprite::Explosion { frame: e.frame() },
        }));
        draws.extend(state.gravity_fields.iter().map(|g| SpriteDraw {
            rect: g.rect,
            sprite: Sprite::GravityOverlay,
        }));
        if state.emp.as_ref().is_some_and(|e| e.overlay_visible) {
            draws.push(SpriteDraw {
                rect: bounds.full_rect(),
                sprite: Sprite::EmpOverlay,
            });
        }

        let avatar = &state.avatar;
        let look = match avatar.pose {
            AvatarPose::Facing => AvatarLook::Facing(avatar.facing),
            AvatarPose::Joy { .. } => AvatarLook::Joy,
            AvatarPose::Defeat => AvatarLook::Defeat,
        };
        draws.push(SpriteDraw {
            rect: avatar.rect,
            sprite: Sprite::Avatar {
                look,
                hyper: avatar.is_hyper(),
            },
        });

        Self {
            tick: state.tick,
            bounds,
            draws,
            score: state.score.value(),
            score_text: state.score.display(),
            game_over: state.is_over(),
        }
    }
}

/// Explosion image size
const EXPLOSION_SIZE: Vec2 = Vec2::new(64.0, 64.0);
