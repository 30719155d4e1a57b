//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const AVATAR: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const AVATAR_JOY: [f32; 4] = [0.5, 1.0, 0.6, 1.0];
    pub const AVATAR_DEFEAT: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    /// Hyper filter tint
    pub const HYPER: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const BEAM: [f32; 4] = [0.4, 0.9, 1.0, 1.0];
    pub const ENEMY: [[f32; 4]; 3] = [
        [0.9, 0.3, 0.3, 1.0],
        [0.8, 0.4, 0.9, 1.0],
        [1.0, 0.6, 0.2, 1.0],
    ];
    /// EMP filter for disabled enemies
    pub const ENEMY_DISABLED: [f32; 4] = [0.35, 0.35, 0.45, 1.0];
    /// Bomb palette, indexed by the bomb's color
    pub const BOMB: [[f32; 4]; 6] = [
        [1.0, 0.2, 0.2, 1.0],
        [0.2, 1.0, 0.2, 1.0],
        [0.2, 0.4, 1.0, 1.0],
        [1.0, 1.0, 0.2, 1.0],
        [1.0, 0.2, 1.0, 1.0],
        [0.2, 1.0, 1.0, 1.0],
    ];
    pub const EXPLOSION: [[f32; 4]; 2] = [[1.0, 0.5, 0.1, 0.9], [1.0, 0.85, 0.3, 0.9]];
    pub const SHIELD: [f32; 4] = [0.4, 0.7, 1.0, 0.8];
    pub const GRAVITY: [f32; 4] = [0.6, 0.2, 0.8, 0.25];
    pub const EMP: [f32; 4] = [0.7, 0.9, 1.0, 0.35];
}
