//! Beam Barrage - a fixed-timestep arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, abilities, collisions, game state)
//! - `game_loop`: Fixed-rate driver and the input/render/clock collaborators
//! - `renderer`: CPU tessellation of a scene into vertex batches
//! - `autopilot`: Demo input source that plays the game
//! - `settings`: JSON configuration with environment overrides

pub mod autopilot;
pub mod game_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default playfield size in pixels
    pub const FIELD_WIDTH: f32 = 1100.0;
    pub const FIELD_HEIGHT: f32 = 650.0;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 50;
    /// If the driver falls this many ticks behind, it resyncs instead of bursting
    pub const MAX_LAG_TICKS: u32 = 8;
    /// Pause after the defeat frame before the loop returns (ms)
    pub const DEFEAT_PAUSE_MS: u64 = 2000;

    /// Score at the start of a run
    pub const INITIAL_SCORE: u64 = 10_000;
    pub const ENEMY_KILL_POINTS: u64 = 10;
    pub const BOMB_KILL_POINTS: u64 = 1;

    /// Avatar defaults
    pub const AVATAR_START: Vec2 = Vec2::new(900.0, 400.0);
    pub const AVATAR_SIZE: Vec2 = Vec2::new(54.0, 54.0);
    pub const AVATAR_SPEED: f32 = 10.0;
    /// Ticks the joy pose is held after an enemy kill
    pub const JOY_TICKS: u32 = 25;

    /// Hyper mode
    pub const HYPER_COST: u64 = 100;
    pub const HYPER_TICKS: u32 = 500;

    /// Beams
    pub const BEAM_SIZE: Vec2 = Vec2::new(40.0, 10.0);
    pub const BEAM_SPEED: f32 = 10.0;
    /// Spread shots fan out across ±this many degrees
    pub const SPREAD_HALF_ANGLE: f32 = 50.0;
    pub const DEFAULT_SPREAD_BEAMS: usize = 5;

    /// Enemies
    pub const ENEMY_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
    pub const ENEMY_SPAWN_INTERVAL: u64 = 200;
    pub const ENEMY_STOP_MIN: f32 = 50.0;
    pub const ENEMY_DROP_MIN: u32 = 50;
    pub const ENEMY_DROP_MAX: u32 = 300;
    pub const ENEMY_VARIANTS: u8 = 3;

    /// Bombs
    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_RADIUS_MIN: u32 = 10;
    pub const BOMB_RADIUS_MAX: u32 = 50;
    pub const BOMB_COLORS: u8 = 6;

    /// Explosion lifetimes (ticks)
    pub const EXPLOSION_LIFE_ENEMY: i32 = 100;
    pub const EXPLOSION_LIFE_BOMB: i32 = 50;
    pub const EXPLOSION_LIFE_BLOCKED: i32 = 30;
    /// Explosion frames alternate every this many ticks
    pub const EXPLOSION_FRAME_TICKS: i32 = 10;

    /// Shield
    pub const SHIELD_COST: u64 = 50;
    pub const SHIELD_LIFE: i32 = 400;
    pub const SHIELD_THICKNESS: f32 = 20.0;

    /// Gravity field
    pub const GRAVITY_COST: u64 = 200;
    pub const GRAVITY_LIFE: i32 = 400;

    /// Electromagnetic pulse
    pub const EMP_COST: u64 = 20;
    pub const EMP_OVERLAY_FRAMES: u32 = 3;
}

/// Unit direction for a heading in degrees.
///
/// Screen y grows downward, so a positive heading turns counter-clockwise
/// on screen (90° points up).
#[inline]
pub fn heading_to_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Heading in degrees of a screen-space direction
#[inline]
pub fn vector_to_heading(dir: Vec2) -> f32 {
    (-dir.y).atan2(dir.x).to_degrees()
}

/// Axis-aligned extent of a `size` rectangle rotated by `degrees`
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
