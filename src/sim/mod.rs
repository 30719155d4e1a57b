//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering or platform dependencies

pub mod abilities;
pub mod avatar;
pub mod bounds;
pub mod collision;
pub mod entities;
pub mod scene;
pub mod score;
pub mod state;
pub mod tick;

pub use abilities::{Ability, Emp, Rejection, spread_offsets};
pub use avatar::{Avatar, AvatarMode, AvatarPose, Facing};
pub use bounds::{Bounds, Rect, orientation};
pub use collision::{GroupHits, group_collide, take_indices, touching};
pub use entities::{
    Beam, Body, Bomb, BombState, DropInterval, Enemy, EnemyPhase, Explosion, GravityField, Shield,
};
pub use scene::{AvatarLook, Scene, Sprite, SpriteDraw};
pub use score::Score;
pub use state::{GamePhase, GameState};
pub use tick::{Command, CollisionReport, KeyState, TickInput, TickOutcome, resolve_collisions, tick};
