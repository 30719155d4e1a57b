//! Moving and aging objects: beams, enemies, bombs, explosions, shields and
//! gravity fields
//!
//! Each `advance` call moves or ages the object by one tick and reports
//! whether it is still alive.

use glam::Vec2;
use rand::Rng;

use super::avatar::Avatar;
use super::bounds::{Bounds, Rect, orientation};
use crate::consts::*;
use crate::{heading_to_vector, rotated_extent};

/// Anything that takes part in overlap tests
pub trait Body {
    fn rect(&self) -> &Rect;
}

macro_rules! impl_body {
    ($($ty:ty),*) => {
        $(impl Body for $ty {
            #[inline]
            fn rect(&self) -> &Rect {
                &self.rect
            }
        })*
    };
}

impl_body!(Avatar, Beam, Enemy, Bomb, Shield, GravityField);

/// A shot fired by the avatar
#[derive(Debug, Clone)]
pub struct Beam {
    pub id: u32,
    pub rect: Rect,
    /// Unit direction of travel
    pub direction: Vec2,
    /// Heading in degrees (for the rotated sprite)
    pub heading: f32,
    pub speed: f32,
}

impl Beam {
    /// Fire from the avatar along its facing, turned by `offset` degrees
    pub fn new(id: u32, avatar: &Avatar, offset: f32) -> Self {
        let heading = avatar.facing.heading() + offset;
        let direction = heading_to_vector(heading);
        let size = rotated_extent(BEAM_SIZE, heading);
        let center = avatar.center() + avatar.rect.size * direction * 0.5;
        Self {
            id,
            rect: Rect::new(center, size),
            direction,
            heading,
            speed: BEAM_SPEED,
        }
    }

    pub fn advance(&mut self, bounds: &Bounds) -> bool {
        self.rect.translate(self.direction * self.speed);
        bounds.contains(&self.rect)
    }
}

/// Enemy movement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyPhase {
    Descending,
    Stopped,
}

/// How often a stopped enemy drops a bomb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropInterval {
    Every(u32),
    /// Disabled by an EMP
    Never,
}

impl DropInterval {
    pub fn fires_on(self, tick: u64) -> bool {
        match self {
            DropInterval::Every(interval) => interval > 0 && tick % interval as u64 == 0,
            DropInterval::Never => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub descent_speed: f32,
    /// Vertical coordinate where the enemy halts
    pub stop_line: f32,
    pub phase: EnemyPhase,
    pub interval: DropInterval,
    /// Marked by an EMP (drawn with a filter)
    pub disabled: bool,
    /// Sprite variant
    pub variant: u8,
}

impl Enemy {
    /// Spawn at a random column on the top edge
    pub fn spawn(id: u32, bounds: &Bounds, rng: &mut impl Rng) -> Self {
        let x = rng.random_range(0.0..=bounds.width);
        let stop_max = (bounds.height / 2.0).max(ENEMY_STOP_MIN);
        let stop_line = rng.random_range(ENEMY_STOP_MIN..=stop_max);
        let interval = rng.random_range(ENEMY_DROP_MIN..=ENEMY_DROP_MAX);
        let variant = rng.random_range(0..ENEMY_VARIANTS);
        Self::new(id, Vec2::new(x, 0.0), stop_line, interval, variant)
    }

    pub fn new(id: u32, center: Vec2, stop_line: f32, interval: u32, variant: u8) -> Self {
        Self {
            id,
            rect: Rect::new(center, ENEMY_SIZE),
            descent_speed: ENEMY_DESCENT_SPEED,
            stop_line,
            phase: EnemyPhase::Descending,
            interval: DropInterval::Every(interval),
            disabled: false,
            variant,
        }
    }

    /// Descend until the center passes the stop line, then hold position
    pub fn advance(&mut self) {
        if self.phase == EnemyPhase::Descending {
            if self.rect.center.y > self.stop_line {
                self.phase = EnemyPhase::Stopped;
                log::trace!("Enemy {} stopped at y={}", self.id, self.rect.center.y);
            } else {
                self.rect.translate(Vec2::new(0.0, self.descent_speed));
            }
        }
    }

    /// Whether this enemy drops a bomb on `tick`
    pub fn drops_on(&self, tick: u64) -> bool {
        self.phase == EnemyPhase::Stopped && self.interval.fires_on(tick)
    }

    /// EMP hit: never drop again
    pub fn disable(&mut self) {
        self.interval = DropInterval::Never;
        self.disabled = true;
    }
}

/// Bomb lethality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombState {
    Active,
    /// Disabled by an EMP; harmless to the avatar
    Inactive,
}

#[derive(Debug, Clone)]
pub struct Bomb {
    pub id: u32,
    pub rect: Rect,
    /// Unit direction, fixed at spawn
    pub direction: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Cosmetic color index
    pub color: u8,
    pub state: BombState,
}

impl Bomb {
    /// Drop from `enemy`, aimed at where `target` is right now
    pub fn drop_from(id: u32, enemy: &Enemy, target: Vec2, rng: &mut impl Rng) -> Self {
        let radius = rng.random_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX) as f32;
        let color = rng.random_range(0..BOMB_COLORS);
        Self::new(id, enemy, target, radius, color)
    }

    pub fn new(id: u32, enemy: &Enemy, target: Vec2, radius: f32, color: u8) -> Self {
        let origin = enemy.rect.center;
        let center = Vec2::new(origin.x, origin.y + enemy.rect.size.y / 2.0);
        Self {
            id,
            rect: Rect::new(center, Vec2::splat(radius * 2.0)),
            direction: orientation(origin, target),
            speed: BOMB_SPEED,
            radius,
            color,
            state: BombState::Active,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    pub fn advance(&mut self, bounds: &Bounds) -> bool {
        self.rect.translate(self.velocity());
        bounds.contains(&self.rect)
    }

    /// EMP hit: half speed and harmless
    pub fn disable(&mut self) {
        self.speed /= 2.0;
        self.state = BombState::Inactive;
    }

    pub fn is_lethal(&self) -> bool {
        match self.state {
            BombState::Active => true,
            BombState::Inactive => false,
        }
    }
}

/// Visual-only blast left behind by a kill
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub center: Vec2,
    pub life: i32,
}

impl Explosion {
    pub fn new(id: u32, center: Vec2, life: i32) -> Self {
        Self { id, center, life }
    }

    pub fn advance(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }

    /// Which of the two alternating images to show
    pub fn frame(&self) -> u8 {
        (self.life.max(0) / EXPLOSION_FRAME_TICKS % 2) as u8
    }
}

/// Wall placed in front of the avatar that stops bombs
#[derive(Debug, Clone)]
pub struct Shield {
    pub id: u32,
    pub rect: Rect,
    /// Heading in degrees the wall was rotated to
    pub heading: f32,
    pub life: i32,
}

impl Shield {
    /// Raise a shield one avatar-height ahead of the avatar
    pub fn new(id: u32, avatar: &Avatar) -> Self {
        let height = avatar.rect.size.y;
        let heading = avatar.facing.heading();
        let size = rotated_extent(Vec2::new(SHIELD_THICKNESS, height * 2.0), heading);
        let center = avatar.center() + avatar.facing.vector() * height;
        Self {
            id,
            rect: Rect::new(center, size),
            heading,
            life: SHIELD_LIFE,
        }
    }

    pub fn advance(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

/// Field-wide overlay that crushes every bomb and enemy it touches
#[derive(Debug, Clone)]
pub struct GravityField {
    pub id: u32,
    pub rect: Rect,
    pub life: i32,
}

impl GravityField {
    pub fn new(id: u32, bounds: &Bounds) -> Self {
        Self {
            id,
            rect: bounds.full_rect(),
            life: GRAVITY_LIFE,
        }
    }

    pub fn advance(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::avatar::Facing;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_beam_leaves_field() {
        let bounds = Bounds::default();
        let mut avatar = Avatar::new(Vec2::new(1000.0, 300.0));
        avatar.facing = Facing::Right;
        let mut beam = Beam::new(1, &avatar, 0.0);
        assert!((beam.direction - Vec2::X).length() < 1e-5);

        let mut ticks = 0;
        while beam.advance(&bounds) {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(beam.rect.right() > bounds.width);
    }

    #[test]
    fn test_beam_starts_ahead_of_avatar() {
        let mut avatar = Avatar::new(Vec2::new(500.0, 300.0));
        avatar.facing = Facing::Up;
        let beam = Beam::new(1, &avatar, 0.0);
        assert!(beam.rect.center.y < avatar.center().y);
        assert!((beam.rect.center.x - 500.0).abs() < 1e-3);
        // Rotated upright
        assert!(beam.rect.size.y > beam.rect.size.x);
    }

    #[test]
    fn test_enemy_stops_exactly_once() {
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 0.0), 100.0, 50, 0);
        let mut transitions = 0;
        let mut last = enemy.phase;
        for _ in 0..200 {
            enemy.advance();
            if enemy.phase != last {
                transitions += 1;
                last = enemy.phase;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(enemy.phase, EnemyPhase::Stopped);
        assert!(enemy.rect.center.y > 100.0);
        assert!(enemy.rect.center.y <= 100.0 + ENEMY_DESCENT_SPEED);
    }

    #[test]
    fn test_enemy_drops_periodically_only_when_stopped() {
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 0.0), 50.0, 60, 0);
        assert!(!enemy.drops_on(60));
        enemy.phase = EnemyPhase::Stopped;
        assert!(enemy.drops_on(60));
        assert!(enemy.drops_on(120));
        assert!(!enemy.drops_on(61));

        enemy.disable();
        assert!(!enemy.drops_on(120));
        assert!(!enemy.drops_on(0));
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Bounds::default();
        for id in 0..100 {
            let enemy = Enemy::spawn(id, &bounds, &mut rng);
            assert_eq!(enemy.rect.center.y, 0.0);
            assert!((0.0..=bounds.width).contains(&enemy.rect.center.x));
            assert!((50.0..=bounds.height / 2.0).contains(&enemy.stop_line));
            match enemy.interval {
                DropInterval::Every(n) => assert!((50..=300).contains(&n)),
                DropInterval::Never => panic!("fresh enemy must drop bombs"),
            }
        }
    }

    #[test]
    fn test_bomb_aims_at_target() {
        let enemy = Enemy::new(1, Vec2::new(100.0, 100.0), 50.0, 60, 0);
        let bomb = Bomb::new(2, &enemy, Vec2::new(100.0, 500.0), 20.0, 0);
        assert!((bomb.direction - Vec2::Y).length() < 1e-6);
        assert_eq!(bomb.rect.center, Vec2::new(100.0, 125.0));
        assert_eq!(bomb.rect.size, Vec2::splat(40.0));
    }

    #[test]
    fn test_bomb_disable_halves_speed() {
        let enemy = Enemy::new(1, Vec2::new(100.0, 100.0), 50.0, 60, 0);
        let mut bomb = Bomb::new(2, &enemy, Vec2::new(400.0, 500.0), 20.0, 0);
        bomb.disable();
        assert_eq!(bomb.speed, BOMB_SPEED / 2.0);
        assert!(!bomb.is_lethal());
    }

    #[test]
    fn test_explosion_frames_alternate() {
        let mut explosion = Explosion::new(1, Vec2::ZERO, 25);
        let mut frames = Vec::new();
        while explosion.advance() {
            frames.push(explosion.frame());
        }
        // life 24..=20 -> frame 0, 19..=10 -> frame 1, 9..=0 -> frame 0
        assert_eq!(frames.len(), 25);
        assert_eq!(frames[0], 0);
        assert_eq!(frames[5], 1);
        assert_eq!(frames[15], 0);
    }

    #[test]
    fn test_shield_offset_along_facing() {
        let mut avatar = Avatar::new(Vec2::new(500.0, 300.0));
        avatar.facing = Facing::Left;
        let shield = Shield::new(1, &avatar);
        assert_eq!(shield.rect.center, Vec2::new(500.0 - AVATAR_SIZE.y, 300.0));
        // A wall facing left stands upright
        assert!((shield.rect.size.x - SHIELD_THICKNESS).abs() < 1e-3);
        assert!((shield.rect.size.y - AVATAR_SIZE.y * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_lifetimes_expire() {
        let bounds = Bounds::default();
        let mut field = GravityField::new(1, &bounds);
        let mut ticks = 0;
        while field.advance() {
            ticks += 1;
        }
        assert_eq!(ticks, GRAVITY_LIFE);
    }

    proptest! {
        #[test]
        fn prop_bomb_direction_is_fixed(
            ex in 0.0f32..1100.0,
            ey in 50.0f32..325.0,
            tx in 0.0f32..1100.0,
            ty in 0.0f32..650.0,
            ticks in 1usize..40,
        ) {
            let bounds = Bounds::default();
            let enemy = Enemy::new(1, Vec2::new(ex, ey), 50.0, 60, 0);
            let mut bomb = Bomb::new(2, &enemy, Vec2::new(tx, ty), 10.0, 0);
            let direction = bomb.direction;
            prop_assert!((direction.length() - 1.0).abs() < 1e-4);
            for _ in 0..ticks {
                let before = bomb.rect.center;
                bomb.advance(&bounds);
                prop_assert_eq!(bomb.direction, direction);
                prop_assert!((bomb.rect.center - before - direction * BOMB_SPEED).length() < 1e-3);
            }
        }
    }
}
