//! Game state and core simulation types
//!
//! Everything the loop mutates lives in [`GameState`]; randomness comes only
//! from its seeded generator, so equal seeds and equal inputs replay equally.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::abilities::{Ability, Emp, Rejection, spread_offsets};
use super::avatar::Avatar;
use super::bounds::Bounds;
use super::entities::{Beam, Bomb, Enemy, Explosion, GravityField, Shield};
use super::score::Score;
use crate::Settings;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// A lethal bomb reached the avatar
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// The playfield
    pub bounds: Bounds,
    /// Simulation tick counter
    pub tick: u64,
    pub phase: GamePhase,
    pub score: Score,
    pub avatar: Avatar,
    /// Live entities, in spawn order
    pub beams: Vec<Beam>,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    pub shields: Vec<Shield>,
    pub gravity_fields: Vec<GravityField>,
    /// Running pulse, if any
    pub emp: Option<Emp>,
    /// Beams per spread shot
    pub spread_beams: usize,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the default field
    pub fn new(seed: u64) -> Self {
        Self::with_bounds(seed, Bounds::default())
    }

    pub fn with_bounds(seed: u64, bounds: Bounds) -> Self {
        let start = Vec2::new(
            AVATAR_START.x.min(bounds.width - AVATAR_SIZE.x / 2.0),
            AVATAR_START.y.min(bounds.height - AVATAR_SIZE.y / 2.0),
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            tick: 0,
            phase: GamePhase::Playing,
            score: Score::default(),
            avatar: Avatar::new(start),
            beams: Vec::new(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            explosions: Vec::new(),
            shields: Vec::new(),
            gravity_fields: Vec::new(),
            emp: None,
            spread_beams: DEFAULT_SPREAD_BEAMS,
            next_id: 1,
        }
    }

    pub fn from_settings(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::with_bounds(seed, settings.bounds());
        state.spread_beams = settings.spread_beams;
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether an exclusive instance of `ability` is running
    pub fn is_active(&self, ability: Ability) -> bool {
        match ability {
            Ability::Hyper => self.avatar.is_hyper(),
            Ability::Shield => !self.shields.is_empty(),
            Ability::Gravity => !self.gravity_fields.is_empty(),
            Ability::Emp => self.emp.is_some(),
        }
    }

    /// Check, pay for and apply an ability in one step.
    ///
    /// A rejected activation changes nothing.
    pub fn activate(&mut self, ability: Ability) -> Result<(), Rejection> {
        let already_active = self.is_active(ability);
        ability.check(&self.score, already_active)?;
        if !self.score.try_spend(ability.cost()) {
            return Err(Rejection::InsufficientScore {
                ability,
                required: ability.cost(),
                available: self.score.value(),
            });
        }

        match ability {
            Ability::Hyper => self.avatar.enter_hyper(),
            Ability::Shield => {
                let id = self.next_entity_id();
                self.shields.push(Shield::new(id, &self.avatar));
            }
            Ability::Gravity => {
                let id = self.next_entity_id();
                self.gravity_fields.push(GravityField::new(id, &self.bounds));
            }
            Ability::Emp => {
                self.emp = Some(Emp::trigger(&mut self.enemies, &mut self.bombs));
            }
        }
        if already_active {
            log::debug!("{:?} renewed ({})", ability, self.score);
        } else {
            log::info!("{:?} activated ({})", ability, self.score);
        }
        Ok(())
    }

    /// Fire one beam along the avatar's facing
    pub fn fire_beam(&mut self) {
        let id = self.next_entity_id();
        self.beams.push(Beam::new(id, &self.avatar, 0.0));
    }

    /// Fire a fan of `spread_beams` beams
    pub fn fire_spread(&mut self) {
        for offset in spread_offsets(self.spread_beams) {
            let id = self.next_entity_id();
            self.beams.push(Beam::new(id, &self.avatar, offset));
        }
    }

    /// Spawn an enemy at a random column of the top edge
    pub fn spawn_enemy(&mut self) {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, &self.bounds, &mut self.rng);
        log::debug!(
            "Enemy {} spawned at x={:.0}, stops at y={:.0}",
            id,
            enemy.rect.center.x,
            enemy.stop_line
        );
        self.enemies.push(enemy);
    }

    /// Every stopped enemy whose interval divides the tick drops a bomb
    /// aimed at the avatar's current position.
    pub fn drop_bombs(&mut self) {
        let target = self.avatar.center();
        let firing: Vec<usize> = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.drops_on(self.tick))
            .map(|(i, _)| i)
            .collect();

        for i in firing {
            let id = self.next_entity_id();
            let bomb = Bomb::drop_from(id, &self.enemies[i], target, &mut self.rng);
            self.bombs.push(bomb);
        }
    }

    /// Leave an explosion at `center`
    pub fn explode_at(&mut self, center: Vec2, life: i32) {
        let id = self.next_entity_id();
        self.explosions.push(Explosion::new(id, center, life));
    }

    /// Move and age every entity, dropping the ones that left the field or
    /// ran out of life.
    pub fn advance_entities(&mut self) {
        let bounds = self.bounds;
        self.beams.retain_mut(|b| b.advance(&bounds));
        for enemy in &mut self.enemies {
            enemy.advance();
        }
        self.bombs.retain_mut(|b| b.advance(&bounds));
        self.shields.retain_mut(|s| s.advance());
        self.explosions.retain_mut(|e| e.advance());
        self.gravity_fields.retain_mut(|g| g.advance());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{BombState, DropInterval, EnemyPhase};

    #[test]
    fn test_new_state() {
        let state = GameState::new(1);
        assert_eq!(state.score.value(), 10_000);
        assert_eq!(state.avatar.center(), AVATAR_START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_small_field_keeps_avatar_inside() {
        let state = GameState::with_bounds(1, Bounds::new(400.0, 300.0));
        assert!(state.bounds.contains(&state.avatar.rect));
    }

    #[test]
    fn test_shield_scenario() {
        let mut state = GameState::new(1);
        state.avatar.rect.center = state.bounds.center();

        assert_eq!(state.activate(Ability::Shield), Ok(()));
        assert_eq!(state.score.value(), 9_950);
        assert_eq!(state.shields.len(), 1);

        assert_eq!(
            state.activate(Ability::Shield),
            Err(Rejection::AlreadyActive(Ability::Shield))
        );
        assert_eq!(state.score.value(), 9_950);
        assert_eq!(state.shields.len(), 1);
    }

    #[test]
    fn test_gravity_fields_stack() {
        let mut state = GameState::new(1);
        state.activate(Ability::Gravity).unwrap();
        state.activate(Ability::Gravity).unwrap();
        assert_eq!(state.gravity_fields.len(), 2);
        assert_eq!(state.score.value(), 10_000 - 2 * GRAVITY_COST);
    }

    #[test]
    fn test_hyper_renewal_charges_again() {
        let mut state = GameState::new(1);
        state.activate(Ability::Hyper).unwrap();
        state.activate(Ability::Hyper).unwrap();
        assert_eq!(state.score.value(), 10_000 - 2 * HYPER_COST);
        assert!(state.is_active(Ability::Hyper));

        state.score = Score::new(HYPER_COST);
        assert!(matches!(
            state.activate(Ability::Hyper),
            Err(Rejection::InsufficientScore { .. })
        ));
        assert_eq!(state.score.value(), HYPER_COST);
    }

    #[test]
    fn test_rejected_activation_keeps_score() {
        let mut state = GameState::new(1);
        state.score = Score::new(199);
        assert!(state.activate(Ability::Gravity).is_err());
        assert_eq!(state.score.value(), 199);
        assert!(state.gravity_fields.is_empty());
    }

    #[test]
    fn test_emp_affects_only_present_entities() {
        let mut state = GameState::new(3);
        for _ in 0..2 {
            state.spawn_enemy();
        }
        for enemy in &mut state.enemies {
            enemy.phase = EnemyPhase::Stopped;
            enemy.interval = DropInterval::Every(1);
        }
        state.drop_bombs();
        assert_eq!(state.bombs.len(), 2);

        state.activate(Ability::Emp).unwrap();
        assert!(state.enemies.iter().all(|e| e.interval == DropInterval::Never));
        assert!(state.bombs.iter().all(|b| b.state == BombState::Inactive));

        // Newcomers are untouched
        state.spawn_enemy();
        let fresh = state.enemies.last().unwrap();
        assert!(matches!(fresh.interval, DropInterval::Every(_)));
        assert!(!fresh.disabled);

        // Bombs dropped after the pulse are live and full speed
        let id = state.next_entity_id();
        let mut dropper = Enemy::new(id, Vec2::new(300.0, 120.0), 100.0, 1, 0);
        dropper.phase = EnemyPhase::Stopped;
        state.enemies.push(dropper);
        state.drop_bombs();
        assert_eq!(state.bombs.len(), 3);
        let late = state.bombs.last().unwrap();
        assert_eq!(late.state, BombState::Active);
        assert_eq!(late.speed, BOMB_SPEED);
        assert!(late.is_lethal());
        assert!(
            state.bombs[..2]
                .iter()
                .all(|b| b.state == BombState::Inactive && b.speed == BOMB_SPEED / 2.0)
        );

        // A second pulse is refused while the first is running
        assert_eq!(
            state.activate(Ability::Emp),
            Err(Rejection::AlreadyActive(Ability::Emp))
        );
    }

    #[test]
    fn test_spread_fires_configured_count() {
        let mut state = GameState::new(1);
        state.spread_beams = 7;
        state.fire_spread();
        assert_eq!(state.beams.len(), 7);
        let mut ids: Vec<u32> = state.beams.iter().map(|b| b.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..5 {
            a.spawn_enemy();
            b.spawn_enemy();
        }
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.rect, eb.rect);
            assert_eq!(ea.stop_line, eb.stop_line);
            assert_eq!(ea.interval, eb.interval);
        }
    }
}
