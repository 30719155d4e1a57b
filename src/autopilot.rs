//! Demo pilot that plays the game
//!
//! Dodges the closest incoming bomb, kites the nearest enemy and fires when
//! lined up, and spends score on abilities when things get crowded.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::game_loop::InputSource;
use crate::sim::{Ability, Command, Facing, GameState, KeyState, TickInput};

/// Bombs closer than this are dodged
const DANGER_RADIUS: f32 = 160.0;
/// Bombs closer than this call for a shield or hyper mode
const PANIC_RADIUS: f32 = 70.0;
/// Preferred distance to the targeted enemy
const STANDOFF: f32 = 260.0;
const FIRE_COOLDOWN: u32 = 8;
const SPREAD_COOLDOWN: u32 = 60;
/// Live active bombs that trigger a pulse
const EMP_CROWD: usize = 4;
/// Enemies on the field that justify a gravity field
const GRAVITY_CROWD: usize = 5;
/// Score kept in reserve before buying gravity or hyper
const RESERVE: u64 = 1_000;
const WANDER_TICKS: u32 = 30;

/// Scripted player for demo and headless runs
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    fire_cooldown: u32,
    spread_cooldown: u32,
    wander: Option<Facing>,
    wander_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_cooldown: 0,
            spread_cooldown: SPREAD_COOLDOWN,
            wander: None,
            wander_ticks: 0,
        }
    }

    fn wander(&mut self) -> Facing {
        if self.wander_ticks == 0 || self.wander.is_none() {
            let pick = self.rng.random_range(0..Facing::ALL.len());
            self.wander = Some(Facing::ALL[pick]);
            self.wander_ticks = WANDER_TICKS;
        }
        self.wander_ticks -= 1;
        self.wander.unwrap_or(Facing::Up)
    }
}

/// The facing whose direction is closest to `dir`
pub fn facing_toward(dir: Vec2) -> Facing {
    let dir = dir.normalize_or_zero();
    Facing::ALL
        .iter()
        .copied()
        .max_by(|a, b| {
            let da = a.vector().normalize_or_zero().dot(dir);
            let db = b.vector().normalize_or_zero().dot(dir);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(Facing::Up)
}

/// Keys that move along `facing`
pub fn keys_for(facing: Facing) -> KeyState {
    let delta = facing.delta();
    KeyState {
        up: delta.y < 0,
        down: delta.y > 0,
        left: delta.x < 0,
        right: delta.x > 0,
        hyper: false,
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.spread_cooldown = self.spread_cooldown.saturating_sub(1);

        let me = state.avatar.center();
        let score = &state.score;
        let ready = |ability: Ability| ability.check(score, state.is_active(ability)).is_ok();

        // Closest live bomb that is still heading our way
        let threat = state
            .bombs
            .iter()
            .filter(|b| b.is_lethal())
            .filter(|b| b.velocity().dot(me - b.rect.center) > 0.0)
            .map(|b| (b, b.rect.center.distance(me)))
            .filter(|(_, d)| *d < DANGER_RADIUS)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let target = state
            .enemies
            .iter()
            .min_by(|a, b| {
                let da = a.rect.center.distance_squared(me);
                let db = b.rect.center.distance_squared(me);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.rect.center);

        let live_bombs = state.bombs.iter().filter(|b| b.is_lethal()).count();
        if live_bombs >= EMP_CROWD && ready(Ability::Emp) {
            input.commands.push(Command::TriggerEmp);
        }
        if state.enemies.len() >= GRAVITY_CROWD && score.value() > RESERVE && ready(Ability::Gravity)
        {
            input.commands.push(Command::DeployGravity);
        }

        if let Some((bomb, distance)) = threat {
            // Step sideways off the bomb's path
            let away = me - bomb.rect.center;
            let side = bomb.velocity().perp();
            let dodge = if side.dot(away) >= 0.0 { side } else { -side };
            input.keys = keys_for(facing_toward(dodge + away.normalize_or_zero()));

            if distance < PANIC_RADIUS {
                if ready(Ability::Shield) {
                    input.commands.push(Command::DeployShield);
                } else if score.value() > RESERVE && !state.avatar.is_hyper() {
                    input.keys.hyper = true;
                }
            }
            return input;
        }

        match target {
            Some(enemy) => {
                let to_enemy = enemy - me;
                let aim = facing_toward(to_enemy);
                let firing = self.fire_cooldown == 0;
                if firing || to_enemy.length() > STANDOFF {
                    input.keys = keys_for(aim);
                } else {
                    input.keys = keys_for(facing_toward(-to_enemy));
                }
                if firing {
                    self.fire_cooldown = FIRE_COOLDOWN;
                    if self.spread_cooldown == 0 && state.enemies.len() >= 3 {
                        self.spread_cooldown = SPREAD_COOLDOWN;
                        input.commands.push(Command::FireSpread);
                    } else {
                        input.commands.push(Command::FireBeam);
                    }
                }
            }
            None => {
                let facing = self.wander();
                input.keys = keys_for(facing);
            }
        }

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_loop::{EndReason, GameLoop, ManualClock, Renderer};
    use crate::sim::{Bomb, Enemy, Scene};

    struct Blind;

    impl Renderer for Blind {
        fn render(&mut self, _scene: &Scene) {}
    }

    #[test]
    fn test_facing_toward() {
        assert_eq!(facing_toward(Vec2::new(0.0, -5.0)), Facing::Up);
        assert_eq!(facing_toward(Vec2::new(3.0, 3.0)), Facing::DownRight);
        assert_eq!(facing_toward(Vec2::new(-10.0, 1.0)), Facing::Left);
    }

    #[test]
    fn test_keys_match_facing() {
        for facing in Facing::ALL {
            let delta = crate::sim::Avatar::movement_delta(&keys_for(facing));
            assert_eq!(Facing::from_delta(delta), Some(facing));
        }
    }

    #[test]
    fn test_fires_at_enemy() {
        let mut state = GameState::new(3);
        state.enemies.push(Enemy::new(1, Vec2::new(900.0, 100.0), 120.0, 60, 0));
        let mut pilot = Autopilot::new(3);

        let input = pilot.poll(&state);
        assert!(input.keys.up);
        assert_eq!(input.commands, vec![Command::FireBeam]);

        // Cooling down, so no second shot right away
        let input = pilot.poll(&state);
        assert!(input.commands.is_empty());
    }

    #[test]
    fn test_dodges_and_shields_close_bomb() {
        let mut state = GameState::new(3);
        let me = state.avatar.center();
        let enemy = Enemy::new(1, me - Vec2::new(0.0, 90.0), 50.0, 60, 0);
        let bomb = Bomb::new(2, &enemy, me, 15.0, 0);
        state.bombs.push(bomb);
        let mut pilot = Autopilot::new(3);

        let input = pilot.poll(&state);
        assert!(input.keys.left || input.keys.right);
        assert!(input.commands.contains(&Command::DeployShield));
    }

    #[test]
    fn test_pulses_a_crowd_of_bombs() {
        let mut state = GameState::new(3);
        let enemy = Enemy::new(1, Vec2::new(100.0, 60.0), 50.0, 60, 0);
        for id in 0..EMP_CROWD as u32 {
            state
                .bombs
                .push(Bomb::new(10 + id, &enemy, Vec2::new(100.0, 600.0), 10.0, 0));
        }
        let input = Autopilot::new(3).poll(&state);
        assert!(input.commands.contains(&Command::TriggerEmp));
    }

    #[test]
    fn test_autopilot_runs_headless() {
        let settings = crate::Settings::default();
        let state = GameState::from_settings(11, &settings);
        let mut game = GameLoop::new(state, Autopilot::new(11), Blind, ManualClock::default())
            .with_max_ticks(Some(1_500));
        let summary = game.run();

        assert!(matches!(summary.outcome, EndReason::TickLimit | EndReason::Defeated));
        assert!(summary.ticks <= 1_500);
        assert!(game.state.bounds.contains(&game.state.avatar.rect));
    }
}
