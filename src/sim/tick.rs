//! Fixed timestep simulation tick
//!
//! Core game loop step: avatar, abilities, movement, spawns, then the
//! collision pipeline in a fixed rule order.

use super::abilities::Ability;
use super::collision::{group_collide, take_indices, touching};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Held keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Hyper mode key
    pub hyper: bool,
}

/// Discrete key-press commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FireBeam,
    FireSpread,
    DeployShield,
    DeployGravity,
    TriggerEmp,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Window closed / quit requested
    pub quit: bool,
    pub keys: KeyState,
    /// Key presses, in arrival order
    pub commands: Vec<Command>,
}

/// What the loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Quit signal: the rest of the tick was skipped
    Quit,
    /// A lethal bomb hit the avatar
    Defeated,
}

/// Tally of one collision pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Rule 1: enemies destroyed by beams
    pub enemies_shot: usize,
    /// Rule 2: bombs destroyed by beams
    pub bombs_shot: usize,
    /// Rule 3: bombs shrugged off in hyper mode
    pub bombs_absorbed: usize,
    /// Rule 4: disabled bombs that fizzled against the avatar
    pub bombs_fizzled: usize,
    /// Rule 5: bombs and enemies crushed by gravity fields
    pub gravity_bombs: usize,
    pub gravity_enemies: usize,
    /// Rule 6: bombs stopped by a shield
    pub bombs_blocked: usize,
    /// An active bomb reached a normal-mode avatar
    pub lethal: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome::Defeated;
    }
    if input.quit {
        return TickOutcome::Quit;
    }

    // A held hyper key buys hyper mode every tick it is affordable
    if input.keys.hyper {
        if let Err(reason) = state.activate(Ability::Hyper) {
            log::trace!("Hyper ignored: {}", reason);
        }
    }
    let bounds = state.bounds;
    state.avatar.update(&input.keys, &bounds);

    for command in &input.commands {
        apply_command(state, *command);
    }

    if let Some(emp) = state.emp.as_mut() {
        if !emp.advance() {
            state.emp = None;
            log::debug!("EMP over");
        }
    }

    state.advance_entities();

    if state.tick % ENEMY_SPAWN_INTERVAL == 0 {
        state.spawn_enemy();
    }
    state.drop_bombs();

    let report = resolve_collisions(state);
    state.tick += 1;

    if report.lethal {
        state.phase = GamePhase::GameOver;
        state.avatar.defeat();
        log::info!("Game over at tick {} ({})", state.tick, state.score);
        return TickOutcome::Defeated;
    }
    TickOutcome::Continue
}

fn apply_command(state: &mut GameState, command: Command) {
    let ability = match command {
        Command::FireBeam => {
            state.fire_beam();
            return;
        }
        Command::FireSpread => {
            state.fire_spread();
            return;
        }
        Command::DeployShield => Ability::Shield,
        Command::DeployGravity => Ability::Gravity,
        Command::TriggerEmp => Ability::Emp,
    };
    if let Err(reason) = state.activate(ability) {
        log::debug!("Ignored {:?}: {}", command, reason);
    }
}

/// Run the collision rules in order, applying each rule's kill-set before
/// the next rule looks at the collections.
///
/// Stops early on a lethal hit: nothing after rule 4 runs on the final tick.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    // Rule 1: beam x enemy
    let hits = group_collide(&state.enemies, &state.beams, true);
    take_indices(&mut state.beams, &hits.second);
    for enemy in take_indices(&mut state.enemies, &hits.first) {
        log::debug!("Enemy {} shot down", enemy.id);
        state.explode_at(enemy.rect.center, EXPLOSION_LIFE_ENEMY);
        state.score.award(ENEMY_KILL_POINTS);
        state.avatar.cheer();
        report.enemies_shot += 1;
    }

    // Rule 2: beam x bomb
    let hits = group_collide(&state.bombs, &state.beams, true);
    take_indices(&mut state.beams, &hits.second);
    for bomb in take_indices(&mut state.bombs, &hits.first) {
        state.explode_at(bomb.rect.center, EXPLOSION_LIFE_BOMB);
        state.score.award(BOMB_KILL_POINTS);
        report.bombs_shot += 1;
    }

    // Rules 3 and 4: avatar x bomb
    let hit = touching(&state.avatar.rect, &state.bombs);
    let hyper = state.avatar.is_hyper();
    for bomb in take_indices(&mut state.bombs, &hit) {
        if hyper {
            state.explode_at(bomb.rect.center, EXPLOSION_LIFE_BOMB);
            state.score.award(BOMB_KILL_POINTS);
            report.bombs_absorbed += 1;
        } else if bomb.is_lethal() {
            log::debug!("Bomb {} hit the avatar", bomb.id);
            report.lethal = true;
        } else {
            report.bombs_fizzled += 1;
        }
    }
    if report.lethal {
        return report;
    }

    // Rule 5: gravity field x {bomb, enemy}
    for g in 0..state.gravity_fields.len() {
        let field = state.gravity_fields[g].rect;

        let crushed = touching(&field, &state.bombs);
        for bomb in take_indices(&mut state.bombs, &crushed) {
            state.explode_at(bomb.rect.center, EXPLOSION_LIFE_BOMB);
            state.score.award(BOMB_KILL_POINTS);
            report.gravity_bombs += 1;
        }

        let crushed = touching(&field, &state.enemies);
        for enemy in take_indices(&mut state.enemies, &crushed) {
            state.explode_at(enemy.rect.center, EXPLOSION_LIFE_ENEMY);
            state.score.award(ENEMY_KILL_POINTS);
            report.gravity_enemies += 1;
        }
    }

    // Rule 6: bomb x shield (shields persist)
    let hits = group_collide(&state.bombs, &state.shields, false);
    for bomb in take_indices(&mut state.bombs, &hits.first) {
        state.explode_at(bomb.rect.center, EXPLOSION_LIFE_BLOCKED);
        report.bombs_blocked += 1;
    }

    report
}
