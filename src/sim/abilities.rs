//! Score-funded abilities, the spread shot and the electromagnetic pulse
//!
//! Every ability is gated by a pure [`Ability::check`] that looks at the
//! score and whether an exclusive instance is already running. The caller
//! applies the effect only after the check passes, deducting the cost in the
//! same step.

use super::entities::{Bomb, Enemy};
use super::score::Score;
use crate::consts::*;

/// Abilities the player can buy with score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Hyper,
    Shield,
    Gravity,
    Emp,
}

/// Why an activation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{ability:?} needs {required} score, have {available}")]
    InsufficientScore {
        ability: Ability,
        required: u64,
        available: u64,
    },
    #[error("{0:?} is already active")]
    AlreadyActive(Ability),
}

impl Ability {
    pub fn cost(self) -> u64 {
        match self {
            Ability::Hyper => HYPER_COST,
            Ability::Shield => SHIELD_COST,
            Ability::Gravity => GRAVITY_COST,
            Ability::Emp => EMP_COST,
        }
    }

    /// Only one instance may run at a time. Hyper can be bought again while
    /// running, which restarts its countdown.
    pub fn is_exclusive(self) -> bool {
        match self {
            Ability::Shield | Ability::Emp => true,
            Ability::Hyper | Ability::Gravity => false,
        }
    }

    /// Whether `score` can pay for this ability. Hyper needs strictly more
    /// than its cost; the others accept an exact balance.
    pub fn affordable(self, score: &Score) -> bool {
        match self {
            Ability::Hyper => score.value() > self.cost(),
            Ability::Shield | Ability::Gravity | Ability::Emp => score.value() >= self.cost(),
        }
    }

    /// Pure activation predicate
    pub fn check(self, score: &Score, already_active: bool) -> Result<(), Rejection> {
        if self.is_exclusive() && already_active {
            return Err(Rejection::AlreadyActive(self));
        }
        if !self.affordable(score) {
            return Err(Rejection::InsufficientScore {
                ability: self,
                required: self.cost(),
                available: score.value(),
            });
        }
        Ok(())
    }
}

/// Angle offsets (degrees) for a fan of `count` beams.
///
/// One beam flies straight; more are spread evenly across
/// ±[`SPREAD_HALF_ANGLE`], both ends included.
pub fn spread_offsets(count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let start = -SPREAD_HALF_ANGLE;
            let step = (2.0 * SPREAD_HALF_ANGLE) / (n - 1) as f32;
            (0..n).map(|i| start + i as f32 * step).collect()
        }
    }
}

/// Electromagnetic pulse controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emp {
    /// Overlay frames to show before the pulse ends
    pub overlay_frames: u32,
    /// Overlay frames shown so far
    pub shown: u32,
    /// Whether the overlay is drawn this tick
    pub overlay_visible: bool,
}

impl Emp {
    /// Fire the pulse: every current enemy stops dropping bombs and every
    /// current bomb slows down and turns harmless.
    pub fn trigger(enemies: &mut [Enemy], bombs: &mut [Bomb]) -> Self {
        for enemy in enemies.iter_mut() {
            enemy.disable();
        }
        for bomb in bombs.iter_mut() {
            bomb.disable();
        }
        log::info!(
            "EMP disabled {} enemies and {} bombs",
            enemies.len(),
            bombs.len()
        );
        Self {
            overlay_frames: EMP_OVERLAY_FRAMES,
            shown: 0,
            overlay_visible: false,
        }
    }

    /// Advance one tick. Returns false once the pulse is over.
    pub fn advance(&mut self) -> bool {
        if self.shown < self.overlay_frames {
            self.shown += 1;
            self.overlay_visible = true;
            true
        } else {
            self.overlay_visible = false;
            false
        }
    }
}
