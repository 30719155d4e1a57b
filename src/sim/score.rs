//! The shared score resource

use std::fmt;

use crate::consts::INITIAL_SCORE;

/// Run score. Spent on abilities, earned from kills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    value: u64,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(INITIAL_SCORE)
    }
}

impl Score {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn award(&mut self, points: u64) {
        self.value = self.value.saturating_add(points);
    }

    /// Deduct `cost` if affordable. Returns false and leaves the score alone otherwise.
    pub fn try_spend(&mut self, cost: u64) -> bool {
        match self.value.checked_sub(cost) {
            Some(rest) => {
                self.value = rest;
                true
            }
            None => false,
        }
    }

    /// Text shown by the score display
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}", self.value)
    }
}
