//! Fixed-rate driver
//!
//! One iteration polls input, runs a simulation tick and hands the resulting
//! scene to the renderer. Pacing is delegated to a [`Clock`] so headless runs
//! and tests can step without sleeping.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::consts::MAX_LAG_TICKS;
use crate::sim::{GameState, Scene, TickInput, TickOutcome, tick};

/// Supplies the input for each tick
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Consumes one scene per rendered tick
pub trait Renderer {
    fn render(&mut self, scene: &Scene);
}

/// Paces the loop
pub trait Clock {
    /// Block until the next tick is due
    fn wait_for_tick(&mut self);
    /// Hold the current frame
    fn pause(&mut self, duration: Duration);
}

/// No keys, no commands
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl InputSource for Idle {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        TickInput::default()
    }
}

/// Wall-clock pacing at a fixed period
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    period: Duration,
    next: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }
}

impl Clock for FixedRateClock {
    fn wait_for_tick(&mut self) {
        let now = Instant::now();
        let due = *self.next.get_or_insert(now);
        if now < due {
            std::thread::sleep(due - now);
            self.next = Some(due + self.period);
        } else if now - due > self.period * MAX_LAG_TICKS {
            // Too far behind: drop the backlog instead of bursting
            log::debug!("Clock resync, {:?} behind", now - due);
            self.next = Some(now + self.period);
        } else {
            self.next = Some(due + self.period);
        }
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
        self.next = None;
    }
}

/// Clock that never sleeps; counts what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pub ticks: u64,
    pub paused: Duration,
}

impl Clock for ManualClock {
    fn wait_for_tick(&mut self) {
        self.ticks += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Quit,
    Defeated,
    TickLimit,
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub outcome: EndReason,
    pub score: u64,
    pub ticks: u64,
    pub seed: u64,
}

/// Owns the game state and its collaborators for one run
pub struct GameLoop<I, R, C> {
    pub state: GameState,
    input: I,
    renderer: R,
    clock: C,
    max_ticks: Option<u64>,
    defeat_pause: Duration,
}

impl<I: InputSource, R: Renderer, C: Clock> GameLoop<I, R, C> {
    pub fn new(state: GameState, input: I, renderer: R, clock: C) -> Self {
        Self {
            state,
            input,
            renderer,
            clock,
            max_ticks: None,
            defeat_pause: Duration::from_millis(crate::consts::DEFEAT_PAUSE_MS),
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_defeat_pause(mut self, pause: Duration) -> Self {
        self.defeat_pause = pause;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run until quit, defeat or the tick limit
    pub fn run(&mut self) -> RunSummary {
        log::info!(
            "Run starting: seed {}, field {}x{}",
            self.state.seed,
            self.state.bounds.width,
            self.state.bounds.height
        );

        loop {
            if self.max_ticks.is_some_and(|max| self.state.tick >= max) {
                return self.finish(EndReason::TickLimit);
            }

            self.clock.wait_for_tick();
            let input = self.input.poll(&self.state);

            match tick(&mut self.state, &input) {
                TickOutcome::Continue => {
                    self.renderer.render(&Scene::capture(&self.state));
                }
                TickOutcome::Quit => {
                    return self.finish(EndReason::Quit);
                }
                TickOutcome::Defeated => {
                    self.renderer.render(&Scene::capture(&self.state));
                    self.clock.pause(self.defeat_pause);
                    return self.finish(EndReason::Defeated);
                }
            }
        }
    }

    fn finish(&self, outcome: EndReason) -> RunSummary {
        let summary = RunSummary {
            outcome,
            score: self.state.score.value(),
            ticks: self.state.tick,
            seed: self.state.seed,
        };
        log::info!(
            "Run ended ({:?}) after {} ticks, score {}",
            summary.outcome,
            summary.ticks,
            summary.score
        );
        summary
    }
}
