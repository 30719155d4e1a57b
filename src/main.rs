//! Beam Barrage entry point
//!
//! Usage: `beam-barrage [settings.json]`. Without an argument the path comes
//! from `BEAM_BARRAGE_CONFIG`, if set.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use beam_barrage::Settings;
use beam_barrage::autopilot::Autopilot;
use beam_barrage::game_loop::{
    Clock, FixedRateClock, GameLoop, Idle, InputSource, ManualClock, RunSummary,
};
use beam_barrage::renderer::MeshRenderer;
use beam_barrage::settings::CONFIG_ENV;
use beam_barrage::sim::GameState;

fn main() {
    env_logger::init();
    log::info!("Beam Barrage starting...");

    let config = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    let settings = Settings::load(config.as_deref());

    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("Seed: {}", seed);

    let state = GameState::from_settings(seed, &settings);
    let summary = if settings.autopilot {
        run_with_clock(state, Autopilot::new(seed), &settings)
    } else {
        run_with_clock(state, Idle, &settings)
    };

    match serde_json::to_string(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode run summary: {}", e),
    }
}

fn run_with_clock<I: InputSource>(state: GameState, input: I, settings: &Settings) -> RunSummary {
    if settings.realtime {
        run(state, input, FixedRateClock::new(settings.tick_period()), settings)
    } else {
        run(state, input, ManualClock::default(), settings)
    }
}

fn run<I: InputSource, C: Clock>(
    state: GameState,
    input: I,
    clock: C,
    settings: &Settings,
) -> RunSummary {
    let mut game = GameLoop::new(state, input, MeshRenderer::new(), clock)
        .with_max_ticks(settings.max_ticks)
        .with_defeat_pause(settings.defeat_pause());
    let summary = game.run();
    log::info!(
        "{} frames rendered, final {}",
        game.renderer().frames(),
        game.renderer().hud()
    );
    summary
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
