//! Run settings
//!
//! Read from a JSON file, with a couple of environment overrides on top.
//! Missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bounds;

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "BEAM_BARRAGE_CONFIG";
/// Overrides [`Settings::seed`]
pub const SEED_ENV: &str = "BEAM_BARRAGE_SEED";
/// Overrides [`Settings::max_ticks`]
pub const MAX_TICKS_ENV: &str = "BEAM_BARRAGE_MAX_TICKS";

/// Why settings could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: u32,
    pub field_height: u32,

    // === Timing ===
    /// Ticks per second
    pub tick_rate: u32,
    /// Pause after the defeat frame, in milliseconds
    pub defeat_pause_ms: u64,
    /// Sleep between ticks; off runs as fast as possible
    pub realtime: bool,
    /// Stop after this many ticks (headless runs)
    pub max_ticks: Option<u64>,

    // === Gameplay ===
    /// RNG seed; a time-derived seed when unset
    pub seed: Option<u64>,
    /// Beams per spread shot
    pub spread_beams: usize,

    // === Input ===
    /// Let the demo pilot play
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH as u32,
            field_height: FIELD_HEIGHT as u32,

            tick_rate: TICK_RATE,
            defeat_pause_ms: DEFEAT_PAUSE_MS,
            realtime: true,
            max_ticks: None,

            seed: None,
            spread_beams: DEFAULT_SPREAD_BEAMS,

            autopilot: true,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings from `path` if given, then apply environment overrides.
    ///
    /// Any failure falls back to defaults with a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let mut settings = match path {
            Some(path) => match Self::load_from(path) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("{}; using default settings", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.apply_env_overrides();
        settings
    }

    /// Apply `BEAM_BARRAGE_*` environment overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparsable values are skipped.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(SEED_ENV) {
            match val.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring {}={:?}: not a u64", SEED_ENV, val),
            }
        }
        if let Some(val) = lookup(MAX_TICKS_ENV) {
            match val.trim().parse() {
                Ok(ticks) => self.max_ticks = Some(ticks),
                Err(_) => log::warn!("Ignoring {}={:?}: not a u64", MAX_TICKS_ENV, val),
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.field_width == 0 || self.field_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "field must be non-empty, got {}x{}",
                self.field_width, self.field_height
            )));
        }
        if (self.field_width as f32) < AVATAR_SIZE.x || (self.field_height as f32) < AVATAR_SIZE.y {
            return Err(SettingsError::Invalid(format!(
                "field {}x{} is smaller than the avatar",
                self.field_width, self.field_height
            )));
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::Invalid("tick rate must be positive".into()));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.field_width as f32, self.field_height as f32)
    }

    /// Wall-clock length of one tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    pub fn defeat_pause(&self) -> Duration {
        Duration::from_millis(self.defeat_pause_ms)
    }
}
