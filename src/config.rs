// Compile-time tunables plus the per-run `Config` value object.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input;

// Spawner
/// Minimum distance between a gap and the top/bottom playfield edge.
pub const SPAWN_MARGIN: f32 = 50.0;

// Network topology: 2 inputs, one hidden layer of 6, 1 output
pub const NETWORK_INPUTS: usize = 2;
pub const NETWORK_HIDDEN: &[usize] = &[6];
pub const NETWORK_OUTPUTS: usize = 1;
pub const FLAP_THRESHOLD: f32 = 0.5;

// Evolution
pub const ELITISM: f32 = 0.2;
pub const RANDOM_BEHAVIOUR: f32 = 0.2;
pub const MUTATION_RATE: f32 = 0.1;
pub const MUTATION_RANGE: f32 = 0.5;
pub const CHILDREN_PER_PAIR: usize = 1;

// Sprites (px)
pub const AGENT_WIDTH: f32 = 34.0;
pub const AGENT_HEIGHT: f32 = 24.0;
pub const OBSTACLE_WIDTH: f32 = 52.0;
pub const OBSTACLE_HEIGHT: f32 = 320.0;
pub const BACKGROUND_TILE_WIDTH: f32 = 288.0;

// Timing
/// Frame time is clamped to this before feeding the simulation clock.
pub const MAX_FRAME_TIME: f64 = 0.1;
pub const MIN_SPEED_MULTIPLIER: f32 = 0.25;
pub const MAX_SPEED_MULTIPLIER: f32 = 10.0;

// HUD
pub const FONT_SIZE: f32 = 20.0;
pub const TEXT_LINE_WIDTH: f32 = 2.0;

// Stats
pub const HISTORY_CAPACITY: usize = 500;

/// Action -> key name. `None` leaves the action unbound; manual flapping is
/// off unless a key is configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybinds {
    pub flap: Option<String>,
    pub pause: Option<String>,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            flap: None,
            pause: Some("P".to_string()),
        }
    }
}

/// Settings for one run. Only `speed_multiplier` and `debug_mode` change
/// after startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub tps: u32,
    pub speed_multiplier: f32,
    pub population_size: usize,
    pub gap_size: f32,
    /// Seconds of simulated time between obstacle spawns.
    pub spawn_rate_period: f32,
    pub agent_x: f32,
    pub obstacle_speed: f32,
    pub background_speed: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub keybinds: Keybinds,
    pub debug_mode: bool,
    pub animate_agent: bool,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 512.0,
            tps: 60,
            speed_multiplier: 1.0,
            population_size: 50,
            gap_size: 120.0,
            spawn_rate_period: 1.5,
            agent_x: 80.0,
            obstacle_speed: 3.0,
            background_speed: 0.5,
            gravity: 0.3,
            flap_velocity: -6.0,
            keybinds: Keybinds::default(),
            debug_mode: false,
            animate_agent: true,
            seed: 42,
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "playfield must have positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.tps == 0 {
            return Err(ConfigError::Invalid("tps must be positive".to_string()));
        }
        if !(self.speed_multiplier > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "speed_multiplier must be positive, got {}",
                self.speed_multiplier
            )));
        }
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be at least 1".to_string()));
        }
        if !(self.gap_size > 0.0) || self.gap_spawn_max() < SPAWN_MARGIN {
            return Err(ConfigError::GapTooLarge {
                gap_size: self.gap_size,
                height: self.height,
            });
        }
        if self.spawn_period_ticks().is_none() {
            return Err(ConfigError::Invalid(format!(
                "spawn_rate_period {}s is not a whole number of ticks at {} tps",
                self.spawn_rate_period, self.tps
            )));
        }
        if !(self.agent_x >= 0.0 && self.agent_x < self.width) {
            return Err(ConfigError::Invalid(format!(
                "agent_x {} lies outside the playfield",
                self.agent_x
            )));
        }
        if !(self.obstacle_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "obstacle_speed must be positive, got {}",
                self.obstacle_speed
            )));
        }
        // A pair must still be ahead of the agents when the next one spawns.
        let travel = self.width + OBSTACLE_WIDTH - self.agent_x;
        if let Some(period) = self.spawn_period_ticks() {
            if period as f32 * self.obstacle_speed >= travel {
                return Err(ConfigError::Invalid(format!(
                    "obstacles spawned every {period} ticks at speed {} pass x = {} before the next one appears",
                    self.obstacle_speed, self.agent_x
                )));
            }
        }
        for name in [&self.keybinds.flap, &self.keybinds.pause].into_iter().flatten() {
            if input::parse_key(name).is_none() {
                return Err(ConfigError::UnknownKey(name.clone()));
            }
        }
        Ok(())
    }

    /// Seconds between two simulation ticks at the current speed.
    pub fn tick_interval(&self) -> f64 {
        1.0 / (self.tps as f64 * self.speed_multiplier as f64)
    }

    /// Spawn cadence in ticks, if it is a positive integer.
    pub fn spawn_period_ticks(&self) -> Option<u32> {
        let ticks = self.spawn_rate_period * self.tps as f32;
        let rounded = ticks.round();
        if rounded >= 1.0 && (ticks - rounded).abs() < 1e-3 {
            Some(rounded as u32)
        } else {
            None
        }
    }

    /// Upper bound (inclusive) of a gap's top edge.
    pub fn gap_spawn_max(&self) -> f32 {
        self.height - 2.0 * SPAWN_MARGIN - self.gap_size
    }

    pub fn set_speed_multiplier(&mut self, speed: f32) {
        self.speed_multiplier = speed.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    }
}

/// Command line options.
#[derive(Parser, Clone, Debug, Default, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// JSON config file; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for obstacle placement and the first population
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CliArgs {
    /// Defaults, overridden by the config file and then by `--seed`.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_period_ticks(), Some(90));
    }

    #[test]
    fn oversized_gap_is_rejected() {
        let config = Config {
            gap_size: 512.0 - 2.0 * SPAWN_MARGIN,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::GapTooLarge { .. })));

        let config = Config {
            gap_size: 512.0 - 3.0 * SPAWN_MARGIN + 1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            gap_size: 512.0 - 3.0 * SPAWN_MARGIN,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fractional_spawn_period_is_rejected() {
        let config = Config {
            spawn_rate_period: 1.01,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.spawn_period_ticks(), None);
    }

    #[test]
    fn tick_interval_tracks_speed_multiplier() {
        let mut config = Config::default();
        let base = config.tick_interval();
        assert!((base - 1.0 / 60.0).abs() < 1e-12);

        config.set_speed_multiplier(2.0);
        assert!((config.tick_interval() - base / 2.0).abs() < 1e-12);

        config.set_speed_multiplier(1000.0);
        assert_eq!(config.speed_multiplier, MAX_SPEED_MULTIPLIER);
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config =
            Config::from_json(r#"{ "population_size": 10, "keybinds": { "flap": null } }"#).unwrap();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.keybinds.flap, None);
        assert_eq!(config.keybinds.pause, Some("P".to_string()));
        assert_eq!(config.width, Config::default().width);
    }

    #[test]
    fn unknown_key_name_is_rejected() {
        let err = Config::from_json(r#"{ "keybinds": { "pause": "NotAKey" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(name) if name == "NotAKey"));
    }

    #[test]
    fn stationary_obstacles_are_rejected() {
        let config = Config {
            obstacle_speed: 0.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn spawn_gap_must_keep_a_pair_ahead_of_the_agents() {
        // 180 ticks * 3 px outruns the 472 px a pair travels before passing agent_x.
        let config = Config {
            spawn_rate_period: 3.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = Config {
            spawn_rate_period: 3.0,
            obstacle_speed: 2.5,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn manual_flap_is_unbound_by_default() {
        let keybinds = Keybinds::default();
        assert_eq!(keybinds.flap, None);
        assert_eq!(keybinds.pause, Some("P".to_string()));
    }

    #[test]
    fn cli_parses_config_and_seed() {
        let cli = CliArgs::try_parse_from(["flapgen", "--seed", "7", "--config", "run.json"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.config, Some(PathBuf::from("run.json")));

        assert!(CliArgs::try_parse_from(["flapgen", "--seed"]).is_err());
        assert!(CliArgs::try_parse_from(["flapgen", "--seed", "x"]).is_err());
        assert!(CliArgs::try_parse_from(["flapgen", "--fast"]).is_err());
    }

    #[test]
    fn seed_flag_overrides_default() {
        let cli = CliArgs {
            config: None,
            seed: Some(99),
        };
        let config = cli.load_config().unwrap();
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn missing_config_file_reports_path() {
        let err = Config::load("/nonexistent/flapgen.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { ref path, .. } if path.contains("flapgen.json")));
    }
}
