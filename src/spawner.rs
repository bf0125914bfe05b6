use ::rand::Rng;

use crate::config::{self, Config};
use crate::obstacle::ObstaclePair;

/// Emits an obstacle pair every `spawn_rate_period` seconds of simulated time.
#[derive(Clone, Debug)]
pub struct Spawner {
    counter: u32,
    period_ticks: u32,
}

impl Spawner {
    pub fn new(config: &Config) -> Self {
        Self {
            counter: 0,
            period_ticks: config.spawn_period_ticks().unwrap_or(1).max(1),
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Advance one tick. Returns a new pair on ticks where the counter sits at zero.
    pub fn step(&mut self, rng: &mut impl Rng, config: &Config) -> Option<ObstaclePair> {
        let spawned = (self.counter == 0).then(|| ObstaclePair::spawn(sample_gap(rng, config), config));

        self.counter += 1;
        if self.counter == self.period_ticks {
            self.counter = 0;
        }
        spawned
    }
}

/// Top edge of a new gap, a whole pixel in `[SPAWN_MARGIN, height - 2*SPAWN_MARGIN - gap_size]`.
pub fn sample_gap(rng: &mut impl Rng, config: &Config) -> f32 {
    let low = config::SPAWN_MARGIN as i32;
    let high = (config.gap_spawn_max().floor() as i32).max(low);
    rng.gen_range(low..=high) as f32
}
