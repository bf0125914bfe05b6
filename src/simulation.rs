use ::rand::SeedableRng;
use macroquad::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::agent::Agent;
use crate::clock::RepeatingTask;
use crate::config::{self, Config};
use crate::error::{ConfigError, SimError};
use crate::evolution::{EngineParams, Evolution};
use crate::network::{Controller, Topology};
use crate::obstacle::ObstaclePair;
use crate::spawner::Spawner;
use crate::stats::GenerationHistory;
use crate::targeting;

/// All mutable session state, stepped by the simulation clock.
pub struct Game<E: Evolution> {
    pub config: Config,
    pub agents: Vec<Agent>,
    pub obstacles: Vec<ObstaclePair>,
    /// Controller for each agent, index-aligned with `agents`.
    pub generation: Vec<E::Net>,
    pub evolution: E,
    pub target: Vec2,
    pub score: u32,
    pub high_score: u32,
    pub generation_count: u32,
    pub paused: bool,
    pub background_x: f32,
    pub history: GenerationHistory,
    spawner: Spawner,
    clock: RepeatingTask,
    rng: ChaCha8Rng,
    resets: u64,
}

impl<E: Evolution> Game<E> {
    /// Validate `config`, reset the session and start the first generation.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let evolution = E::create(engine_params(&config, 0));
        let mut game = Self {
            agents: Vec::new(),
            obstacles: Vec::new(),
            generation: Vec::new(),
            evolution,
            target: targeting::INITIAL_TARGET,
            score: 0,
            high_score: 0,
            generation_count: 0,
            paused: false,
            background_x: 0.0,
            history: GenerationHistory::new(config::HISTORY_CAPACITY),
            spawner: Spawner::new(&config),
            clock: RepeatingTask::new(config.tick_interval()),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            resets: 0,
            config,
        };
        game.reset();
        game.restart();
        Ok(game)
    }

    /// Start a fresh session: new engine, no inherited population.
    pub fn reset(&mut self) {
        self.high_score = 0;
        self.generation.clear();
        self.generation_count = 0;
        self.history.clear();

        self.evolution = E::create(engine_params(&self.config, self.resets));
        self.evolution.restart();
        self.resets += 1;
        log::info!(
            "session reset: population {}, topology {:?}",
            self.config.population_size,
            Topology::agent_controller().layer_sizes()
        );
    }

    /// Begin the next generation with one fresh agent per network.
    pub fn restart(&mut self) {
        if self.generation_count > 0 {
            self.history.finish_generation(self.score);
        }

        self.agents.clear();
        self.obstacles.clear();

        self.generation = self.evolution.next_generation();
        self.agents = self.generation.iter().map(|_| Agent::new(&self.config)).collect();

        let previous_score = self.score;
        self.score = 0;
        self.background_x = 0.0;
        self.spawner.reset();
        self.generation_count += 1;
        log::info!(
            "generation {} started with {} agents (previous score {}, high score {})",
            self.generation_count,
            self.agents.len(),
            previous_score,
            self.high_score
        );
    }

    /// Reset followed by restart, as triggered from the UI.
    pub fn reset_session(&mut self) {
        self.reset();
        self.restart();
    }

    /// Feed frame time to the simulation clock and run every tick that came due.
    pub fn run_clock(&mut self, frame_time: f64) -> Result<u32, SimError> {
        self.clock.advance(frame_time.min(config::MAX_FRAME_TIME));
        let mut ticks = 0;
        while self.clock.fire_due() {
            self.update()?;
            self.clock.rearm(self.config.tick_interval());
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Interval of the next scheduled tick, in seconds.
    pub fn clock_interval(&self) -> f64 {
        self.clock.interval()
    }

    /// One simulation tick. Does nothing while paused.
    pub fn update(&mut self) -> Result<(), SimError> {
        if self.paused {
            return Ok(());
        }

        self.background_x += self.config.background_speed;

        // Agents steer by the target computed at the end of the previous tick.
        self.drive_agents();

        for pair in &mut self.obstacles {
            pair.update();
        }
        self.obstacles.retain(|pair| !pair.expired());

        self.score += 1;
        self.high_score = self.high_score.max(self.score);

        if let Some(pair) = self.spawner.step(&mut self.rng, &self.config) {
            log::debug!("spawned obstacle pair with gap at y = {}", pair.gap_top());
            self.obstacles.push(pair);
        }

        let alive = self.alive_count();
        match targeting::target_point(&self.obstacles, &self.config) {
            Ok(target) => self.target = target,
            // Nobody is left to steer and the restart below clears the field.
            Err(e) if alive == 0 => log::debug!("{e}"),
            Err(e) => return Err(e),
        }

        if alive == 0 {
            self.restart();
        }
        Ok(())
    }

    fn drive_agents(&mut self) {
        if self.agents.len() != self.generation.len() {
            log::warn!(
                "skipping agent control: {} agents but {} networks",
                self.agents.len(),
                self.generation.len()
            );
            return;
        }

        for (idx, (agent, network)) in self.agents.iter_mut().zip(&self.generation).enumerate() {
            if !agent.alive {
                continue;
            }

            let inputs = targeting::sensory_inputs(agent, self.target, &self.config);
            if network.compute(inputs) > config::FLAP_THRESHOLD {
                agent.flap();
            }
            agent.update(&self.obstacles);

            if !agent.alive {
                log::debug!("agent {idx} died at score {}", self.score);
                self.evolution.network_score(network, self.score);
                self.history.record_death(self.score);
            }
        }
    }

    /// Manual flap for every living agent; ignored while paused or when nobody is alive.
    pub fn flap_all(&mut self) {
        if self.paused || self.alive_count() == 0 {
            return;
        }
        for agent in self.agents.iter_mut().filter(|a| a.alive) {
            agent.flap();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }
}

fn engine_params(config: &Config, resets: u64) -> EngineParams {
    EngineParams {
        topology: Topology::agent_controller(),
        population: config.population_size,
        seed: config.seed.wrapping_add(resets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::NeuroEvolution;

    #[derive(Clone, Debug)]
    struct Constant(f32);

    impl Controller for Constant {
        fn compute(&self, _inputs: [f32; config::NETWORK_INPUTS]) -> f32 {
            self.0
        }
    }

    /// Hands out constant networks and records every call.
    struct Scripted {
        output: f32,
        population: usize,
        restarts: u32,
        generations_served: u32,
        scores: Vec<u32>,
    }

    impl Evolution for Scripted {
        type Net = Constant;

        fn create(params: EngineParams) -> Self {
            Self {
                output: 0.0,
                population: params.population,
                restarts: 0,
                generations_served: 0,
                scores: Vec::new(),
            }
        }

        fn restart(&mut self) {
            self.restarts += 1;
        }

        fn next_generation(&mut self) -> Vec<Constant> {
            self.generations_served += 1;
            vec![Constant(self.output); self.population]
        }

        fn network_score(&mut self, _network: &Constant, score: u32) {
            self.scores.push(score);
        }
    }

    fn game(population: usize) -> Game<Scripted> {
        Game::new(Config {
            population_size: population,
            ..Config::default()
        })
        .unwrap()
    }

    fn run_until_generation(game: &mut Game<Scripted>, generation: u32) -> u32 {
        let mut ticks = 0;
        while game.generation_count < generation {
            game.update().unwrap();
            ticks += 1;
            assert!(ticks < 10_000, "generation {generation} never started");
        }
        ticks
    }

    #[test]
    fn restart_spawns_one_agent_per_network() {
        let mut game = game(10);
        game.reset();
        assert_eq!(game.generation_count, 0);
        assert_eq!(game.evolution.restarts, 1);

        game.restart();
        assert_eq!(game.agents.len(), 10);
        assert_eq!(game.generation.len(), 10);
        assert_eq!(game.generation_count, 1);
        assert!(game.agents.iter().all(|a| a.alive));
        assert!(game.obstacles.is_empty());
        assert_eq!(game.score, 0);
    }

    #[test]
    fn first_tick_spawns_and_targets_the_gap_center() {
        let mut game = game(3);
        assert_eq!(game.target, targeting::INITIAL_TARGET);

        game.update().unwrap();
        assert_eq!(game.obstacles.len(), 1);
        let pair = &game.obstacles[0];
        assert_eq!(game.target.x, game.config.width + config::OBSTACLE_WIDTH / 2.0);
        assert_eq!(game.target.y, pair.gap_top() + game.config.gap_size / 2.0);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn never_flapping_agent_falls_and_is_scored_once() {
        let mut game = game(1);
        let ticks = run_until_generation(&mut game, 2);

        // Death happens before that tick's score increment.
        assert_eq!(game.evolution.scores, vec![ticks - 1]);
        assert_eq!(game.high_score, ticks);
        assert_eq!(game.score, 0);
        assert_eq!(game.history.best_fitness.last(), Some((ticks - 1) as f32));
    }

    #[test]
    fn simultaneous_deaths_restart_exactly_once() {
        let mut game = game(5);
        run_until_generation(&mut game, 2);

        assert_eq!(game.evolution.scores.len(), 5);
        assert!(game.evolution.scores.iter().all(|s| *s == game.evolution.scores[0]));
        // One generation at startup, one after the wipe.
        assert_eq!(game.evolution.generations_served, 2);
        assert_eq!(game.agents.len(), 5);
    }

    #[test]
    fn missing_pair_is_fatal_only_while_agents_live() {
        let mut game = game(2);
        game.update().unwrap();

        game.obstacles.clear();
        for agent in &mut game.agents {
            agent.alive = false;
        }
        game.update().unwrap();
        assert_eq!(game.generation_count, 2);

        game.update().unwrap();
        game.obstacles.clear();
        assert_eq!(
            game.update(),
            Err(SimError::NoUpcomingObstacle {
                agent_x: game.config.agent_x,
                pairs: 0,
            })
        );
    }

    #[test]
    fn always_flapping_agents_hit_the_ceiling() {
        let mut game = game(2);
        game.evolution.output = 1.0;
        game.restart();
        assert_eq!(game.generation_count, 2);

        let ticks = run_until_generation(&mut game, 3);
        assert!(ticks < 100);
        assert_eq!(game.evolution.scores.len(), 2);
    }

    #[test]
    fn pause_freezes_and_resumes_state() {
        let mut game = game(4);
        for _ in 0..10 {
            game.update().unwrap();
        }

        game.toggle_pause();
        let score = game.score;
        let agents = game.agents.clone();
        let obstacles = game.obstacles.clone();
        let target = game.target;

        // The clock keeps firing; the ticks are no-ops.
        let fired = game.run_clock(0.05).unwrap();
        assert!(fired > 0);
        for _ in 0..50 {
            game.update().unwrap();
        }
        game.flap_all();

        assert_eq!(game.score, score);
        assert_eq!(game.agents, agents);
        assert_eq!(game.obstacles, obstacles);
        assert_eq!(game.target, target);

        game.toggle_pause();
        game.update().unwrap();
        assert_eq!(game.score, score + 1);
    }

    #[test]
    fn length_mismatch_skips_agent_control() {
        let mut game = game(3);
        let extra = Agent::new(&game.config);
        game.agents.push(extra);
        let before = game.agents.clone();

        game.update().unwrap();
        assert_eq!(game.agents, before);
        assert_eq!(game.score, 1);
        assert_eq!(game.obstacles.len(), 1);
        assert!(game.evolution.scores.is_empty());
    }

    #[test]
    fn high_score_never_decreases_across_generations() {
        let mut game = game(2);
        let mut last_high = 0;
        let mut last_generation = game.generation_count;

        while game.generation_count < 5 {
            game.update().unwrap();
            assert!(game.high_score >= last_high);
            last_high = game.high_score;
            if game.generation_count != last_generation {
                assert_eq!(game.score, 0);
                last_generation = game.generation_count;
            }
        }
        assert_eq!(game.history.final_scores.len(), 4);
    }

    #[test]
    fn speed_change_applies_from_the_next_scheduled_tick() {
        let mut game = game(2);
        let base = game.clock_interval();
        assert!((base - 1.0 / 60.0).abs() < 1e-12);

        assert_eq!(game.run_clock(base).unwrap(), 1);

        game.config.set_speed_multiplier(2.0);
        // Already armed with the old interval.
        assert_eq!(game.clock_interval(), base);
        assert_eq!(game.run_clock(base / 2.0).unwrap(), 0);
        assert_eq!(game.run_clock(base / 2.0).unwrap(), 1);

        assert!((game.clock_interval() - base / 2.0).abs() < 1e-12);
        assert_eq!(game.run_clock(base / 2.0).unwrap(), 1);
        assert_eq!(game.score, 3);
    }

    #[test]
    fn reset_clears_high_score_and_generation_count() {
        let mut game = game(2);
        run_until_generation(&mut game, 3);
        assert!(game.high_score > 0);

        game.reset_session();
        assert_eq!(game.high_score, 0);
        assert_eq!(game.generation_count, 1);
        assert_eq!(game.evolution.restarts, 1);
        assert_eq!(game.history.final_scores.len(), 0);
    }

    #[test]
    fn manual_flap_only_moves_living_agents() {
        let mut game = game(2);
        game.agents[1].alive = false;
        game.flap_all();
        assert_eq!(game.agents[0].velocity, game.config.flap_velocity);
        assert_eq!(game.agents[1].velocity, 0.0);
    }

    #[test]
    fn evolved_session_keeps_agents_and_networks_aligned() {
        let mut game: Game<NeuroEvolution> = Game::new(Config {
            population_size: 12,
            ..Config::default()
        })
        .unwrap();

        for _ in 0..3000 {
            game.update().unwrap();
            assert_eq!(game.agents.len(), game.generation.len());
        }
        assert!(game.generation_count >= 1);
    }
}
