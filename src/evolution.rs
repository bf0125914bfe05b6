use ::rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config;
use crate::network::{Controller, Mlp, Topology};

/// Construction parameters handed to an engine on session reset.
#[derive(Clone, Debug)]
pub struct EngineParams {
    pub topology: Topology,
    pub population: usize,
    pub seed: u64,
}

/// Owns the network population across generations.
pub trait Evolution {
    type Net: Controller + Clone;

    fn create(params: EngineParams) -> Self
    where
        Self: Sized;

    /// Forget every generation; the next call to `next_generation` starts from scratch.
    fn restart(&mut self);

    /// Produce the next population, consuming the fitness recorded so far.
    fn next_generation(&mut self) -> Vec<Self::Net>;

    /// Record one fitness observation for `network`.
    fn network_score(&mut self, network: &Self::Net, score: u32);
}

#[derive(Clone, Debug)]
struct Genome {
    score: u32,
    network: Mlp,
}

/// Scored genomes of one generation, best first.
#[derive(Clone, Debug, Default)]
struct Generation {
    genomes: Vec<Genome>,
}

impl Generation {
    fn add(&mut self, genome: Genome) {
        // Equal scores keep insertion order.
        let at = self.genomes.partition_point(|g| g.score >= genome.score);
        self.genomes.insert(at, genome);
    }
}

/// Generational genetic algorithm over fixed-topology perceptrons.
pub struct NeuroEvolution {
    topology: Topology,
    population: usize,
    generations: Vec<Generation>,
    rng: ChaCha8Rng,
}

impl NeuroEvolution {
    fn random_network(&mut self) -> Mlp {
        Mlp::random(&self.topology, &mut self.rng)
    }

    fn first_generation(&mut self) -> Vec<Mlp> {
        (0..self.population).map(|_| self.random_network()).collect()
    }

    /// Uniform crossover of two parents followed by per-weight mutation.
    fn crossover(&mut self, a: &Mlp, b: &Mlp) -> Mlp {
        let mut child = a.clone();
        for (w, other) in child.weights_mut().iter_mut().zip(b.weights()) {
            if self.rng.gen::<f32>() <= 0.5 {
                *w = *other;
            }
        }
        self.mutate(&mut child);
        child
    }

    fn mutate(&mut self, network: &mut Mlp) {
        let range = config::MUTATION_RANGE;
        for w in network.weights_mut() {
            if self.rng.gen::<f32>() <= config::MUTATION_RATE {
                *w += self.rng.gen_range(-range..range);
            }
        }
    }

    fn breed(&mut self, ranked: &[Genome]) -> Vec<Mlp> {
        let population = self.population;
        let mut next: Vec<Mlp> = Vec::with_capacity(population);

        let elites = (config::ELITISM * population as f32).round() as usize;
        next.extend(ranked.iter().take(elites.min(population)).map(|g| g.network.clone()));

        let fresh = (config::RANDOM_BEHAVIOUR * population as f32).round() as usize;
        for _ in 0..fresh {
            if next.len() >= population {
                break;
            }
            let net = self.random_network();
            next.push(net);
        }

        if ranked.len() < 2 {
            // Not enough parents to pair up: mutate the survivor, or start over.
            while next.len() < population {
                let child = match ranked.first() {
                    Some(best) => {
                        let mut child = best.network.clone();
                        self.mutate(&mut child);
                        child
                    }
                    None => self.random_network(),
                };
                next.push(child);
            }
            return next;
        }

        // Pair every better-ranked genome with the `max`-th, widening the pool each round.
        let mut max = 0;
        while next.len() < population {
            for i in 0..max {
                for _ in 0..config::CHILDREN_PER_PAIR {
                    let child = self.crossover(&ranked[i].network, &ranked[max].network);
                    next.push(child);
                    if next.len() >= population {
                        return next;
                    }
                }
            }
            max += 1;
            if max >= ranked.len() {
                max = 0;
            }
        }
        next
    }
}

impl Evolution for NeuroEvolution {
    type Net = Mlp;

    fn create(params: EngineParams) -> Self {
        Self {
            topology: params.topology,
            population: params.population,
            generations: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(params.seed),
        }
    }

    fn restart(&mut self) {
        self.generations.clear();
    }

    fn next_generation(&mut self) -> Vec<Mlp> {
        let ranked = self.generations.last().map(|g| g.genomes.clone());
        let networks = match ranked {
            None => self.first_generation(),
            Some(ranked) => self.breed(&ranked),
        };
        // Only the generation being scored is kept.
        self.generations.clear();
        self.generations.push(Generation::default());
        networks
    }

    fn network_score(&mut self, network: &Mlp, score: u32) {
        if self.generations.is_empty() {
            self.generations.push(Generation::default());
        }
        if let Some(current) = self.generations.last_mut() {
            current.add(Genome {
                score,
                network: network.clone(),
            });
        }
    }
}
