use ::rand::Rng;

use crate::config;

/// Anything that maps the two sensory inputs to one control output.
pub trait Controller {
    fn compute(&self, inputs: [f32; config::NETWORK_INPUTS]) -> f32;
}

/// Layer sizes of a fully connected network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: Vec<usize>,
    pub outputs: usize,
}

impl Topology {
    /// The 2 -> [6] -> 1 shape every agent controller uses.
    pub fn agent_controller() -> Self {
        Self {
            inputs: config::NETWORK_INPUTS,
            hidden: config::NETWORK_HIDDEN.to_vec(),
            outputs: config::NETWORK_OUTPUTS,
        }
    }

    /// Layer sizes from input to output.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden.len() + 2);
        sizes.push(self.inputs);
        sizes.extend_from_slice(&self.hidden);
        sizes.push(self.outputs);
        sizes
    }

    pub fn weight_count(&self) -> usize {
        self.layer_sizes().windows(2).map(|w| w[0] * w[1]).sum()
    }
}

/// Multilayer perceptron with sigmoid activations and no biases.
#[derive(Clone, Debug, PartialEq)]
pub struct Mlp {
    sizes: Vec<usize>,
    /// Row-major per layer: [to * from_count + from].
    weights: Vec<f32>,
}

impl Mlp {
    pub fn random(topology: &Topology, rng: &mut impl Rng) -> Self {
        let weights = (0..topology.weight_count())
            .map(|_| rng.gen_range(-1.0..=1.0))
            .collect();
        Self {
            sizes: topology.layer_sizes(),
            weights,
        }
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    /// Forward pass over arbitrary-length input; returns the output layer.
    pub fn forward(&self, inputs: &[f32]) -> Vec<f32> {
        let mut activations: Vec<f32> = inputs.iter().take(self.sizes[0]).copied().collect();
        activations.resize(self.sizes[0], 0.0);

        let mut offset = 0;
        for layer in self.sizes.windows(2) {
            let (from_n, to_n) = (layer[0], layer[1]);
            let mut next = vec![0.0f32; to_n];
            for (to, out) in next.iter_mut().enumerate() {
                let row = &self.weights[offset + to * from_n..offset + (to + 1) * from_n];
                let sum: f32 = row.iter().zip(&activations).map(|(w, a)| w * a).sum();
                *out = sigmoid(sum);
            }
            offset += from_n * to_n;
            activations = next;
        }
        activations
    }
}

impl Controller for Mlp {
    fn compute(&self, inputs: [f32; config::NETWORK_INPUTS]) -> f32 {
        self.forward(&inputs).first().copied().unwrap_or(0.0)
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
