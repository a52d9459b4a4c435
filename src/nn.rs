//! Parameter containers composing graph leaves into small feedforward
//! networks.
//!
//! Everything here is a thin consumer of the engine in [`crate::graph`]: a
//! [`Neuron`] owns one leaf per weight plus a bias leaf, created exactly once
//! at construction, and each `forward` call chains `mul`/`add`/activation
//! calls into a fresh expression over those leaves. Training loops read
//! gradients off the parameter leaves after a backward pass and call
//! [`Module::zero_grad`] between steps.

use log::debug;
use rand::Rng;

use crate::graph::{Graph, Value};

/// Nonlinearity applied after a neuron's weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
  /// `max(x, 0)`
  Relu,
  /// Hyperbolic tangent.
  Tanh,
  /// No nonlinearity.
  Linear,
}

impl Activation {
  fn apply<'g>(self, x: Value<'g>) -> Value<'g> {
    match self {
      Activation::Relu => x.relu(),
      Activation::Tanh => x.tanh(),
      Activation::Linear => x,
    }
  }
}

/// Anything holding tunable parameter leaves.
pub trait Module<'g> {
  /// Every parameter leaf of this module, in a stable order.
  fn parameters(&self) -> Vec<Value<'g>>;

  /// Reset the gradient accumulator of every parameter leaf.
  ///
  /// Must run between independent backward passes that reuse these leaves,
  /// or gradients silently accumulate across steps.
  fn zero_grad(&self) {
    let params = self.parameters();
    if let Some(first) = params.first() {
      first.graph().zero_grad(params.iter().copied());
    }
  }
}

/// A single neuron: weighted sum of its inputs plus a bias, passed through
/// an activation.
pub struct Neuron<'g> {
  weights: Vec<Value<'g>>,
  bias: Value<'g>,
  activation: Activation,
}

impl<'g> Neuron<'g> {
  /// Create a neuron over `nin` inputs, weights drawn uniformly from
  /// (-1, 1) and a zero bias.
  pub fn new(graph: &'g Graph, nin: usize, activation: Activation, rng: &mut impl Rng) -> Self {
    let weights = (0..nin)
      .map(|_| graph.leaf(rng.gen_range(-1.0..1.0)))
      .collect();
    Neuron {
      weights,
      bias: graph.leaf(0.0),
      activation,
    }
  }

  /// Build `activation(sum_i w_i * x_i + b)` over the given inputs.
  pub fn forward(&self, inputs: &[Value<'g>]) -> Value<'g> {
    debug_assert_eq!(inputs.len(), self.weights.len());
    let mut act = self.bias;
    for (w, x) in self.weights.iter().zip(inputs) {
      act = act.add(&w.mul(x));
    }
    self.activation.apply(act)
  }
}

impl<'g> Module<'g> for Neuron<'g> {
  fn parameters(&self) -> Vec<Value<'g>> {
    let mut params = self.weights.clone();
    params.push(self.bias);
    params
  }
}

/// A layer of neurons sharing the same inputs.
pub struct Layer<'g> {
  neurons: Vec<Neuron<'g>>,
}

impl<'g> Layer<'g> {
  /// Create `nout` neurons over `nin` inputs each.
  pub fn new(
    graph: &'g Graph,
    nin: usize,
    nout: usize,
    activation: Activation,
    rng: &mut impl Rng,
  ) -> Self {
    Layer {
      neurons: (0..nout)
        .map(|_| Neuron::new(graph, nin, activation, rng))
        .collect(),
    }
  }

  /// One output per neuron.
  pub fn forward(&self, inputs: &[Value<'g>]) -> Vec<Value<'g>> {
    self.neurons.iter().map(|n| n.forward(inputs)).collect()
  }
}

impl<'g> Module<'g> for Layer<'g> {
  fn parameters(&self) -> Vec<Value<'g>> {
    self.neurons.iter().flat_map(|n| n.parameters()).collect()
  }
}

/// A multilayer perceptron: sequential [`Layer`]s sized `nin -> nouts[..]`,
/// with `hidden` applied everywhere except the final layer, which stays
/// linear.
pub struct Mlp<'g> {
  layers: Vec<Layer<'g>>,
}

impl<'g> Mlp<'g> {
  /// Create layers of the given widths.
  pub fn new(
    graph: &'g Graph,
    nin: usize,
    nouts: &[usize],
    hidden: Activation,
    rng: &mut impl Rng,
  ) -> Self {
    let mut layers = Vec::with_capacity(nouts.len());
    let mut prev = nin;
    for (i, &nout) in nouts.iter().enumerate() {
      let activation = if i + 1 == nouts.len() {
        Activation::Linear
      } else {
        hidden
      };
      layers.push(Layer::new(graph, prev, nout, activation, rng));
      prev = nout;
    }
    let mlp = Mlp { layers };
    debug!("mlp with {} parameters", mlp.parameters().len());
    mlp
  }

  /// Feed `inputs` through every layer in order.
  pub fn forward(&self, inputs: &[Value<'g>]) -> Vec<Value<'g>> {
    let mut xs = inputs.to_vec();
    for layer in &self.layers {
      xs = layer.forward(&xs);
    }
    xs
  }
}

impl<'g> Module<'g> for Mlp<'g> {
  fn parameters(&self) -> Vec<Value<'g>> {
    self.layers.iter().flat_map(|l| l.parameters()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn neuron_parameter_count_and_init() {
    let g = Graph::new();
    let mut rng = StdRng::seed_from_u64(1);
    let n = Neuron::new(&g, 3, Activation::Relu, &mut rng);
    let params = n.parameters();
    assert_eq!(params.len(), 4);
    // weights land in (-1, 1), bias starts at zero
    for w in &params[..3] {
      assert!(w.value() > -1.0 && w.value() < 1.0);
    }
    assert_eq!(params[3].value(), 0.0);
  }

  #[test]
  fn mlp_shapes() {
    let g = Graph::new();
    let mut rng = StdRng::seed_from_u64(2);
    let mlp = Mlp::new(&g, 3, &[4, 4, 1], Activation::Relu, &mut rng);
    // 3 inputs -> 4 -> 4 -> 1: (3+1)*4 + (4+1)*4 + (4+1)*1 parameters
    assert_eq!(mlp.parameters().len(), 41);

    let inputs = [g.leaf(2.0), g.leaf(3.0), g.leaf(-1.0)];
    let out = mlp.forward(&inputs);
    assert_eq!(out.len(), 1);
  }

  #[test]
  fn linear_neuron_is_just_the_weighted_sum() {
    let g = Graph::new();
    let mut rng = StdRng::seed_from_u64(3);
    let n = Neuron::new(&g, 2, Activation::Linear, &mut rng);
    let params = n.parameters();
    let (w0, w1, b) = (params[0].value(), params[1].value(), params[2].value());

    let out = n.forward(&[g.leaf(0.5), g.leaf(-2.0)]);
    assert!((out.value() - (w0 * 0.5 + w1 * -2.0 + b)).abs() < 1e-12);
  }

  #[test]
  fn zero_grad_clears_every_parameter() {
    let g = Graph::new();
    let mut rng = StdRng::seed_from_u64(4);
    let mlp = Mlp::new(&g, 2, &[3, 1], Activation::Tanh, &mut rng);

    let out = mlp.forward(&[g.leaf(1.0), g.leaf(-1.0)]);
    let loss = out[0].mul(&out[0]);
    loss.backward();
    assert!(mlp.parameters().iter().any(|p| p.grad() != 0.0));

    mlp.zero_grad();
    assert!(mlp.parameters().iter().all(|p| p.grad() == 0.0));
  }
}
