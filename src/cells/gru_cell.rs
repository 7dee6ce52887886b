//! Gated Recurrent Unit cell.

use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use super::blend;
use super::gate::Gate;
use crate::activation::Activation;
use crate::error::{Result, RnnError};

/// GRU cell holding the 9 parameter tensors of its three gates.
///
/// - z = inner(x·W_z + h·U_z + b_z)
/// - r = inner(x·W_r + h·U_r + b_r)
/// - g = act(x·W_h + (r * h)·U_h + b_h)
/// - h' = (1 - z) * g + z * h
#[derive(Module, Debug)]
pub struct GRUCell<B: Backend> {
    /// Update gate (`W_z`, `U_z`, `b_z`)
    update_gate: Gate<B>,
    /// Reset gate (`W_r`, `U_r`, `b_r`)
    reset_gate: Gate<B>,
    /// Candidate hidden state (`W_h`, `U_h`, `b_h`)
    candidate: Gate<B>,
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
    #[module(skip)]
    activation: Activation,
    #[module(skip)]
    inner_activation: Activation,
}

impl<B: Backend> GRUCell<B> {
    /// Initializes the gates in order update, reset, candidate.
    pub fn init<R: Rng + ?Sized>(
        rng: &mut R,
        input_size: usize,
        hidden_size: usize,
        device: &B::Device,
    ) -> Result<Self> {
        let update_gate = Gate::init(rng, input_size, hidden_size, device)?;
        let reset_gate = Gate::init(rng, input_size, hidden_size, device)?;
        let candidate = Gate::init(rng, input_size, hidden_size, device)?;

        Self::from_gates(update_gate, reset_gate, candidate)
    }

    pub fn from_gates(update_gate: Gate<B>, reset_gate: Gate<B>, candidate: Gate<B>) -> Result<Self> {
        let input_size = update_gate.n_in();
        let hidden_size = update_gate.n_hidden();
        for (name, gate) in [("W_r", &reset_gate), ("W_h", &candidate)] {
            if gate.n_in() != input_size || gate.n_hidden() != hidden_size {
                return Err(RnnError::ParameterShapeMismatch {
                    name: name.to_string(),
                    expected: vec![input_size, hidden_size],
                    got: vec![gate.n_in(), gate.n_hidden()],
                });
            }
        }

        Ok(Self {
            update_gate,
            reset_gate,
            candidate,
            input_size,
            hidden_size,
            activation: Activation::Tanh,
            inner_activation: Activation::Sigmoid,
        })
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_inner_activation(mut self, inner_activation: Activation) -> Self {
        self.inner_activation = inner_activation;
        self
    }

    pub fn update_gate(&self) -> &Gate<B> {
        &self.update_gate
    }

    pub fn reset_gate(&self) -> &Gate<B> {
        &self.reset_gate
    }

    pub fn candidate(&self) -> &Gate<B> {
        &self.candidate
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn inner_activation(&self) -> Activation {
        self.inner_activation
    }

    /// Parameter names and shapes, in allocation order.
    pub fn named_parameters(&self) -> Vec<(&'static str, Vec<usize>)> {
        let (n_in, n_h) = (self.input_size, self.hidden_size);
        [("W_z", "U_z", "b_z"), ("W_r", "U_r", "b_r"), ("W_h", "U_h", "b_h")]
            .into_iter()
            .flat_map(|(w, u, b)| [(w, vec![n_in, n_h]), (u, vec![n_h, n_h]), (b, vec![n_h])])
            .collect()
    }

    /// Advance one timestep.
    ///
    /// `x_t` is `[batch, input_size]`, `h_prev` is `[batch, hidden_size]` and the
    /// optional `mask_t` is `[batch, 1]`. Rows whose mask is 0 keep `h_prev`.
    pub fn step(
        &self,
        x_t: Tensor<B, 2>,
        mask_t: Option<Tensor<B, 2>>,
        h_prev: Tensor<B, 2>,
    ) -> Tensor<B, 2> {
        let z = self
            .inner_activation
            .apply(self.update_gate.preactivation(x_t.clone(), h_prev.clone()));
        let r = self
            .inner_activation
            .apply(self.reset_gate.preactivation(x_t.clone(), h_prev.clone()));
        let g = self
            .activation
            .apply(self.candidate.preactivation(x_t, r * h_prev.clone()));
        let h = (z.clone().neg() + 1.0) * g + z * h_prev.clone();

        match mask_t {
            Some(mask) => blend(h, h_prev, mask),
            None => h,
        }
    }
}
