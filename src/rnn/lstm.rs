//! Long Short-Term Memory (LSTM) Layer
//!
//! Runs an [`LSTMCell`] over a padded batch of sequences, optionally masked.

use burn::config::Config;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use super::{check_input, check_mask, initial_state, mask_column, timestep};
use crate::activation::Activation;
use crate::cells::LSTMCell;

/// Configuration to create an [`LSTM`] layer.
#[derive(Config, Debug)]
pub struct LstmConfig {
    /// Number of input features (`n_in`)
    pub input_size: usize,
    /// Number of hidden units (`n_hidden`)
    pub hidden_size: usize,
    /// Nonlinearity for the candidate memory and the output state
    #[config(default = "Activation::Tanh")]
    pub activation: Activation,
    /// Nonlinearity for the input, forget and output gates
    #[config(default = "Activation::Sigmoid")]
    pub inner_activation: Activation,
}

impl LstmConfig {
    /// Allocates the 12 parameter tensors from `rng`.
    ///
    /// Parameters are drawn in the order
    /// `W_i, U_i, b_i, W_f, U_f, b_f, W_c, U_c, b_c, W_o, U_o, b_o`, so the same
    /// seed always yields the same layer.
    pub fn init<B: Backend, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        device: &B::Device,
    ) -> crate::Result<LSTM<B>> {
        let cell = LSTMCell::init(rng, self.input_size, self.hidden_size, device)?
            .with_activation(self.activation)
            .with_inner_activation(self.inner_activation);

        tracing::debug!(
            input_size = self.input_size,
            hidden_size = self.hidden_size,
            activation = %self.activation,
            inner_activation = %self.inner_activation,
            "initialized LSTM"
        );

        Ok(LSTM::new(cell))
    }
}

/// Result of an [`LSTM::forward`] pass.
#[derive(Debug, Clone)]
pub struct LstmOutput<B: Backend> {
    /// Hidden state at every timestep: `[batch, max_length, hidden_size]`
    pub hidden: Tensor<B, 3>,
    /// Cell state at every timestep: `[batch, max_length, hidden_size]`
    pub cell: Tensor<B, 3>,
    /// Hidden state after the last timestep: `[batch, hidden_size]`
    pub last_hidden: Tensor<B, 2>,
    /// Cell state after the last timestep: `[batch, hidden_size]`
    pub last_cell: Tensor<B, 2>,
}

/// LSTM sequence layer.
#[derive(Module, Debug)]
pub struct LSTM<B: Backend> {
    cell: LSTMCell<B>,
}

impl<B: Backend> LSTM<B> {
    /// Wrap an already built cell, e.g. one assembled with
    /// [`LSTMCell::from_gates`].
    pub fn new(cell: LSTMCell<B>) -> Self {
        Self { cell }
    }

    pub fn cell(&self) -> &LSTMCell<B> {
        &self.cell
    }

    pub fn input_size(&self) -> usize {
        self.cell.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.cell.hidden_size()
    }

    /// Forward pass over a batch of sequences.
    ///
    /// # Arguments
    /// * `input` - `[batch, max_length, input_size]`
    /// * `mask` - Optional `[batch, max_length]` of 0/1; padded timesteps keep
    ///   the previous `(h, c)`
    /// * `h0`, `c0` - Optional initial states `[batch, hidden_size]`, zeros if `None`
    ///
    /// # Errors
    /// Fails before computing anything if the feature size, mask shape or
    /// initial state shapes disagree with the layer and the batch, or if
    /// `max_length` is 0.
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        mask: Option<Tensor<B, 2>>,
        h0: Option<Tensor<B, 2>>,
        c0: Option<Tensor<B, 2>>,
    ) -> crate::Result<LstmOutput<B>> {
        let device = input.device();
        let hidden_size = self.hidden_size();

        let (batch_size, seq_len) = check_input(&input, self.input_size())?;
        check_mask(mask.as_ref(), batch_size, seq_len)?;
        let mut h = initial_state("h0", h0, batch_size, hidden_size, &device)?;
        let mut c = initial_state("c0", c0, batch_size, hidden_size, &device)?;

        tracing::trace!(batch_size, seq_len, masked = mask.is_some(), "lstm forward");

        let mut hidden_states = Vec::with_capacity(seq_len);
        let mut cell_states = Vec::with_capacity(seq_len);

        for t in 0..seq_len {
            let x_t = timestep(&input, t);
            let mask_t = mask_column(mask.as_ref(), t);

            (h, c) = self.cell.step(x_t, mask_t, (h, c));

            hidden_states.push(h.clone());
            cell_states.push(c.clone());
        }

        Ok(LstmOutput {
            hidden: Tensor::stack(hidden_states, 1),
            cell: Tensor::stack(cell_states, 1),
            last_hidden: h,
            last_cell: c,
        })
    }
}
