//! Gated Recurrent Unit (GRU) Layer

use burn::config::Config;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use super::{check_input, check_mask, initial_state, mask_column, timestep};
use crate::activation::Activation;
use crate::cells::GRUCell;

/// Configuration to create a [`GRU`] layer.
#[derive(Config, Debug)]
pub struct GruConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    /// Nonlinearity for the candidate hidden state
    #[config(default = "Activation::Tanh")]
    pub activation: Activation,
    /// Nonlinearity for the update and reset gates
    #[config(default = "Activation::Sigmoid")]
    pub inner_activation: Activation,
}

impl GruConfig {
    /// Allocates `W_z, U_z, b_z, W_r, U_r, b_r, W_h, U_h, b_h` from `rng`.
    pub fn init<B: Backend, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        device: &B::Device,
    ) -> crate::Result<GRU<B>> {
        let cell = GRUCell::init(rng, self.input_size, self.hidden_size, device)?
            .with_activation(self.activation)
            .with_inner_activation(self.inner_activation);

        tracing::debug!(
            input_size = self.input_size,
            hidden_size = self.hidden_size,
            activation = %self.activation,
            inner_activation = %self.inner_activation,
            "initialized GRU"
        );

        Ok(GRU::new(cell))
    }
}

/// Result of a [`GRU::forward`] pass.
#[derive(Debug, Clone)]
pub struct GruOutput<B: Backend> {
    /// `[batch, max_length, hidden_size]`
    pub hidden: Tensor<B, 3>,
    /// `[batch, hidden_size]`
    pub last_hidden: Tensor<B, 2>,
}

/// GRU sequence layer.
#[derive(Module, Debug)]
pub struct GRU<B: Backend> {
    cell: GRUCell<B>,
}

impl<B: Backend> GRU<B> {
    pub fn new(cell: GRUCell<B>) -> Self {
        Self { cell }
    }

    pub fn cell(&self) -> &GRUCell<B> {
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
    /// Same contract as [`LSTM::forward`](super::LSTM::forward) without the
    /// cell state.
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        mask: Option<Tensor<B, 2>>,
        h0: Option<Tensor<B, 2>>,
    ) -> crate::Result<GruOutput<B>> {
        let device = input.device();

        let (batch_size, seq_len) = check_input(&input, self.input_size())?;
        check_mask(mask.as_ref(), batch_size, seq_len)?;
        let mut h = initial_state("h0", h0, batch_size, self.hidden_size(), &device)?;

        tracing::trace!(batch_size, seq_len, masked = mask.is_some(), "gru forward");

        let mut hidden_states = Vec::with_capacity(seq_len);
        for t in 0..seq_len {
            h = self
                .cell
                .step(timestep(&input, t), mask_column(mask.as_ref(), t), h);
            hidden_states.push(h.clone());
        }

        Ok(GruOutput {
            hidden: Tensor::stack(hidden_states, 1),
            last_hidden: h,
        })
    }
}
