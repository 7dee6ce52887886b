//! # Sequence Layers
//!
//! [`LSTM`] and [`GRU`] run their cell over the time axis of a batch, carrying
//! the state from one timestep to the next. **These are the primary APIs.**
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rnn_cells::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let lstm: LSTM<Backend> = LstmConfig::new(16, 32).init(&mut rng, &device).unwrap();
//!
//! // [batch=4, max_length=10, features=16]
//! let input = Tensor::<Backend, 3>::zeros([4, 10, 16], &device);
//! let out = lstm.forward(input, None, None, None).unwrap();
//!
//! assert_eq!(out.hidden.dims(), [4, 10, 32]);
//! assert_eq!(out.last_cell.dims(), [4, 32]);
//! ```
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | input | `[batch, max_length, input_size]` |
//! | mask | `[batch, max_length]`, 1 = valid, 0 = padding |
//! | initial state | `[batch, hidden_size]`, zeros when `None` |
//! | state sequence | `[batch, max_length, hidden_size]` |
//! | final state | `[batch, hidden_size]` |
//!
//! ## Padding
//!
//! Where the mask is 0 the state is carried through unchanged, so for
//! left-aligned padding the final state equals the state at the last valid
//! timestep of each sequence:
//!
//! ```ignore
//! let out = gru.forward(input, Some(mask), None)?;
//! // out.last_hidden[b] == out.hidden[b, len_b - 1]
//! ```

pub mod gru;
pub mod lstm;

pub use gru::{GruConfig, GruOutput, GRU};
pub use lstm::{LstmConfig, LstmOutput, LSTM};

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::error::{Result, RnnError};

/// Checks the input feature size and returns `(batch_size, seq_len)`.
pub(crate) fn check_input<B: Backend>(
    input: &Tensor<B, 3>,
    input_size: usize,
) -> Result<(usize, usize)> {
    let [batch_size, seq_len, features] = input.dims();
    if features != input_size {
        return Err(RnnError::InputSizeMismatch {
            expected: input_size,
            got: features,
        });
    }
    if seq_len == 0 {
        return Err(RnnError::EmptySequence);
    }
    Ok((batch_size, seq_len))
}

pub(crate) fn check_mask<B: Backend>(
    mask: Option<&Tensor<B, 2>>,
    batch_size: usize,
    seq_len: usize,
) -> Result<()> {
    if let Some(mask) = mask {
        let dims = mask.dims();
        if dims != [batch_size, seq_len] {
            return Err(RnnError::MaskShapeMismatch {
                expected: [batch_size, seq_len],
                got: dims,
            });
        }
    }
    Ok(())
}

/// Returns the supplied initial state after a shape check, or zeros.
pub(crate) fn initial_state<B: Backend>(
    name: &'static str,
    state: Option<Tensor<B, 2>>,
    batch_size: usize,
    hidden_size: usize,
    device: &B::Device,
) -> Result<Tensor<B, 2>> {
    match state {
        Some(state) => {
            let dims = state.dims();
            if dims != [batch_size, hidden_size] {
                return Err(RnnError::StateShapeMismatch {
                    name,
                    expected: [batch_size, hidden_size],
                    got: dims,
                });
            }
            Ok(state)
        }
        None => Ok(Tensor::zeros([batch_size, hidden_size], device)),
    }
}

/// `input[:, t, :]` as `[batch, features]`.
pub(crate) fn timestep<B: Backend>(input: &Tensor<B, 3>, t: usize) -> Tensor<B, 2> {
    input.clone().narrow(1, t, 1).squeeze(1)
}

/// `mask[:, t]` as a `[batch, 1]` column.
pub(crate) fn mask_column<B: Backend>(mask: Option<&Tensor<B, 2>>, t: usize) -> Option<Tensor<B, 2>> {
    mask.map(|m| m.clone().narrow(1, t, 1))
}
