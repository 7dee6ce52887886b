//! # Recurrent Cell Implementations
//!
//! Single-timestep cells. The sequence layers in [`crate::rnn`] drive them
//! over the time axis.
//!
//! | Cell | Gates | Parameters |
//! |------|-------|------------|
//! | [`LSTMCell`] | input, forget, candidate memory, output | 12 |
//! | [`GRUCell`] | update, reset, candidate | 9 |
//!
//! Every gate owns a [`Gate`] triple: a glorot-initialized input weight
//! `[input_size, hidden_size]`, an orthogonal recurrent weight
//! `[hidden_size, hidden_size]` and a zero bias `[hidden_size]`.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `x_t` | `[batch, input_size]` |
//! | `mask_t` | `[batch, 1]` |
//! | `h`, `c` | `[batch, hidden_size]` |

pub mod gate;
pub mod gru_cell;
pub mod lstm_cell;

pub use gate::Gate;
pub use gru_cell::GRUCell;
pub use lstm_cell::LSTMCell;

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// `mask * new + (1 - mask) * prev`, with `mask: [batch, 1]` broadcast over
/// the hidden dimension.
pub(crate) fn blend<B: Backend>(
    new: Tensor<B, 2>,
    prev: Tensor<B, 2>,
    mask: Tensor<B, 2>,
) -> Tensor<B, 2> {
    new * mask.clone() + prev * (mask.neg() + 1.0)
}
