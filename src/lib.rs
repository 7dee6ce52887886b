//! # rnn-cells - gated recurrent layers on Burn
//!
//! LSTM and GRU layers for sequence modeling with padding masks, pluggable
//! activations and a fixed initialization policy.
//!
//! ## Features
//!
//! - **LSTM**: input, forget and output gates plus a candidate memory (12 parameters)
//! - **GRU**: update and reset gates plus a candidate state (9 parameters)
//! - **Masking**: padded timesteps carry the previous state through unchanged
//! - **Initialization**: glorot input weights, orthogonal recurrent weights, zero biases
//! - **Activations**: tanh / sigmoid by default, see [`activation::Activation`]
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
//! let mut rng = StdRng::seed_from_u64(1234);
//!
//! let gru: GRU<Backend> = GruConfig::new(4, 5).init(&mut rng, &device).unwrap();
//!
//! let input = Tensor::<Backend, 3>::ones([2, 3, 4], &device);
//! let mask = Tensor::<Backend, 2>::from_floats([[1.0, 1.0, 1.0], [1.0, 1.0, 0.0]], &device);
//! let out = gru.forward(input, Some(mask), None).unwrap();
//!
//! assert_eq!(out.hidden.dims(), [2, 3, 5]);
//! assert_eq!(out.last_hidden.dims(), [2, 5]);
//! ```

pub mod activation;
pub mod cells;
pub mod error;
pub mod init;
pub mod rnn;

pub use error::{Result, RnnError};

pub mod prelude {
    pub use crate::activation::Activation;
    pub use crate::cells::{GRUCell, Gate, LSTMCell};
    pub use crate::error::RnnError;
    pub use crate::init::{weight_init, Initializer};
    pub use crate::rnn::{GruConfig, GruOutput, LstmConfig, LstmOutput, GRU, LSTM};
}
