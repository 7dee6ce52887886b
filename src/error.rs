//! Error type shared by initializers, cells and layers.

use thiserror::Error;

/// Errors raised while constructing or invoking a recurrent layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RnnError {
    #[error("unknown initialization scheme `{0}` (expected glorot, ortho, zero or uniform)")]
    UnknownInitializer(String),
    #[error("unknown activation `{0}`")]
    UnknownActivation(String),
    #[error("shape {shape:?} cannot be initialized with the {scheme} scheme")]
    InvalidShape { scheme: &'static str, shape: Vec<usize> },
    #[error("orthogonal initialization needs a square shape, got {shape:?}")]
    NonSquareOrthogonal { shape: Vec<usize> },
    #[error("parameter {name}: expected shape {expected:?}, got {got:?}")]
    ParameterShapeMismatch {
        name: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("input feature size mismatch: expected {expected}, got {got}")]
    InputSizeMismatch { expected: usize, got: usize },
    #[error("mask shape mismatch: expected {expected:?}, got {got:?}")]
    MaskShapeMismatch { expected: [usize; 2], got: [usize; 2] },
    #[error("initial state {name}: expected shape {expected:?}, got {got:?}")]
    StateShapeMismatch {
        name: &'static str,
        expected: [usize; 2],
        got: [usize; 2],
    },
    #[error("input sequence has no timesteps")]
    EmptySequence,
    #[error("singular value decomposition failed: {0}")]
    Decomposition(String),
}

pub type Result<T> = std::result::Result<T, RnnError>;
