//! Pluggable nonlinearities for the recurrent layers.
//!
//! Every layer carries two of them: the state `activation` (default tanh) applied
//! to the candidate memory and the output state, and the `inner_activation`
//! (default logistic sigmoid) applied to the gates.

use std::fmt;
use std::str::FromStr;

use burn::constant;
use burn::tensor::activation;
use burn::tensor::{backend::Backend, Tensor};

use crate::error::{Result, RnnError};

/// Element-wise activation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Hyperbolic tangent
    #[default]
    Tanh,
    /// Logistic sigmoid `1 / (1 + exp(-x))`
    Sigmoid,
    /// Piecewise-linear sigmoid `clamp(0.2 * x + 0.5, 0, 1)`
    HardSigmoid,
    /// `max(0, x)`
    Relu,
    Gelu,
    Silu,
    /// `1.7159 * tanh(0.666 * x)`, see [`LeCun`]
    LecunTanh,
    /// Identity
    Linear,
}

impl Activation {
    /// Applies the activation element-wise to a tensor of any rank.
    pub fn apply<B: Backend, const D: usize>(&self, x: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => activation::sigmoid(x),
            Activation::HardSigmoid => (x * 0.2f32 + 0.5f32).clamp(0.0f32, 1.0f32),
            Activation::Relu => activation::relu(x),
            Activation::Gelu => activation::gelu(x),
            Activation::Silu => activation::silu(x),
            Activation::LecunTanh => LeCun::forward(x),
            Activation::Linear => x,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Tanh => "tanh",
            Activation::Sigmoid => "sigmoid",
            Activation::HardSigmoid => "hard_sigmoid",
            Activation::Relu => "relu",
            Activation::Gelu => "gelu",
            Activation::Silu => "silu",
            Activation::LecunTanh => "lecun_tanh",
            Activation::Linear => "linear",
        }
    }
}

// Stored on cells as a non-trainable field.
constant!(Activation);

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = RnnError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tanh" => Ok(Activation::Tanh),
            "sigmoid" => Ok(Activation::Sigmoid),
            "hard_sigmoid" => Ok(Activation::HardSigmoid),
            "relu" => Ok(Activation::Relu),
            "gelu" => Ok(Activation::Gelu),
            "silu" => Ok(Activation::Silu),
            "lecun_tanh" => Ok(Activation::LecunTanh),
            "linear" => Ok(Activation::Linear),
            other => Err(RnnError::UnknownActivation(other.to_string())),
        }
    }
}

/// LeCun's tanh activation function.
///
/// `f(x) = 1.7159 * tanh(0.666 * x)`
///
/// The scaling keeps the function close to the identity near the origin while
/// the output saturates at roughly `±1.7159`.
///
/// # Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use burn::tensor::Tensor;
/// use rnn_cells::activation::LeCun;
///
/// type Backend = NdArray<f32>;
/// let device = Default::default();
///
/// let x = Tensor::<Backend, 1>::from_floats([0.0, 1.0, -1.0], &device);
/// let y = LeCun::forward(x);
/// ```
pub struct LeCun;

impl LeCun {
    pub fn forward<B: Backend, const D: usize>(x: Tensor<B, D>) -> Tensor<B, D> {
        let scaled = x * 0.666f32;
        scaled.tanh() * 1.7159f32
    }
}
