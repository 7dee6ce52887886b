//! A single gate's parameter triple.

use burn::module::{Module, Param};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use crate::error::{Result, RnnError};
use crate::init::{self, Initializer};

/// Input weight `W: [n_in, n_hidden]`, recurrent weight `U: [n_hidden, n_hidden]`
/// and bias `b: [n_hidden]` of one gate.
#[derive(Module, Debug)]
pub struct Gate<B: Backend> {
    w: Param<Tensor<B, 2>>,
    u: Param<Tensor<B, 2>>,
    b: Param<Tensor<B, 1>>,
}

impl<B: Backend> Gate<B> {
    /// Draws `W` with glorot, `U` with ortho and `b` with zeros, in that order.
    pub fn init<R: Rng + ?Sized>(
        rng: &mut R,
        n_in: usize,
        n_hidden: usize,
        device: &B::Device,
    ) -> Result<Self> {
        let w = init::weight_init(rng, Initializer::Glorot, &[n_in, n_hidden])?;
        let u = init::weight_init(rng, Initializer::Ortho, &[n_hidden, n_hidden])?;
        let b = init::weight_init(rng, Initializer::Zero, &[n_hidden])?;

        Ok(Self {
            w: init::param_2d(&w, device),
            u: init::param_2d(&u, device),
            b: init::param_1d(&b, device),
        })
    }

    /// Builds a gate from explicit tensors, checking that they agree on
    /// `n_in` and `n_hidden`.
    pub fn from_tensors(w: Tensor<B, 2>, u: Tensor<B, 2>, b: Tensor<B, 1>) -> Result<Self> {
        let [n_in, n_hidden] = w.dims();
        check_shape("U", &[n_hidden, n_hidden], &u.dims())?;
        check_shape("b", &[n_hidden], &b.dims())?;
        tracing::trace!(n_in, n_hidden, "gate from explicit tensors");

        Ok(Self {
            w: Param::from_tensor(w),
            u: Param::from_tensor(u),
            b: Param::from_tensor(b),
        })
    }

    /// Input weight `W`
    pub fn w(&self) -> Tensor<B, 2> {
        self.w.val()
    }

    /// Recurrent weight `U`
    pub fn u(&self) -> Tensor<B, 2> {
        self.u.val()
    }

    /// Bias `b`
    pub fn b(&self) -> Tensor<B, 1> {
        self.b.val()
    }

    pub fn n_in(&self) -> usize {
        self.w.val().dims()[0]
    }

    pub fn n_hidden(&self) -> usize {
        self.w.val().dims()[1]
    }

    /// `x·W + h·U + b` for `x: [batch, n_in]`, `h: [batch, n_hidden]`.
    pub fn preactivation(&self, x: Tensor<B, 2>, h: Tensor<B, 2>) -> Tensor<B, 2> {
        x.matmul(self.w.val()) + h.matmul(self.u.val()) + self.b.val().unsqueeze::<2>()
    }
}

pub(crate) fn check_shape(name: &str, expected: &[usize], got: &[usize]) -> Result<()> {
    if expected != got {
        return Err(RnnError::ParameterShapeMismatch {
            name: name.to_string(),
            expected: expected.to_vec(),
            got: got.to_vec(),
        });
    }
    Ok(())
}
