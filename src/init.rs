//! Weight initialization schemes.
//!
//! | Scheme | Distribution | Used for |
//! |--------|--------------|----------|
//! | `glorot` | `U(-s, s)`, `s = sqrt(6 / (fan_in + fan_out))` | input-to-hidden matrices |
//! | `ortho` | left singular factor of a standard-normal square matrix | hidden-to-hidden matrices |
//! | `zero` | zeros | biases |
//! | `uniform` | `U(-0.1, 0.1)` | not used by default |

use std::fmt;
use std::str::FromStr;

use burn::module::Param;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use nalgebra::DMatrix;
use ndarray::{ArrayD, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{Result, RnnError};

/// Weight initialization scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    Glorot,
    Ortho,
    Zero,
    Uniform,
}

impl Initializer {
    pub fn name(&self) -> &'static str {
        match self {
            Initializer::Glorot => "glorot",
            Initializer::Ortho => "ortho",
            Initializer::Zero => "zero",
            Initializer::Uniform => "uniform",
        }
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Initializer {
    type Err = RnnError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "glorot" => Ok(Initializer::Glorot),
            "ortho" => Ok(Initializer::Ortho),
            "zero" => Ok(Initializer::Zero),
            "uniform" => Ok(Initializer::Uniform),
            other => Err(RnnError::UnknownInitializer(other.to_string())),
        }
    }
}

/// Draws a freshly allocated array for `shape` using `scheme`.
///
/// `ortho` always yields a square `shape[0] × shape[0]` matrix, so it only
/// accepts `[n]` or `[n, n]`. `glorot` reads fan-in and fan-out from the first
/// two dimensions.
///
/// # Errors
///
/// * [`RnnError::InvalidShape`] for an empty shape, a zero dimension, or a
///   `glorot` request with fewer than two dimensions.
/// * [`RnnError::NonSquareOrthogonal`] for any other `ortho` shape.
/// * [`RnnError::Decomposition`] if the SVD does not produce a left factor.
pub fn weight_init<R: Rng + ?Sized>(
    rng: &mut R,
    scheme: Initializer,
    shape: &[usize],
) -> Result<ArrayD<f32>> {
    if shape.is_empty() || shape.contains(&0) {
        return Err(RnnError::InvalidShape {
            scheme: scheme.name(),
            shape: shape.to_vec(),
        });
    }

    match scheme {
        Initializer::Glorot => {
            if shape.len() < 2 {
                return Err(RnnError::InvalidShape {
                    scheme: scheme.name(),
                    shape: shape.to_vec(),
                });
            }
            let scale = (6.0 / (shape[0] + shape[1]) as f64).sqrt() as f32;
            Ok(sample_uniform(rng, shape, scale))
        }
        Initializer::Ortho => orthogonal(rng, shape),
        Initializer::Zero => Ok(ArrayD::zeros(IxDyn(shape))),
        Initializer::Uniform => Ok(sample_uniform(rng, shape, 0.1)),
    }
}

fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, shape: &[usize], scale: f32) -> ArrayD<f32> {
    let dist = Uniform::new_inclusive(-scale, scale);
    ArrayD::from_shape_simple_fn(IxDyn(shape), || dist.sample(rng))
}

fn orthogonal<R: Rng + ?Sized>(rng: &mut R, shape: &[usize]) -> Result<ArrayD<f32>> {
    let n = shape[0];
    let square = match shape {
        [_] => true,
        [rows, cols] => rows == cols,
        _ => false,
    };
    if !square {
        return Err(RnnError::NonSquareOrthogonal {
            shape: shape.to_vec(),
        });
    }

    let gaussian = DMatrix::<f64>::from_fn(n, n, |_, _| rng.sample(StandardNormal));
    let u = gaussian
        .svd(true, false)
        .u
        .ok_or_else(|| RnnError::Decomposition(format!("no left factor for {n}x{n} matrix")))?;

    Ok(ArrayD::from_shape_fn(IxDyn(&[n, n]), |idx| u[(idx[0], idx[1])] as f32))
}

/// Converts a 2D initializer array into a Burn parameter.
pub(crate) fn param_2d<B: Backend>(
    arr: &ArrayD<f32>,
    device: &B::Device,
) -> Param<Tensor<B, 2>> {
    let shape = arr.shape();
    let data: Vec<f32> = arr.iter().copied().collect();
    let tensor: Tensor<B, 2> =
        Tensor::<B, 1>::from_floats(data.as_slice(), device).reshape([shape[0], shape[1]]);
    Param::from_tensor(tensor)
}

/// Converts a 1D initializer array into a Burn parameter.
pub(crate) fn param_1d<B: Backend>(
    arr: &ArrayD<f32>,
    device: &B::Device,
) -> Param<Tensor<B, 1>> {
    let data: Vec<f32> = arr.iter().copied().collect();
    Param::from_tensor(Tensor::<B, 1>::from_floats(data.as_slice(), device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_glorot_bounds() {
        let mut rng = StdRng::seed_from_u64(1234);
        for (m, n) in [(1, 1), (4, 5), (64, 32), (300, 7)] {
            let w = weight_init(&mut rng, Initializer::Glorot, &[m, n]).unwrap();
            let bound = (6.0 / (m + n) as f64).sqrt() as f32;
            assert_eq!(w.shape(), &[m, n]);
            assert!(w.iter().all(|&v| v >= -bound && v <= bound));
        }
    }

    #[test]
    fn test_glorot_needs_two_dims() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = weight_init(&mut rng, Initializer::Glorot, &[8]).unwrap_err();
        assert!(matches!(err, RnnError::InvalidShape { scheme: "glorot", .. }));
    }

    #[test]
    fn test_ortho_is_orthogonal() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 5, 32] {
            let q = weight_init(&mut rng, Initializer::Ortho, &[n]).unwrap();
            let q: Array2<f32> = q.into_dimensionality().unwrap();
            let qtq = q.t().dot(&q);
            for i in 0..n {
                for j in 0..n {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!(
                        (qtq[[i, j]] - expected).abs() < 1e-4,
                        "QᵀQ[{}, {}] = {}",
                        i,
                        j,
                        qtq[[i, j]]
                    );
                }
            }
        }
    }

    #[test]
    fn test_ortho_accepts_square_pair() {
        let mut rng = StdRng::seed_from_u64(7);
        let q = weight_init(&mut rng, Initializer::Ortho, &[6, 6]).unwrap();
        assert_eq!(q.shape(), &[6, 6]);
    }

    #[test]
    fn test_ortho_rejects_non_square() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = weight_init(&mut rng, Initializer::Ortho, &[6, 4]).unwrap_err();
        assert_eq!(err, RnnError::NonSquareOrthogonal { shape: vec![6, 4] });
    }

    #[test]
    fn test_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        let b = weight_init(&mut rng, Initializer::Zero, &[3, 4]).unwrap();
        assert_eq!(b.shape(), &[3, 4]);
        assert!(b.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        let w = weight_init(&mut rng, Initializer::Uniform, &[10, 10]).unwrap();
        assert!(w.iter().all(|&v| (-0.1..=0.1).contains(&v)));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = weight_init(&mut rng, Initializer::Zero, &[0, 3]).unwrap_err();
        assert!(matches!(err, RnnError::InvalidShape { .. }));
    }

    #[test]
    fn test_empty_shape_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = weight_init(&mut rng, Initializer::Zero, &[]).unwrap_err();
        assert_eq!(
            err,
            RnnError::InvalidShape {
                scheme: "zero",
                shape: vec![],
            }
        );
    }

    #[test]
    fn test_scheme_names_round_trip() {
        for scheme in [
            Initializer::Glorot,
            Initializer::Ortho,
            Initializer::Zero,
            Initializer::Uniform,
        ] {
            assert_eq!(scheme.to_string().parse::<Initializer>().unwrap(), scheme);
        }
    }

    #[test]
    fn test_scheme_names() {
        assert_eq!("ortho".parse::<Initializer>().unwrap(), Initializer::Ortho);
        assert_eq!(
            "he_normal".parse::<Initializer>().unwrap_err(),
            RnnError::UnknownInitializer("he_normal".into())
        );
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let a = weight_init(&mut StdRng::seed_from_u64(5), Initializer::Glorot, &[3, 4]).unwrap();
        let b = weight_init(&mut StdRng::seed_from_u64(5), Initializer::Glorot, &[3, 4]).unwrap();
        assert_eq!(a, b);
    }
}
