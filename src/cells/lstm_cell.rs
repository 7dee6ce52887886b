//! Long Short-Term Memory cell.

use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

use super::gate::Gate;
use super::blend;
use crate::activation::Activation;
use crate::error::{Result, RnnError};

/// LSTM cell holding the 12 parameter tensors of its four gates.
///
/// One call to [`LSTMCell::step`] advances the state by a single timestep:
/// - i = inner(x·W_i + h·U_i + b_i)
/// - f = inner(x·W_f + h·U_f + b_f)
/// - g = act(x·W_c + h·U_c + b_c)
/// - c' = f * c + i * g
/// - o = inner(x·W_o + h·U_o + b_o)
/// - h' = o * act(c')
#[derive(Module, Debug)]
pub struct LSTMCell<B: Backend> {
    /// Input gate (`W_i`, `U_i`, `b_i`)
    input_gate: Gate<B>,
    /// Forget gate (`W_f`, `U_f`, `b_f`)
    forget_gate: Gate<B>,
    /// Candidate memory (`W_c`, `U_c`, `b_c`)
    candidate: Gate<B>,
    /// Output gate (`W_o`, `U_o`, `b_o`)
    output_gate: Gate<B>,
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
    #[module(skip)]
    activation: Activation,
    #[module(skip)]
    inner_activation: Activation,
}

impl<B: Backend> LSTMCell<B> {
    /// Initializes the gates in order input, forget, candidate, output.
    pub fn init<R: Rng + ?Sized>(
        rng: &mut R,
        input_size: usize,
        hidden_size: usize,
        device: &B::Device,
    ) -> Result<Self> {
        let input_gate = Gate::init(rng, input_size, hidden_size, device)?;
        let forget_gate = Gate::init(rng, input_size, hidden_size, device)?;
        let candidate = Gate::init(rng, input_size, hidden_size, device)?;
        let output_gate = Gate::init(rng, input_size, hidden_size, device)?;

        Self::from_gates(input_gate, forget_gate, candidate, output_gate)
    }

    /// Assembles a cell from explicitly built gates, which must all share
    /// the same input and hidden size.
    pub fn from_gates(
        input_gate: Gate<B>,
        forget_gate: Gate<B>,
        candidate: Gate<B>,
        output_gate: Gate<B>,
    ) -> Result<Self> {
        let input_size = input_gate.n_in();
        let hidden_size = input_gate.n_hidden();
        for (name, gate) in [
            ("W_f", &forget_gate),
            ("W_c", &candidate),
            ("W_o", &output_gate),
        ] {
            if gate.n_in() != input_size || gate.n_hidden() != hidden_size {
                return Err(RnnError::ParameterShapeMismatch {
                    name: name.to_string(),
                    expected: vec![input_size, hidden_size],
                    got: vec![gate.n_in(), gate.n_hidden()],
                });
            }
        }

        Ok(Self {
            input_gate,
            forget_gate,
            candidate,
            output_gate,
            input_size,
            hidden_size,
            activation: Activation::Tanh,
            inner_activation: Activation::Sigmoid,
        })
    }

    /// Set the state nonlinearity (default: tanh)
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Set the gate nonlinearity (default: sigmoid)
    pub fn with_inner_activation(mut self, inner_activation: Activation) -> Self {
        self.inner_activation = inner_activation;
        self
    }

    pub fn input_gate(&self) -> &Gate<B> {
        &self.input_gate
    }

    pub fn forget_gate(&self) -> &Gate<B> {
        &self.forget_gate
    }

    pub fn candidate(&self) -> &Gate<B> {
        &self.candidate
    }

    pub fn output_gate(&self) -> &Gate<B> {
        &self.output_gate
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
        [
            ("W_i", "U_i", "b_i"),
            ("W_f", "U_f", "b_f"),
            ("W_c", "U_c", "b_c"),
            ("W_o", "U_o", "b_o"),
        ]
        .into_iter()
        .flat_map(|(w, u, b)| [(w, vec![n_in, n_h]), (u, vec![n_h, n_h]), (b, vec![n_h])])
        .collect()
    }

    /// Advance one timestep.
    ///
    /// # Arguments
    /// * `x_t` - Input slice of shape `[batch, input_size]`
    /// * `mask_t` - Optional mask column of shape `[batch, 1]`; where it is 0
    ///   the previous state is carried through unchanged
    /// * `state` - `(h, c)`, each of shape `[batch, hidden_size]`
    ///
    /// # Returns
    /// The updated `(h, c)`
    pub fn step(
        &self,
        x_t: Tensor<B, 2>,
        mask_t: Option<Tensor<B, 2>>,
        state: (Tensor<B, 2>, Tensor<B, 2>),
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let (h_prev, c_prev) = state;

        let i = self
            .inner_activation
            .apply(self.input_gate.preactivation(x_t.clone(), h_prev.clone()));
        let f = self
            .inner_activation
            .apply(self.forget_gate.preactivation(x_t.clone(), h_prev.clone()));
        let g = self
            .activation
            .apply(self.candidate.preactivation(x_t.clone(), h_prev.clone()));
        let c = f * c_prev.clone() + i * g;
        let o = self
            .inner_activation
            .apply(self.output_gate.preactivation(x_t, h_prev.clone()));
        let h = o * self.activation.apply(c.clone());

        match mask_t {
            Some(mask) => (blend(h, h_prev, mask.clone()), blend(c, c_prev, mask)),
            None => (h, c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    fn test_cell(n_in: usize, n_hidden: usize) -> LSTMCell<TestBackend> {
        let mut rng = StdRng::seed_from_u64(2024);
        LSTMCell::init(&mut rng, n_in, n_hidden, &get_test_device()).unwrap()
    }

    #[test]
    fn test_lstm_cell_creation() {
        let cell = test_cell(20, 50);

        assert_eq!(cell.input_size(), 20);
        assert_eq!(cell.hidden_size(), 50);
        assert_eq!(cell.activation(), Activation::Tanh);
        assert_eq!(cell.inner_activation(), Activation::Sigmoid);
        assert_eq!(cell.num_params(), 4 * (20 * 50 + 50 * 50 + 50));
    }

    #[test]
    fn test_named_parameters() {
        let cell = test_cell(3, 2);
        let params = cell.named_parameters();

        assert_eq!(params.len(), 12);
        assert_eq!(params[0], ("W_i", vec![3, 2]));
        assert_eq!(params[1], ("U_i", vec![2, 2]));
        assert_eq!(params[2], ("b_i", vec![2]));
        assert_eq!(params[11], ("b_o", vec![2]));
    }

    #[test]
    fn test_lstm_step_shapes() {
        let device = get_test_device();
        let cell = test_cell(20, 50);

        for batch_size in [1, 4, 16] {
            let x = Tensor::<TestBackend, 2>::zeros([batch_size, 20], &device);
            let h = Tensor::<TestBackend, 2>::zeros([batch_size, 50], &device);
            let c = Tensor::<TestBackend, 2>::zeros([batch_size, 50], &device);

            let (new_h, new_c) = cell.step(x, None, (h, c));

            assert_eq!(new_h.dims(), [batch_size, 50]);
            assert_eq!(new_c.dims(), [batch_size, 50]);
        }
    }

    #[test]
    fn test_zero_mask_carries_state() {
        let device = get_test_device();
        let cell = test_cell(4, 6);

        let x = Tensor::<TestBackend, 2>::ones([2, 4], &device);
        let h = Tensor::<TestBackend, 2>::ones([2, 6], &device) * 0.3;
        let c = Tensor::<TestBackend, 2>::ones([2, 6], &device) * -0.7;
        let mask = Tensor::<TestBackend, 2>::zeros([2, 1], &device);

        let (new_h, new_c) = cell.step(x, Some(mask), (h.clone(), c.clone()));

        let dh: f32 = (new_h - h).abs().sum().into_scalar();
        let dc: f32 = (new_c - c).abs().sum().into_scalar();
        assert!(dh < 1e-6);
        assert!(dc < 1e-6);
    }

    #[test]
    fn test_forget_gate_decays_memory() {
        let device = get_test_device();
        let cell = test_cell(10, 20);

        // zero input and state leave only the zero biases: f = 0.5, g = 0
        let h = Tensor::<TestBackend, 2>::zeros([1, 20], &device);
        let c = Tensor::<TestBackend, 2>::ones([1, 20], &device) * 10.0;
        let x = Tensor::<TestBackend, 2>::zeros([1, 10], &device);

        let (_, new_c) = cell.step(x, None, (h, c));

        let c_sum: f32 = new_c.sum().into_scalar();
        assert!((c_sum - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_mismatched_gates_rejected() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(1);
        let a = Gate::<TestBackend>::init(&mut rng, 3, 4, &device).unwrap();
        let b = Gate::<TestBackend>::init(&mut rng, 3, 4, &device).unwrap();
        let c = Gate::<TestBackend>::init(&mut rng, 5, 4, &device).unwrap();
        let d = Gate::<TestBackend>::init(&mut rng, 3, 4, &device).unwrap();

        let err = LSTMCell::from_gates(a, b, c, d).unwrap_err();
        assert!(matches!(err, RnnError::ParameterShapeMismatch { ref name, .. } if name == "W_c"));
    }

    #[test]
    fn test_gate_accessors_agree_with_sizes() {
        let cell = test_cell(3, 5);

        for gate in [
            cell.input_gate(),
            cell.forget_gate(),
            cell.candidate(),
            cell.output_gate(),
        ] {
            assert_eq!(gate.w().dims(), [cell.input_size(), cell.hidden_size()]);
            assert_eq!(gate.u().dims(), [cell.hidden_size(), cell.hidden_size()]);
            assert_eq!(gate.b().dims(), [cell.hidden_size()]);
        }
    }
}
