//! Basic Usage Example
//!
//! Builds an LSTM and a GRU, runs them over a padded batch and prints the
//! shapes and the final states.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rnn_cells::prelude::*;

type Backend = NdArray<f32>;

fn main() -> Result<(), RnnError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== rnn-cells Basic Usage ===\n");

    let device = Default::default();
    let mut rng = StdRng::seed_from_u64(1234);

    let (batch_size, max_length, n_in, n_hidden) = (3, 6, 8, 16);

    let lstm: LSTM<Backend> = LstmConfig::new(n_in, n_hidden).init(&mut rng, &device)?;
    let gru: GRU<Backend> = GruConfig::new(n_in, n_hidden)
        .with_activation(Activation::LecunTanh)
        .init(&mut rng, &device)?;

    for (name, shape) in lstm.cell().named_parameters() {
        println!("  LSTM {name}: {shape:?}");
    }
    println!();

    let input = Tensor::<Backend, 3>::random(
        [batch_size, max_length, n_in],
        Distribution::Uniform(-1.0, 1.0),
        &device,
    );

    // sequence lengths 6, 4 and 2
    let mask = Tensor::<Backend, 2>::from_floats(
        [
            [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        ],
        &device,
    );

    let lstm_out = lstm.forward(input.clone(), Some(mask.clone()), None, None)?;
    println!("LSTM:");
    println!("  hidden sequence: {:?}", lstm_out.hidden.dims());
    println!("  cell sequence:   {:?}", lstm_out.cell.dims());
    println!("  final hidden:    {:?}", lstm_out.last_hidden.dims());
    println!("  final cell:      {:?}", lstm_out.last_cell.dims());

    let gru_out = gru.forward(input, Some(mask), None)?;
    println!("GRU:");
    println!("  hidden sequence: {:?}", gru_out.hidden.dims());
    println!("  final hidden:    {:?}", gru_out.last_hidden.dims());

    // Stateful processing: feed the final states into the next chunk
    let next_chunk = Tensor::<Backend, 3>::zeros([batch_size, 2, n_in], &device);
    let resumed = lstm.forward(
        next_chunk,
        None,
        Some(lstm_out.last_hidden),
        Some(lstm_out.last_cell),
    )?;
    println!("\nResumed LSTM final hidden: {:?}", resumed.last_hidden.dims());

    Ok(())
}
