use std::fs;

use rand::{Rng, rngs::StdRng};
use tileblas::{Config, Order, Scalar};

pub fn load_config(path: Option<String>) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let config_data = fs::read_to_string(&path)?;
    let config: Config = serde_json::from_str(&config_data)?;
    tracing::info!(path, ?config, "loaded configuration");
    Ok(config)
}

pub fn random_values<T: Scalar + From<f32>>(
    rng: &mut StdRng,
    len: usize,
) -> Vec<T> {
    (0..len).map(|_| T::from(rng.random_range(-1.0f32..1.0))).collect()
}

/// Leading dimension of a densely packed `rows x cols` matrix.
pub fn dense_leading_dim(
    order: Order,
    rows: usize,
    cols: usize,
) -> usize {
    match order {
        Order::RowMajor => cols,
        Order::ColumnMajor => rows,
    }
}
