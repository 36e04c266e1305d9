mod bench;
mod common;
mod verify;

pub use bench::{BenchOptions, Operation, Precision, handle_bench};
pub use common::load_config;
pub use verify::handle_verify;
