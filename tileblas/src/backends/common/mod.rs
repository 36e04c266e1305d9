mod backend;
mod context;
mod grid_size;
mod output_buffer;
mod threadgroup;

pub use backend::Backend;
pub use context::Context;
pub use grid_size::GridSize;
pub use output_buffer::OutputBuffer;
pub use threadgroup::{ThreadPosition, Threadgroup};
