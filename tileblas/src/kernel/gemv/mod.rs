mod dispatch_descriptor;
mod kernel;

pub use dispatch_descriptor::{DispatchDescriptor, GemvStrategy};
pub use kernel::{BLOCK_SIZE, GemvKernel};
