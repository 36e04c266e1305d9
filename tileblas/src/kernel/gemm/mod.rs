mod dispatch_descriptor;
mod kernel;
mod selection;
pub mod strategy;
mod tile_configuration;
mod variant;

pub use dispatch_descriptor::{DispatchDescriptor, Launch};
pub use kernel::GemmKernel;
pub use selection::TransposeCombination;
pub use tile_configuration::{TileConfiguration, TileConfigurationError};
pub use variant::{GemmVariant, ParseGemmVariantError};
