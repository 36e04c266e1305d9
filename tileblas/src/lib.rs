pub mod arguments;
pub mod backends;
pub mod blas;
pub mod config;
mod data_type;
pub mod error;
pub mod kernel;
mod layout;
pub mod utils;
mod view;

pub use arguments::{AxpyArguments, GemmArguments, GemvArguments, GerArguments};
pub use backends::{
    common::{Backend, Context},
    cpu::{Cpu, CpuContext, CpuError},
};
pub use blas::Blas;
pub use config::Config;
pub use data_type::{DataType, Scalar};
pub use error::{BlasError, Status};
pub use kernel::gemm::{GemmVariant, TileConfiguration, TileConfigurationError, TransposeCombination};
pub use layout::{Order, Transpose};
pub use num_complex::{Complex, Complex32, Complex64};
pub use view::{MatrixView, VectorView};
