mod backend;
mod context;
mod error;

pub use backend::Cpu;
pub use context::CpuContext;
pub use error::CpuError;
