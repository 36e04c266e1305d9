pub mod axpy;
mod epilogue;
pub mod gemm;
pub mod gemv;
pub mod ger;
pub mod reduction;
pub mod scale;

pub use epilogue::accumulate_into;
