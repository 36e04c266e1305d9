use thiserror::Error;

use crate::error::BlasError;

#[derive(Debug, Error)]
pub enum CpuError {
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Threadgroup of {requested} threads exceeds the limit of {limit}")]
    ThreadgroupTooLarge {
        requested: usize,
        limit: usize,
    },
    #[error("Threadgroup memory of {requested} bytes exceeds the limit of {limit}")]
    ThreadgroupMemoryExceeded {
        requested: usize,
        limit: usize,
    },
    #[error("Failed to allocate {bytes} bytes")]
    OutOfMemory {
        bytes: usize,
    },
    #[error("Generic CPU backend error: {0}")]
    Generic(String),
}

impl From<&str> for CpuError {
    fn from(error: &str) -> Self {
        CpuError::Generic(error.to_string())
    }
}

impl From<String> for CpuError {
    fn from(error: String) -> Self {
        CpuError::Generic(error)
    }
}

impl From<CpuError> for BlasError {
    fn from(error: CpuError) -> Self {
        match error {
            CpuError::OutOfMemory {
                bytes,
            } => BlasError::OutOfMemory {
                bytes,
            },
            other => BlasError::Backend(other.to_string()),
        }
    }
}
