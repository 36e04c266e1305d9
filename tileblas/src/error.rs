use thiserror::Error;

use crate::kernel::gemm::TileConfigurationError;

#[derive(Debug, Error)]
pub enum BlasError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to allocate {bytes} bytes of scratch memory")]
    OutOfMemory {
        bytes: usize,
    },
    #[error("Tile configuration error: {0}")]
    TileConfiguration(#[from] TileConfigurationError),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

impl BlasError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BlasError::InvalidArgument(message.into())
    }
}

/// Integer status returned by the BLAS-named entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Success = 0,
    InvalidArgument = -1,
    Error = -2,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl From<&BlasError> for Status {
    fn from(error: &BlasError) -> Self {
        match error {
            BlasError::InvalidArgument(_) => Status::InvalidArgument,
            BlasError::OutOfMemory {
                ..
            }
            | BlasError::TileConfiguration(_)
            | BlasError::Configuration(_)
            | BlasError::Backend(_) => Status::Error,
        }
    }
}

impl From<Result<(), BlasError>> for Status {
    fn from(result: Result<(), BlasError>) -> Self {
        match result {
            Ok(()) => Status::Success,
            Err(error) => {
                tracing::warn!(%error, "blas call failed");
                Status::from(&error)
            },
        }
    }
}
