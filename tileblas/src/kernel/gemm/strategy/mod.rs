mod loop_unroll;
mod micro;
mod step;

pub use loop_unroll::LoopUnroll;
pub use micro::Micro;
pub use step::Step;

use super::{TileConfiguration, TileConfigurationError};
use crate::{MatrixView, Scalar, backends::common::Threadgroup};

/// Operands of one GEMM as logical `op(A)` (`m x k`) and `op(B)` (`k x n`) views.
#[derive(Debug, Clone, Copy)]
pub struct GemmProblem<'a, T> {
    pub a: &'a [T],
    pub a_view: MatrixView,
    pub b: &'a [T],
    pub b_view: MatrixView,
}

impl<T> GemmProblem<'_, T> {
    /// Length of the shared K dimension.
    pub fn depth(&self) -> usize {
        self.a_view.cols
    }
}

/// Body of one tiled GEMM threadgroup.
///
/// A threadgroup of `TILE_SIZE x TILE_SIZE` threads owns one square block of
/// `TILE_SIZE * MICRO_TILE_SIZE` output rows and columns. Implementations
/// stage zero-padded slices of A and B in threadgroup memory, accumulate into
/// per-thread registers and finally hand every accumulator to `store`
/// together with its logical output position. Positions past the output
/// extent are still reported; the caller gates the write.
pub trait TileStrategy {
    const TILE_SIZE: usize;
    const STEP_SIZE: usize;
    const MICRO_TILE_SIZE: usize;

    fn configuration() -> Result<TileConfiguration, TileConfigurationError> {
        TileConfiguration::try_new(Self::TILE_SIZE, Self::STEP_SIZE, Self::MICRO_TILE_SIZE)
    }

    fn accumulate<T: Scalar, S: FnMut(usize, usize, T)>(
        group: &mut Threadgroup,
        problem: &GemmProblem<'_, T>,
        batch: usize,
        block_row: usize,
        block_col: usize,
        store: S,
    );
}
