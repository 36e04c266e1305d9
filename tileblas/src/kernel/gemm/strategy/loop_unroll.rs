use super::{GemmProblem, TileStrategy};
use crate::{Scalar, backends::common::Threadgroup};

/// One output per thread; the inner product over a staged K slice has a
/// compile-time length so it unrolls completely.
pub struct LoopUnroll<const TILE: usize>;

#[inline(always)]
fn dot<T: Scalar, const N: usize>(
    lhs: &[T; N],
    rhs: &[T; N],
) -> T {
    lhs.iter().zip(rhs).fold(T::zero(), |sum, (&l, &r)| sum + l * r)
}

impl<const TILE: usize> TileStrategy for LoopUnroll<TILE> {
    const TILE_SIZE: usize = TILE;
    const STEP_SIZE: usize = TILE;
    const MICRO_TILE_SIZE: usize = 1;

    fn accumulate<T: Scalar, S: FnMut(usize, usize, T)>(
        group: &mut Threadgroup,
        problem: &GemmProblem<'_, T>,
        batch: usize,
        block_row: usize,
        block_col: usize,
        mut store: S,
    ) {
        let row_origin = block_row * TILE;
        let col_origin = block_col * TILE;

        // a_tile[row][k], b_tile[col][k]: both operands K-contiguous.
        let mut a_tile = [[T::zero(); TILE]; TILE];
        let mut b_tile = [[T::zero(); TILE]; TILE];
        let mut accumulators = [[T::zero(); TILE]; TILE];

        for k_origin in (0..problem.depth()).step_by(TILE) {
            group.for_each_thread(|thread| {
                a_tile[thread.y][thread.x] =
                    problem.a_view.load_or_zero(problem.a, batch, row_origin + thread.y, k_origin + thread.x);
                b_tile[thread.x][thread.y] =
                    problem.b_view.load_or_zero(problem.b, batch, k_origin + thread.y, col_origin + thread.x);
            });

            group.for_each_thread(|thread| {
                let accumulator = &mut accumulators[thread.y][thread.x];
                *accumulator = *accumulator + dot(&a_tile[thread.y], &b_tile[thread.x]);
            });
        }

        group.for_each_thread(|thread| {
            store(row_origin + thread.y, col_origin + thread.x, accumulators[thread.y][thread.x]);
        });
    }
}
