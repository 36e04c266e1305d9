use super::{GemmProblem, TileStrategy};
use crate::{Scalar, backends::common::Threadgroup};

/// One output per thread; each barrier round stages `STEP` elements of K,
/// loaded in `STEP / TILE` sections.
pub struct Step<const TILE: usize, const STEP: usize>;

impl<const TILE: usize, const STEP: usize> TileStrategy for Step<TILE, STEP> {
    const TILE_SIZE: usize = TILE;
    const STEP_SIZE: usize = STEP;
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

        // Indexed [k][row] and [k][col].
        let mut a_tile = [[T::zero(); TILE]; STEP];
        let mut b_tile = [[T::zero(); TILE]; STEP];
        let mut accumulators = [[T::zero(); TILE]; TILE];

        for k_origin in (0..problem.depth()).step_by(STEP) {
            group.for_each_thread(|thread| {
                for section in (0..STEP).step_by(TILE) {
                    let a_k = section + thread.x;
                    a_tile[a_k][thread.y] =
                        problem.a_view.load_or_zero(problem.a, batch, row_origin + thread.y, k_origin + a_k);
                    let b_k = section + thread.y;
                    b_tile[b_k][thread.x] =
                        problem.b_view.load_or_zero(problem.b, batch, k_origin + b_k, col_origin + thread.x);
                }
            });

            group.for_each_thread(|thread| {
                let mut sum = T::zero();
                for step in 0..STEP {
                    sum = sum + a_tile[step][thread.y] * b_tile[step][thread.x];
                }
                let accumulator = &mut accumulators[thread.y][thread.x];
                *accumulator = *accumulator + sum;
            });
        }

        group.for_each_thread(|thread| {
            store(row_origin + thread.y, col_origin + thread.x, accumulators[thread.y][thread.x]);
        });
    }
}
