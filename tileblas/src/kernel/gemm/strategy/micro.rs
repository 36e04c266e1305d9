use super::{GemmProblem, TileStrategy};
use crate::{Scalar, backends::common::Threadgroup};

/// Each thread owns a `MICRO x MICRO` register block of outputs spaced
/// `TILE` apart, so one threadgroup covers `TILE * MICRO` rows and columns.
pub struct Micro<const TILE: usize, const MICRO: usize>;

impl<const TILE: usize, const MICRO: usize> TileStrategy for Micro<TILE, MICRO> {
    const TILE_SIZE: usize = TILE;
    const STEP_SIZE: usize = TILE;
    const MICRO_TILE_SIZE: usize = MICRO;

    fn accumulate<T: Scalar, S: FnMut(usize, usize, T)>(
        group: &mut Threadgroup,
        problem: &GemmProblem<'_, T>,
        batch: usize,
        block_row: usize,
        block_col: usize,
        mut store: S,
    ) {
        let row_origin = block_row * TILE * MICRO;
        let col_origin = block_col * TILE * MICRO;

        // Indexed [k][section][lane]; output row `section * TILE + lane`.
        let mut a_tile = [[[T::zero(); TILE]; MICRO]; TILE];
        let mut b_tile = [[[T::zero(); TILE]; MICRO]; TILE];
        let mut accumulators = [[[[T::zero(); MICRO]; MICRO]; TILE]; TILE];

        for k_origin in (0..problem.depth()).step_by(TILE) {
            group.for_each_thread(|thread| {
                for section in 0..MICRO {
                    a_tile[thread.x][section][thread.y] = problem.a_view.load_or_zero(
                        problem.a,
                        batch,
                        row_origin + section * TILE + thread.y,
                        k_origin + thread.x,
                    );
                    b_tile[thread.y][section][thread.x] = problem.b_view.load_or_zero(
                        problem.b,
                        batch,
                        k_origin + thread.y,
                        col_origin + section * TILE + thread.x,
                    );
                }
            });

            group.for_each_thread(|thread| {
                let registers = &mut accumulators[thread.y][thread.x];
                for k in 0..TILE {
                    let a_values: [T; MICRO] = std::array::from_fn(|section| a_tile[k][section][thread.y]);
                    let b_values: [T; MICRO] = std::array::from_fn(|section| b_tile[k][section][thread.x]);
                    for (row_registers, &a_value) in registers.iter_mut().zip(&a_values) {
                        for (register, &b_value) in row_registers.iter_mut().zip(&b_values) {
                            *register = *register + a_value * b_value;
                        }
                    }
                }
            });
        }

        group.for_each_thread(|thread| {
            let registers = &accumulators[thread.y][thread.x];
            for (i, row_registers) in registers.iter().enumerate() {
                for (j, &value) in row_registers.iter().enumerate() {
                    store(row_origin + i * TILE + thread.y, col_origin + j * TILE + thread.x, value);
                }
            }
        });
    }
}
