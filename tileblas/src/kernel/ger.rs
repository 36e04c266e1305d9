#![allow(clippy::too_many_arguments)]

use crate::{
    MatrixView, Scalar, VectorView,
    backends::common::{Backend, Context, GridSize, OutputBuffer},
};

const TILE_SIZE: usize = 16;

/// `A = alpha * x * y^T + A` over 16x16 tiles of `A`; the matching slices of
/// `x` and `y` are staged once per threadgroup.
pub fn encode<B: Backend, T: Scalar>(
    context: &B::Context,
    alpha: T,
    x: &[T],
    x_view: VectorView,
    y: &[T],
    y_view: VectorView,
    a: &mut [T],
    a_view: MatrixView,
) -> Result<(), B::Error> {
    if alpha == T::zero() {
        return Ok(());
    }

    let threadgroups = GridSize::new(a_view.cols.div_ceil(TILE_SIZE), a_view.rows.div_ceil(TILE_SIZE), 1);
    let threadgroup_memory_length = 2 * TILE_SIZE * T::DATA_TYPE.size_in_bytes();
    let output = OutputBuffer::new(a);

    context.dispatch_threadgroups(
        threadgroups,
        GridSize::new(TILE_SIZE, TILE_SIZE, 1),
        threadgroup_memory_length,
        |group| {
            let [block_col, block_row, _] = group.position();
            let row_origin = block_row * TILE_SIZE;
            let col_origin = block_col * TILE_SIZE;
            let mut x_tile = [T::zero(); TILE_SIZE];
            let mut y_tile = [T::zero(); TILE_SIZE];

            group.for_each_thread(|thread| {
                if thread.y == 0 {
                    y_tile[thread.x] = y_view.load_or_zero(y, 0, col_origin + thread.x);
                }
                if thread.x == 0 {
                    x_tile[thread.y] = alpha * x_view.load_or_zero(x, 0, row_origin + thread.y);
                }
            });

            group.for_each_thread(|thread| {
                let row = row_origin + thread.y;
                let col = col_origin + thread.x;
                if a_view.contains(row, col) {
                    let index = a_view.index(0, row, col);
                    // SAFETY: tiles of A are disjoint, one thread per element.
                    unsafe { output.write(index, output.read(index) + x_tile[thread.y] * y_tile[thread.x]) };
                }
            });
        },
    )
}
