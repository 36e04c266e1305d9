use crate::{
    MatrixView, Scalar,
    backends::common::{Backend, Context, GridSize, OutputBuffer},
};

const TILE_SIZE: usize = 16;

/// `out = beta == 0 ? 0 : beta * sanitize(out)` over every batch of `view`.
///
/// Used when `alpha == 0`; no other operand is read.
pub fn encode<B: Backend, T: Scalar>(
    context: &B::Context,
    output: &mut [T],
    view: MatrixView,
    beta: T,
    batch_count: usize,
) -> Result<(), B::Error> {
    let threadgroups = GridSize::new(view.cols.div_ceil(TILE_SIZE), view.rows.div_ceil(TILE_SIZE), batch_count);
    let output = OutputBuffer::new(output);
    let zero_beta = beta == T::zero();

    context.dispatch_threadgroups(threadgroups, GridSize::new(TILE_SIZE, TILE_SIZE, 1), 0, |group| {
        let [block_col, block_row, batch] = group.position();
        group.for_each_thread(|thread| {
            let row = block_row * TILE_SIZE + thread.y;
            let col = block_col * TILE_SIZE + thread.x;
            if !view.contains(row, col) {
                return;
            }
            let index = view.index(batch, row, col);
            // SAFETY: each (batch, row, col) maps to one thread of one threadgroup.
            unsafe {
                let value = if zero_beta {
                    T::zero()
                } else {
                    beta * output.read(index).sanitize()
                };
                output.write(index, value);
            }
        });
    })
}
