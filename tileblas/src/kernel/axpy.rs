use crate::{
    Scalar, VectorView,
    backends::common::{Backend, Context, GridSize, OutputBuffer},
};

const BLOCK_SIZE: usize = 256;

/// `y = alpha * x + y`, one thread per element.
pub fn encode<B: Backend, T: Scalar>(
    context: &B::Context,
    alpha: T,
    x: &[T],
    x_view: VectorView,
    y: &mut [T],
    y_view: VectorView,
) -> Result<(), B::Error> {
    if alpha == T::zero() {
        return Ok(());
    }

    let len = x_view.len;
    let output = OutputBuffer::new(y);
    context.dispatch_threadgroups(GridSize::linear(len.div_ceil(BLOCK_SIZE)), GridSize::linear(BLOCK_SIZE), 0, |group| {
        let [block, _, _] = group.position();
        group.for_each_thread(|thread| {
            let position = block * BLOCK_SIZE + thread.x;
            if position < len {
                let index = y_view.index(0, position);
                // SAFETY: each position is owned by one thread.
                unsafe { output.write(index, alpha * x_view.load(x, 0, position) + output.read(index)) };
            }
        });
    })
}
