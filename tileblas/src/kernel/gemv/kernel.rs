use std::marker::PhantomData;

use super::{DispatchDescriptor, GemvStrategy};
use crate::{
    MatrixView, Scalar,
    arguments::{GemvArguments, GemvLayout},
    backends::common::{Backend, Context, GridSize, OutputBuffer},
    error::BlasError,
    kernel::{accumulate_into, reduction::threadgroup_sum, scale},
};

/// Threads per GEMV threadgroup and length of every staged slice.
pub const BLOCK_SIZE: usize = 256;

struct GemvOperands<'a, T> {
    a: &'a [T],
    x: &'a [T],
    layout: GemvLayout,
    alpha: T,
    beta: T,
}

impl<T: Scalar> GemvOperands<'_, T> {
    #[inline(always)]
    fn product(
        &self,
        batch: usize,
        row: usize,
        column: usize,
    ) -> T {
        self.layout.a_view.load(self.a, batch, row, column) * self.layout.x_view.load(self.x, batch, column)
    }

    fn threadgroup_memory_length(&self) -> usize {
        BLOCK_SIZE * T::DATA_TYPE.size_in_bytes()
    }
}

pub struct GemvKernel<B: Backend> {
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for GemvKernel<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> GemvKernel<B> {
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }

    pub fn encode<T: Scalar>(
        &self,
        context: &B::Context,
        arguments: GemvArguments<'_, T>,
        descriptor: &DispatchDescriptor,
    ) -> Result<(), BlasError> {
        let layout = descriptor.layout;
        let operands = GemvOperands {
            a: arguments.a,
            x: arguments.x,
            layout,
            alpha: arguments.alpha,
            beta: arguments.beta,
        };
        let y = arguments.y;

        let result = match descriptor.strategy {
            GemvStrategy::ScaleOnly => {
                scale::encode::<B, T>(context, y, MatrixView::column(&layout.y_view), operands.beta, layout.batch_count)
            },
            GemvStrategy::TiledInput => encode_tiled_input::<B, T>(context, &operands, y),
            GemvStrategy::BlockPerOutput => encode_block_per_output::<B, T>(context, &operands, y),
            GemvStrategy::GridReduction {
                num_blocks,
            } => encode_grid_reduction::<B, T>(context, &operands, y, num_blocks),
        };
        result.map_err(Into::into)
    }
}

fn encode_tiled_input<B: Backend, T: Scalar>(
    context: &B::Context,
    operands: &GemvOperands<'_, T>,
    y: &mut [T],
) -> Result<(), B::Error> {
    let layout = operands.layout;
    let output_len = layout.output_len();
    let reduction_len = layout.reduction_len();
    let threadgroups = GridSize::new(output_len.div_ceil(BLOCK_SIZE), 1, layout.batch_count);
    let output = OutputBuffer::new(y);

    context.dispatch_threadgroups(
        threadgroups,
        GridSize::linear(BLOCK_SIZE),
        operands.threadgroup_memory_length(),
        |group| {
            let [block, _, batch] = group.position();
            let row_origin = block * BLOCK_SIZE;
            let mut x_tile = [T::zero(); BLOCK_SIZE];
            let mut accumulators = [T::zero(); BLOCK_SIZE];

            for tile_origin in (0..reduction_len).step_by(BLOCK_SIZE) {
                group.for_each_thread(|thread| {
                    x_tile[thread.x] = layout.x_view.load_or_zero(operands.x, batch, tile_origin + thread.x);
                });

                let tile_len = BLOCK_SIZE.min(reduction_len - tile_origin);
                group.for_each_thread(|thread| {
                    let row = row_origin + thread.x;
                    if row >= output_len {
                        return;
                    }
                    let mut sum = T::zero();
                    for (offset, &x_value) in x_tile[..tile_len].iter().enumerate() {
                        sum = sum + layout.a_view.load(operands.a, batch, row, tile_origin + offset) * x_value;
                    }
                    accumulators[thread.x] = accumulators[thread.x] + sum;
                });
            }

            group.for_each_thread(|thread| {
                let row = row_origin + thread.x;
                if row < output_len {
                    // SAFETY: every output row belongs to exactly one thread.
                    unsafe {
                        accumulate_into(
                            &output,
                            layout.y_view.index(batch, row),
                            operands.alpha,
                            operands.beta,
                            accumulators[thread.x],
                        )
                    };
                }
            });
        },
    )
}

fn encode_block_per_output<B: Backend, T: Scalar>(
    context: &B::Context,
    operands: &GemvOperands<'_, T>,
    y: &mut [T],
) -> Result<(), B::Error> {
    let layout = operands.layout;
    let reduction_len = layout.reduction_len();
    let threadgroups = GridSize::new(layout.output_len(), 1, layout.batch_count);
    let output = OutputBuffer::new(y);

    context.dispatch_threadgroups(
        threadgroups,
        GridSize::linear(BLOCK_SIZE),
        operands.threadgroup_memory_length(),
        |group| {
            let [row, _, batch] = group.position();
            let mut partials = [T::zero(); BLOCK_SIZE];

            group.for_each_thread(|thread| {
                let mut sum = T::zero();
                for column in (thread.x..reduction_len).step_by(BLOCK_SIZE) {
                    sum = sum + operands.product(batch, row, column);
                }
                partials[thread.x] = sum;
            });

            let total = threadgroup_sum(group, &mut partials);

            group.for_each_thread(|thread| {
                if thread.index == 0 {
                    // SAFETY: one threadgroup per output element.
                    unsafe {
                        accumulate_into(&output, layout.y_view.index(batch, row), operands.alpha, operands.beta, total)
                    };
                }
            });
        },
    )
}

fn encode_grid_reduction<B: Backend, T: Scalar>(
    context: &B::Context,
    operands: &GemvOperands<'_, T>,
    y: &mut [T],
    num_blocks: usize,
) -> Result<(), B::Error> {
    let layout = operands.layout;
    let output_len = layout.output_len();
    let reduction_len = layout.reduction_len();
    let memory_length = operands.threadgroup_memory_length();

    let mut scratch = context.allocate_scratch::<T>(num_blocks * output_len * layout.batch_count)?;
    let partial_index = move |batch: usize, row: usize, block: usize| (batch * output_len + row) * num_blocks + block;

    {
        let partials = OutputBuffer::new(&mut scratch);
        context.dispatch_threadgroups(
            GridSize::new(num_blocks, output_len, layout.batch_count),
            GridSize::linear(BLOCK_SIZE),
            memory_length,
            |group| {
                let [block, row, batch] = group.position();
                let mut products = [T::zero(); BLOCK_SIZE];

                group.for_each_thread(|thread| {
                    let column = block * BLOCK_SIZE + thread.x;
                    if column < reduction_len {
                        products[thread.x] = operands.product(batch, row, column);
                    }
                });

                let total = threadgroup_sum(group, &mut products);

                group.for_each_thread(|thread| {
                    if thread.index == 0 {
                        // SAFETY: each (batch, row, block) slot is written by one threadgroup.
                        unsafe { partials.write(partial_index(batch, row, block), total) };
                    }
                });
            },
        )?;
    }

    let partials = scratch.as_slice();
    let output = OutputBuffer::new(y);
    context.dispatch_threadgroups(
        GridSize::new(1, output_len, layout.batch_count),
        GridSize::linear(BLOCK_SIZE),
        memory_length,
        |group| {
            let [_, row, batch] = group.position();
            let mut sums = [T::zero(); BLOCK_SIZE];

            group.for_each_thread(|thread| {
                let mut sum = T::zero();
                for block in (thread.x..num_blocks).step_by(BLOCK_SIZE) {
                    sum = sum + partials[partial_index(batch, row, block)];
                }
                sums[thread.x] = sum;
            });

            let total = threadgroup_sum(group, &mut sums);

            group.for_each_thread(|thread| {
                if thread.index == 0 {
                    // SAFETY: one threadgroup per output element.
                    unsafe {
                        accumulate_into(&output, layout.y_view.index(batch, row), operands.alpha, operands.beta, total)
                    };
                }
            });
        },
    )
}
