use std::marker::PhantomData;

use super::{
    DispatchDescriptor, GemmVariant,
    dispatch_descriptor::Launch,
    strategy::{GemmProblem, LoopUnroll, Micro, Step, TileStrategy},
};
use crate::{
    Scalar,
    arguments::{GemmArguments, GemmLayout},
    backends::common::{Backend, Context, OutputBuffer},
    error::BlasError,
    kernel::{accumulate_into, scale},
};

pub struct GemmKernel<B: Backend> {
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for GemmKernel<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> GemmKernel<B> {
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }

    pub fn encode<T: Scalar>(
        &self,
        context: &B::Context,
        arguments: GemmArguments<'_, T>,
        descriptor: &DispatchDescriptor,
    ) -> Result<(), BlasError> {
        let layout = &descriptor.layout;
        match descriptor.launch {
            Launch::ScaleOnly => {
                scale::encode::<B, T>(context, arguments.c, layout.c_view, arguments.beta, layout.batch_count)
                    .map_err(Into::into)
            },
            Launch::Tiled(variant) => self.encode_variant(context, variant, arguments, layout),
        }
    }

    fn encode_variant<T: Scalar>(
        &self,
        context: &B::Context,
        variant: GemmVariant,
        arguments: GemmArguments<'_, T>,
        layout: &GemmLayout,
    ) -> Result<(), BlasError> {
        match variant {
            GemmVariant::LoopUnroll16 => encode_tiled::<B, LoopUnroll<16>, T>(context, arguments, layout),
            GemmVariant::Step8x8 => encode_tiled::<B, Step<8, 8>, T>(context, arguments, layout),
            GemmVariant::Step16x16 => encode_tiled::<B, Step<16, 16>, T>(context, arguments, layout),
            GemmVariant::Micro8x2 => encode_tiled::<B, Micro<8, 2>, T>(context, arguments, layout),
            GemmVariant::Micro16x2 => encode_tiled::<B, Micro<16, 2>, T>(context, arguments, layout),
        }
    }
}

fn encode_tiled<B: Backend, S: TileStrategy, T: Scalar>(
    context: &B::Context,
    arguments: GemmArguments<'_, T>,
    layout: &GemmLayout,
) -> Result<(), BlasError> {
    let configuration = S::configuration()?;
    let threadgroups = configuration.threadgroups(layout.m, layout.n, layout.batch_count);
    let threadgroup_memory_length = configuration.threadgroup_memory_elements() * T::DATA_TYPE.size_in_bytes();

    let problem = GemmProblem {
        a: arguments.a,
        a_view: layout.a_view,
        b: arguments.b,
        b_view: layout.b_view,
    };
    let c_view = layout.c_view;
    let alpha = arguments.alpha;
    let beta = arguments.beta;
    let output = OutputBuffer::new(arguments.c);

    context
        .dispatch_threadgroups(
            threadgroups,
            configuration.threads_per_threadgroup(),
            threadgroup_memory_length,
            |group| {
                let [block_col, block_row, batch] = group.position();
                S::accumulate(group, &problem, batch, block_row, block_col, |row, col, accumulator| {
                    if c_view.contains(row, col) {
                        // SAFETY: output tiles are disjoint and each position is stored by one thread.
                        unsafe { accumulate_into(&output, c_view.index(batch, row, col), alpha, beta, accumulator) };
                    }
                });
            },
        )
        .map_err(Into::into)
}
