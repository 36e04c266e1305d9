use super::BLOCK_SIZE;
use crate::{
    Scalar,
    arguments::{GemvArguments, GemvLayout},
    config::Config,
    error::BlasError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemvStrategy {
    /// `alpha == 0`: `y` is rescaled, `A` and `x` are never read.
    ScaleOnly,
    /// Untransposed `A`: one thread per output, `x` staged in blocks.
    TiledInput,
    /// Transposed `A`: one threadgroup per output.
    BlockPerOutput,
    /// Transposed `A` with a long reduction: partial sums from `num_blocks`
    /// threadgroups per output, combined in a second pass.
    GridReduction {
        num_blocks: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchDescriptor {
    pub layout: GemvLayout,
    pub strategy: GemvStrategy,
}

impl DispatchDescriptor {
    pub fn try_new<T: Scalar>(
        arguments: &GemvArguments<'_, T>,
        config: &Config,
    ) -> Result<Self, BlasError> {
        let layout = arguments.layout()?;
        let output_len = layout.output_len();
        let reduction_len = layout.reduction_len();

        let strategy = if arguments.alpha == T::zero() {
            GemvStrategy::ScaleOnly
        } else if !arguments.transpose.is_transposed() {
            GemvStrategy::TiledInput
        } else if reduction_len as i64 - output_len as i64 > config.gemv_grid_reduction_threshold() {
            GemvStrategy::GridReduction {
                num_blocks: reduction_len.div_ceil(BLOCK_SIZE),
            }
        } else {
            GemvStrategy::BlockPerOutput
        };

        tracing::debug!(
            data_type = ?T::DATA_TYPE,
            ?strategy,
            output_len,
            reduction_len,
            batch_count = layout.batch_count,
            "selected gemv strategy"
        );

        Ok(Self {
            layout,
            strategy,
        })
    }
}
