use super::{GemmVariant, TransposeCombination};
use crate::{
    Scalar,
    arguments::{GemmArguments, GemmLayout},
    config::Config,
    error::BlasError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// `alpha == 0`: only `C` is rescaled, `A` and `B` are never read.
    ScaleOnly,
    Tiled(GemmVariant),
}

/// Fully resolved GEMM launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchDescriptor {
    pub layout: GemmLayout,
    pub combination: TransposeCombination,
    pub launch: Launch,
}

impl DispatchDescriptor {
    /// Validates `arguments` and resolves the launch. An explicit `variant`
    /// wins over the configured override, which wins over the selection tables.
    pub fn try_new<T: Scalar>(
        arguments: &GemmArguments<'_, T>,
        config: &Config,
        variant: Option<GemmVariant>,
    ) -> Result<Self, BlasError> {
        let layout = arguments.layout()?;
        let combination = TransposeCombination::new(arguments.transpose_a, arguments.transpose_b);

        if arguments.alpha == T::zero() {
            tracing::debug!(m = layout.m, n = layout.n, k = layout.k, "gemm alpha is zero, scaling output only");
            return Ok(Self {
                layout,
                combination,
                launch: Launch::ScaleOnly,
            });
        }

        let variant =
            variant.or(config.gemm_variant).unwrap_or_else(|| combination.select(layout.m, layout.n, layout.k));

        tracing::debug!(
            data_type = ?T::DATA_TYPE,
            ?combination,
            variant = variant.name(),
            m = layout.m,
            n = layout.n,
            k = layout.k,
            batch_count = layout.batch_count,
            "selected gemm variant"
        );

        Ok(Self {
            layout,
            combination,
            launch: Launch::Tiled(variant),
        })
    }

    pub fn variant(&self) -> Option<GemmVariant> {
        match self.launch {
            Launch::ScaleOnly => None,
            Launch::Tiled(variant) => Some(variant),
        }
    }
}
