mod named;

use std::rc::Rc;

use crate::{
    Scalar,
    arguments::{AxpyArguments, GemmArguments, GemvArguments, GerArguments},
    backends::{
        common::{Backend, Context},
        cpu::Cpu,
    },
    config::Config,
    error::BlasError,
    kernel::{
        axpy,
        gemm::{self, GemmKernel, GemmVariant},
        gemv::{self, GemvKernel},
        ger,
    },
};

/// Entry point for every operation. Calls validate their arguments, run to
/// completion on the context and report failures without touching the
/// output when validation fails.
pub struct Blas<B: Backend = Cpu> {
    context: Rc<B::Context>,
    config: Config,
    gemm: GemmKernel<B>,
    gemv: GemvKernel<B>,
}

impl<B: Backend> Blas<B> {
    pub fn new(
        context: Rc<B::Context>,
        config: Config,
    ) -> Result<Self, BlasError> {
        config.validate()?;
        Ok(Self {
            context,
            config,
            gemm: GemmKernel::new(),
            gemv: GemvKernel::new(),
        })
    }

    /// Creates a context for `config` layered over the `TILEBLAS_*` environment.
    pub fn with_config(config: Config) -> Result<Self, BlasError> {
        let config = config.resolve();
        config.validate()?;
        let context = <B::Context as Context>::new(&config).map_err(Into::<BlasError>::into)?;
        Self::new(context, config)
    }

    pub fn from_env() -> Result<Self, BlasError> {
        Self::with_config(Config::default())
    }

    pub fn context(&self) -> &B::Context {
        &self.context
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `C = alpha * op(A) * op(B) + beta * C` with the variant picked by the
    /// selection tables (or the configured override).
    pub fn gemm<T: Scalar>(
        &self,
        arguments: GemmArguments<'_, T>,
    ) -> Result<(), BlasError> {
        let descriptor = gemm::DispatchDescriptor::try_new(&arguments, &self.config, None)?;
        self.gemm.encode(&self.context, arguments, &descriptor)
    }

    /// Same as [`Blas::gemm`] on a caller-chosen variant.
    pub fn gemm_with_variant<T: Scalar>(
        &self,
        arguments: GemmArguments<'_, T>,
        variant: GemmVariant,
    ) -> Result<(), BlasError> {
        let descriptor = gemm::DispatchDescriptor::try_new(&arguments, &self.config, Some(variant))?;
        self.gemm.encode(&self.context, arguments, &descriptor)
    }

    /// `y = alpha * op(A) * x + beta * y`.
    pub fn gemv<T: Scalar>(
        &self,
        arguments: GemvArguments<'_, T>,
    ) -> Result<(), BlasError> {
        let descriptor = gemv::DispatchDescriptor::try_new(&arguments, &self.config)?;
        self.gemv.encode(&self.context, arguments, &descriptor)
    }

    /// `y = alpha * x + y`.
    pub fn axpy<T: Scalar>(
        &self,
        arguments: AxpyArguments<'_, T>,
    ) -> Result<(), BlasError> {
        let (x_view, y_view) = arguments.layout()?;
        axpy::encode::<B, T>(&self.context, arguments.alpha, arguments.x, x_view, arguments.y, y_view)
            .map_err(Into::into)
    }

    /// `A = alpha * x * y^T + A`.
    pub fn ger<T: Scalar>(
        &self,
        arguments: GerArguments<'_, T>,
    ) -> Result<(), BlasError> {
        let (x_view, y_view, a_view) = arguments.layout()?;
        ger::encode::<B, T>(&self.context, arguments.alpha, arguments.x, x_view, arguments.y, y_view, arguments.a, a_view)
            .map_err(Into::into)
    }
}
