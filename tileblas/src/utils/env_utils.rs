#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnvVar {
    NumThreads,
    GemvGridReductionThreshold,
    GemmVariant,
}

impl EnvVar {
    pub const ALL: [EnvVar; 3] = [EnvVar::NumThreads, EnvVar::GemvGridReductionThreshold, EnvVar::GemmVariant];

    pub fn key(&self) -> &'static str {
        match self {
            EnvVar::NumThreads => "TILEBLAS_NUM_THREADS",
            EnvVar::GemvGridReductionThreshold => "TILEBLAS_GEMV_GRID_REDUCTION_THRESHOLD",
            EnvVar::GemmVariant => "TILEBLAS_GEMM_VARIANT",
        }
    }

    /// Trimmed value, `None` when unset or blank.
    pub fn value(&self) -> Option<String> {
        std::env::var(self.key()).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
    }
}
