use std::{str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::{error::BlasError, kernel::gemm::GemmVariant, utils::EnvVar};

pub const DEFAULT_GEMV_GRID_REDUCTION_THRESHOLD: i64 = 5000;

static ENV_CONFIG: OnceLock<Config> = OnceLock::new();

/// Runtime knobs. Every field is optional; unset fields fall back to the
/// environment and then to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Worker threads of the CPU executor; rayon picks when unset.
    pub num_threads: Option<usize>,
    /// Transposed GEMV switches to grid reduction once
    /// `reduction_len - output_len` exceeds this value.
    pub gemv_grid_reduction_threshold: Option<i64>,
    /// Forces every GEMM onto one variant, bypassing the selection tables.
    pub gemm_variant: Option<GemmVariant>,
}

impl Config {
    /// Configuration described by `TILEBLAS_*` environment variables, read once per process.
    pub fn from_env() -> Self {
        ENV_CONFIG.get_or_init(Self::read_env).clone()
    }

    fn read_env() -> Self {
        Self {
            num_threads: parse_env(EnvVar::NumThreads),
            gemv_grid_reduction_threshold: parse_env(EnvVar::GemvGridReductionThreshold),
            gemm_variant: parse_env(EnvVar::GemmVariant),
        }
    }

    /// Fields set on `self` win; the rest are taken from `fallback`.
    pub fn or(
        self,
        fallback: Config,
    ) -> Config {
        Config {
            num_threads: self.num_threads.or(fallback.num_threads),
            gemv_grid_reduction_threshold: self.gemv_grid_reduction_threshold.or(fallback.gemv_grid_reduction_threshold),
            gemm_variant: self.gemm_variant.or(fallback.gemm_variant),
        }
    }

    /// Explicit settings layered over the environment.
    pub fn resolve(self) -> Config {
        self.or(Config::from_env())
    }

    pub fn gemv_grid_reduction_threshold(&self) -> i64 {
        self.gemv_grid_reduction_threshold.unwrap_or(DEFAULT_GEMV_GRID_REDUCTION_THRESHOLD)
    }

    pub fn validate(&self) -> Result<(), BlasError> {
        if self.num_threads == Some(0) {
            return Err(BlasError::Configuration("num_threads must be positive".to_string()));
        }
        if let Some(threshold) = self.gemv_grid_reduction_threshold.filter(|threshold| *threshold < 0) {
            return Err(BlasError::Configuration(format!(
                "gemv_grid_reduction_threshold must not be negative, got {threshold}"
            )));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(var: EnvVar) -> Option<T> {
    parse_value(var.key(), var.value())
}

fn parse_value<T: FromStr>(
    key: &str,
    value: Option<String>,
) -> Option<T> {
    let value = value?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value, "ignoring unparsable environment override");
            None
        },
    }
}
