use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{TileConfiguration, TileConfigurationError};

/// Tiled GEMM kernel bodies. All variants compute the same result and differ
/// only in how work is split across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemmVariant {
    /// 16x16 threads, one output each, fully unrolled inner product.
    #[serde(rename = "loopunroll_ts16")]
    LoopUnroll16,
    /// 8x8 threads stepping K by 8.
    #[serde(rename = "step_ts8_ss8")]
    Step8x8,
    /// 16x16 threads stepping K by 16.
    #[serde(rename = "step_ts16_ss16")]
    Step16x16,
    /// 8x8 threads, 2x2 outputs each.
    #[serde(rename = "micro_ts8_mts2")]
    Micro8x2,
    /// 16x16 threads, 2x2 outputs each.
    #[serde(rename = "micro_ts16_mts2")]
    Micro16x2,
}

impl GemmVariant {
    pub const ALL: [GemmVariant; 5] = [
        GemmVariant::LoopUnroll16,
        GemmVariant::Step8x8,
        GemmVariant::Step16x16,
        GemmVariant::Micro8x2,
        GemmVariant::Micro16x2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GemmVariant::LoopUnroll16 => "loopunroll_ts16",
            GemmVariant::Step8x8 => "step_ts8_ss8",
            GemmVariant::Step16x16 => "step_ts16_ss16",
            GemmVariant::Micro8x2 => "micro_ts8_mts2",
            GemmVariant::Micro16x2 => "micro_ts16_mts2",
        }
    }

    pub fn tile_configuration(&self) -> Result<TileConfiguration, TileConfigurationError> {
        let (tile_size, step_size, micro_tile_size) = match self {
            GemmVariant::LoopUnroll16 => (16, 16, 1),
            GemmVariant::Step8x8 => (8, 8, 1),
            GemmVariant::Step16x16 => (16, 16, 1),
            GemmVariant::Micro8x2 => (8, 8, 2),
            GemmVariant::Micro16x2 => (16, 16, 2),
        };
        TileConfiguration::try_new(tile_size, step_size, micro_tile_size)
    }
}

impl fmt::Display for GemmVariant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown gemm variant `{0}`")]
pub struct ParseGemmVariantError(pub String);

impl FromStr for GemmVariant {
    type Err = ParseGemmVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        GemmVariant::ALL
            .into_iter()
            .find(|variant| {
                variant.name() == normalized || format!("{variant:?}").to_ascii_lowercase() == normalized
            })
            .ok_or_else(|| ParseGemmVariantError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for variant in GemmVariant::ALL {
            assert_eq!(variant.name().parse::<GemmVariant>(), Ok(variant));
            assert!(variant.tile_configuration().is_ok());
        }
        assert_eq!("Micro16x2".parse::<GemmVariant>(), Ok(GemmVariant::Micro16x2));
        assert!("tiny".parse::<GemmVariant>().is_err());
    }

    #[test]
    fn serde_uses_kernel_names() {
        let json = serde_json::to_string(&GemmVariant::Step16x16).unwrap();
        assert_eq!(json, "\"step_ts16_ss16\"");
        let parsed: GemmVariant = serde_json::from_str("\"loopunroll_ts16\"").unwrap();
        assert_eq!(parsed, GemmVariant::LoopUnroll16);
    }
}
