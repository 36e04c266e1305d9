use thiserror::Error;

use crate::backends::common::GridSize;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TileConfigurationError {
    #[error("tile size {0} must be a power of two between 4 and 32")]
    InvalidTileSize(usize),
    #[error("step size {step_size} must be a positive multiple of tile size {tile_size}")]
    InvalidStepSize {
        tile_size: usize,
        step_size: usize,
    },
    #[error("micro-tile size {0} must be between 1 and 4")]
    InvalidMicroTileSize(usize),
    #[error("micro-tiling requires step size {step_size} to equal tile size {tile_size}")]
    MicroTileStepMismatch {
        tile_size: usize,
        step_size: usize,
    },
}

/// Shape of one GEMM threadgroup: `tile_size x tile_size` threads, each
/// producing `micro_tile_size x micro_tile_size` outputs, consuming
/// `step_size` elements of K per barrier round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileConfiguration {
    tile_size: usize,
    step_size: usize,
    micro_tile_size: usize,
}

impl TileConfiguration {
    pub fn try_new(
        tile_size: usize,
        step_size: usize,
        micro_tile_size: usize,
    ) -> Result<Self, TileConfigurationError> {
        if !tile_size.is_power_of_two() || !(4..=32).contains(&tile_size) {
            return Err(TileConfigurationError::InvalidTileSize(tile_size));
        }
        if step_size == 0 || step_size % tile_size != 0 {
            return Err(TileConfigurationError::InvalidStepSize {
                tile_size,
                step_size,
            });
        }
        if !(1..=4).contains(&micro_tile_size) {
            return Err(TileConfigurationError::InvalidMicroTileSize(micro_tile_size));
        }
        if micro_tile_size > 1 && step_size != tile_size {
            return Err(TileConfigurationError::MicroTileStepMismatch {
                tile_size,
                step_size,
            });
        }
        Ok(Self {
            tile_size,
            step_size,
            micro_tile_size,
        })
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn micro_tile_size(&self) -> usize {
        self.micro_tile_size
    }

    pub fn threads_per_threadgroup(&self) -> GridSize {
        GridSize::new(self.tile_size, self.tile_size, 1)
    }

    /// Output rows (and columns) covered by one threadgroup.
    pub fn output_tile_size(&self) -> usize {
        self.tile_size * self.micro_tile_size
    }

    /// Elements staged per round: an `output_tile x step` slice of A plus a
    /// `step x output_tile` slice of B.
    pub fn threadgroup_memory_elements(&self) -> usize {
        2 * self.output_tile_size() * self.step_size
    }

    pub fn threadgroups(
        &self,
        m: usize,
        n: usize,
        batch_count: usize,
    ) -> GridSize {
        let output_tile = self.output_tile_size();
        GridSize::new(n.div_ceil(output_tile), m.div_ceil(output_tile), batch_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_shipped_shapes() {
        let configuration = TileConfiguration::try_new(16, 16, 2).unwrap();
        assert_eq!(configuration.output_tile_size(), 32);
        assert_eq!(configuration.threadgroup_memory_elements(), 1024);
        assert_eq!(configuration.threadgroups(33, 64, 3), GridSize::new(2, 2, 3));
        assert!(TileConfiguration::try_new(8, 16, 1).is_ok());
    }

    #[test]
    fn rejects_invalid_shapes() {
        assert_eq!(TileConfiguration::try_new(12, 12, 1), Err(TileConfigurationError::InvalidTileSize(12)));
        assert_eq!(TileConfiguration::try_new(64, 64, 1), Err(TileConfigurationError::InvalidTileSize(64)));
        assert!(matches!(TileConfiguration::try_new(16, 8, 1), Err(TileConfigurationError::InvalidStepSize { .. })));
        assert_eq!(TileConfiguration::try_new(8, 8, 0), Err(TileConfigurationError::InvalidMicroTileSize(0)));
        assert!(matches!(
            TileConfiguration::try_new(8, 16, 2),
            Err(TileConfigurationError::MicroTileStepMismatch { .. })
        ));
    }
}
