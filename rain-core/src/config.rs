//! Run parameters and their validation against a loaded grid.

use crate::error::{Result, SimError};
use crate::grid::Grid;

/// Parameters for one simulation run.
///
/// Defaults: 100 drops, a 100-tick budget, 0.3 cm drop radius and
/// coordinates in `[0, 99]` on both axes.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Number of raindrop agents.
    pub num_of_drops: usize,
    /// Step budget: the maximum number of ticks before the run stops.
    pub num_of_steps: u32,
    /// Raindrop radius in cm, used only for the outlet volume.
    pub radius: f64,
    /// Grid extent: coordinates run over `[0, length]` on both axes, so
    /// the grid must be at least `(length + 1) x (length + 1)`.
    pub length: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_of_drops: 100,
            num_of_steps: 100,
            radius: 0.3,
            length: 99,
        }
    }
}

impl SimConfig {
    /// Checks the parameters against each other and the grid.
    ///
    /// An out-of-range `length` would otherwise cause out-of-bounds
    /// coordinate access mid-run, so it is rejected here, before any
    /// simulation state exists.
    pub fn validate(&self, grid: &Grid) -> Result<()> {
        if self.num_of_drops == 0 {
            return Err(SimError::InvalidParameter {
                name: "num_of_drops",
                value: self.num_of_drops.to_string(),
            });
        }
        if self.num_of_steps == 0 {
            return Err(SimError::InvalidParameter {
                name: "num_of_steps",
                value: self.num_of_steps.to_string(),
            });
        }
        // `!(> 0.0)` also rejects NaN.
        if !(self.radius > 0.0) {
            return Err(SimError::InvalidParameter {
                name: "radius",
                value: self.radius.to_string(),
            });
        }
        if self.length + 1 > grid.rows() || self.length + 1 > grid.cols() {
            return Err(SimError::LengthOutOfRange {
                length: self.length,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_grid(side: usize) -> Grid {
        Grid::from_rows(vec![vec![0.0; side]; side]).unwrap()
    }

    #[test]
    fn default_parameters_fit_a_100x100_grid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate(&flat_grid(100)).is_ok());
    }

    #[test]
    fn length_must_fit_the_grid() {
        let cfg = SimConfig {
            length: 3,
            ..SimConfig::default()
        };

        // A 4x4 grid is exactly enough for length 3.
        assert!(cfg.validate(&flat_grid(4)).is_ok());

        let err = cfg.validate(&flat_grid(3)).unwrap_err();
        assert!(matches!(
            err,
            SimError::LengthOutOfRange {
                length: 3,
                rows: 3,
                cols: 3
            }
        ));
    }

    #[test]
    fn zero_or_non_positive_parameters_are_rejected() {
        let grid = flat_grid(4);
        let base = SimConfig {
            length: 3,
            ..SimConfig::default()
        };

        let cfg = SimConfig {
            num_of_drops: 0,
            ..base
        };
        assert!(matches!(
            cfg.validate(&grid),
            Err(SimError::InvalidParameter {
                name: "num_of_drops",
                ..
            })
        ));

        let cfg = SimConfig {
            num_of_steps: 0,
            ..base
        };
        assert!(matches!(
            cfg.validate(&grid),
            Err(SimError::InvalidParameter {
                name: "num_of_steps",
                ..
            })
        ));

        let cfg = SimConfig {
            radius: 0.0,
            ..base
        };
        assert!(matches!(
            cfg.validate(&grid),
            Err(SimError::InvalidParameter { name: "radius", .. })
        ));

        let cfg = SimConfig {
            radius: f64::NAN,
            ..base
        };
        assert!(cfg.validate(&grid).is_err());
    }
}
