//! Search and grid-size configuration.

use std::fmt;
use std::str::FromStr;

use gridpath_core::Dims;
use thiserror::Error;

use crate::grid::{DEFAULT_BARRIER_DENSITY, Movement};
use crate::heuristic::HeuristicKind;

/// Added to `h` of a child whose direction of travel differs from that of
/// its expanding node. Far below the smallest difference between two real
/// path costs, so it only breaks ties toward straighter paths.
pub const DEFAULT_TURN_PENALTY: f64 = 0.001;

/// Errors from parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown heuristic {0:?} (expected blind, manhattan, euclidean or diagonal)")]
    UnknownHeuristic(String),

    #[error("invalid grid size {0:?} (expected small, medium, large or <rows>x<cols>)")]
    InvalidGridSize(String),

    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    NonPositiveDims { rows: i32, cols: i32 },
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Engine settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Movement mode the grid starts in.
    pub movement: Movement,
    /// Estimate used by [`PathFinder::find_path_default`](crate::PathFinder::find_path_default).
    /// `None` picks one from the movement mode at search time.
    pub heuristic: Option<HeuristicKind>,
    pub turn_penalty: f64,
    /// Barrier probability for [`PathFinder::randomize_barriers`](crate::PathFinder::randomize_barriers).
    pub barrier_density: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            movement: Movement::Diagonal,
            heuristic: None,
            turn_penalty: DEFAULT_TURN_PENALTY,
            barrier_density: DEFAULT_BARRIER_DENSITY,
        }
    }
}

impl SearchConfig {
    /// The heuristic to use under `movement`.
    pub fn heuristic_for(&self, movement: Movement) -> HeuristicKind {
        self.heuristic
            .unwrap_or_else(|| HeuristicKind::for_movement(movement))
    }
}

// ---------------------------------------------------------------------------
// GridDims
// ---------------------------------------------------------------------------

/// Grid size, parsed from a preset name or `<rows>x<cols>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    pub rows: i32,
    pub cols: i32,
}

impl GridDims {
    pub const SMALL: Self = Self::new(30, 30);
    pub const MEDIUM: Self = Self::new(45, 80);
    pub const LARGE: Self = Self::new(85, 150);

    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    pub fn dims(self) -> Dims {
        Dims::new(self.rows, self.cols)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(60, 100)
    }
}

impl From<GridDims> for Dims {
    fn from(d: GridDims) -> Self {
        d.dims()
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for GridDims {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "small" => return Ok(Self::SMALL),
            "medium" => return Ok(Self::MEDIUM),
            "large" => return Ok(Self::LARGE),
            _ => {}
        }
        let invalid = || ConfigError::InvalidGridSize(s.to_string());
        let (rows, cols) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let rows: i32 = rows.trim().parse().map_err(|_| invalid())?;
        let cols: i32 = cols.trim().parse().map_err(|_| invalid())?;
        if rows <= 0 || cols <= 0 {
            return Err(ConfigError::NonPositiveDims { rows, cols });
        }
        Ok(Self { rows, cols })
    }
}
