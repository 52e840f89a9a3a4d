use std::fmt;
use std::str::FromStr;

use gridpath_core::Coord;

use crate::config::ConfigError;
use crate::distance;
use crate::grid::Movement;

/// Estimate of the remaining cost between two cells.
///
/// Must be non-negative. An admissible estimate (never above the true cost)
/// keeps A* optimal; anything else is accepted but forfeits that guarantee.
/// Any `Fn(Coord, Coord) -> f64` is a heuristic.
pub trait Heuristic {
    fn estimate(&self, from: Coord, to: Coord) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(Coord, Coord) -> f64,
{
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> f64 {
        self(from, to)
    }
}

/// The built-in estimates, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeuristicKind {
    Blind,
    Manhattan,
    Euclidean,
    Diagonal,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Blind,
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::Diagonal,
    ];

    /// The estimate used when the caller did not choose one: Euclidean for
    /// 8-directional movement, Manhattan for 4-directional movement.
    pub fn for_movement(movement: Movement) -> Self {
        match movement {
            Movement::Diagonal => HeuristicKind::Euclidean,
            Movement::Cardinal => HeuristicKind::Manhattan,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Blind => "blind",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::Diagonal => "diagonal",
        }
    }
}

impl Heuristic for HeuristicKind {
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> f64 {
        match self {
            HeuristicKind::Blind => distance::blind(from, to),
            HeuristicKind::Manhattan => distance::manhattan(from, to),
            HeuristicKind::Euclidean => distance::euclidean(from, to),
            HeuristicKind::Diagonal => distance::diagonal(from, to),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blind" => Ok(HeuristicKind::Blind),
            // "manhatan" is the historical spelling still found in scripts.
            "manhattan" | "manhatan" => Ok(HeuristicKind::Manhattan),
            "euclidean" => Ok(HeuristicKind::Euclidean),
            "diagonal" => Ok(HeuristicKind::Diagonal),
            _ => Err(ConfigError::UnknownHeuristic(s.to_string())),
        }
    }
}
