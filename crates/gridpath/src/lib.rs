//! A* pathfinding on 2D grids whose barriers, endpoints and movement mode
//! change between queries.
//!
//! - **Grid model** ([`Grid`]): dense node storage with neighbor lists
//!   precomputed for 4- or 8-directional [`Movement`].
//! - **Indexed heap**: a binary min-heap ordered by `(f, h)` whose nodes
//!   carry their own slot index, giving O(1) membership and O(log n) key
//!   updates.
//! - **Search engine** ([`PathFinder`]): A* with reopening of closed nodes,
//!   a small turn penalty that favors straight paths on ties, cooperative
//!   cancellation ([`CancelToken`]) and an optional per-step observer.
//! - **Heuristics** ([`Heuristic`], [`HeuristicKind`]): blind, Manhattan,
//!   Euclidean and diagonal estimates, or any `Fn(Coord, Coord) -> f64`.
//!
//! [`PathFinder`] owns the grid together with a heap and a path buffer
//! sized to the cell count, so repeated searches do not allocate.
//!
//! ```
//! use gridpath::{Coord, HeuristicKind, PathFinder};
//!
//! let mut pf = PathFinder::new(5, 5)?;
//! pf.toggle_barrier(Coord::new(2, 2))?;
//! let path = pf.find_path(Coord::new(0, 0), Coord::new(4, 4), &HeuristicKind::Euclidean)?;
//! assert!(path.reaches(Coord::new(0, 0)));
//! assert!(!path.contains(Coord::new(2, 2)));
//! # Ok::<(), gridpath::GridError>(())
//! ```

mod astar;
mod cancel;
pub mod config;
mod distance;
mod error;
mod finder;
mod grid;
mod heap;
mod heuristic;
mod path;

pub use astar::SearchStep;
pub use cancel::CancelToken;
pub use config::{ConfigError, GridDims, SearchConfig};
pub use distance::{blind, diagonal, euclidean, manhattan};
pub use error::{GridError, GridResult};
pub use finder::PathFinder;
pub use grid::{DEFAULT_BARRIER_DENSITY, Grid, Movement};
pub use gridpath_core::{Coord, Dims};
pub use heuristic::{Heuristic, HeuristicKind};
pub use path::{Path, SearchStatus};
