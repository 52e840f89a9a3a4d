//! Grid error type.

use gridpath_core::Coord;
use thiserror::Error;

/// Errors produced by grid construction and grid queries.
///
/// An unreachable goal and a cancelled search are not errors: they are
/// reported through [`SearchStatus`](crate::SearchStatus) on the returned
/// [`Path`](crate::Path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cannot allocate storage for a {rows}x{cols} grid")]
    Allocation { rows: i32, cols: i32 },

    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },

    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    InvalidCoordinate { coord: Coord, rows: i32, cols: i32 },
}

pub type GridResult<T> = Result<T, GridError>;
