//! **gridpath-core** — coordinate and extent types shared by the gridpath
//! crates.
//!
//! Renderers and input layers that only need to convert between cells and
//! flat indices can depend on this crate alone.

pub mod geom;

pub use geom::{Coord, Dims, DimsIter};
