use std::collections::TryReserveError;

use gridpath_core::Coord;
use rand::Rng;

use crate::cancel::CancelToken;
use crate::config::SearchConfig;
use crate::error::{GridError, GridResult};
use crate::grid::{Grid, Movement};
use crate::heap::OpenHeap;
use crate::path::Path;

/// A* engine bound to one grid.
///
/// `PathFinder` owns the grid, the open heap and the result path. The heap
/// and path are sized to the cell count once, at construction, and reused
/// by every search. Barriers and the movement mode may change freely
/// between searches; a search holds `&mut self`, so nothing can change them
/// while it runs.
#[derive(Debug)]
pub struct PathFinder {
    pub(crate) grid: Grid,
    pub(crate) open: OpenHeap,
    pub(crate) path: Path,
    pub(crate) cancel: CancelToken,
    pub(crate) config: SearchConfig,
}

impl PathFinder {
    /// Allocate a `rows x cols` grid with the default configuration.
    pub fn new(rows: i32, cols: i32) -> GridResult<Self> {
        Self::with_config(rows, cols, SearchConfig::default())
    }

    pub fn with_config(rows: i32, cols: i32, config: SearchConfig) -> GridResult<Self> {
        let grid = Grid::with_movement(rows, cols, config.movement)?;
        Self::from_grid(grid, config)
    }

    /// Wrap an existing grid, keeping its barriers and movement mode.
    pub fn from_grid(grid: Grid, config: SearchConfig) -> GridResult<Self> {
        let len = grid.len();
        let alloc_err = |e: TryReserveError| {
            log::warn!("grid {}: search buffer reservation failed: {e}", grid.dims());
            GridError::Allocation {
                rows: grid.rows(),
                cols: grid.cols(),
            }
        };
        let open = OpenHeap::try_with_capacity(len).map_err(alloc_err)?;
        let path = Path::try_with_capacity(len).map_err(alloc_err)?;
        Ok(Self {
            grid,
            open,
            path,
            cancel: CancelToken::new(),
            config,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for bulk edits between searches.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Result of the last search (empty before the first one).
    #[inline]
    pub fn last_path(&self) -> &Path {
        &self.path
    }

    /// A handle that stops the running search. Clones share one flag, so
    /// the handle can live in an input handler or inside a step observer.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }

    // -----------------------------------------------------------------------
    // Grid operations
    // -----------------------------------------------------------------------

    #[inline]
    pub fn movement(&self) -> Movement {
        self.grid.movement()
    }

    pub fn set_movement(&mut self, movement: Movement) {
        self.grid.set_movement(movement);
    }

    pub fn toggle_movement(&mut self) -> Movement {
        self.grid.toggle_movement()
    }

    pub fn toggle_barrier(&mut self, c: Coord) -> GridResult<bool> {
        self.grid.toggle_barrier(c)
    }

    pub fn set_barrier(&mut self, c: Coord, barrier: bool) -> GridResult<()> {
        self.grid.set_barrier(c, barrier)
    }

    pub fn is_barrier(&self, c: Coord) -> GridResult<bool> {
        self.grid.is_barrier(c)
    }

    pub fn is_visited(&self, c: Coord) -> GridResult<bool> {
        self.grid.is_visited(c)
    }

    pub fn clear_barriers(&mut self) {
        self.grid.clear_barriers();
    }

    pub fn fill_maze(&mut self, a: Coord, b: Coord) -> GridResult<()> {
        self.grid.fill_maze(a, b)
    }

    /// Random barriers at the configured density, from the thread RNG.
    pub fn randomize_barriers(&mut self, a: Coord, b: Coord) -> GridResult<usize> {
        let density = self.config.barrier_density;
        self.grid.randomize_barriers(a, b, density, &mut rand::rng())
    }

    /// Random barriers at the configured density, from a caller RNG.
    pub fn randomize_barriers_with<R: Rng + ?Sized>(
        &mut self,
        a: Coord,
        b: Coord,
        rng: &mut R,
    ) -> GridResult<usize> {
        let density = self.config.barrier_density;
        self.grid.randomize_barriers(a, b, density, rng)
    }
}
