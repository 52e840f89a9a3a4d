//! Dense node storage with precomputed adjacency.
//!
//! [`Grid`] owns one [`Node`] per cell in a flat row-major arena. Every node
//! carries its neighbor list as indices into that arena, recomputed when the
//! grid is built and whenever the [`Movement`] mode changes, never per
//! search.

use gridpath_core::{Coord, Dims};
use rand::{Rng, RngExt};

use crate::error::{GridError, GridResult};

/// Probability that a non-endpoint cell becomes a barrier in
/// [`Grid::randomize_barriers`] when no density is configured.
pub const DEFAULT_BARRIER_DENSITY: f64 = 0.4;

/// Which moves are allowed between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Movement {
    /// 4-directional: left, right, down, up.
    Cardinal,
    /// 8-directional: the cardinal moves plus the four diagonals.
    #[default]
    Diagonal,
}

impl Movement {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Movement::Cardinal => Movement::Diagonal,
            Movement::Diagonal => Movement::Cardinal,
        }
    }

    /// Cost of one step between adjacent cells: Euclidean under diagonal
    /// movement, Manhattan otherwise.
    #[inline]
    pub fn step_cost(self, from: Coord, to: Coord) -> f64 {
        match self {
            Movement::Diagonal => from.euclidean(to),
            Movement::Cardinal => f64::from(from.manhattan(to)),
        }
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Fixed-capacity neighbor list (at most 8 arena indices).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Adjacency {
    slots: [usize; 8],
    len: u8,
}

impl Adjacency {
    #[inline]
    fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    fn push(&mut self, idx: usize) {
        self.slots[self.len as usize] = idx;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len as usize]
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One cell: its identity, its barrier flag, its neighbors, and the
/// bookkeeping of the search currently (or last) run over it.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) coord: Coord,
    pub(crate) barrier: bool,
    /// Expanded at least once during the last search. Rendering only.
    pub(crate) visited: bool,
    /// Provisionally finalized; cleared again if a cheaper route turns up.
    pub(crate) closed: bool,
    pub(crate) g: f64,
    /// Heuristic estimate plus any turn penalty.
    pub(crate) h: f64,
    pub(crate) parent: Option<usize>,
    /// Slot in the open heap, `None` when absent.
    pub(crate) heap_index: Option<usize>,
    pub(crate) adjacency: Adjacency,
}

impl Node {
    pub(crate) fn new(coord: Coord) -> Self {
        Self {
            coord,
            barrier: false,
            visited: false,
            closed: false,
            g: f64::INFINITY,
            h: 0.0,
            parent: None,
            heap_index: None,
            adjacency: Adjacency::default(),
        }
    }

    #[inline]
    pub(crate) fn f(&self) -> f64 {
        self.g + self.h
    }

    /// Clear everything a search writes. Identity, barrier and adjacency
    /// are kept.
    #[inline]
    pub(crate) fn reset_search_state(&mut self) {
        self.visited = false;
        self.closed = false;
        self.g = f64::INFINITY;
        self.h = 0.0;
        self.parent = None;
        self.heap_index = None;
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows x cols` grid of nodes with barrier flags and adjacency.
#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) dims: Dims,
    pub(crate) movement: Movement,
    pub(crate) nodes: Vec<Node>,
}

impl Grid {
    /// Allocate a grid with no barriers and 8-directional movement.
    pub fn new(rows: i32, cols: i32) -> GridResult<Self> {
        Self::with_movement(rows, cols, Movement::default())
    }

    /// Allocate a grid with no barriers and the given movement mode.
    pub fn with_movement(rows: i32, cols: i32, movement: Movement) -> GridResult<Self> {
        let dims = Dims::new(rows, cols);
        let len = dims
            .cell_count()
            .ok_or(GridError::InvalidDimensions { rows, cols })?;

        let mut nodes = Vec::new();
        nodes.try_reserve_exact(len).map_err(|e| {
            log::warn!("grid {dims}: node storage reservation failed: {e}");
            GridError::Allocation { rows, cols }
        })?;
        nodes.extend(dims.iter().map(Node::new));

        let mut grid = Self {
            dims,
            movement,
            nodes,
        };
        grid.recompute_adjacency();
        log::debug!("allocated {dims} grid ({len} nodes, {movement:?} movement)");
        Ok(grid)
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.dims.contains(c)
    }

    #[inline]
    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// Switch the movement mode, recomputing every neighbor list once.
    /// Setting the current mode again is a no-op.
    pub fn set_movement(&mut self, movement: Movement) {
        if movement == self.movement {
            return;
        }
        self.movement = movement;
        self.recompute_adjacency();
        log::debug!("movement set to {movement:?}, adjacency recomputed");
    }

    /// Flip between 4- and 8-directional movement. Returns the new mode.
    pub fn toggle_movement(&mut self) -> Movement {
        self.set_movement(self.movement.toggled());
        self.movement
    }

    // -----------------------------------------------------------------------
    // Barriers
    // -----------------------------------------------------------------------

    /// Flip the barrier flag of `c`. Returns the new value.
    pub fn toggle_barrier(&mut self, c: Coord) -> GridResult<bool> {
        let i = self.idx(c)?;
        let node = &mut self.nodes[i];
        node.barrier = !node.barrier;
        Ok(node.barrier)
    }

    pub fn set_barrier(&mut self, c: Coord, barrier: bool) -> GridResult<()> {
        let i = self.idx(c)?;
        self.nodes[i].barrier = barrier;
        Ok(())
    }

    pub fn is_barrier(&self, c: Coord) -> GridResult<bool> {
        Ok(self.nodes[self.idx(c)?].barrier)
    }

    /// Whether the last search expanded `c`. Read-only view for renderers.
    pub fn is_visited(&self, c: Coord) -> GridResult<bool> {
        Ok(self.nodes[self.idx(c)?].visited)
    }

    pub fn clear_barriers(&mut self) {
        for node in &mut self.nodes {
            node.barrier = false;
        }
    }

    /// Maze template: every cell except `a` and `b` becomes a barrier.
    pub fn fill_maze(&mut self, a: Coord, b: Coord) -> GridResult<()> {
        self.check_endpoints(a, b)?;
        for node in &mut self.nodes {
            if node.coord != a && node.coord != b {
                node.barrier = true;
            }
        }
        log::debug!("maze template applied, keeping {a} and {b} open");
        Ok(())
    }

    /// Every cell except `a` and `b` independently becomes a barrier with
    /// probability `density` (clamped to `[0, 1]`), and is cleared
    /// otherwise. `a` and `b` are left untouched.
    pub fn randomize_barriers<R: Rng + ?Sized>(
        &mut self,
        a: Coord,
        b: Coord,
        density: f64,
        rng: &mut R,
    ) -> GridResult<usize> {
        self.check_endpoints(a, b)?;
        let p = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let mut placed = 0;
        for node in &mut self.nodes {
            if node.coord == a || node.coord == b {
                continue;
            }
            node.barrier = rng.random_bool(p);
            placed += usize::from(node.barrier);
        }
        log::debug!("randomized barriers at density {p}: {placed} placed");
        Ok(placed)
    }

    /// Number of barrier cells.
    pub fn barrier_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.barrier).count()
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Neighbors of `c` under the current movement mode, barriers included,
    /// in expansion order.
    pub fn neighbors(&self, c: Coord) -> GridResult<impl Iterator<Item = Coord> + '_> {
        let i = self.idx(c)?;
        Ok(self.nodes[i]
            .adjacency
            .as_slice()
            .iter()
            .map(|&n| self.nodes[n].coord))
    }

    /// Rebuild every node's neighbor list for the current movement mode.
    ///
    /// Orthogonal neighbors come first (left, right, down, up). Under
    /// diagonal movement a diagonal neighbor is added when both orthogonal
    /// cells forming its corner are in bounds; their barrier state is not
    /// consulted, so paths may cut corners between two barriers.
    pub(crate) fn recompute_adjacency(&mut self) {
        let dims = self.dims;
        let diagonal = self.movement == Movement::Diagonal;
        let idx = |c: Coord| dims.index(c);

        for i in 0..self.nodes.len() {
            let c = self.nodes[i].coord;
            let left = idx(c.shift(-1, 0));
            let right = idx(c.shift(1, 0));
            let down = idx(c.shift(0, 1));
            let up = idx(c.shift(0, -1));

            let adj = &mut self.nodes[i].adjacency;
            adj.clear();
            for n in [left, right, down, up].into_iter().flatten() {
                adj.push(n);
            }
            if !diagonal {
                continue;
            }
            let corners = [
                (left, down, c.shift(-1, 1)),
                (left, up, c.shift(-1, -1)),
                (right, down, c.shift(1, 1)),
                (right, up, c.shift(1, -1)),
            ];
            for (h, v, corner) in corners {
                if h.is_some() && v.is_some() {
                    if let Some(n) = idx(corner) {
                        adj.push(n);
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a coordinate to an arena index.
    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> GridResult<usize> {
        self.dims.index(c).ok_or(GridError::InvalidCoordinate {
            coord: c,
            rows: self.dims.rows,
            cols: self.dims.cols,
        })
    }

    fn check_endpoints(&self, a: Coord, b: Coord) -> GridResult<()> {
        self.idx(a)?;
        self.idx(b)?;
        Ok(())
    }

    pub(crate) fn reset_search_state(&mut self) {
        for node in &mut self.nodes {
            node.reset_search_state();
        }
    }
}
