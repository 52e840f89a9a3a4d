use gridpath_core::Coord;

/// Always 0. Turns A* into uniform-cost (Dijkstra) exploration.
#[inline]
pub fn blind(_a: Coord, _b: Coord) -> f64 {
    0.0
}

/// Manhattan (L1) distance. Admissible for 4-directional movement only.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> f64 {
    f64::from(a.manhattan(b))
}

/// Euclidean (L2) distance. Admissible for 8-directional movement.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    a.euclidean(b)
}

/// Octile distance: diagonal steps cost `sqrt(2)`, straight steps cost 1.
#[inline]
pub fn diagonal(a: Coord, b: Coord) -> f64 {
    let dx = f64::from((a.x - b.x).abs());
    let dy = f64::from((a.y - b.y).abs());
    dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy)
}
