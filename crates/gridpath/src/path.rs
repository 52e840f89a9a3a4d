use std::collections::TryReserveError;

use gridpath_core::Coord;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The goal was popped from the open set.
    GoalReached,
    /// The open set ran empty first.
    #[default]
    Exhausted,
    /// A [`CancelToken`](crate::CancelToken) stopped the search.
    Cancelled,
}

/// Result of a search: the parent chain traced back from the goal.
///
/// Coordinates are stored goal first. When the goal was not reached the
/// chain is whatever the goal's parent links held when the search stopped,
/// usually just the goal itself; check [`Path::status`] or
/// [`Path::reaches`] before treating it as a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub(crate) coords: Vec<Coord>,
    pub(crate) status: SearchStatus,
    pub(crate) expanded: usize,
}

impl Path {
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut coords = Vec::new();
        coords.try_reserve_exact(capacity)?;
        Ok(Self {
            coords,
            ..Self::default()
        })
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Whether the search that produced this path reached its goal.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::GoalReached
    }

    /// Nodes expanded by the search that produced this path.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Goal-to-start order.
    #[inline]
    pub fn goal_to_start(&self) -> &[Coord] {
        &self.coords
    }

    /// Start-to-goal order.
    #[inline]
    pub fn start_to_goal(&self) -> impl DoubleEndedIterator<Item = Coord> + ExactSizeIterator + '_ {
        self.coords.iter().rev().copied()
    }

    /// Owned copy in start-to-goal order.
    pub fn to_start_first(&self) -> Vec<Coord> {
        self.start_to_goal().collect()
    }

    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.coords.first().copied()
    }

    /// The far end of the chain: the start when a route exists.
    #[inline]
    pub fn origin(&self) -> Option<Coord> {
        self.coords.last().copied()
    }

    /// Whether the chain actually leads back to `start`.
    #[inline]
    pub fn reaches(&self, start: Coord) -> bool {
        self.origin() == Some(start)
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.coords.contains(&c)
    }

    /// Geometric length: sum of the straight-line distances between
    /// consecutive cells.
    pub fn length(&self) -> f64 {
        self.coords.windows(2).map(|w| w[0].euclidean(w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(coords: &[(i32, i32)], status: SearchStatus) -> Path {
        Path {
            coords: coords.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            status,
            expanded: 0,
        }
    }

    #[test]
    fn orders() {
        let p = path_of(&[(2, 2), (1, 1), (0, 1)], SearchStatus::GoalReached);
        assert_eq!(p.goal(), Some(Coord::new(2, 2)));
        assert_eq!(p.origin(), Some(Coord::new(0, 1)));
        assert_eq!(
            p.to_start_first(),
            vec![Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 2)]
        );
        assert_eq!(p.start_to_goal().len(), 3);
        assert_eq!(p.goal_to_start()[0], Coord::new(2, 2));
        assert!(p.reaches(Coord::new(0, 1)));
        assert!(!p.reaches(Coord::new(2, 2)));
        assert!(p.contains(Coord::new(1, 1)));
    }

    #[test]
    fn length_sums_steps() {
        let p = path_of(&[(2, 2), (1, 1), (0, 1)], SearchStatus::GoalReached);
        assert!((p.length() - (std::f64::consts::SQRT_2 + 1.0)).abs() < 1e-12);
        let single = path_of(&[(3, 3)], SearchStatus::Exhausted);
        assert_eq!(single.length(), 0.0);
        assert!(!single.is_found());
    }

    #[test]
    fn reserved_path_starts_empty() {
        let p = Path::try_with_capacity(16).unwrap();
        assert!(p.is_empty());
        assert!(p.coords.capacity() >= 16);
        assert_eq!(p.status(), SearchStatus::Exhausted);
        assert_eq!(p.origin(), None);
    }
}
