use gridpath_core::Coord;

use crate::PathFinder;
use crate::error::GridResult;
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::path::{Path, SearchStatus};

/// What a step observer sees after a node has been finalized.
#[derive(Debug, Clone, Copy)]
pub struct SearchStep<'a> {
    /// The node just popped and closed.
    pub current: Coord,
    /// Nodes expanded so far, `current` included.
    pub expanded: usize,
    /// Nodes waiting in the open set.
    pub open: usize,
    /// The grid, with `visited` flags up to date.
    pub grid: &'a Grid,
}

impl PathFinder {
    /// Shortest path from `start` to `goal` using `heuristic`.
    ///
    /// Always returns a [`Path`] for in-range endpoints; an unreachable goal
    /// yields the one-cell chain `[goal]` with [`SearchStatus::Exhausted`].
    pub fn find_path<H>(&mut self, start: Coord, goal: Coord, heuristic: &H) -> GridResult<&Path>
    where
        H: Heuristic + ?Sized,
    {
        self.find_path_observed(start, goal, heuristic, |_| {})
    }

    /// [`find_path`](Self::find_path) with the configured heuristic, or the
    /// movement mode's natural one if none is configured.
    pub fn find_path_default(&mut self, start: Coord, goal: Coord) -> GridResult<&Path> {
        let heuristic = self.config.heuristic_for(self.grid.movement());
        self.find_path(start, goal, &heuristic)
    }

    /// A* search calling `observer` once per expanded node, right after the
    /// node is closed and before its neighbors are examined.
    ///
    /// The observer runs on the caller's thread and the search does not
    /// advance while it runs. It may stop the search through a
    /// [`CancelToken`](crate::CancelToken) obtained from
    /// [`cancel_token`](Self::cancel_token); no further node is expanded
    /// after that.
    pub fn find_path_observed<H, F>(
        &mut self,
        start: Coord,
        goal: Coord,
        heuristic: &H,
        mut observer: F,
    ) -> GridResult<&Path>
    where
        H: Heuristic + ?Sized,
        F: FnMut(SearchStep<'_>),
    {
        let start_idx = self.grid.idx(start)?;
        let goal_idx = self.grid.idx(goal)?;

        self.open.clear(&mut self.grid.nodes);
        self.grid.reset_search_state();
        self.cancel.reset();

        let movement = self.grid.movement();
        let turn_penalty = self.config.turn_penalty;

        {
            let node = &mut self.grid.nodes[start_idx];
            node.g = 0.0;
            node.h = 0.0;
        }
        self.open.push(&mut self.grid.nodes, start_idx);

        // Direction references are taken between consecutively expanded
        // nodes, starting from the origin.
        let mut prev = Coord::ZERO;
        let mut expanded = 0usize;

        let status = loop {
            if self.cancel.is_cancelled() {
                break SearchStatus::Cancelled;
            }
            let Some(ci) = self.open.pop(&mut self.grid.nodes) else {
                break SearchStatus::Exhausted;
            };
            if ci == goal_idx {
                break SearchStatus::GoalReached;
            }

            let (current, current_g, adjacency) = {
                let node = &mut self.grid.nodes[ci];
                node.visited = true;
                node.closed = true;
                (node.coord, node.g, node.adjacency)
            };
            expanded += 1;
            log::trace!("expand {current} g={current_g:.3} open={}", self.open.len());

            observer(SearchStep {
                current,
                expanded,
                open: self.open.len(),
                grid: &self.grid,
            });

            let heading = current - prev;
            for &ni in adjacency.as_slice() {
                let child = &self.grid.nodes[ni];
                if child.barrier {
                    continue;
                }
                let child_coord = child.coord;
                let g = current_g + movement.step_cost(current, child_coord);
                let mut h = heuristic.estimate(child_coord, goal);
                if child_coord - current != heading {
                    h += turn_penalty;
                }

                let child = &mut self.grid.nodes[ni];
                if child.closed {
                    if g >= child.g {
                        continue;
                    }
                    // Cheaper route to a finalized node: reopen it.
                    child.closed = false;
                }

                if self.open.contains(&self.grid.nodes, ni) {
                    if g < self.grid.nodes[ni].g {
                        self.open.update_key(&mut self.grid.nodes, ni, g, h);
                        self.grid.nodes[ni].parent = Some(ci);
                    }
                } else {
                    let child = &mut self.grid.nodes[ni];
                    child.g = g;
                    child.h = h;
                    child.parent = Some(ci);
                    self.open.push(&mut self.grid.nodes, ni);
                }
            }
            prev = current;
        };

        self.path.coords.clear();
        let mut cursor = Some(goal_idx);
        while let Some(i) = cursor {
            let node = &self.grid.nodes[i];
            self.path.coords.push(node.coord);
            cursor = node.parent;
        }
        self.path.status = status;
        self.path.expanded = expanded;

        log::debug!(
            "search {start} -> {goal}: {status:?} after {expanded} expansions, {} cells traced",
            self.path.len()
        );
        Ok(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::error::GridError;
    use crate::grid::Movement;
    use crate::heuristic::HeuristicKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::SQRT_2;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn cardinal(rows: i32, cols: i32) -> PathFinder {
        let cfg = SearchConfig {
            movement: Movement::Cardinal,
            ..SearchConfig::default()
        };
        PathFinder::with_config(rows, cols, cfg).unwrap()
    }

    fn assert_connected(path: &Path) {
        let cells = path.goal_to_start();
        for w in cells.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
        }
    }

    #[test]
    fn open_grid_diagonal_is_optimal() {
        let mut pf = PathFinder::new(5, 5).unwrap();
        let path = pf
            .find_path(c(0, 0), c(4, 4), &HeuristicKind::Euclidean)
            .unwrap();
        assert_eq!(path.status(), SearchStatus::GoalReached);
        assert_eq!(path.len(), 5);
        assert!((path.length() - 4.0 * SQRT_2).abs() < 1e-9);
        assert!(path.reaches(c(0, 0)));
        assert_eq!(path.goal(), Some(c(4, 4)));
        assert_eq!(
            path.to_start_first(),
            vec![c(0, 0), c(1, 1), c(2, 2), c(3, 3), c(4, 4)]
        );
    }

    #[test]
    fn open_grid_cardinal_takes_manhattan_steps() {
        let mut pf = cardinal(6, 7);
        let path = pf
            .find_path(c(1, 1), c(5, 4), &HeuristicKind::Manhattan)
            .unwrap();
        assert!(path.is_found());
        assert_eq!(path.len(), 8);
        assert_connected(path);
        for w in path.goal_to_start().windows(2) {
            assert_eq!(w[0].manhattan(w[1]), 1);
        }
    }

    #[test]
    fn every_heuristic_finds_an_optimal_route() {
        let mut pf = PathFinder::new(8, 8).unwrap();
        for y in 0..6 {
            pf.set_barrier(c(4, y), true).unwrap();
        }
        let mut lengths = Vec::new();
        for kind in [
            HeuristicKind::Blind,
            HeuristicKind::Euclidean,
            HeuristicKind::Diagonal,
        ] {
            let path = pf.find_path(c(1, 1), c(7, 1), &kind).unwrap();
            assert!(path.is_found(), "{kind} failed");
            assert_connected(path);
            lengths.push(path.length());
        }
        for l in &lengths {
            assert!((l - lengths[0]).abs() < 1e-9, "{lengths:?}");
        }
    }

    #[test]
    fn informed_search_expands_fewer_nodes_than_blind() {
        let mut pf = PathFinder::new(30, 30).unwrap();
        let blind = pf
            .find_path(c(0, 0), c(29, 29), &HeuristicKind::Blind)
            .unwrap()
            .expanded();
        let informed = pf
            .find_path(c(0, 0), c(29, 29), &HeuristicKind::Euclidean)
            .unwrap()
            .expanded();
        assert!(informed < blind, "informed {informed}, blind {blind}");
    }

    #[test]
    fn start_equals_goal() {
        let mut pf = PathFinder::new(3, 3).unwrap();
        let path = pf
            .find_path(c(1, 1), c(1, 1), &HeuristicKind::Euclidean)
            .unwrap();
        assert!(path.is_found());
        assert_eq!(path.goal_to_start(), &[c(1, 1)]);
        assert!(path.reaches(c(1, 1)));
        assert_eq!(path.expanded(), 0);
    }

    #[test]
    fn path_avoids_barriers() {
        let mut pf = PathFinder::new(20, 20).unwrap();
        let a = c(0, 0);
        let b = c(19, 19);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut found = 0;
        for _ in 0..10 {
            pf.grid_mut().randomize_barriers(a, b, 0.3, &mut rng).unwrap();
            let path = pf.find_path(a, b, &HeuristicKind::Euclidean).unwrap().clone();
            if path.is_found() {
                found += 1;
                assert!(path.reaches(a));
                assert_connected(&path);
            }
            for cell in path.goal_to_start() {
                assert!(!pf.is_barrier(*cell).unwrap(), "{cell} is a barrier");
            }
        }
        assert!(found > 0);
    }

    #[test]
    fn wall_without_gap_is_unreachable() {
        for movement in [Movement::Cardinal, Movement::Diagonal] {
            let mut pf = PathFinder::new(5, 5).unwrap();
            pf.set_movement(movement);
            for y in 0..5 {
                pf.toggle_barrier(c(2, y)).unwrap();
            }
            let path = pf
                .find_path(c(0, 2), c(4, 2), &HeuristicKind::Manhattan)
                .unwrap();
            assert_eq!(path.status(), SearchStatus::Exhausted);
            assert_eq!(path.goal_to_start(), &[c(4, 2)]);
            assert!(!path.reaches(c(0, 2)));
            // Everything left of the wall was explored, nothing right of it.
            assert!(pf.is_visited(c(1, 4)).unwrap());
            assert!(!pf.is_visited(c(3, 2)).unwrap());
        }
    }

    #[test]
    fn gap_in_wall_is_used() {
        let mut pf = cardinal(5, 5);
        for y in 0..5 {
            if y != 4 {
                pf.set_barrier(c(2, y), true).unwrap();
            }
        }
        let path = pf
            .find_path(c(0, 0), c(4, 0), &HeuristicKind::Manhattan)
            .unwrap();
        assert!(path.is_found());
        assert!(path.contains(c(2, 4)));
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn goal_on_barrier_is_unreachable() {
        let mut pf = PathFinder::new(4, 4).unwrap();
        pf.set_barrier(c(3, 3), true).unwrap();
        let path = pf
            .find_path(c(0, 0), c(3, 3), &HeuristicKind::Euclidean)
            .unwrap();
        assert_eq!(path.status(), SearchStatus::Exhausted);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn diagonal_moves_cut_between_corner_barriers() {
        let mut pf = PathFinder::new(2, 2).unwrap();
        pf.set_barrier(c(1, 0), true).unwrap();
        pf.set_barrier(c(0, 1), true).unwrap();
        let path = pf
            .find_path(c(0, 0), c(1, 1), &HeuristicKind::Euclidean)
            .unwrap();
        assert!(path.is_found());
        assert_eq!(path.goal_to_start(), &[c(1, 1), c(0, 0)]);
    }

    #[test]
    fn closed_node_is_reopened_for_a_cheaper_route() {
        // Ring around two barriers with a dead-end spur at (4, 0):
        //
        //   S A B C Z
        //   D # # E #
        //   F G H I #
        //
        // The estimate makes the top row look expensive, so C is first
        // closed via the long bottom route (g = 7). The top route later
        // offers g = 3; C has to be reopened for Z to get the short chain.
        let mut pf = cardinal(3, 5);
        for b in [c(1, 1), c(2, 1), c(4, 1), c(4, 2)] {
            pf.set_barrier(b, true).unwrap();
        }
        let skewed = |from: Coord, _to: Coord| match (from.x, from.y) {
            (1, 0) | (2, 0) => 10.0,
            (4, 0) => 100.0,
            _ => 0.0,
        };
        let path = pf.find_path(c(0, 0), c(4, 0), &skewed).unwrap();
        assert!(path.is_found());
        assert_eq!(
            path.to_start_first(),
            vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0), c(4, 0)]
        );
        // The bottom route was explored before the reopening happened.
        assert!(pf.is_visited(c(3, 1)).unwrap());
        assert!(pf.is_visited(c(2, 2)).unwrap());
    }

    #[test]
    fn repeated_searches_are_identical() {
        let mut pf = PathFinder::new(25, 25).unwrap();
        pf.randomize_barriers_with(c(0, 0), c(24, 24), &mut StdRng::seed_from_u64(8))
            .unwrap();
        let first = pf
            .find_path(c(0, 0), c(24, 24), &HeuristicKind::Diagonal)
            .unwrap()
            .clone();
        // An unrelated search in between must not leak state.
        pf.find_path(c(24, 0), c(0, 24), &HeuristicKind::Blind)
            .unwrap();
        let second = pf
            .find_path(c(0, 0), c(24, 24), &HeuristicKind::Diagonal)
            .unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn visited_flags_reset_between_searches() {
        let mut pf = PathFinder::new(10, 10).unwrap();
        pf.find_path(c(0, 0), c(9, 9), &HeuristicKind::Blind).unwrap();
        assert!(pf.is_visited(c(5, 0)).unwrap());
        pf.find_path(c(0, 0), c(0, 0), &HeuristicKind::Blind).unwrap();
        assert!(pf.grid().dims().iter().all(|p| !pf.is_visited(p).unwrap()));
    }

    #[test]
    fn movement_toggle_changes_routes_but_not_barriers() {
        let mut pf = PathFinder::new(5, 5).unwrap();
        pf.set_barrier(c(2, 2), true).unwrap();
        let diag = pf.find_path_default(c(0, 0), c(4, 4)).unwrap().len();
        assert_eq!(pf.toggle_movement(), Movement::Cardinal);
        assert_eq!(pf.grid().neighbors(c(1, 1)).unwrap().count(), 4);
        let card = pf.find_path_default(c(0, 0), c(4, 4)).unwrap().clone();
        assert!(card.is_found());
        assert_eq!(card.len(), 9);
        assert!(diag < card.len());
        assert!(pf.is_barrier(c(2, 2)).unwrap());
        assert!(!card.contains(c(2, 2)));
    }

    #[test]
    fn observer_sees_each_expansion() {
        let mut pf = PathFinder::new(6, 6).unwrap();
        let mut seen = Vec::new();
        let expanded = pf
            .find_path_observed(c(0, 0), c(5, 3), &HeuristicKind::Euclidean, |step| {
                assert!(step.grid.is_visited(step.current).unwrap());
                assert_eq!(step.expanded, seen.len() + 1);
                seen.push(step.current);
            })
            .unwrap()
            .expanded();
        assert_eq!(seen.len(), expanded);
        assert_eq!(seen[0], c(0, 0));
        assert!(!seen.contains(&c(5, 3)));
    }

    #[test]
    fn cancel_from_observer_stops_after_one_step() {
        let mut pf = PathFinder::new(40, 40).unwrap();
        let token = pf.cancel_token();
        let mut calls = 0;
        let path = pf
            .find_path_observed(c(0, 0), c(39, 39), &HeuristicKind::Blind, |_| {
                calls += 1;
                token.cancel();
            })
            .unwrap();
        assert_eq!(path.status(), SearchStatus::Cancelled);
        assert_eq!(path.expanded(), 1);
        assert_eq!(path.goal_to_start(), &[c(39, 39)]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn cancel_after_some_steps() {
        let mut pf = PathFinder::new(40, 40).unwrap();
        let token = pf.cancel_token();
        let path = pf
            .find_path_observed(c(0, 0), c(39, 39), &HeuristicKind::Blind, |step| {
                if step.expanded == 25 {
                    token.cancel();
                }
            })
            .unwrap();
        assert_eq!(path.status(), SearchStatus::Cancelled);
        assert_eq!(path.expanded(), 25);
    }

    #[test]
    fn stale_cancel_request_is_cleared_on_start() {
        let mut pf = PathFinder::new(5, 5).unwrap();
        pf.request_cancel();
        let path = pf
            .find_path(c(0, 0), c(4, 4), &HeuristicKind::Euclidean)
            .unwrap();
        assert!(path.is_found());
    }

    #[test]
    fn out_of_range_endpoints_are_rejected() {
        let mut pf = PathFinder::new(3, 3).unwrap();
        let err = pf
            .find_path(c(0, 0), c(3, 0), &HeuristicKind::Euclidean)
            .unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCoordinate {
                coord: c(3, 0),
                rows: 3,
                cols: 3
            }
        );
        assert!(
            pf.find_path(c(-1, 0), c(1, 1), &HeuristicKind::Euclidean)
                .is_err()
        );
    }

    #[test]
    fn straight_routes_preferred_on_ties() {
        // Two equal-cost cardinal routes around nothing: the turn penalty
        // keeps the one with a single bend.
        let mut pf = cardinal(3, 3);
        let path = pf
            .find_path(c(0, 0), c(2, 2), &HeuristicKind::Manhattan)
            .unwrap();
        assert_eq!(path.len(), 5);
        let cells = path.to_start_first();
        let turns = cells
            .windows(3)
            .filter(|w| w[1] - w[0] != w[2] - w[1])
            .count();
        assert_eq!(turns, 1, "{cells:?}");
    }

    #[test]
    fn dyn_heuristic_is_accepted() {
        let mut pf = PathFinder::new(4, 4).unwrap();
        let h: &dyn Heuristic = &HeuristicKind::Diagonal;
        assert!(pf.find_path(c(0, 0), c(3, 2), h).unwrap().is_found());
    }
}
