use std::collections::HashSet;

use hexboard_core::{Board, Coordinate};

use crate::neighbors::Neighbors;
use crate::path::HexPath;
use crate::worklist::Worklist;

/// Worklist-driven path search over a board's adjacency graph.
///
/// The worklist decides the exploration order: a [`FifoWorklist`] finds a
/// path with the fewest steps, a [`LifoWorklist`] explores depth-first, and
/// a [`PriorityWorklist`] ordered by [`PathCoster::compare`] finds a
/// cheapest path.
///
/// Coordinates are marked visited when a path ending there is taken off the
/// worklist, not when it is added, so a coordinate may be queued more than
/// once before it is first expanded.
///
/// [`FifoWorklist`]: crate::FifoWorklist
/// [`LifoWorklist`]: crate::LifoWorklist
/// [`PriorityWorklist`]: crate::PriorityWorklist
/// [`PathCoster::compare`]: crate::PathCoster::compare
pub struct Search<W> {
    worklist: W,
    visited: HashSet<Coordinate>,
    nbuf: Neighbors,
}

impl<W: Worklist<HexPath>> Search<W> {
    pub fn new(worklist: W) -> Self {
        Self {
            worklist,
            visited: HashSet::new(),
            nbuf: Neighbors::new(),
        }
    }

    /// Find a path from `from` to `to` across `board`.
    ///
    /// Returns `None` if `from` has no tile or is impassable, or if the
    /// frontier runs out before `to` is reached. State from a previous call
    /// is discarded first.
    pub fn find<B: Board>(&mut self, from: Coordinate, to: Coordinate, board: &B) -> Option<HexPath> {
        self.worklist.clear();
        self.visited.clear();

        if !board.terrain_at(from).is_some_and(|t| t.is_passable()) {
            log::debug!("search from {from}: no passable tile");
            return None;
        }
        self.worklist.add(HexPath::new(from));

        while let Ok(path) = self.worklist.next() {
            let last = path.last();
            if !self.visited.insert(last) {
                continue;
            }
            if last == to {
                log::debug!(
                    "found {from} -> {to} in {} steps, {} visited, {} pending",
                    path.length(),
                    self.visited.len(),
                    self.worklist.len()
                );
                return Some(path);
            }
            let visited = &self.visited;
            let open = self.nbuf.hex(last, |n| {
                !visited.contains(&n) && board.terrain_at(n).is_some_and(|t| t.is_passable())
            });
            for &n in open {
                self.worklist.add(path.step(n));
            }
        }

        log::debug!("no path {from} -> {to}, {} visited", self.visited.len());
        None
    }

    /// Coordinates expanded by the most recent [`find`](Self::find).
    pub fn visited(&self) -> &HashSet<Coordinate> {
        &self.visited
    }

    pub fn worklist(&self) -> &W {
        &self.worklist
    }
}
