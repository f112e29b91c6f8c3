use std::cmp::Ordering;

use hexboard_core::{Board, Terrain};

use crate::path::HexPath;

/// Cost of a path that crosses a coordinate with no tile.
pub const ILLEGAL: i32 = -1;

/// Cost sentinel for terrain that can never be crossed. Path costs saturate
/// here instead of overflowing.
pub const IMPASSABLE: i32 = i32::MAX;

/// Per-terrain cost of entering or leaving a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostTable {
    costs: [i32; Terrain::ALL.len()],
}

impl Default for CostTable {
    /// Every terrain costs 1, except [`Terrain::Inaccessible`] which is
    /// [`IMPASSABLE`].
    fn default() -> Self {
        let mut costs = [1; Terrain::ALL.len()];
        costs[Terrain::Inaccessible.index()] = IMPASSABLE;
        Self { costs }
    }
}

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, t: Terrain) -> i32 {
        self.costs[t.index()]
    }

    #[inline]
    pub fn set(&mut self, t: Terrain, cost: i32) {
        self.costs[t.index()] = cost;
    }
}

/// Prices paths across a board by the terrain they cross.
///
/// Each tile on a path costs its terrain's table entry once per crossing of
/// its edge: endpoints are entered or left once, interior tiles are entered
/// and left, so they count twice.
pub struct PathCoster<B> {
    board: B,
    table: CostTable,
}

impl<B: Board> PathCoster<B> {
    /// A coster with the default [`CostTable`].
    pub fn new(board: B) -> Self {
        Self::with_table(board, CostTable::default())
    }

    pub fn with_table(board: B, table: CostTable) -> Self {
        Self { board, table }
    }

    pub fn table(&self) -> &CostTable {
        &self.table
    }

    pub fn get_cost(&self, t: Terrain) -> i32 {
        self.table.get(t)
    }

    pub fn set_cost(&mut self, t: Terrain, cost: i32) {
        self.table.set(t, cost);
    }

    /// Total cost of `path`.
    ///
    /// Returns 0 for a length-0 path, [`ILLEGAL`] if some coordinate has no
    /// tile, and [`IMPASSABLE`] as soon as an impassable tile is met or the
    /// sum saturates.
    pub fn cost(&self, path: &HexPath) -> i32 {
        if path.length() == 0 {
            return 0;
        }
        let coords = path.coords();
        let end = coords.len() - 1;
        let mut sum = 0i32;
        for (i, &c) in coords.iter().enumerate() {
            let Some(terrain) = self.board.terrain_at(c) else {
                return ILLEGAL;
            };
            let mut cost = self.table.get(terrain);
            if cost == IMPASSABLE {
                return IMPASSABLE;
            }
            if i != 0 && i != end {
                cost = cost.saturating_mul(2);
            }
            sum = sum.saturating_add(cost);
        }
        sum
    }

    /// Order two paths by [`cost`](Self::cost).
    pub fn compare(&self, p1: &HexPath, p2: &HexPath) -> Ordering {
        self.cost(p1).cmp(&self.cost(p2))
    }
}
