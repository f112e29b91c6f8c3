//! The [`Board`] abstraction and its construction-time selector [`AnyBoard`].
//!
//! A board is a partial function from [`Coordinate`] to [`Terrain`]. Two
//! interchangeable stores implement it:
//!
//! | Store | Layout | Iteration order |
//! |---|---|---|
//! | [`HashBoard`] | chained hash table, prime capacity | bucket order |
//! | [`TreeBoard`] | binary search tree | row-major (`b`, then `a`) |
//!
//! Stores are *handles*: cloning one yields another view of the same
//! storage, and mutation goes through `&self`. Every structural change bumps
//! a version counter; iterators remember the version they were created at
//! and report [`Error::ConcurrentModification`](crate::Error::ConcurrentModification) once it moves.

use crate::coord::Coordinate;
use crate::error::Result;
use crate::hashed::{HashBoard, HashIter};
use crate::ordered::{TreeBoard, TreeIter};
use crate::terrain::Terrain;
use crate::tile::Tile;

/// A fail-fast iterator over the tiles of a board.
///
/// Once the board is modified by anything other than this cursor's own
/// [`remove`](TileCursor::remove), the next call to `next` yields
/// [`Error::ConcurrentModification`](crate::Error::ConcurrentModification)
/// and the iterator ends. `remove` keeps failing with the same error.
pub trait TileCursor: Iterator<Item = Result<Tile>> {
    /// Remove the tile most recently yielded by `next`.
    ///
    /// May be called once per successful `next`; otherwise fails with
    /// [`Error::IllegalState`](crate::Error::IllegalState).
    fn remove(&mut self) -> Result<()>;
}

/// Coordinate-to-terrain store.
pub trait Board {
    type Iter: TileCursor;

    /// Terrain at `at`, or `None` if there is no tile there.
    fn terrain_at(&self, at: Coordinate) -> Option<Terrain>;

    /// Insert or overwrite. Returns `false` if the exact tile was already
    /// present.
    fn add(&self, tile: Tile) -> bool;

    /// Remove the tile only if both its location and terrain match.
    fn remove(&self, tile: Tile) -> bool;

    /// Number of tiles.
    fn len(&self) -> usize;

    /// Remove every tile.
    fn clear(&self);

    /// A fresh fail-fast iterator.
    fn iter(&self) -> Self::Iter;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, tile: Tile) -> bool {
        self.terrain_at(tile.location) == Some(tile.terrain)
    }

    /// Map-style insert: set the terrain at `at`, returning the previous one.
    fn insert(&self, at: Coordinate, terrain: Terrain) -> Option<Terrain> {
        // Lookup and write are separate store calls, not atomic across handles.
        let previous = self.terrain_at(at);
        self.add(Tile::new(terrain, at));
        previous
    }

    /// Map-style removal by coordinate alone; `None` if nothing was removed.
    fn remove_at(&self, at: Coordinate) -> Option<Terrain> {
        // Lookup and write are separate store calls, not atomic across handles.
        let terrain = self.terrain_at(at)?;
        self.remove(Tile::new(terrain, at)).then_some(terrain)
    }

    /// Snapshot of every tile, in store iteration order.
    fn tiles(&self) -> Vec<Tile> {
        // A fresh iterator cannot be stale before we finish with it.
        self.iter().flatten().collect()
    }
}

// ---------------------------------------------------------------------------
// AnyBoard
// ---------------------------------------------------------------------------

/// Which store backs an [`AnyBoard`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardKind {
    #[default]
    Hashed,
    Ordered,
}

/// A board whose store is chosen at construction time.
#[derive(Clone, Debug)]
pub enum AnyBoard {
    Hashed(HashBoard),
    Ordered(TreeBoard),
}

impl AnyBoard {
    /// Create an empty board of the given kind.
    pub fn new(kind: BoardKind) -> Self {
        match kind {
            BoardKind::Hashed => Self::Hashed(HashBoard::new()),
            BoardKind::Ordered => Self::Ordered(TreeBoard::new()),
        }
    }

    pub fn kind(&self) -> BoardKind {
        match self {
            Self::Hashed(_) => BoardKind::Hashed,
            Self::Ordered(_) => BoardKind::Ordered,
        }
    }
}

impl Default for AnyBoard {
    fn default() -> Self {
        Self::new(BoardKind::default())
    }
}

impl From<HashBoard> for AnyBoard {
    fn from(b: HashBoard) -> Self {
        Self::Hashed(b)
    }
}

impl From<TreeBoard> for AnyBoard {
    fn from(b: TreeBoard) -> Self {
        Self::Ordered(b)
    }
}

/// Iterator over an [`AnyBoard`].
pub enum AnyIter {
    Hashed(HashIter),
    Ordered(TreeIter),
}

impl Iterator for AnyIter {
    type Item = Result<Tile>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Hashed(it) => it.next(),
            Self::Ordered(it) => it.next(),
        }
    }
}

impl TileCursor for AnyIter {
    fn remove(&mut self) -> Result<()> {
        match self {
            Self::Hashed(it) => it.remove(),
            Self::Ordered(it) => it.remove(),
        }
    }
}

impl Board for AnyBoard {
    type Iter = AnyIter;

    fn terrain_at(&self, at: Coordinate) -> Option<Terrain> {
        match self {
            Self::Hashed(b) => b.terrain_at(at),
            Self::Ordered(b) => b.terrain_at(at),
        }
    }

    fn add(&self, tile: Tile) -> bool {
        match self {
            Self::Hashed(b) => b.add(tile),
            Self::Ordered(b) => b.add(tile),
        }
    }

    fn remove(&self, tile: Tile) -> bool {
        match self {
            Self::Hashed(b) => b.remove(tile),
            Self::Ordered(b) => b.remove(tile),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Hashed(b) => b.len(),
            Self::Ordered(b) => b.len(),
        }
    }

    fn clear(&self) {
        match self {
            Self::Hashed(b) => b.clear(),
            Self::Ordered(b) => b.clear(),
        }
    }

    fn iter(&self) -> AnyIter {
        match self {
            Self::Hashed(b) => AnyIter::Hashed(b.iter()),
            Self::Ordered(b) => AnyIter::Ordered(b.iter()),
        }
    }
}
