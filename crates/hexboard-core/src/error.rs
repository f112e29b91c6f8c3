//! The unified [`Error`] type shared by the board and path crates.

use thiserror::Error;

use crate::coord::Coordinate;
use crate::tile::Tile;

/// Convenient result alias for hexboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by board stores, parsing and search helpers.
///
/// Expected outcomes of normal operation (no path found, a path crossing an
/// empty coordinate) are ordinary return values, not errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A three-axis coordinate whose third axis is not `a - b`.
    #[error("invalid coordinate <{a},{b},{c}>: third axis must equal a - b")]
    InvalidCoordinate { a: i32, b: i32, c: i32 },

    /// Malformed tile or coordinate text.
    #[error("format error: {0}")]
    Format(String),

    /// The store was structurally modified after the iterator was created.
    #[error("board was modified while being iterated")]
    ConcurrentModification,

    /// An operation was called in a state that does not permit it.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// `next` was called on an empty worklist.
    #[error("worklist exhausted")]
    Exhausted,

    /// A path step that is not one hex away from the path's end.
    #[error("{next} is not adjacent to {last}")]
    NotAdjacent { last: Coordinate, next: Coordinate },

    /// A tile added through a row view that belongs to another row.
    #[error("tile {tile} lies outside row {row}")]
    OutsideRow { tile: Tile, row: i32 },

    /// Wrapper for I/O errors while reading or writing boards.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
