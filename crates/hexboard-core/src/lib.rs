//! **hexboard-core**: Hexagonal boards and their coordinate-to-terrain stores.
//!
//! This crate provides the foundational types used by `hexboard-paths`:
//! three-axis hex coordinates, the terrain catalog, tiles, two
//! interchangeable board stores behind the [`Board`] trait, and a plain-text
//! board format.

pub mod board;
pub mod coord;
pub mod error;
pub mod hashed;
pub mod io;
pub mod ordered;
pub mod primes;
pub mod terrain;
pub mod tile;

pub use board::{AnyBoard, AnyIter, Board, BoardKind, TileCursor};
pub use coord::Coordinate;
pub use error::{Error, Result};
pub use hashed::{HashBoard, HashIter};
pub use io::{ReadPolicy, TileReader, load_board, read_tiles, write_board};
pub use ordered::{Row, TreeBoard, TreeIter};
pub use terrain::Terrain;
pub use tile::Tile;
