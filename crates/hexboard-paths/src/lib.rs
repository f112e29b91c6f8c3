//! Path search across hexagonal boards.
//!
//! This crate finds and prices paths over any [`hexboard_core::Board`]:
//!
//! - [`HexPath`]: an immutable, prefix-sharing walk across adjacent hexes
//! - [`PathCoster`]: prices a path from a per-terrain [`CostTable`], counting
//!   interior tiles twice
//! - [`Worklist`]: the frontier, as a stack ([`LifoWorklist`]), a queue
//!   ([`FifoWorklist`]) or a comparator-ordered heap ([`PriorityWorklist`])
//! - [`Search`]: expands paths from a start coordinate until the target is
//!   reached, in whatever order its worklist dictates
//!
//! # Example
//!
//! ```
//! use hexboard_core::{Board, Coordinate, HashBoard, Terrain, Tile};
//! use hexboard_paths::{FifoWorklist, PathCoster, Search};
//!
//! let board = HashBoard::new();
//! for a in 0..3 {
//!     for b in 0..3 {
//!         board.add(Tile::new(Terrain::Land, Coordinate::new(a, b)));
//!     }
//! }
//!
//! let mut search = Search::new(FifoWorklist::new());
//! let path = search
//!     .find(Coordinate::new(0, 0), Coordinate::new(2, 2), &board)
//!     .unwrap();
//! assert_eq!(path.length(), 2);
//! assert_eq!(PathCoster::new(board).cost(&path), 4);
//! ```

mod coster;
mod neighbors;
mod path;
mod search;
mod worklist;

pub use coster::{CostTable, ILLEGAL, IMPASSABLE, PathCoster};
pub use neighbors::Neighbors;
pub use path::HexPath;
pub use search::Search;
pub use worklist::{FifoWorklist, LifoWorklist, PriorityWorklist, Worklist};
