//! Line-oriented board text.
//!
//! A board file holds one tile per line in the `TERRAIN<a,b,c>` form, e.g.
//!
//! ```text
//! LAND<0,0,0>
//! WATER<1,0,1>
//! CITY<2,1,1>
//! ```
//!
//! Blank lines are ignored and surrounding whitespace is trimmed.

use std::io::{BufRead, Write};

use crate::board::Board;
use crate::error::{Error, Result};
use crate::tile::Tile;

/// What [`load_board`] does with a line that is not a valid tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadPolicy {
    /// Log the line and carry on.
    #[default]
    SkipMalformed,
    /// Return the first parse error.
    StopAtFirstError,
}

// ---------------------------------------------------------------------------
// TileReader
// ---------------------------------------------------------------------------

/// Parses tiles from a buffered reader, one per non-blank line.
pub struct TileReader<R: BufRead> {
    reader: R,
    line: String,
    line_no: usize,
}

impl<R: BufRead> TileReader<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
        }
    }

    /// 1-based number of the line most recently read.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TileReader<R> {
    type Item = Result<Tile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => self.line_no += 1,
                Err(e) => return Some(Err(e.into())),
            }
            let text = self.line.trim();
            if !text.is_empty() {
                return Some(text.parse());
            }
        }
    }
}

/// Iterate over the tiles in `reader`.
pub fn read_tiles<R: BufRead>(reader: R) -> TileReader<R> {
    TileReader::new(reader)
}

/// Add every tile in `reader` to `board`, returning how many additions
/// changed the board.
///
/// I/O errors are always returned. Malformed lines are handled per `policy`.
pub fn load_board<R: BufRead, B: Board>(reader: R, board: &B, policy: ReadPolicy) -> Result<usize> {
    let mut tiles = read_tiles(reader);
    let mut added = 0;
    while let Some(tile) = tiles.next() {
        match tile {
            Ok(tile) => {
                if board.add(tile) {
                    added += 1;
                }
            }
            Err(e @ Error::Io(_)) => return Err(e),
            Err(e) if policy == ReadPolicy::StopAtFirstError => return Err(e),
            Err(e) => log::warn!("skipping line {}: {e}", tiles.line_no()),
        }
    }
    log::debug!("loaded {added} tiles, board now holds {}", board.len());
    Ok(added)
}

/// Write every tile of `board`, one per line, in store iteration order.
pub fn write_board<W: Write, B: Board>(board: &B, mut writer: W) -> Result<()> {
    for tile in board.iter() {
        writeln!(writer, "{}", tile?)?;
    }
    writer.flush()?;
    Ok(())
}
