//! The [`Tile`] value: a terrain at a coordinate.

use std::fmt;
use std::str::FromStr;

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::terrain::Terrain;

/// A terrain paired with its location.
///
/// Board stores keep coordinate-to-terrain associations; tiles are
/// synthesized when reading them back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: Terrain,
    pub location: Coordinate,
}

impl Tile {
    #[inline]
    pub const fn new(terrain: Terrain, location: Coordinate) -> Self {
        Self { terrain, location }
    }
}

/// Text form `TERRAIN<a,b,c>`, e.g. `CITY<2,1,1>`.
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.terrain, self.location)
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .find('<')
            .ok_or_else(|| Error::Format(format!("tile {s:?} has no coordinate")))?;
        let (name, coord) = s.split_at(split);
        let terrain = name.parse::<Terrain>()?;
        let location = coord.parse::<Coordinate>()?;
        Ok(Tile::new(terrain, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form() {
        let t = Tile::new(Terrain::City, Coordinate::new(2, 1));
        assert_eq!(t.to_string(), "CITY<2,1,1>");
        assert_eq!("CITY<2,1,1>".parse::<Tile>().unwrap(), t);
    }

    #[test]
    fn round_trip_every_terrain() {
        for terrain in Terrain::ALL {
            for (a, b) in [
                (0, 0),
                (-3, 5),
                (7, -2),
                (i32::MAX, 0),
                (i32::MIN, 0),
                (-1, i32::MAX),
                (i32::MIN, i32::MIN),
            ] {
                let t = Tile::new(terrain, Coordinate::new(a, b));
                assert_eq!(t.to_string().parse::<Tile>().unwrap(), t);
            }
        }
    }

    #[test]
    fn inconsistent_axes_rejected() {
        assert!(matches!(
            "CITY<1,2,4>".parse::<Tile>(),
            Err(Error::InvalidCoordinate { a: 1, b: 2, c: 4 })
        ));
    }

    #[test]
    fn malformed_text_rejected() {
        for bad in ["FOO<0,0,0>", "CITY", "CITY<1,1>", "<0,0,0>", "LAND<0,0,0", "LAND <0,0,0>"] {
            assert!(matches!(bad.parse::<Tile>(), Err(Error::Format(_))), "{bad:?}");
        }
    }
}
