//! The closed terrain catalog.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A kind of terrain covering a hex.
///
/// [`Terrain::Inaccessible`] can never be crossed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Terrain {
    Inaccessible,
    Water,
    Land,
    Forest,
    Mountain,
    City,
    Desert,
}

impl Terrain {
    /// Every terrain, in catalog order.
    pub const ALL: [Terrain; 7] = [
        Terrain::Inaccessible,
        Terrain::Water,
        Terrain::Land,
        Terrain::Forest,
        Terrain::Mountain,
        Terrain::City,
        Terrain::Desert,
    ];

    /// Upper-case catalog name, as used in the tile text form.
    pub const fn name(self) -> &'static str {
        match self {
            Terrain::Inaccessible => "INACCESSIBLE",
            Terrain::Water => "WATER",
            Terrain::Land => "LAND",
            Terrain::Forest => "FOREST",
            Terrain::Mountain => "MOUNTAIN",
            Terrain::City => "CITY",
            Terrain::Desert => "DESERT",
        }
    }

    /// Position in [`Terrain::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether a path may cross this terrain.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Terrain::Inaccessible)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terrain {
    type Err = Error;

    /// Exact, case-sensitive match against the catalog names.
    fn from_str(s: &str) -> Result<Self> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::Format(format!("unknown terrain {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for t in Terrain::ALL {
            assert_eq!(t.to_string().parse::<Terrain>().unwrap(), t);
        }
    }

    #[test]
    fn catalog_order() {
        for (i, t) in Terrain::ALL.into_iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn only_inaccessible_blocks() {
        let blocked: Vec<_> = Terrain::ALL.into_iter().filter(|t| !t.is_passable()).collect();
        assert_eq!(blocked, vec![Terrain::Inaccessible]);
    }

    #[test]
    fn unknown_or_miscased_names_rejected() {
        for bad in ["FOO", "city", "City", "", " CITY"] {
            assert!(matches!(bad.parse::<Terrain>(), Err(Error::Format(_))), "{bad:?}");
        }
    }
}
