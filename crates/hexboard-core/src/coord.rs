//! Hexagonal coordinates: [`Coordinate`].
//!
//! A coordinate names a hex by two independent axes `a` (left to right,
//! drifting with each row) and `b` (row, top to bottom). The third axis
//! `c = a - b` is redundant and kept only so that distances read naturally.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// An immutable three-axis hex coordinate. Invariant: `c == a - b`.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoordinate"))]
pub struct Coordinate {
    a: i32,
    b: i32,
    c: i32,
}

/// Offsets of the six neighbours, clockwise from the right.
const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, 1), (0, 1), (-1, 0), (-1, -1), (0, -1)];

impl Coordinate {
    /// Origin `<0,0,0>`.
    pub const ORIGIN: Self = Self { a: 0, b: 0, c: 0 };

    /// Create a coordinate from the two independent axes.
    ///
    /// # Panics
    ///
    /// Panics if `a - b` does not fit in an `i32`. Use
    /// [`checked`](Self::checked) for untrusted axes.
    #[inline]
    pub const fn new(a: i32, b: i32) -> Self {
        match Self::checked(a, b) {
            Some(h) => h,
            None => panic!("coordinate axis c = a - b overflows i32"),
        }
    }

    /// Create a coordinate, or `None` if `a - b` overflows.
    #[inline]
    pub const fn checked(a: i32, b: i32) -> Option<Self> {
        match a.checked_sub(b) {
            Some(c) => Some(Self { a, b, c }),
            None => None,
        }
    }

    /// Create a coordinate from all three axes, which must be consistent.
    pub fn try_new(a: i32, b: i32, c: i32) -> Result<Self> {
        if a.checked_sub(b) != Some(c) {
            return Err(Error::InvalidCoordinate { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    #[inline]
    pub const fn a(self) -> i32 {
        self.a
    }

    #[inline]
    pub const fn b(self) -> i32 {
        self.b
    }

    #[inline]
    pub const fn c(self) -> i32 {
        self.c
    }

    /// Minimum number of single-hex moves needed to reach `other`,
    /// saturating at `i32::MAX`.
    ///
    /// This is the sum of the two smallest of the three axis deltas.
    pub fn distance(self, other: Coordinate) -> i32 {
        let delta = |x: i32, y: i32| (i64::from(x) - i64::from(y)).abs();
        let da = delta(self.a, other.a);
        let db = delta(self.b, other.b);
        let dc = delta(self.c, other.c);
        let d = if da > db && da > dc { db + dc } else { da + db.min(dc) };
        i32::try_from(d).unwrap_or(i32::MAX)
    }

    /// Whether `other` is exactly one hex away.
    #[inline]
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.distance(other) == 1
    }

    /// Return a coordinate shifted by (da, db), or `None` if any axis would
    /// overflow.
    #[inline]
    pub fn shift(self, da: i32, db: i32) -> Option<Self> {
        Self::checked(self.a.checked_add(da)?, self.b.checked_add(db)?)
    }

    /// The adjacent coordinates, clockwise starting at `(a+1, b)`.
    ///
    /// Six of them, except at the edge of the `i32` range where the ones that
    /// cannot be represented are skipped.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        DIRECTIONS
            .into_iter()
            .filter_map(move |(da, db)| self.shift(da, db))
    }

    /// Integer hash mix of the two independent axes.
    ///
    /// Stable across runs; the hash store reduces it with a floored modulo.
    #[inline]
    pub const fn hash_code(self) -> i32 {
        let h = 17i32.wrapping_mul(31).wrapping_add(self.a);
        h.wrapping_mul(31).wrapping_add(self.b)
    }
}

// --- trait impls for Coordinate ---

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.hash(state);
        self.b.hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order: by `b`, then by `a`.
impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.b.cmp(&other.b).then(self.a.cmp(&other.a))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{},{}>", self.a, self.b, self.c)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parse the `<a,b,c>` literal produced by `Display`.
    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(|| Error::Format(format!("coordinate {s:?} must be written <a,b,c>")))?;
        let mut axes = [0i32; 3];
        let mut parts = inner.split(',');
        for (i, axis) in axes.iter_mut().enumerate() {
            let part = parts
                .next()
                .ok_or_else(|| Error::Format(format!("coordinate {s:?} has {i} axes, need 3")))?;
            *axis = part
                .trim()
                .parse()
                .map_err(|e| Error::Format(format!("bad axis {part:?} in {s:?}: {e}")))?;
        }
        if parts.next().is_some() {
            return Err(Error::Format(format!("coordinate {s:?} has more than 3 axes")));
        }
        Coordinate::try_new(axes[0], axes[1], axes[2])
    }
}

/// Wire form used to validate deserialized coordinates.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCoordinate {
    a: i32,
    b: i32,
    c: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::try_new(raw.a, raw.b, raw.c)
    }
}
