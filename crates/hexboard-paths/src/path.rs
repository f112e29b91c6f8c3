use std::fmt;
use std::rc::Rc;

use hexboard_core::{Coordinate, Error, Result};

struct Link {
    previous: Option<HexPath>,
    last: Coordinate,
    length: usize,
}

/// An immutable walk across adjacent hexes.
///
/// A path is either a single coordinate (length 0) or a shorter path
/// extended by one adjacent step. Extensions share their prefix, so cloning
/// and extending are O(1) and a search frontier can fan out from a common
/// tail without copying it.
#[derive(Clone)]
pub struct HexPath(Rc<Link>);

// Unwind the chain in a loop; the default drop recurses once per step.
impl Drop for Link {
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(HexPath(rc)) = previous {
            match Rc::try_unwrap(rc) {
                Ok(mut link) => previous = link.previous.take(),
                Err(_) => break,
            }
        }
    }
}

impl HexPath {
    /// A path that starts and stops at `start`.
    pub fn new(start: Coordinate) -> Self {
        Self(Rc::new(Link {
            previous: None,
            last: start,
            length: 0,
        }))
    }

    /// Extend this path by one step to `next`, which must be adjacent to
    /// [`last`](Self::last).
    pub fn extend(&self, next: Coordinate) -> Result<HexPath> {
        let last = self.last();
        if !last.is_adjacent(next) {
            return Err(Error::NotAdjacent { last, next });
        }
        Ok(self.step(next))
    }

    /// Extend without the adjacency check; `next` must come from
    /// `self.last().neighbors()`.
    pub(crate) fn step(&self, next: Coordinate) -> HexPath {
        debug_assert!(self.last().is_adjacent(next));
        Self(Rc::new(Link {
            previous: Some(self.clone()),
            last: next,
            length: self.0.length + 1,
        }))
    }

    /// Number of steps; one less than the number of coordinates.
    #[inline]
    pub fn length(&self) -> usize {
        self.0.length
    }

    #[inline]
    pub fn last(&self) -> Coordinate {
        self.0.last
    }

    /// The path without its final step, or `None` for a length-0 path.
    #[inline]
    pub fn previous(&self) -> Option<&HexPath> {
        self.0.previous.as_ref()
    }

    /// The starting coordinate.
    pub fn first(&self) -> Coordinate {
        let mut p = self;
        while let Some(prev) = p.previous() {
            p = prev;
        }
        p.last()
    }

    /// Coordinates from start to end.
    pub fn coords(&self) -> Vec<Coordinate> {
        let mut out = vec![Coordinate::ORIGIN; self.length() + 1];
        let mut cur = Some(self);
        while let Some(p) = cur {
            out[p.length()] = p.last();
            cur = p.previous();
        }
        out
    }

    /// Walk back to the start, checking that lengths drop by one per step,
    /// that the start has length 0 and that consecutive coordinates are
    /// adjacent.
    pub fn check(&self) -> std::result::Result<(), String> {
        let mut p = self;
        while let Some(prev) = p.previous() {
            if prev.length() + 1 != p.length() {
                return Err(format!(
                    "length {} follows length {}",
                    p.length(),
                    prev.length()
                ));
            }
            if !prev.last().is_adjacent(p.last()) {
                return Err(format!("{} is not adjacent to {}", p.last(), prev.last()));
            }
            p = prev;
        }
        if p.length() != 0 {
            return Err(format!("path starting at {} has length {}", p.last(), p.length()));
        }
        Ok(())
    }
}

impl PartialEq for HexPath {
    fn eq(&self, other: &Self) -> bool {
        if self.length() != other.length() {
            return false;
        }
        let (mut p, mut q) = (self, other);
        loop {
            if Rc::ptr_eq(&p.0, &q.0) {
                return true;
            }
            if p.last() != q.last() {
                return false;
            }
            match (p.previous(), q.previous()) {
                (Some(pp), Some(qq)) => (p, q) = (pp, qq),
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl Eq for HexPath {}

/// `<0,0,0> -> <1,0,1> -> <2,1,1>`
impl fmt::Display for HexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.coords().iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexPath({self})")
    }
}
