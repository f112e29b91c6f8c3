use hexboard_core::Coordinate;

/// Cached neighbor computation helper.
///
/// Enumerates the hex neighbors of a coordinate, in
/// [`Coordinate::neighbors`] order, filtered by a predicate.
pub struct Neighbors {
    buf: Vec<Coordinate>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(6),
        }
    }

    /// Return the neighbors of `c` for which `keep` returns `true`.
    pub fn hex(&mut self, c: Coordinate, keep: impl Fn(Coordinate) -> bool) -> &[Coordinate] {
        self.buf.clear();
        self.buf.extend(c.neighbors().filter(|&n| keep(n)));
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_in_direction_order() {
        let mut nb = Neighbors::new();
        let c = Coordinate::new(3, -2);
        assert_eq!(nb.hex(c, |_| true), c.neighbors().collect::<Vec<_>>().as_slice());
        let upper: Vec<_> = nb.hex(c, |n| n.b() > c.b()).to_vec();
        assert_eq!(upper, vec![Coordinate::new(4, -1), Coordinate::new(3, -1)]);
        assert!(nb.hex(c, |_| false).is_empty());
    }

    #[test]
    fn edge_of_range_has_fewer_neighbors() {
        let mut nb = Neighbors::new();
        let c = Coordinate::new(i32::MAX, 0);
        assert_eq!(nb.hex(c, |_| true).len(), 3);
    }
}
