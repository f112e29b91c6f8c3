//! [`HashBoard`]: a chained hash table keyed by [`Coordinate`].
//!
//! Buckets hold singly linked chains; new entries go at the head of their
//! chain. The capacity is always prime and the table grows to the next prime
//! at or above twice its size before the load would reach 3/4. Emptying the
//! table resets it to [`HashBoard::MIN_CAPACITY`] buckets.

use std::cell::RefCell;
use std::rc::Rc;

use crate::board::{Board, TileCursor};
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::primes::{is_prime, next_prime};
use crate::terrain::Terrain;
use crate::tile::Tile;

// ---------------------------------------------------------------------------
// Internal table
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Node {
    coord: Coordinate,
    terrain: Terrain,
    next: Option<Box<Node>>,
}

impl Node {
    fn tile(&self) -> Tile {
        Tile::new(self.terrain, self.coord)
    }
}

type Chain = Option<Box<Node>>;

#[derive(Debug)]
struct Table {
    buckets: Vec<Chain>,
    len: usize,
    version: u64,
}

fn empty_buckets(capacity: usize) -> Vec<Chain> {
    (0..capacity).map(|_| None).collect()
}

/// Floored modulo, so negative hash codes still land in range.
#[inline]
fn bucket_index(c: Coordinate, capacity: usize) -> usize {
    (c.hash_code() as i64).rem_euclid(capacity as i64) as usize
}

/// Whether holding `n` entries in `capacity` buckets stays under 3/4 load.
#[inline]
fn under_load(n: usize, capacity: usize) -> bool {
    4 * n < 3 * capacity
}

/// Unlink the first node matching `tile` exactly. Chain order is preserved.
fn unlink(chain: &mut Chain, tile: Tile) -> bool {
    match chain {
        None => false,
        Some(node) if node.coord == tile.location && node.terrain == tile.terrain => {
            *chain = node.next.take();
            true
        }
        Some(node) => unlink(&mut node.next, tile),
    }
}

impl Table {
    fn new() -> Self {
        Self {
            buckets: empty_buckets(HashBoard::MIN_CAPACITY),
            len: 0,
            version: 0,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn find(&self, c: Coordinate) -> Option<&Node> {
        let mut cur = self.buckets[bucket_index(c, self.capacity())].as_deref();
        while let Some(node) = cur {
            if node.coord == c {
                return Some(node);
            }
            cur = node.next.as_deref();
        }
        None
    }

    fn find_mut(&mut self, c: Coordinate) -> Option<&mut Node> {
        let i = bucket_index(c, self.capacity());
        let mut cur = self.buckets[i].as_deref_mut();
        while let Some(node) = cur {
            if node.coord == c {
                return Some(node);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    /// The entry at position `offset` of chain `bucket`.
    fn entry(&self, bucket: usize, offset: usize) -> Option<Tile> {
        let mut cur = self.buckets.get(bucket)?.as_deref();
        for _ in 0..offset {
            cur = cur?.next.as_deref();
        }
        cur.map(Node::tile)
    }

    /// Grow if holding `wanted` entries would break the load limit.
    fn ensure_capacity(&mut self, wanted: usize) {
        if under_load(wanted, self.capacity()) {
            return;
        }
        let capacity = next_prime(self.capacity() * 2);
        log::trace!("hash board: growing {} -> {capacity} buckets", self.capacity());
        let old = std::mem::replace(&mut self.buckets, empty_buckets(capacity));
        for mut chain in old {
            while let Some(mut node) = chain {
                chain = node.next.take();
                let i = bucket_index(node.coord, capacity);
                node.next = self.buckets[i].take();
                self.buckets[i] = Some(node);
            }
        }
    }

    fn add(&mut self, tile: Tile) -> bool {
        if let Some(node) = self.find_mut(tile.location) {
            if node.terrain == tile.terrain {
                return false;
            }
            node.terrain = tile.terrain;
        } else {
            self.ensure_capacity(self.len + 1);
            let i = bucket_index(tile.location, self.capacity());
            let next = self.buckets[i].take();
            self.buckets[i] = Some(Box::new(Node {
                coord: tile.location,
                terrain: tile.terrain,
                next,
            }));
            self.len += 1;
        }
        self.version += 1;
        true
    }

    fn remove(&mut self, tile: Tile) -> bool {
        let i = bucket_index(tile.location, self.capacity());
        if !unlink(&mut self.buckets[i], tile) {
            return false;
        }
        self.len -= 1;
        self.version += 1;
        if self.len == 0 {
            self.reset();
        }
        true
    }

    fn reset(&mut self) {
        if self.capacity() != HashBoard::MIN_CAPACITY {
            log::trace!("hash board: resetting {} -> {} buckets", self.capacity(), HashBoard::MIN_CAPACITY);
        }
        self.buckets = empty_buckets(HashBoard::MIN_CAPACITY);
        self.len = 0;
    }

    /// Verify the table invariants, describing the first violation found.
    fn check(&self) -> std::result::Result<(), String> {
        let capacity = self.capacity();
        if !is_prime(capacity) {
            return Err(format!("capacity {capacity} is not prime"));
        }
        let mut count = 0;
        for (i, chain) in self.buckets.iter().enumerate() {
            let mut seen = Vec::new();
            let mut cur = chain.as_deref();
            while let Some(node) = cur {
                if bucket_index(node.coord, capacity) != i {
                    return Err(format!("{} found in bucket {i}", node.coord));
                }
                if seen.contains(&node.coord) {
                    return Err(format!("duplicate {} in bucket {i}", node.coord));
                }
                seen.push(node.coord);
                count += 1;
                cur = node.next.as_deref();
            }
        }
        if count != self.len {
            return Err(format!("len is {} but {count} entries are stored", self.len));
        }
        if self.len == 0 && capacity != HashBoard::MIN_CAPACITY {
            return Err(format!("empty table has {capacity} buckets"));
        }
        if !under_load(self.len, capacity) {
            return Err(format!("{} entries overload {capacity} buckets", self.len));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HashBoard
// ---------------------------------------------------------------------------

/// A board backed by a chained hash table.
///
/// Cloning produces another handle to the same table.
#[derive(Debug, Clone)]
pub struct HashBoard {
    table: Rc<RefCell<Table>>,
}

impl Default for HashBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl HashBoard {
    /// Bucket count of an empty board.
    pub const MIN_CAPACITY: usize = 7;

    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            table: Rc::new(RefCell::new(Table::new())),
        }
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.borrow().capacity()
    }

    /// Structural modification counter.
    pub fn version(&self) -> u64 {
        self.table.borrow().version
    }

    /// Check the structural invariants: prime capacity, load below 3/4,
    /// minimum capacity when empty, every entry in its hash bucket, no
    /// duplicate keys in a chain and an exact entry count.
    pub fn check(&self) -> std::result::Result<(), String> {
        self.table.borrow().check()
    }
}

impl Board for HashBoard {
    type Iter = HashIter;

    fn terrain_at(&self, at: Coordinate) -> Option<Terrain> {
        self.table.borrow().find(at).map(|n| n.terrain)
    }

    fn add(&self, tile: Tile) -> bool {
        let mut table = self.table.borrow_mut();
        let changed = table.add(tile);
        debug_assert_eq!(table.check(), Ok(()), "at end of add");
        changed
    }

    fn remove(&self, tile: Tile) -> bool {
        let mut table = self.table.borrow_mut();
        let removed = table.remove(tile);
        debug_assert_eq!(table.check(), Ok(()), "at end of remove");
        removed
    }

    fn len(&self) -> usize {
        self.table.borrow().len
    }

    fn clear(&self) {
        let mut table = self.table.borrow_mut();
        if table.len == 0 {
            return;
        }
        table.reset();
        table.version += 1;
        debug_assert_eq!(table.check(), Ok(()), "at end of clear");
    }

    fn iter(&self) -> HashIter {
        let version = self.table.borrow().version;
        HashIter {
            table: Rc::clone(&self.table),
            bucket: 0,
            offset: 0,
            version,
            last: None,
            failed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// HashIter
// ---------------------------------------------------------------------------

/// Fail-fast iterator over a [`HashBoard`], in bucket order and then chain
/// order.
pub struct HashIter {
    table: Rc<RefCell<Table>>,
    /// Bucket currently being walked.
    bucket: usize,
    /// Chain position of the next candidate within `bucket`.
    offset: usize,
    version: u64,
    /// Tile yielded by the last `next`, until removed.
    last: Option<Tile>,
    /// Set once a concurrent modification has been reported.
    failed: bool,
}

impl Iterator for HashIter {
    type Item = Result<Tile>;

    fn next(&mut self) -> Option<Self::Item> {
        let table = self.table.borrow();
        if self.failed {
            return None;
        }
        if table.version != self.version {
            self.failed = true;
            self.last = None;
            return Some(Err(Error::ConcurrentModification));
        }
        while self.bucket < table.capacity() {
            if let Some(tile) = table.entry(self.bucket, self.offset) {
                self.offset += 1;
                self.last = Some(tile);
                return Some(Ok(tile));
            }
            self.bucket += 1;
            self.offset = 0;
        }
        None
    }
}

impl TileCursor for HashIter {
    fn remove(&mut self) -> Result<()> {
        let mut table = self.table.borrow_mut();
        if self.failed || table.version != self.version {
            return Err(Error::ConcurrentModification);
        }
        let tile = self
            .last
            .take()
            .ok_or(Error::IllegalState("remove must follow a call to next"))?;
        table.remove(tile);
        // The successor slid into the removed entry's chain position.
        self.offset = self.offset.saturating_sub(1);
        self.version = table.version;
        debug_assert_eq!(table.check(), Ok(()), "at end of iterator remove");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngExt;

    fn h(a: i32, b: i32) -> Coordinate {
        Coordinate::new(a, b)
    }

    fn t(terrain: Terrain, a: i32, b: i32) -> Tile {
        Tile::new(terrain, h(a, b))
    }

    #[test]
    fn new_board_is_well_formed() {
        let board = HashBoard::new();
        assert_eq!(board.capacity(), HashBoard::MIN_CAPACITY);
        assert_eq!(board.len(), 0);
        assert_eq!(board.check(), Ok(()));
    }

    #[test]
    fn negative_hash_codes_land_in_range() {
        let board = HashBoard::new();
        let far = h(-1_000_000, -77);
        assert!(far.hash_code() < 0);
        assert!(board.add(Tile::new(Terrain::Water, far)));
        assert_eq!(board.terrain_at(far), Some(Terrain::Water));
        assert_eq!(board.check(), Ok(()));
    }

    #[test]
    fn grows_before_load_reaches_three_quarters() {
        let board = HashBoard::new();
        for a in 0..5 {
            board.add(t(Terrain::Land, a, 0));
        }
        assert_eq!(board.capacity(), 7);
        board.add(t(Terrain::Land, 5, 0));
        assert_eq!(board.capacity(), 17);
        assert_eq!(board.len(), 6);
        for a in 0..6 {
            assert_eq!(board.terrain_at(h(a, 0)), Some(Terrain::Land));
        }
    }

    #[test]
    fn overwrite_keeps_size() {
        let board = HashBoard::new();
        assert!(board.add(t(Terrain::City, 3, 0)));
        let v = board.version();
        assert!(board.add(t(Terrain::Forest, 3, 0)));
        assert_eq!(board.len(), 1);
        assert_eq!(board.version(), v + 1);
        assert!(!board.add(t(Terrain::Forest, 3, 0)));
        assert_eq!(board.version(), v + 1);
    }

    #[test]
    fn remove_needs_exact_match_and_resets_when_empty() {
        let board = HashBoard::new();
        for a in 0..20 {
            board.add(t(Terrain::Desert, a, a));
        }
        assert!(board.capacity() > HashBoard::MIN_CAPACITY);
        assert!(!board.remove(t(Terrain::Land, 0, 0)));
        for a in 0..20 {
            assert!(board.remove(t(Terrain::Desert, a, a)));
        }
        assert!(board.is_empty());
        assert_eq!(board.capacity(), HashBoard::MIN_CAPACITY);
        assert_eq!(board.check(), Ok(()));
    }

    #[test]
    fn clear_only_bumps_version_when_not_empty() {
        let board = HashBoard::new();
        board.clear();
        assert_eq!(board.version(), 0);
        board.add(t(Terrain::Land, 1, 1));
        board.clear();
        assert_eq!(board.version(), 2);
        assert_eq!(board.capacity(), HashBoard::MIN_CAPACITY);
    }

    #[test]
    fn shared_chain_lookup() {
        // (3,0) and (10,0) hash 7 * 31 apart, so they share a bucket of 7.
        let board = HashBoard::new();
        board.add(t(Terrain::City, 3, 0));
        board.add(t(Terrain::Water, 10, 0));
        assert_eq!(bucket_index(h(3, 0), 7), bucket_index(h(10, 0), 7));
        assert_eq!(board.terrain_at(h(3, 0)), Some(Terrain::City));
        assert_eq!(board.terrain_at(h(10, 0)), Some(Terrain::Water));
        assert!(board.remove(t(Terrain::City, 3, 0)));
        assert_eq!(board.terrain_at(h(10, 0)), Some(Terrain::Water));
    }

    #[test]
    fn random_operations_keep_invariants() {
        let mut rng = rand::rng();
        let board = HashBoard::new();
        let mut model = std::collections::HashMap::new();
        for _ in 0..2000 {
            let c = h(rng.random_range(-8..8), rng.random_range(-8..8));
            let terrain = Terrain::ALL[rng.random_range(0..Terrain::ALL.len())];
            if rng.random_range(0..3) == 0 {
                let expected = model.get(&c) == Some(&terrain);
                assert_eq!(board.remove(Tile::new(terrain, c)), expected);
                if expected {
                    model.remove(&c);
                }
            } else {
                let expected = model.get(&c) != Some(&terrain);
                assert_eq!(board.add(Tile::new(terrain, c)), expected);
                model.insert(c, terrain);
            }
            assert_eq!(board.check(), Ok(()));
            assert_eq!(board.len(), model.len());
        }
        assert_eq!(board.iter().count(), model.len());
        for tile in board.tiles() {
            assert_eq!(model.get(&tile.location), Some(&tile.terrain));
        }
    }

    #[test]
    fn iteration_visits_everything_once() {
        let board = HashBoard::new();
        for a in 0..6 {
            for b in 0..6 {
                board.add(t(Terrain::Land, a, b));
            }
        }
        let mut seen: Vec<_> = board.iter().map(|r| r.unwrap().location).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 36);
    }

    #[test]
    fn stale_iterator_fails() {
        let board = HashBoard::new();
        board.add(t(Terrain::Land, 0, 0));
        board.add(t(Terrain::Land, 1, 0));
        let mut it = board.iter();
        it.next().unwrap().unwrap();
        let handle = board.clone();
        handle.remove(t(Terrain::Land, 1, 0));
        assert!(matches!(it.next(), Some(Err(Error::ConcurrentModification))));
        assert!(matches!(it.remove(), Err(Error::ConcurrentModification)));
        assert!(it.next().is_none());
        assert!(matches!(it.remove(), Err(Error::ConcurrentModification)));
        // The board itself is still usable through a fresh iterator.
        assert_eq!(board.iter().count(), 1);
    }

    #[test]
    fn stale_iterator_reports_once_then_ends() {
        let board = HashBoard::new();
        for a in 0..10 {
            board.add(t(Terrain::Land, a, 0));
        }
        let it = board.iter();
        board.add(t(Terrain::Land, 10, 0));
        assert_eq!(it.take(100).count(), 1);

        let mut it = board.iter();
        it.next().unwrap().unwrap();
        board.clear();
        let rest: Vec<_> = it.by_ref().collect();
        assert_eq!(rest.len(), 1);
        assert!(matches!(rest[0], Err(Error::ConcurrentModification)));
        assert!(matches!(it.remove(), Err(Error::ConcurrentModification)));
    }

    #[test]
    fn overwrite_invalidates_iterator() {
        let board = HashBoard::new();
        board.add(t(Terrain::Land, 0, 0));
        let mut it = board.iter();
        board.add(t(Terrain::Water, 0, 0));
        assert!(matches!(it.next(), Some(Err(Error::ConcurrentModification))));
    }

    #[test]
    fn remove_requires_next() {
        let board = HashBoard::new();
        board.add(t(Terrain::Land, 0, 0));
        board.add(t(Terrain::Land, 1, 0));
        let mut it = board.iter();
        assert!(matches!(it.remove(), Err(Error::IllegalState(_))));
        it.next().unwrap().unwrap();
        it.remove().unwrap();
        assert!(matches!(it.remove(), Err(Error::IllegalState(_))));
    }

    #[test]
    fn iterator_remove_keeps_iterating() {
        let board = HashBoard::new();
        // Several entries share chains so removal exercises chain offsets.
        for a in 0..5 {
            board.add(t(Terrain::Land, a * 7, 0));
            board.add(t(Terrain::Forest, a, 1));
        }
        let total = board.len();
        let mut it = board.iter();
        let mut visited = 0;
        let mut removed = 0;
        while let Some(tile) = it.next() {
            let tile = tile.unwrap();
            visited += 1;
            if tile.terrain == Terrain::Land {
                it.remove().unwrap();
                removed += 1;
            }
        }
        assert_eq!(visited, total);
        assert_eq!(removed, 5);
        assert_eq!(board.len(), 5);
        assert!(board.tiles().iter().all(|t| t.terrain == Terrain::Forest));
        assert_eq!(board.check(), Ok(()));
    }

    #[test]
    fn removing_everything_through_iterator() {
        let board = HashBoard::new();
        for a in 0..30 {
            board.add(t(Terrain::Mountain, a, -a));
        }
        let mut it = board.iter();
        let mut n = 0;
        while let Some(tile) = it.next() {
            tile.unwrap();
            it.remove().unwrap();
            n += 1;
        }
        assert_eq!(n, 30);
        assert!(board.is_empty());
        assert_eq!(board.capacity(), HashBoard::MIN_CAPACITY);
    }
}
