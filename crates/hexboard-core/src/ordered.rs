//! [`TreeBoard`]: an unbalanced binary search tree keyed by [`Coordinate`].
//!
//! Keys are ordered row-major (by `b`, then `a`), so an in-order walk visits
//! the board one row at a time and a single row is a contiguous key range,
//! exposed as a [`Row`] view.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::board::{Board, TileCursor};
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::terrain::Terrain;
use crate::tile::Tile;

// ---------------------------------------------------------------------------
// Internal tree
// ---------------------------------------------------------------------------

struct Node {
    coord: Coordinate,
    terrain: Terrain,
    left: Link,
    right: Link,
}

type Link = Option<Box<Node>>;

impl Node {
    fn leaf(tile: Tile) -> Self {
        Self {
            coord: tile.location,
            terrain: tile.terrain,
            left: None,
            right: None,
        }
    }

    fn tile(&self) -> Tile {
        Tile::new(self.terrain, self.coord)
    }
}

// Tear subtrees down from an explicit stack. The tree is unbalanced, so its
// depth can equal its length.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// The link holding `key`, or the empty link where it would be inserted.
fn seek(mut link: &mut Link, key: Coordinate) -> &mut Link {
    loop {
        let dir = match link.as_deref() {
            Some(node) => key.cmp(&node.coord),
            None => Ordering::Equal,
        };
        if dir == Ordering::Equal {
            return link;
        }
        let Some(node) = link else {
            return link;
        };
        link = if dir == Ordering::Less {
            &mut node.left
        } else {
            &mut node.right
        };
    }
}

/// Detach the rightmost node under `link`, splicing its left child into
/// its place.
fn take_max(mut link: &mut Link) -> Link {
    while link.as_deref().is_some_and(|n| n.right.is_some()) {
        let Some(node) = link else {
            return None;
        };
        link = &mut node.right;
    }
    let mut max = link.take()?;
    *link = max.left.take();
    Some(max)
}

#[derive(Default)]
struct Tree {
    root: Link,
    len: usize,
    version: u64,
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Tree {
    fn find(&self, c: Coordinate) -> Option<&Node> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match c.cmp(&node.coord) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Insert or overwrite; `true` if the tree content changed.
    fn add(&mut self, tile: Tile) -> bool {
        let link = seek(&mut self.root, tile.location);
        if let Some(node) = link {
            if node.terrain == tile.terrain {
                return false;
            }
            node.terrain = tile.terrain;
        } else {
            *link = Some(Box::new(Node::leaf(tile)));
            self.len += 1;
        }
        self.version += 1;
        true
    }

    /// Remove the node holding exactly `tile`.
    ///
    /// A node with two children takes over its in-order predecessor's entry,
    /// and the predecessor is spliced out of the left subtree instead.
    fn remove(&mut self, tile: Tile) -> bool {
        let link = seek(&mut self.root, tile.location);
        let Some(node) = link else {
            return false;
        };
        if node.terrain != tile.terrain {
            return false;
        }
        if node.left.is_some() && node.right.is_some() {
            if let Some(pred) = take_max(&mut node.left) {
                node.coord = pred.coord;
                node.terrain = pred.terrain;
            }
        } else {
            let child = node.left.take().or_else(|| node.right.take());
            *link = child;
        }
        self.len -= 1;
        self.version += 1;
        true
    }

    /// Count the reachable nodes, checking every key lies strictly between
    /// the bounds its ancestors impose.
    fn check(&self) -> std::result::Result<(), String> {
        let mut count = 0;
        let mut stack: Vec<(&Node, Option<Coordinate>, Option<Coordinate>)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, None, None)));
        while let Some((node, lo, hi)) = stack.pop() {
            if lo.is_some_and(|lo| node.coord <= lo) || hi.is_some_and(|hi| node.coord >= hi) {
                return Err(format!("{} is out of order", node.coord));
            }
            count += 1;
            stack.extend(node.left.as_deref().map(|l| (l, lo, Some(node.coord))));
            stack.extend(node.right.as_deref().map(|r| (r, Some(node.coord), hi)));
        }
        if count != self.len {
            return Err(format!("len is {} but {count} nodes are reachable", self.len));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TreeBoard
// ---------------------------------------------------------------------------

/// A board backed by a binary search tree in row-major key order.
///
/// Cloning produces another handle to the same tree.
#[derive(Debug, Clone, Default)]
pub struct TreeBoard {
    tree: Rc<RefCell<Tree>>,
}

impl TreeBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural modification counter.
    pub fn version(&self) -> u64 {
        self.tree.borrow().version
    }

    /// Check that keys are strictly increasing in order and that the
    /// stored length matches the reachable nodes.
    pub fn check(&self) -> std::result::Result<(), String> {
        self.tree.borrow().check()
    }

    /// A view of the tiles whose `b` axis equals `b`.
    pub fn row(&self, b: i32) -> Row {
        Row {
            board: self.clone(),
            b,
        }
    }

    fn cursor(&self, row: Option<i32>) -> TreeIter {
        let tree = self.tree.borrow();
        let mut it = TreeIter {
            tree: Rc::clone(&self.tree),
            pending: Vec::new(),
            version: tree.version,
            last: None,
            row,
            failed: false,
        };
        match row {
            Some(b) => it.seek_row(tree.root.as_deref(), b),
            None => it.push_left(tree.root.as_deref()),
        }
        it
    }
}

impl Board for TreeBoard {
    type Iter = TreeIter;

    fn terrain_at(&self, at: Coordinate) -> Option<Terrain> {
        self.tree.borrow().find(at).map(|n| n.terrain)
    }

    fn add(&self, tile: Tile) -> bool {
        let mut tree = self.tree.borrow_mut();
        let changed = tree.add(tile);
        debug_assert_eq!(tree.check(), Ok(()), "at end of add");
        changed
    }

    fn remove(&self, tile: Tile) -> bool {
        let mut tree = self.tree.borrow_mut();
        let removed = tree.remove(tile);
        debug_assert_eq!(tree.check(), Ok(()), "at end of remove");
        removed
    }

    fn len(&self) -> usize {
        self.tree.borrow().len
    }

    fn clear(&self) {
        let mut tree = self.tree.borrow_mut();
        if tree.len == 0 {
            return;
        }
        tree.root = None;
        tree.len = 0;
        tree.version += 1;
    }

    fn iter(&self) -> TreeIter {
        self.cursor(None)
    }
}

// ---------------------------------------------------------------------------
// TreeIter
// ---------------------------------------------------------------------------

/// Fail-fast in-order iterator over a [`TreeBoard`] or one of its rows.
///
/// Pending nodes are remembered by key. Removing the tile just yielded never
/// disturbs them: every pending key is larger than the removed one, and
/// neither splicing nor predecessor replacement moves a larger node.
///
/// A structural change made through another handle is reported once as
/// [`Error::ConcurrentModification`], after which the iterator is done.
pub struct TreeIter {
    tree: Rc<RefCell<Tree>>,
    pending: Vec<Coordinate>,
    version: u64,
    last: Option<Tile>,
    /// Row bound, if iterating a [`Row`].
    row: Option<i32>,
    /// Set once a concurrent modification has been reported.
    failed: bool,
}

impl TreeIter {
    fn push_left(&mut self, mut cur: Option<&Node>) {
        while let Some(node) = cur {
            self.pending.push(node.coord);
            cur = node.left.as_deref();
        }
    }

    /// Like `push_left` but skips every key in a row before `b`.
    fn seek_row(&mut self, mut cur: Option<&Node>, b: i32) {
        while let Some(node) = cur {
            if node.coord.b() < b {
                cur = node.right.as_deref();
            } else {
                self.pending.push(node.coord);
                cur = node.left.as_deref();
            }
        }
    }
}

impl Iterator for TreeIter {
    type Item = Result<Tile>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = Rc::clone(&self.tree);
        let tree = tree.borrow();
        if self.failed {
            return None;
        }
        if tree.version != self.version {
            self.failed = true;
            self.pending.clear();
            self.last = None;
            return Some(Err(Error::ConcurrentModification));
        }
        let key = self.pending.pop()?;
        if self.row.is_some_and(|b| key.b() != b) {
            self.pending.clear();
            return None;
        }
        let node = tree.find(key)?;
        self.push_left(node.right.as_deref());
        let tile = node.tile();
        self.last = Some(tile);
        Some(Ok(tile))
    }
}

impl TileCursor for TreeIter {
    fn remove(&mut self) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if self.failed || tree.version != self.version {
            return Err(Error::ConcurrentModification);
        }
        let tile = self
            .last
            .take()
            .ok_or(Error::IllegalState("remove must follow a call to next"))?;
        tree.remove(tile);
        self.version = tree.version;
        debug_assert_eq!(tree.check(), Ok(()), "at end of iterator remove");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// The tiles of a [`TreeBoard`] lying in one row (a fixed `b`).
///
/// The view is live: it shares the board's storage, and its length and
/// membership are computed by a bounded walk of the tree.
#[derive(Debug, Clone)]
pub struct Row {
    board: TreeBoard,
    b: i32,
}

impl Row {
    /// The `b` axis of this row.
    pub fn index(&self) -> i32 {
        self.b
    }

    pub fn terrain_at(&self, at: Coordinate) -> Option<Terrain> {
        if at.b() != self.b {
            return None;
        }
        self.board.terrain_at(at)
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.terrain_at(tile.location) == Some(tile.terrain)
    }

    /// Add a tile to the underlying board. Tiles of other rows are rejected.
    pub fn add(&self, tile: Tile) -> Result<bool> {
        if tile.location.b() != self.b {
            return Err(Error::OutsideRow { tile, row: self.b });
        }
        Ok(self.board.add(tile))
    }

    pub fn remove(&self, tile: Tile) -> bool {
        tile.location.b() == self.b && self.board.remove(tile)
    }

    /// Number of tiles in the row.
    pub fn len(&self) -> usize {
        self.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Fail-fast iterator over the row, in increasing `a`.
    pub fn iter(&self) -> TreeIter {
        self.board.cursor(Some(self.b))
    }
}
