//! Binary search tree keyed by word tokens, with optional red-black
//! balancing.
//!
//! In [`TreeMode::Plain`] the tree is an unadorned BST: height follows the
//! insertion order, and sorted input degenerates to a linked list. In
//! [`TreeMode::Balanced`] every new node starts red and a four-case
//! rotation/recolor fixup runs bottom-up at every node on the way out of the
//! insertion recursion. The fixup restores red-black shape incrementally per
//! insertion; a transient red-red edge can survive near the root between
//! insertions, which is why callers blacken the root once, via
//! [`OrderedTreeStore::finalize_root_color`], after the input stream ends.

use std::cmp::Ordering;
use std::io::{self, Write};

use crate::Error;

/// Balancing mode, fixed at construction.
///
/// The mode is a per-instance field: two stores with different modes can
/// coexist in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMode {
    /// Plain binary search tree. Height is unbounded by key ordering;
    /// adversarially sorted input costs O(n) per operation and recursion
    /// depth to match.
    Plain,
    /// Red-black balancing; height stays O(log n).
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    key: String,
    frequency: u64,
    /// Meaningful only in balanced mode; plain trees leave every node black.
    color: Color,
    left: Link,
    right: Link,
}

/// Ordered frequency store backed by a binary search tree.
///
/// ```rust
/// use freqstore::{OrderedTreeStore, TreeMode};
///
/// let mut store = OrderedTreeStore::new(TreeMode::Balanced);
/// for token in ["cat", "sat", "cat"] {
///     store.insert(token);
/// }
/// store.finalize_root_color();
/// assert_eq!(store.frequency("cat"), 2);
/// assert!(!store.search("dog"));
/// ```
#[derive(Debug)]
pub struct OrderedTreeStore {
    root: Link,
    mode: TreeMode,
    len: usize,
}

impl OrderedTreeStore {
    /// Create an empty store in the given mode.
    pub fn new(mode: TreeMode) -> Self {
        Self {
            root: None,
            mode,
            len: 0,
        }
    }

    /// The balancing mode chosen at construction.
    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a token, counting one occurrence.
    ///
    /// An existing key has its frequency incremented in place; a new key is
    /// copied into a fresh node. In balanced mode the red-black fixup runs
    /// at every node on the way back up the insertion path.
    pub fn insert(&mut self, token: &str) {
        let mut added = false;
        let root = self.root.take();
        self.root = Some(insert_node(root, token, self.mode, &mut added));
        if added {
            self.len += 1;
        }
    }

    /// Recolor the root black.
    ///
    /// Call once after the whole input stream has been consumed; the
    /// per-insertion fixup deliberately leaves the root's color alone.
    pub fn finalize_root_color(&mut self) {
        paint(&mut self.root, Color::Black);
    }

    /// Whether the token is present.
    pub fn search(&self, token: &str) -> bool {
        self.find(token).is_some()
    }

    /// The token's frequency; 0 if absent.
    pub fn frequency(&self, token: &str) -> u64 {
        self.find(token).map_or(0, |node| node.frequency)
    }

    fn find(&self, token: &str) -> Option<&Node> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match token.cmp(node.key.as_str()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Depth of the tree: 0 for a single leaf node.
    ///
    /// Returns [`Error::EmptyTree`] for an empty tree rather than leaving
    /// the result undefined.
    pub fn depth(&self) -> Result<usize, Error> {
        self.root.as_deref().map(depth_node).ok_or(Error::EmptyTree)
    }

    /// Visit every key in preorder (node, left subtree, right subtree).
    pub fn preorder<F>(&self, mut visit: F)
    where
        F: FnMut(&str),
    {
        preorder_node(&self.root, &mut visit);
    }

    /// Visit every key in order; keys arrive strictly ascending.
    pub fn inorder<F>(&self, mut visit: F)
    where
        F: FnMut(&str),
    {
        inorder_node(&self.root, &mut visit);
    }

    /// Serialize the tree as a DOT graph.
    ///
    /// Emits one node-declaration line per node followed by one edge line
    /// per present child, preorder, left edge before right edge. Node color
    /// is rendered `red` only for red nodes of a balanced tree; plain trees
    /// render every node `black`.
    pub fn export_dot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "digraph tree {{")?;
        writeln!(out, "node [shape = Mrecord, penwidth = 2];")?;
        if let Some(root) = self.root.as_deref() {
            self.dot_node(root, out)?;
        }
        writeln!(out, "}}")
    }

    fn dot_node<W: Write>(&self, node: &Node, out: &mut W) -> io::Result<()> {
        let color = if self.mode == TreeMode::Balanced && node.color == Color::Red {
            "red"
        } else {
            "black"
        };
        writeln!(
            out,
            "\"{}\"[label=\"{{<f0>{}:{}|{{<f1>|<f2>}}}}\"color={}];",
            node.key, node.key, node.frequency, color
        )?;
        if let Some(left) = node.left.as_deref() {
            self.dot_node(left, out)?;
            writeln!(out, "\"{}\":f1 -> \"{}\":f0;", node.key, left.key)?;
        }
        if let Some(right) = node.right.as_deref() {
            self.dot_node(right, out)?;
            writeln!(out, "\"{}\":f2 -> \"{}\":f0;", node.key, right.key)?;
        }
        Ok(())
    }
}

impl Drop for OrderedTreeStore {
    // Work-list teardown: recursive drop of a degenerate plain tree would
    // recurse once per node and can blow the stack on large sorted input.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let Some(root) = self.root.take() {
            pending.push(root);
        }
        while let Some(mut node) = pending.pop() {
            if let Some(left) = node.left.take() {
                pending.push(left);
            }
            if let Some(right) = node.right.take() {
                pending.push(right);
            }
        }
    }
}

fn insert_node(link: Link, token: &str, mode: TreeMode, added: &mut bool) -> Box<Node> {
    let mut node = match link {
        None => {
            *added = true;
            Box::new(Node {
                key: token.to_owned(),
                frequency: 1,
                color: match mode {
                    TreeMode::Plain => Color::Black,
                    TreeMode::Balanced => Color::Red,
                },
                left: None,
                right: None,
            })
        }
        Some(mut node) => {
            match token.cmp(node.key.as_str()) {
                Ordering::Equal => node.frequency += 1,
                Ordering::Less => {
                    node.left = Some(insert_node(node.left.take(), token, mode, added));
                }
                Ordering::Greater => {
                    node.right = Some(insert_node(node.right.take(), token, mode, added));
                }
            }
            node
        }
    };
    if mode == TreeMode::Balanced {
        node = fix_up(node);
    }
    node
}

fn is_red(link: &Link) -> bool {
    link.as_deref().map_or(false, |n| n.color == Color::Red)
}

fn paint(link: &mut Link, color: Color) {
    if let Some(node) = link.as_deref_mut() {
        node.color = color;
    }
}

/// Recolor the node red and both children black, pushing the red-red
/// violation one level up.
fn color_flip(node: &mut Node) {
    node.color = Color::Red;
    paint(&mut node.left, Color::Black);
    paint(&mut node.right, Color::Black);
}

/// Restore local red-black shape at `node`.
///
/// Four guarded transformations, one per red child / red grandchild
/// configuration, evaluated unconditionally in a fixed order. A case never
/// short-circuits the ones after it: a rotation applied by an earlier case
/// can itself produce the configuration a later case repairs, and the
/// resulting cascade is required for the balance this scheme achieves.
fn fix_up(mut node: Box<Node>) -> Box<Node> {
    // Red left child with red left-left grandchild.
    if is_red(&node.left) && node.left.as_deref().map_or(false, |l| is_red(&l.left)) {
        if is_red(&node.right) {
            color_flip(&mut node);
        } else {
            node = rotate_right(node);
            node.color = Color::Black;
            paint(&mut node.right, Color::Red);
        }
    }
    // Red left child with red left-right grandchild.
    if is_red(&node.left) && node.left.as_deref().map_or(false, |l| is_red(&l.right)) {
        if is_red(&node.right) {
            color_flip(&mut node);
        } else {
            let left = node.left.take().expect("guard saw a red left child");
            node.left = Some(rotate_left(left));
            node = rotate_right(node);
            node.color = Color::Black;
            paint(&mut node.right, Color::Red);
        }
    }
    // Red right child with red right-left grandchild.
    if is_red(&node.right) && node.right.as_deref().map_or(false, |r| is_red(&r.left)) {
        if is_red(&node.left) {
            color_flip(&mut node);
        } else {
            let right = node.right.take().expect("guard saw a red right child");
            node.right = Some(rotate_right(right));
            node = rotate_left(node);
            node.color = Color::Black;
            paint(&mut node.left, Color::Red);
        }
    }
    // Red right child with red right-right grandchild.
    if is_red(&node.right) && node.right.as_deref().map_or(false, |r| is_red(&r.right)) {
        if is_red(&node.left) {
            color_flip(&mut node);
        } else {
            node = rotate_left(node);
            node.color = Color::Black;
            paint(&mut node.left, Color::Red);
        }
    }
    node
}

/// The right child becomes the subtree root; in-order order is preserved.
fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut root = node.right.take().expect("left rotation needs a right child");
    node.right = root.left.take();
    root.left = Some(node);
    root
}

/// The left child becomes the subtree root; in-order order is preserved.
fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut root = node.left.take().expect("right rotation needs a left child");
    node.left = root.right.take();
    root.right = Some(node);
    root
}

fn depth_node(node: &Node) -> usize {
    if node.left.is_none() && node.right.is_none() {
        return 0;
    }
    let left = node.left.as_deref().map_or(0, depth_node);
    let right = node.right.as_deref().map_or(0, depth_node);
    1 + left.max(right)
}

fn preorder_node<F: FnMut(&str)>(link: &Link, visit: &mut F) {
    if let Some(node) = link.as_deref() {
        visit(&node.key);
        preorder_node(&node.left, visit);
        preorder_node(&node.right, visit);
    }
}

fn inorder_node<F: FnMut(&str)>(link: &Link, visit: &mut F) {
    if let Some(node) = link.as_deref() {
        inorder_node(&node.left, visit);
        visit(&node.key);
        inorder_node(&node.right, visit);
    }
}
