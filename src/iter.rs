//! A DFS walker over the trie that yields every `(key, value)` pair exactly
//! once without parent pointers, reconstructing each full key from an
//! explicit stack of frames as it descends. Grounded on `trie.c`'s
//! `htr_iterator_*` family.
//!
//! The source's frame stack is collapsed here into one homogeneous
//! `Vec<Frame>`: visiting a trie node pushes its children right-to-left
//! (so the leftmost sorts first) and yields immediately if the node itself
//! carries a value (the "nil key" case — a key that terminates exactly at
//! this node); visiting a bucket edge materializes that bucket's entries
//! (sorted or not, per the iterator's mode) and yields them one at a time.
//! Because a bucket's own edge in this implementation is never shared
//! across a discontiguous set of parent slots (see `node.rs`), invariant
//! I-5's "deduplicate consecutive edges to the same bucket" has nothing
//! left to do — the range encoding already visits each bucket once.

use crate::bucket::Bucket;
use crate::node::{Edge, NodeRef, TrieNode};

enum Frame<'a> {
    /// Visit `node`, reached via edge byte `byte` at `level` (the key
    /// prefix length upon arrival, i.e. how many bytes deep `node` sits).
    /// `level == 0` only for the root, which has no incoming edge byte.
    TrieNode { node: &'a TrieNode, level: usize, byte: u8 },
    /// Visit the bucket reached via edge byte `byte` at `level`, `pure`
    /// indicating whether the edge strips the leading byte.
    Bucket { bucket: &'a Bucket, level: usize, byte: u8, pure: bool },
    /// Yield a bucket's materialized entries one at a time.
    Entries { entries: Vec<(&'a [u8], u64)>, next: usize, prefix_len: usize },
}

/// Cursor-style iterator matching the source's `htr_iterator_*` API
/// (`next`/`finished`/`key`/`val`). There is no `free`: dropping the
/// iterator is enough, since it owns no heap resources beyond its own
/// bookkeeping `Vec`s and borrows the trie rather than any separate
/// allocation.
pub struct HatTrieIter<'a> {
    sorted: bool,
    key_buf: Vec<u8>,
    stack: Vec<Frame<'a>>,
    current: Option<(Vec<u8>, u64)>,
}

impl<'a> HatTrieIter<'a> {
    pub(crate) fn new(root: &'a TrieNode, sorted: bool) -> Self {
        let mut it = HatTrieIter {
            sorted,
            key_buf: Vec::new(),
            stack: vec![Frame::TrieNode { node: root, level: 0, byte: 0 }],
            current: None,
        };
        it.current = it.advance();
        it
    }

    fn push_children(&mut self, node: &'a TrieNode, level: usize) {
        for edge in node.edges.iter().rev() {
            let Edge { c0, c1, target } = edge;
            match target {
                NodeRef::Trie(child) => {
                    self.stack.push(Frame::TrieNode { node: &**child, level: level + 1, byte: *c1 });
                }
                NodeRef::Bucket(bucket) => {
                    self.stack.push(Frame::Bucket {
                        bucket: &**bucket,
                        level: level + 1,
                        byte: *c1,
                        pure: c0 == c1,
                    });
                }
            }
        }
    }

    fn advance(&mut self) -> Option<(Vec<u8>, u64)> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::TrieNode { node, level, byte } => {
                    if level > 0 {
                        self.key_buf.truncate(level - 1);
                        self.key_buf.push(byte);
                    }
                    self.push_children(node, level);
                    if node.has_value {
                        let key = self.key_buf[..level].to_vec();
                        return Some((key, u64::from_le_bytes(node.value)));
                    }
                }
                Frame::Bucket { bucket, level, byte, pure } => {
                    let prefix_len = if pure {
                        self.key_buf.truncate(level - 1);
                        self.key_buf.push(byte);
                        level
                    } else {
                        level - 1
                    };
                    let entries = if self.sorted {
                        bucket.entries_sorted()
                    } else {
                        bucket.entries_unsorted().collect()
                    };
                    self.stack.push(Frame::Entries { entries, next: 0, prefix_len });
                }
                Frame::Entries { entries, next, prefix_len } => {
                    if next < entries.len() {
                        let (suffix, value) = entries[next];
                        let mut key = self.key_buf[..prefix_len].to_vec();
                        key.extend_from_slice(suffix);
                        self.stack.push(Frame::Entries { entries, next: next + 1, prefix_len });
                        return Some((key, value));
                    }
                }
            }
        }
        None
    }

    /// Advances to the next pair, if any.
    pub fn next(&mut self) {
        self.current = self.advance();
    }

    pub fn finished(&self) -> bool {
        self.current.is_none()
    }

    pub fn key(&self) -> &[u8] {
        self.current.as_ref().map(|(k, _)| k.as_slice()).unwrap_or(&[])
    }

    pub fn val(&self) -> u64 {
        self.current.as_ref().map(|(_, v)| *v).unwrap_or(0)
    }
}

/// An ergonomic `std::iter::Iterator` wrapper over [`HatTrieIter`]'s cursor
/// API, for idiomatic `for (k, v) in trie.iter(true) { .. }` usage. This is
/// additive: the cursor API above remains the primary, spec-literal
/// surface, and this is a thin adapter over it rather than a replacement.
pub struct HatTrieEntries<'a>(HatTrieIter<'a>);

impl<'a> Iterator for HatTrieEntries<'a> {
    type Item = (Vec<u8>, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.finished() {
            return None;
        }
        let item = (self.0.key().to_vec(), self.0.val());
        self.0.next();
        Some(item)
    }
}

impl<'a> IntoIterator for HatTrieIter<'a> {
    type Item = (Vec<u8>, u64);
    type IntoIter = HatTrieEntries<'a>;

    fn into_iter(self) -> HatTrieEntries<'a> {
        HatTrieEntries(self)
    }
}
