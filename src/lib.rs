//! # hat-trie
//!
//! A HAT-trie: an in-memory associative container mapping byte-string keys
//! to fixed 64-bit values, combining a 256-way byte trie with
//! cache-conscious array hash tables ("buckets") at the leaves.
//!
//! Ported from the classic `hat-trie` C implementation (Askitis & Sinha,
//! "HAT-trie: a cache-conscious trie-based data structure for strings",
//! 2007) into safe Rust. The trie/bucket hybrid, the burst (split)
//! protocol, and the parent-pointer-free iterator are the hard parts this
//! crate focuses on; the hash function used to place keys within a
//! bucket's slots is an external collaborator (see [`hash`]) rather than
//! something this crate hardcodes end to end.
//!
//! ## Performance notes
//!
//! Buckets hold up to [`BURST_THRESHOLD`](node) records before the trie
//! layer bursts them into a finer trie/bucket arrangement, so lookup cost
//! is dominated by key-length-proportional trie descent plus a small,
//! roughly constant-size in-slot scan — not by a single large hash table
//! growing without bound the way a plain `HashMap` would.
//!
//! ## Example
//!
//! ```rust
//! use hat_trie::HatTrie;
//!
//! let mut trie = HatTrie::new();
//! trie.get(b"apple").unwrap().set(10);
//! trie.get(b"app").unwrap().set(20);
//!
//! assert_eq!(trie.try_get(b"app").unwrap().get(), 20);
//! assert!(trie.try_get(b"ap").is_none());
//!
//! for (key, value) in trie.iter(true) {
//!     println!("{:?} -> {}", key, value);
//! }
//! ```

mod bucket;
mod error;
mod hash;
mod iter;
mod node;
mod trie;
mod value;

pub use error::HatTrieError;
pub use hash::{ByteHasher, Crc32Hasher};
pub use iter::{HatTrieEntries, HatTrieIter};
pub use trie::{HatTrie, HatTrieBuilder};
pub use value::ValueHandle;
