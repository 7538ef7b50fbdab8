use crate::error::HatTrieError;
use crate::hash::{ByteHasher, Crc32Hasher};
use crate::iter::HatTrieIter;
use crate::node::TrieNode;
use crate::value::ValueHandle;
use std::collections::HashMap;
use std::marker::PhantomData;

/// A HAT-trie: a 256-way byte trie over cache-conscious array hash buckets,
/// mapping byte-string keys to 64-bit values. See the crate's top-level
/// docs for an overview and [`crate::hash`] for the hashing contract.
///
/// # Example
///
/// ```rust
/// use hat_trie::HatTrie;
///
/// let mut trie = HatTrie::new();
/// trie.get(b"apple").unwrap().set(10);
/// trie.get(b"app").unwrap().set(20);
///
/// assert_eq!(trie.try_get(b"app").unwrap().get(), 20);
/// assert!(trie.try_get(b"ap").is_none());
/// assert_eq!(trie.len(), 2);
/// ```
pub struct HatTrie<H: ByteHasher = Crc32Hasher> {
    root: TrieNode,
    len: usize,
    hasher: H,
}

impl Default for HatTrie<Crc32Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl HatTrie<Crc32Hasher> {
    /// Creates an empty trie using the default CRC32 hasher.
    pub fn new() -> Self {
        Self::with_hasher(Crc32Hasher)
    }
}

impl<H: ByteHasher> HatTrie<H> {
    /// Creates an empty trie using a caller-supplied hash function, per the
    /// spec's "hash function is an external collaborator" carve-out.
    pub fn with_hasher(hasher: H) -> Self {
        HatTrie {
            root: TrieNode::new_root(),
            len: 0,
            hasher,
        }
    }

    /// Returns a handle to `key`'s value, creating a zeroed entry first if
    /// absent. The handle is writable; writes are observed by subsequent
    /// reads. Bursts any bucket that has grown past the burst threshold
    /// along the way.
    pub fn get(&mut self, key: &[u8]) -> Result<ValueHandle<'_>, HatTrieError> {
        let mut delta: isize = 0;
        let handle = self.root.get(key, &self.hasher, &mut delta)?;
        self.len = (self.len as isize + delta) as usize;
        Ok(handle)
    }

    /// Looks up `key` without creating it on a miss.
    pub fn try_get(&mut self, key: &[u8]) -> Option<ValueHandle<'_>> {
        self.root.try_get(key, &self.hasher)
    }

    /// Removes `key` if present, returning whether it was found. Removing
    /// a missing key is not an error.
    pub fn del(&mut self, key: &[u8]) -> bool {
        let found = self.root.del(key, &self.hasher);
        if found {
            self.len -= 1;
        }
        found
    }

    /// Number of live distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A DFS iterator over every `(key, value)` pair, reconstructing full
    /// keys without parent pointers. `sorted` requests ascending
    /// lexicographic order; unsorted order is otherwise
    /// implementation-defined but still yields each pair exactly once.
    ///
    /// Borrows the trie for the iterator's lifetime: the source's contract
    /// ("do not mutate during iteration") is enforced here by the borrow
    /// checker rather than left as a caller obligation.
    pub fn iter(&self, sorted: bool) -> HatTrieIter<'_> {
        HatTrieIter::new(&self.root, sorted)
    }
}

/// Builder mirroring the teacher crate's `KvStoreBuilder`: a fluent way to
/// assemble a populated trie in one expression.
pub struct HatTrieBuilder<H: ByteHasher = Crc32Hasher> {
    entries: HashMap<Vec<u8>, u64>,
    _hasher: PhantomData<H>,
}

impl Default for HatTrieBuilder<Crc32Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl HatTrieBuilder<Crc32Hasher> {
    pub fn new() -> Self {
        HatTrieBuilder {
            entries: HashMap::new(),
            _hasher: PhantomData,
        }
    }
}

impl<H: ByteHasher> HatTrieBuilder<H> {
    pub fn insert(mut self, key: impl Into<Vec<u8>>, value: u64) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    pub fn extend<I, K>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<Vec<u8>>,
    {
        for (k, v) in iter {
            self.entries.insert(k.into(), v);
        }
        self
    }

    pub fn build_with_hasher(self, hasher: H) -> Result<HatTrie<H>, HatTrieError> {
        let mut trie = HatTrie::with_hasher(hasher);
        for (key, value) in self.entries {
            trie.get(&key)?.set(value);
        }
        Ok(trie)
    }
}

impl HatTrieBuilder<Crc32Hasher> {
    pub fn build(self) -> Result<HatTrie<Crc32Hasher>, HatTrieError> {
        self.build_with_hasher(Crc32Hasher)
    }
}
