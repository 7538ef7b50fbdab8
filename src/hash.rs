//! The bucket layer's hash function is an external collaborator by design
//! (see the crate's top-level docs): any deterministic, pure `bytes -> u32`
//! function suffices. `Crc32Hasher` is provided as a fast, dependency-light
//! default; callers with different distribution needs supply their own.

/// A pure, deterministic hash over byte strings, used to choose a bucket slot.
pub trait ByteHasher {
    fn hash(&self, key: &[u8]) -> u32;
}

impl<F> ByteHasher for F
where
    F: Fn(&[u8]) -> u32,
{
    fn hash(&self, key: &[u8]) -> u32 {
        self(key)
    }
}

/// Default hasher, built on the same `crc32fast` dependency used elsewhere
/// in this crate's lineage for checksums, repurposed here as a bucket hash.
/// CRC32 is not collision-resistant against adversarial input, but the spec
/// only requires a non-cryptographic 32-bit hash over the key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Hasher;

impl ByteHasher for Crc32Hasher {
    fn hash(&self, key: &[u8]) -> u32 {
        crc32fast::hash(key)
    }
}
