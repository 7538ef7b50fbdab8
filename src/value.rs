/// A mutable handle to one stored value's 8 little-endian bytes.
///
/// Borrowed from either a trie node's own value slot or a record inside a
/// bucket arena. Mirrors the source's raw `&mut value_t` in spirit, but
/// wraps the byte array instead of transmuting to `&mut u64` directly:
/// record value bytes sit at an arbitrary offset inside a packed arena and
/// are not guaranteed to be 8-byte aligned, so reading/writing through a
/// `&mut u64` would be undefined behavior. Going through `[u8; 8]` and
/// `to_le_bytes`/`from_le_bytes` keeps this safe regardless of alignment.
///
/// The handle's lifetime ties it to the borrow that produced it: per the
/// source's resource model, a value handle is invalidated by the next
/// mutating call on the trie, which here is enforced by the borrow checker
/// rather than left as a caller obligation.
pub struct ValueHandle<'a> {
    bytes: &'a mut [u8; 8],
}

impl<'a> ValueHandle<'a> {
    pub(crate) fn new(bytes: &'a mut [u8; 8]) -> Self {
        ValueHandle { bytes }
    }

    pub fn get(&self) -> u64 {
        u64::from_le_bytes(*self.bytes)
    }

    pub fn set(&mut self, value: u64) {
        *self.bytes = value.to_le_bytes();
    }
}

impl std::fmt::Debug for ValueHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueHandle").field("value", &self.get()).finish()
    }
}
