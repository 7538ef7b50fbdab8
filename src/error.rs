use thiserror::Error;

/// Maximum representable key length: the packed record's length prefix tops
/// out at 2 bytes with the low bit reserved as a width marker (see `bucket`).
pub const MAX_KEY_LEN: usize = (1 << 15) - 1;

#[derive(Error, Debug)]
pub enum HatTrieError {
    #[error("allocation failure while growing a bucket")]
    AllocationFailure,

    #[error("key too long: {len} bytes (maximum is {MAX_KEY_LEN})")]
    KeyTooLong { len: usize },
}
