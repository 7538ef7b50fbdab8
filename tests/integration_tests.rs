//! Comprehensive integration tests for production readiness

use hat_trie::{HatTrie, HatTrieBuilder, HatTrieError};
use std::collections::HashMap;

// ============================================================================
// CORRECTNESS TESTS
// ============================================================================

#[test]
fn test_basic_get_and_try_get() {
    let mut trie = HatTrie::new();
    trie.get(b"apple").unwrap().set(1);
    trie.get(b"banana").unwrap().set(2);
    trie.get(b"cherry").unwrap().set(3);

    assert_eq!(trie.try_get(b"apple").unwrap().get(), 1);
    assert_eq!(trie.try_get(b"banana").unwrap().get(), 2);
    assert_eq!(trie.try_get(b"cherry").unwrap().get(), 3);
    assert!(trie.try_get(b"durian").is_none());
    assert_eq!(trie.len(), 3);
}

#[test]
fn test_get_creates_zeroed_entry_on_miss() {
    let mut trie = HatTrie::new();
    assert_eq!(trie.get(b"fresh").unwrap().get(), 0);
    assert_eq!(trie.len(), 1);
}

#[test]
fn test_get_on_existing_key_does_not_change_len() {
    let mut trie = HatTrie::new();
    trie.get(b"k").unwrap().set(1);
    assert_eq!(trie.len(), 1);
    trie.get(b"k").unwrap().set(2);
    assert_eq!(trie.len(), 1);
    assert_eq!(trie.try_get(b"k").unwrap().get(), 2);
}

#[test]
fn test_try_get_never_creates_an_entry() {
    let mut trie = HatTrie::new();
    assert!(trie.try_get(b"ghost").is_none());
    assert_eq!(trie.len(), 0);
}

#[test]
fn test_delete_existing_and_missing_keys() {
    let mut trie = HatTrie::new();
    trie.get(b"one").unwrap().set(1);
    trie.get(b"two").unwrap().set(2);

    assert!(trie.del(b"one"));
    assert!(trie.try_get(b"one").is_none());
    assert_eq!(trie.len(), 1);

    assert!(!trie.del(b"one"));
    assert!(!trie.del(b"never-inserted"));
    assert_eq!(trie.len(), 1);
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
fn test_empty_trie() {
    let mut trie: HatTrie = HatTrie::new();
    assert_eq!(trie.len(), 0);
    assert!(trie.is_empty());
    assert!(trie.try_get(b"anything").is_none());
    assert!(!trie.del(b"anything"));
    assert_eq!(trie.iter(true).into_iter().count(), 0);
}

#[test]
fn test_empty_key() {
    // S1: the empty byte string is a legal key with its own value.
    let mut trie = HatTrie::new();
    trie.get(b"").unwrap().set(42);
    trie.get(b"a").unwrap().set(1);

    assert_eq!(trie.try_get(b"").unwrap().get(), 42);
    assert!(trie.del(b""));
    assert!(trie.try_get(b"").is_none());
    assert_eq!(trie.try_get(b"a").unwrap().get(), 1);
}

#[test]
fn test_nul_bytes_within_keys() {
    // S3: embedded NUL bytes must not be treated as a terminator.
    let mut trie = HatTrie::new();
    trie.get(b"a\x00b").unwrap().set(1);
    trie.get(b"a\x00").unwrap().set(2);
    trie.get(b"a").unwrap().set(3);
    trie.get(b"\x00").unwrap().set(4);

    assert_eq!(trie.try_get(b"a\x00b").unwrap().get(), 1);
    assert_eq!(trie.try_get(b"a\x00").unwrap().get(), 2);
    assert_eq!(trie.try_get(b"a").unwrap().get(), 3);
    assert_eq!(trie.try_get(b"\x00").unwrap().get(), 4);
    assert_eq!(trie.len(), 4);
}

#[test]
fn test_one_key_is_a_strict_prefix_of_another() {
    // S2
    let mut trie = HatTrie::new();
    trie.get(b"app").unwrap().set(1);
    trie.get(b"apple").unwrap().set(2);

    assert_eq!(trie.try_get(b"app").unwrap().get(), 1);
    assert_eq!(trie.try_get(b"apple").unwrap().get(), 2);
    assert!(trie.del(b"app"));
    assert!(trie.try_get(b"app").is_none());
    assert_eq!(trie.try_get(b"apple").unwrap().get(), 2);
}

#[test]
fn test_key_at_127_128_boundary() {
    // Packed record header switches from 1-byte to 2-byte length prefix
    // at key length 128.
    let mut trie = HatTrie::new();
    let k127 = vec![b'x'; 127];
    let k128 = vec![b'y'; 128];
    let k129 = vec![b'z'; 129];

    trie.get(&k127).unwrap().set(127);
    trie.get(&k128).unwrap().set(128);
    trie.get(&k129).unwrap().set(129);

    assert_eq!(trie.try_get(&k127).unwrap().get(), 127);
    assert_eq!(trie.try_get(&k128).unwrap().get(), 128);
    assert_eq!(trie.try_get(&k129).unwrap().get(), 129);
}

#[test]
fn test_key_too_long_is_rejected() {
    let mut trie = HatTrie::new();
    let too_long = vec![b'a'; 32768];
    match trie.get(&too_long) {
        Err(HatTrieError::KeyTooLong { len }) => assert_eq!(len, 32768),
        other => panic!("expected KeyTooLong, got {other:?}"),
    }
    assert_eq!(trie.len(), 0);
}

#[test]
fn test_max_key_len_is_accepted() {
    let mut trie = HatTrie::new();
    let max_len = vec![b'a'; 32767];
    assert!(trie.get(&max_len).is_ok());
}

#[test]
fn test_non_ascii_leading_bytes() {
    // S6: keys aren't restricted to printable ASCII.
    let mut trie = HatTrie::new();
    trie.get(b"\xff\xfe\x00").unwrap().set(1);
    trie.get(b"\x81example").unwrap().set(2);
    assert_eq!(trie.try_get(b"\xff\xfe\x00").unwrap().get(), 1);
    assert_eq!(trie.try_get(b"\x81example").unwrap().get(), 2);
}

// ============================================================================
// ITERATION
// ============================================================================

#[test]
fn test_sorted_iteration_is_lexicographic() {
    let mut trie = HatTrie::new();
    let keys = ["banana", "apple", "cherry", "app", "b", "a", ""];
    for (i, k) in keys.iter().enumerate() {
        trie.get(k.as_bytes()).unwrap().set(i as u64);
    }

    let got: Vec<Vec<u8>> = trie.iter(true).into_iter().map(|(k, _)| k).collect();
    let mut expected: Vec<Vec<u8>> = keys.iter().map(|k| k.as_bytes().to_vec()).collect();
    expected.sort();
    assert_eq!(got, expected);
}

#[test]
fn test_unsorted_iteration_visits_every_pair_exactly_once() {
    let mut trie = HatTrie::new();
    let mut reference = HashMap::new();
    for i in 0..500 {
        let key = format!("item-{i}");
        trie.get(key.as_bytes()).unwrap().set(i);
        reference.insert(key.into_bytes(), i);
    }

    let mut seen: HashMap<Vec<u8>, u64> = HashMap::new();
    let mut count = 0;
    for (k, v) in trie.iter(false) {
        assert!(seen.insert(k, v).is_none(), "duplicate key from iterator");
        count += 1;
    }
    assert_eq!(count, 500);
    assert_eq!(seen, reference);
}

#[test]
fn test_cursor_style_iteration_api() {
    let mut trie = HatTrie::new();
    trie.get(b"a").unwrap().set(1);
    trie.get(b"b").unwrap().set(2);

    let mut it = trie.iter(true);
    let mut collected = Vec::new();
    while !it.finished() {
        collected.push((it.key().to_vec(), it.val()));
        it.next();
    }
    assert_eq!(collected, vec![(b"a".to_vec(), 1), (b"b".to_vec(), 2)]);
}

// ============================================================================
// BURST / SPLIT STRESS
// ============================================================================

#[test]
fn test_many_keys_sharing_a_prefix_forces_repeated_bursts() {
    let mut trie = HatTrie::new();
    let count = 50_000;
    for i in 0..count {
        let key = format!("shared-prefix-{:08}", i);
        trie.get(key.as_bytes()).unwrap().set(i as u64);
    }
    assert_eq!(trie.len(), count);

    for i in (0..count).step_by(97) {
        let key = format!("shared-prefix-{:08}", i);
        assert_eq!(trie.try_get(key.as_bytes()).unwrap().get(), i as u64);
    }

    let iterated = trie.iter(false).into_iter().count();
    assert_eq!(iterated, count);
}

#[test]
fn test_burst_then_delete_half_then_reinsert() {
    let mut trie = HatTrie::new();
    let count = 30_000;
    for i in 0..count {
        let key = format!("k{:07}", i);
        trie.get(key.as_bytes()).unwrap().set(i as u64);
    }

    for i in (0..count).step_by(2) {
        let key = format!("k{:07}", i);
        assert!(trie.del(key.as_bytes()));
    }
    assert_eq!(trie.len(), count / 2);

    for i in (0..count).step_by(2) {
        let key = format!("k{:07}", i);
        assert!(trie.try_get(key.as_bytes()).is_none());
    }
    for i in (1..count).step_by(2) {
        let key = format!("k{:07}", i);
        assert_eq!(trie.try_get(key.as_bytes()).unwrap().get(), i as u64);
    }

    for i in (0..count).step_by(2) {
        let key = format!("k{:07}", i);
        trie.get(key.as_bytes()).unwrap().set(i as u64 + 1);
    }
    assert_eq!(trie.len(), count);
}

// ============================================================================
// DUPLICATES / OVERWRITES
// ============================================================================

#[test]
fn test_repeated_insert_overwrites_previous_value() {
    let mut trie = HatTrie::new();
    for v in 0..10 {
        trie.get(b"same-key").unwrap().set(v);
    }
    assert_eq!(trie.len(), 1);
    assert_eq!(trie.try_get(b"same-key").unwrap().get(), 9);
}

// ============================================================================
// BUILDER
// ============================================================================

#[test]
fn test_builder_with_entries() {
    let trie = HatTrieBuilder::new()
        .insert("one", 1)
        .insert("two", 2)
        .insert("three", 3)
        .build()
        .unwrap();

    assert_eq!(trie.len(), 3);
    let mut got = trie;
    assert_eq!(got.try_get(b"two").unwrap().get(), 2);
}

#[test]
fn test_builder_extend_from_iterator() {
    let entries: Vec<(&str, u64)> = vec![("x", 1), ("y", 2), ("z", 3)];
    let mut trie = HatTrieBuilder::new().extend(entries).build().unwrap();
    assert_eq!(trie.len(), 3);
    assert_eq!(trie.try_get(b"y").unwrap().get(), 2);
}

#[test]
fn test_builder_last_insert_wins_on_duplicate_key() {
    let mut trie = HatTrieBuilder::new().insert("k", 1).insert("k", 2).build().unwrap();
    assert_eq!(trie.len(), 1);
    assert_eq!(trie.try_get(b"k").unwrap().get(), 2);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_error_display_is_human_readable() {
    let err = HatTrieError::KeyTooLong { len: 40000 };
    let message = format!("{err}");
    assert!(message.contains("40000"));
    assert!(message.contains("too long"));
}

// ============================================================================
// LARGE, MIXED-LENGTH DATASETS
// ============================================================================

#[test]
fn test_large_dataset_mixed_key_lengths() {
    let mut trie = HatTrie::new();
    let mut reference = HashMap::new();

    let mut rng_state: u64 = 0x9E3779B97F4A7C15;
    let mut next_u64 = move || {
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 7;
        rng_state ^= rng_state << 17;
        rng_state
    };

    for _ in 0..20_000 {
        let len = 1 + (next_u64() % 300) as usize;
        let key: Vec<u8> = (0..len).map(|_| (next_u64() % 256) as u8).collect();
        let value = next_u64();
        trie.get(&key).unwrap().set(value);
        reference.insert(key, value);
    }

    assert_eq!(trie.len(), reference.len());
    for (key, value) in &reference {
        assert_eq!(trie.try_get(key).unwrap().get(), *value);
    }
}

#[test]
fn test_unicode_keys() {
    let mut trie = HatTrie::new();
    let words = ["héllo", "wörld", "日本語", "emoji-🦀-here"];
    for (i, w) in words.iter().enumerate() {
        trie.get(w.as_bytes()).unwrap().set(i as u64);
    }
    for (i, w) in words.iter().enumerate() {
        assert_eq!(trie.try_get(w.as_bytes()).unwrap().get(), i as u64);
    }
}
