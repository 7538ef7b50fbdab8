use hat_trie::HatTrie;
use std::collections::HashMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("HAT-trie Demo");
    println!("=============");

    let mut data = HashMap::new();
    for i in 0..1000 {
        data.insert(format!("key_{}", i), i as u64);
    }
    println!("Created {} key-value pairs", data.len());

    let mut trie = HatTrie::new();
    for (key, value) in &data {
        trie.get(key.as_bytes())?.set(*value);
    }
    println!("Built HAT-trie with {} items", trie.len());

    println!("\nTesting lookups:");
    for test_key in ["key_0", "key_42", "key_999", "nonexistent_key"] {
        match trie.try_get(test_key.as_bytes()) {
            Some(handle) => println!("  {}: {}", test_key, handle.get()),
            None => println!("  {}: not found", test_key),
        }
    }

    println!("\nTesting deletion:");
    println!("  del(\"key_0\") -> {}", trie.del(b"key_0"));
    println!("  try_get(\"key_0\") -> {:?}", trie.try_get(b"key_0").map(|h| h.get()));

    println!("\nSmall trie, sorted iteration:");
    let mut small = HatTrie::new();
    small.get(b"hello")?.set(1);
    small.get(b"foo")?.set(2);
    small.get(b"rust")?.set(3);
    for (key, value) in small.iter(true) {
        println!("  {}: {}", String::from_utf8_lossy(&key), value);
    }

    Ok(())
}
