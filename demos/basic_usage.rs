use hat_trie::{HatTrie, HatTrieBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("HAT-trie - Basic Usage Example");
    println!("===============================");

    // Method 1: building up a trie directly
    println!("\nCreating a trie directly:");
    let mut prices = HatTrie::new();
    for (fruit, cents) in [("apple", 150u64), ("banana", 75), ("orange", 200), ("grape", 325)] {
        prices.get(fruit.as_bytes())?.set(cents);
    }
    println!("Trie created with {} items", prices.len());

    println!("\nLookups:");
    for fruit in ["apple", "banana", "grape", "kiwi"] {
        match prices.try_get(fruit.as_bytes()) {
            Some(handle) => println!("  [OK] {}: {} cents", fruit, handle.get()),
            None => println!("  [NOT FOUND] {}", fruit),
        }
    }

    // Method 2: assembling a trie from a batch of entries via the builder
    println!("\nCreating a trie from multiple entries via the builder:");
    let colors = HatTrieBuilder::new()
        .insert("red", 0xFF0000)
        .insert("green", 0x00FF00)
        .insert("blue", 0x0000FF)
        .insert("yellow", 0xFFFF00)
        .build()?;
    println!("Color trie created with {} items", colors.len());

    println!("\nColor codes, sorted:");
    for (color, code) in colors.iter(true) {
        println!("  - {}: #{:06X}", String::from_utf8_lossy(&color), code);
    }

    // Deletion
    println!("\nDeletion:");
    let mut scratch = colors;
    println!("  del(\"green\") -> {}", scratch.del(b"green"));
    println!("  try_get(\"green\") -> {:?}", scratch.try_get(b"green").map(|h| h.get()));
    println!("  len() -> {}", scratch.len());

    println!("\nBasic usage demonstration complete!");
    Ok(())
}
