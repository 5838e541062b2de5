//! Unique-name allocation for chain nodes.
//!
//! Node names double as reference targets, so the editor never accepts two
//! nodes with the same name. Collisions are resolved by counting up from the
//! trailing number already embedded in the requested name.

use ahash::AHashSet;

/// Splits a name into its root and an optional trailing number.
///
/// The root is the name with its maximal trailing run of decimal digits
/// removed. `"Fetch2"` yields `("Fetch", Some(2))`, `"Fetch"` yields
/// `("Fetch", None)`. A digit run too large for `u64` is kept as part of
/// the root rather than being truncated.
pub fn name_root(name: &str) -> (&str, Option<u64>) {
    let root = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if root.len() == name.len() {
        return (name, None);
    }
    match name[root.len()..].parse::<u64>() {
        Ok(number) => (root, Some(number)),
        Err(_) => (name, None),
    }
}

/// Returns `base` if it is free, otherwise the first free name found by
/// incrementing the trailing number.
///
/// A base that already ends in digits continues counting from that number:
/// `"Step2"` colliding yields `"Step3"`, not `"Step21"`. Termination is
/// guaranteed because `taken` is finite and every step strictly increases
/// the numeric suffix.
///
/// Callers resolving a rename must remove the node's own current name from
/// `taken` before calling, so that renaming a node to itself is a no-op.
pub fn generate_unique_name(base: &str, taken: &AHashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut candidate = base.to_string();
    loop {
        let (root, number) = name_root(&candidate);
        candidate = format!("{}{}", root, number.unwrap_or(0) + 1);
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
}
