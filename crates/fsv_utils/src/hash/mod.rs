//! Hash containers built on *hashbrown*, hashed with *foldhash*.
//!
//! The containers use [`FixedHashState`] by default, so the hash of a key
//! only depends on the key. Iteration order is still unspecified.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

/// A map whose keys already are well distributed hashes, such as `TypeId`s.
pub type NoOpHashMap<K, V> = hashbrown::HashMap<K, V, NoOpHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_map_roundtrip() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 2);

        let mut set: HashSet<u32> = HashSet::default();
        assert!(set.insert(3));
        assert!(!set.insert(3));
    }

    #[test]
    fn noop_map_passes_hash_through() {
        let mut map: NoOpHashMap<u64, u32> = NoOpHashMap::default();
        map.insert(0x9E37_79B9_7F4A_7C15, 0);
        map.insert(0x2545_F491_4F6C_DD1D, 1);
        assert_eq!(map[&0x2545_F491_4F6C_DD1D], 1);
    }
}
