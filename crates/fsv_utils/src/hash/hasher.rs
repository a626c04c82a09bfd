//! [`FixedHashState`] and [`NoOpHashState`].
//!
//! `FixedHashState` is `foldhash` with a fixed seed, so results are stable
//! across runs. `NoOpHashState` passes a single written integer through.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5AFE_F00D_2B1E_0C37);

/// Hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `foldhash` build state with a fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use fsv_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one(3), FixedHashState.hash_one(3));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Hasher produced by [`NoOpHashState`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // rotation keeps `write_u32(10)` equal to `write_u64(10)`
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.hash = i as u64;
    }
}

/// A build state whose hash is the written integer itself.
///
/// Meant for keys that are already hashes, such as `TypeId`s.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use fsv_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(3_u64), 3);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}
