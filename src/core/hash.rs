//! World State Hashing
//!
//! Deterministic SHA-256 digests of world state, used to check that a
//! replayed input recording reproduces a live run frame for frame.

use sha2::{Sha256, Digest};
use super::vec2::{Direction, Position};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Domain separator for world state digests.
pub const WORLD_STATE_DOMAIN: &[u8] = b"CELL_ESCAPE_WORLD_V1";

/// Values with a fixed, platform-independent byte encoding.
pub trait Hashable {
    /// Feed the encoding into the hasher.
    fn hash_into(&self, hasher: &mut StateHasher);
}

/// Deterministic hasher for world state. Update order is part of the hash.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for world state.
    pub fn for_world_state() -> Self {
        Self::new(WORLD_STATE_DOMAIN)
    }

    /// Feed one value.
    #[inline]
    pub fn update<T: Hashable + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.hash_into(self);
        self
    }

    fn raw(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

macro_rules! hashable_le {
    ($($ty:ty),*) => {
        $(
            impl Hashable for $ty {
                #[inline]
                fn hash_into(&self, hasher: &mut StateHasher) {
                    hasher.raw(&self.to_le_bytes());
                }
            }
        )*
    };
}

hashable_le!(u8, i8, u32, i32, u64);

impl Hashable for bool {
    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.raw(&[*self as u8]);
    }
}

/// Length-prefixed so adjacent strings cannot run together.
impl Hashable for str {
    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update(&(self.len() as u32));
        hasher.raw(self.as_bytes());
    }
}

impl Hashable for Position {
    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update(&self.x).update(&self.y);
    }
}

impl Hashable for Direction {
    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update(&(*self as u8));
    }
}

/// Compute a world state hash.
///
/// The frame counter is always hashed first; `add_state` appends the rest.
pub fn compute_state_hash<F>(frame: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_world_state();
    hasher.update(&frame);
    add_state(&mut hasher);
    hasher.finalize()
}
