//! Entity identifiers and allocation.
//!
//! An [`EntityId`] is a lightweight `u64` handle with no inherent data. The
//! components attached to an entity live in the registry, keyed by its ID.

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Entities are pure identifiers; they carry no data of their own. IDs are
/// issued by an [`EntityAllocator`] and are never reissued, even after the
/// entity has been unregistered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The unset entity sentinel. No allocator ever issues it.
    pub const INVALID: EntityId = EntityId(0);

    /// Create an entity ID from a raw `u64`.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is not the unset sentinel.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Issues monotonically increasing entity IDs.
///
/// Each allocator is an independent namespace. IDs start at 1 so that
/// [`EntityId::INVALID`] can stand for "unset".
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    /// Creates a new allocator.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Issues a fresh entity ID, strictly greater than every ID issued before.
    pub fn allocate(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    /// Returns the number of IDs issued so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }

    /// Returns `true` if `id` was issued by this allocator.
    #[must_use]
    pub fn issued(&self, id: EntityId) -> bool {
        id.is_valid() && id.0 < self.next_id
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
