//! System identifiers.
//!
//! System IDs live in their own namespace: a [`SystemAllocator`] counts
//! independently of any entity allocator.

use serde::{Deserialize, Serialize};

/// A unique system identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub u64);

impl SystemId {
    /// The unset system sentinel. No allocator ever issues it.
    pub const INVALID: SystemId = SystemId(0);

    /// Create a system ID from a raw `u64`.
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

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "System({})", self.0)
    }
}

/// Issues monotonically increasing system IDs, starting at 1.
#[derive(Debug)]
pub struct SystemAllocator {
    next_id: u64,
}

impl SystemAllocator {
    /// Creates a new allocator.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Issues a fresh system ID.
    pub fn allocate(&mut self) -> SystemId {
        let id = self.next_id;
        self.next_id += 1;
        SystemId(id)
    }

    /// Returns the number of IDs issued so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for SystemAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_starts_above_invalid() {
        let mut alloc = SystemAllocator::new();
        let s = alloc.allocate();
        assert!(s.is_valid());
        assert_eq!(s.id(), 1);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = SystemAllocator::new();
        let ids: Vec<_> = (0..5).map(|_| alloc.allocate()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(alloc.count(), 5);
    }

    #[test]
    fn test_system_display() {
        assert_eq!(SystemId::from_raw(3).to_string(), "System(3)");
    }

    #[test]
    fn test_system_deserializes_from_number() {
        let id: SystemId = serde_json::from_str("12").unwrap();
        assert_eq!(id, SystemId::from_raw(12));
    }
}
