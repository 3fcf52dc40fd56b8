//! Handle type for document entities
//!
//! Handles identify entities for the whole lifetime of a document. They are
//! allocated monotonically by [`Document`](crate::Document) and never reused,
//! so ordering by handle is the same as ordering by creation.

use std::fmt;

/// Stable identifier of an entity within a document
///
/// Handle 0 is reserved and never refers to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// The null/invalid handle (0)
    pub const NULL: Handle = Handle(0);

    /// Create a handle from a raw value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Raw value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// The handle allocated right after this one, `None` at the end of
    /// the handle space
    #[inline]
    pub(crate) const fn successor(&self) -> Option<Handle> {
        match self.0.checked_add(1) {
            Some(next) => Some(Handle(next)),
            None => None,
        }
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::NULL
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}
