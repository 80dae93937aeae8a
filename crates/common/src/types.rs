use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a VIP bundle process instance.
///
/// Wraps a UUID to provide type safety and prevent mixing up
/// bundle IDs with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(Uuid);

impl BundleId {
    /// Creates a new random bundle ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a bundle ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the nil bundle ID.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil ID.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BundleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BundleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BundleId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<BundleId> for Uuid {
    fn from(id: BundleId) -> Self {
        id.0
    }
}

/// Identifier of the show-ticket booking correlated with a bundle.
///
/// Used as the secondary lookup key: ticket booking events carry this
/// ID rather than the bundle ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random booking ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a booking ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the nil booking ID.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil ID.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BookingId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<BookingId> for Uuid {
    fn from(id: BookingId) -> Self {
        id.0
    }
}
