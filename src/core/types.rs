//! Type aliases for domain concepts.

/// A record identifier (UUID v4 string).
pub type RecordId = String;

/// An age public key string (starts with "age1...").
pub type PublicKey = String;

/// A short searchable label attached to a record.
pub type Tag = String;
