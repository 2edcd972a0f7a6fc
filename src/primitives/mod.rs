//! Low-level primitives shared by relation implementations.

/// Deterministic key hashing and bucket selection.
///
/// Maps X values onto bucket indices with a hash function chosen at construction.
pub mod hash;
