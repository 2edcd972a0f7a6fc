//! Hash-table relations: containers of unique `(X, Y)` pairs.
//!
//! [`relation::HashRelation`] stores pairs in a fixed array of buckets keyed by
//! the hash of X, with one index-linked chain per bucket.

#![warn(missing_docs)]

mod error;
pub mod primitives;
pub mod relation;

pub use error::{RelationError, Result};
pub use primitives::hash::{HasherKind, KeyHasher};
pub use relation::{
    BucketStats, CounterMetrics, Element, HashRelation, NoopMetrics, Relation, RelationMetrics,
    RelationOptions, ScanOp,
};
