//! Relations: containers of binary pairs where the pair is the uniqueness key.
//!
//! The same X may be paired with many Ys and the same Y with many Xs, but a
//! given `(x, y)` is stored at most once.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::Hash;

mod arena;
mod hash_relation;
mod metrics;
mod options;
mod render;
mod stats;


pub use hash_relation::{HashRelation, Pairs};
pub use metrics::{default_metrics, CounterMetrics, NoopMetrics, RelationMetrics, ScanOp};
pub use options::{RelationOptions, DEFAULT_BUCKET_COUNT, DEFAULT_WARN_LOAD_FACTOR};
pub use stats::BucketStats;

/// Capabilities required of both pair components.
///
/// `Hash` and `Eq` place and match pairs; `Ord` orders projection results;
/// `Clone` hands projection results out by value.
pub trait Element: Hash + Eq + Ord + Clone {}

impl<T: Hash + Eq + Ord + Clone> Element for T {}

/// Operations every relation implementation provides.
///
/// Absence is never an error: missing pairs yield `false`, an empty set, or a
/// zero count.
pub trait Relation<X: Element, Y: Element> {
    /// Returns `true` if `(x, y)` is stored.
    fn contains_pair(&self, x: &X, y: &Y) -> bool;

    /// Returns every y such that `(x, y)` is stored.
    fn y_values_given_x(&self, x: &X) -> BTreeSet<Y>;

    /// Returns every x such that `(x, y)` is stored.
    fn x_values_given_y(&self, y: &Y) -> BTreeSet<X>;

    /// Removes all pairs.
    fn clear(&mut self);

    /// Stores `(x, y)`; returns `false` without changes if it was already stored.
    fn add_pair(&mut self, x: X, y: Y) -> bool;

    /// Removes `(x, y)`; returns `false` without changes if it was absent.
    fn remove_pair(&mut self, x: &X, y: &Y) -> bool;

    /// Removes every pair whose first component is `x`, returning the count.
    fn remove_all_pairs_given_x(&mut self, x: &X) -> usize;

    /// Removes every pair whose second component is `y`, returning the count.
    fn remove_all_pairs_given_y(&mut self, y: &Y) -> usize;

    /// Renders the contents for diagnostics.
    fn render(&self) -> String
    where
        X: Display,
        Y: Display;

    /// Number of stored pairs.
    fn len(&self) -> usize;

    /// Returns `true` when no pairs are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
