use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::arena::{Node, NodeArena, NodeIdx};
use super::metrics::{default_metrics, RelationMetrics, ScanOp};
use super::options::RelationOptions;
use super::stats::BucketStats;
use super::{Element, Relation};
use crate::error::{RelationError, Result};
use crate::primitives::hash::KeyHasher;

/// A relation stored in a fixed array of buckets with one chain per bucket.
///
/// Pairs are placed by hashing X only. Operations keyed by X touch a single
/// chain; operations keyed by Y visit every bucket. The bucket count never
/// changes on its own: [`HashRelation::rehash`] is the only way to resize.
///
/// Mutation takes `&mut self` and no internal locking is done. Callers sharing
/// a table between threads must serialize access themselves.
pub struct HashRelation<X, Y> {
    buckets: Vec<Option<NodeIdx>>,
    arena: NodeArena<X, Y>,
    hasher: KeyHasher,
    warn_load_factor: Option<f64>,
    pub(super) load_warned: bool,
    metrics: Arc<dyn RelationMetrics>,
}

impl<X, Y> HashRelation<X, Y> {
    /// Creates an empty relation with `bucket_count` buckets and default options.
    ///
    /// Returns [`RelationError::InvalidArgument`] when `bucket_count` is zero.
    pub fn new(bucket_count: usize) -> Result<Self> {
        Self::with_options(RelationOptions::new(bucket_count))
    }

    /// Creates an empty relation from validated options.
    pub fn with_options(opts: RelationOptions) -> Result<Self> {
        opts.validate()?;
        debug!(
            bucket_count = opts.bucket_count,
            hasher = ?opts.hasher,
            "creating relation"
        );
        Ok(Self {
            buckets: vec![None; opts.bucket_count],
            arena: NodeArena::new(),
            hasher: KeyHasher::new(opts.hasher),
            warn_load_factor: opts.warn_load_factor,
            load_warned: false,
            metrics: default_metrics(),
        })
    }

    /// Attaches a metrics sink.
    pub fn with_metrics(mut self, metrics: Arc<dyn RelationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` when no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Stored pairs per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Summarizes chain lengths across all buckets.
    pub fn stats(&self) -> BucketStats {
        BucketStats::from_chain_lengths(
            (0..self.buckets.len()).map(|b| self.chain(b).count()),
            self.arena.capacity(),
        )
    }

    /// Iterates over all pairs in bucket order, then chain order.
    pub fn iter(&self) -> Pairs<'_, X, Y> {
        Pairs {
            relation: self,
            next_bucket: 0,
            chain: Chain {
                arena: &self.arena,
                cursor: None,
            },
        }
    }

    /// Removes every pair, keeping the bucket count.
    pub fn clear(&mut self) {
        let dropped = self.len();
        for head in self.buckets.iter_mut() {
            *head = None;
        }
        self.arena.clear();
        self.load_warned = false;
        self.metrics.cleared();
        debug!(dropped, bucket_count = self.buckets.len(), "cleared relation");
    }

    pub(super) fn chain(&self, bucket: usize) -> Chain<'_, X, Y> {
        Chain {
            arena: &self.arena,
            cursor: self.buckets[bucket],
        }
    }

    /// Unlinks matching nodes from one bucket and returns how many were removed.
    fn excise<F>(&mut self, bucket: usize, mut matches: F, first_only: bool) -> usize
    where
        F: FnMut(&X, &Y) -> bool,
    {
        let mut removed = 0;
        let mut prev: Option<NodeIdx> = None;
        let mut cursor = self.buckets[bucket];
        while let Some(idx) = cursor {
            let (next, hit) = {
                let node = self.arena.node(idx);
                (node.next, matches(&node.x, &node.y))
            };
            if hit {
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.arena.node_mut(p).next = next,
                }
                self.arena.release(idx);
                removed += 1;
                if first_only {
                    break;
                }
            } else {
                prev = Some(idx);
            }
            cursor = next;
        }
        removed
    }

    fn note_load_factor(&mut self) {
        if self.load_warned {
            return;
        }
        let Some(threshold) = self.warn_load_factor else {
            return;
        };
        let load = self.load_factor();
        if load > threshold {
            self.load_warned = true;
            warn!(
                load_factor = load,
                threshold,
                bucket_count = self.buckets.len(),
                "relation load factor exceeds threshold; chains will keep growing"
            );
        }
    }
}

impl<X: Hash + Eq, Y: Eq> HashRelation<X, Y> {
    pub(super) fn bucket_of(&self, x: &X) -> usize {
        self.hasher.bucket_of(x, self.buckets.len())
    }

    /// Returns `true` if `(x, y)` is stored.
    pub fn contains_pair(&self, x: &X, y: &Y) -> bool {
        let bucket = self.bucket_of(x);
        self.chain(bucket)
            .any(|(_, node)| node.x == *x && node.y == *y)
    }

    /// Stores `(x, y)` unless it is already present.
    ///
    /// Returns `true` if the pair was inserted. New pairs become the head of
    /// their bucket's chain.
    pub fn add_pair(&mut self, x: X, y: Y) -> bool {
        let bucket = self.bucket_of(&x);
        if self
            .chain(bucket)
            .any(|(_, node)| node.x == x && node.y == y)
        {
            self.metrics.duplicate_ignored();
            return false;
        }
        let head = self.buckets[bucket];
        let idx = self.arena.alloc(x, y, head);
        self.buckets[bucket] = Some(idx);
        trace!(bucket, "pair inserted");
        self.metrics.pair_inserted();
        self.note_load_factor();
        true
    }

    /// Removes `(x, y)` if present and returns whether anything was removed.
    pub fn remove_pair(&mut self, x: &X, y: &Y) -> bool {
        let bucket = self.bucket_of(x);
        let removed = self.excise(bucket, |nx, ny| nx == x && ny == y, true);
        if removed > 0 {
            trace!(bucket, "pair removed");
            self.metrics.pairs_removed(removed);
        }
        removed > 0
    }

    /// Removes every pair whose first component is `x`.
    pub fn remove_all_pairs_given_x(&mut self, x: &X) -> usize {
        let bucket = self.bucket_of(x);
        let removed = self.excise(bucket, |nx, _| nx == x, false);
        if removed > 0 {
            trace!(bucket, removed, "pairs removed by x");
            self.metrics.pairs_removed(removed);
        }
        removed
    }

    /// Removes every pair whose second component is `y`.
    ///
    /// Y does not determine placement, so every bucket is scanned.
    pub fn remove_all_pairs_given_y(&mut self, y: &Y) -> usize {
        self.metrics.full_scan(ScanOp::RemoveAllPairsGivenY);
        let mut removed = 0;
        for bucket in 0..self.buckets.len() {
            removed += self.excise(bucket, |_, ny| ny == y, false);
        }
        if removed > 0 {
            trace!(removed, "pairs removed by y");
            self.metrics.pairs_removed(removed);
        }
        removed
    }

    /// Redistributes all pairs over `bucket_count` buckets.
    ///
    /// Nodes are relinked in place; no pair is copied or reallocated.
    pub fn rehash(&mut self, bucket_count: usize) -> Result<()> {
        if bucket_count == 0 {
            return Err(RelationError::InvalidArgument(
                "bucket count must be positive".into(),
            ));
        }
        let from = self.buckets.len();
        let old = std::mem::replace(&mut self.buckets, vec![None; bucket_count]);
        for head in old {
            let mut cursor = head;
            while let Some(idx) = cursor {
                let node = self.arena.node(idx);
                cursor = node.next;
                let bucket = self.hasher.bucket_of(&node.x, bucket_count);
                let new_head = self.buckets[bucket];
                self.arena.node_mut(idx).next = new_head;
                self.buckets[bucket] = Some(idx);
            }
        }
        self.load_warned = false;
        debug!(from, to = bucket_count, pairs = self.len(), "rehashed relation");
        Ok(())
    }
}

impl<X: Element, Y: Element> HashRelation<X, Y> {
    /// Returns every y paired with `x`, in ascending order.
    pub fn y_values_given_x(&self, x: &X) -> BTreeSet<Y> {
        let bucket = self.bucket_of(x);
        self.chain(bucket)
            .filter(|(_, node)| node.x == *x)
            .map(|(_, node)| node.y.clone())
            .collect()
    }

    /// Returns every x paired with `y`, in ascending order.
    ///
    /// Y does not determine placement, so every bucket is scanned.
    pub fn x_values_given_y(&self, y: &Y) -> BTreeSet<X> {
        self.metrics.full_scan(ScanOp::XValuesGivenY);
        self.iter()
            .filter(|(_, ny)| *ny == y)
            .map(|(nx, _)| nx.clone())
            .collect()
    }
}

impl<X: Element, Y: Element> Relation<X, Y> for HashRelation<X, Y> {
    fn contains_pair(&self, x: &X, y: &Y) -> bool {
        HashRelation::contains_pair(self, x, y)
    }

    fn y_values_given_x(&self, x: &X) -> BTreeSet<Y> {
        HashRelation::y_values_given_x(self, x)
    }

    fn x_values_given_y(&self, y: &Y) -> BTreeSet<X> {
        HashRelation::x_values_given_y(self, y)
    }

    fn clear(&mut self) {
        HashRelation::clear(self)
    }

    fn add_pair(&mut self, x: X, y: Y) -> bool {
        HashRelation::add_pair(self, x, y)
    }

    fn remove_pair(&mut self, x: &X, y: &Y) -> bool {
        HashRelation::remove_pair(self, x, y)
    }

    fn remove_all_pairs_given_x(&mut self, x: &X) -> usize {
        HashRelation::remove_all_pairs_given_x(self, x)
    }

    fn remove_all_pairs_given_y(&mut self, y: &Y) -> usize {
        HashRelation::remove_all_pairs_given_y(self, y)
    }

    fn render(&self) -> String
    where
        X: fmt::Display,
        Y: fmt::Display,
    {
        HashRelation::render(self)
    }

    fn len(&self) -> usize {
        HashRelation::len(self)
    }
}

impl<X: Hash + Eq, Y: Eq> Extend<(X, Y)> for HashRelation<X, Y> {
    fn extend<I: IntoIterator<Item = (X, Y)>>(&mut self, iter: I) {
        for (x, y) in iter {
            self.add_pair(x, y);
        }
    }
}

impl<X, Y> fmt::Debug for HashRelation<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRelation")
            .field("bucket_count", &self.buckets.len())
            .field("len", &self.len())
            .field("hasher", &self.hasher.kind())
            .finish()
    }
}

impl<'a, X, Y> IntoIterator for &'a HashRelation<X, Y> {
    type Item = (&'a X, &'a Y);
    type IntoIter = Pairs<'a, X, Y>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks one bucket's chain from its head.
pub(super) struct Chain<'a, X, Y> {
    arena: &'a NodeArena<X, Y>,
    cursor: Option<NodeIdx>,
}

impl<'a, X, Y> Iterator for Chain<'a, X, Y> {
    type Item = (NodeIdx, &'a Node<X, Y>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.arena.node(idx);
        self.cursor = node.next;
        Some((idx, node))
    }
}

/// Iterator over all pairs of a [`HashRelation`].
pub struct Pairs<'a, X, Y> {
    relation: &'a HashRelation<X, Y>,
    next_bucket: usize,
    chain: Chain<'a, X, Y>,
}

impl<'a, X, Y> Iterator for Pairs<'a, X, Y> {
    type Item = (&'a X, &'a Y);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, node)) = self.chain.next() {
                return Some((&node.x, &node.y));
            }
            if self.next_bucket >= self.relation.buckets.len() {
                return None;
            }
            self.chain = self.relation.chain(self.next_bucket);
            self.next_bucket += 1;
        }
    }
}
