use serde::Serialize;

/// Point-in-time summary of bucket occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BucketStats {
    /// Number of buckets in the table.
    pub bucket_count: usize,
    /// Number of stored pairs.
    pub pairs: usize,
    /// Buckets holding no pairs.
    pub empty_buckets: usize,
    /// Length of the longest chain.
    pub longest_chain: usize,
    /// Pairs per bucket.
    pub load_factor: f64,
    /// Node slots allocated, including freed slots awaiting reuse.
    pub arena_slots: usize,
}

impl BucketStats {
    pub(crate) fn from_chain_lengths(
        lengths: impl IntoIterator<Item = usize>,
        arena_slots: usize,
    ) -> Self {
        let mut stats = BucketStats {
            arena_slots,
            ..BucketStats::default()
        };
        for len in lengths {
            stats.bucket_count += 1;
            stats.pairs += len;
            if len == 0 {
                stats.empty_buckets += 1;
            }
            stats.longest_chain = stats.longest_chain.max(len);
        }
        if stats.bucket_count > 0 {
            stats.load_factor = stats.pairs as f64 / stats.bucket_count as f64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_chain_lengths() {
        let stats = BucketStats::from_chain_lengths([0, 3, 1, 0], 6);
        assert_eq!(stats.bucket_count, 4);
        assert_eq!(stats.pairs, 4);
        assert_eq!(stats.empty_buckets, 2);
        assert_eq!(stats.longest_chain, 3);
        assert_eq!(stats.load_factor, 1.0);
        assert_eq!(stats.arena_slots, 6);
    }

    #[test]
    fn serializes_as_json_object() {
        let stats = BucketStats::from_chain_lengths([2, 0], 2);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["bucket_count"], 2);
        assert_eq!(json["pairs"], 2);
        assert_eq!(json["longest_chain"], 2);
        assert_eq!(json["load_factor"], 1.0);
        assert_eq!(json["arena_slots"], 2);
    }
}
