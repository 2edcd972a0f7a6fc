#![forbid(unsafe_code)]
//! Deterministic key hashing and bucket-index reduction.

use std::hash::{BuildHasher, Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

const AHASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Hash function used to place keys into buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    /// SipHash-1-3 with zero keys.
    #[default]
    Sip13,
    /// rustc's Fx hash.
    Fx,
    /// aHash with fixed seeds.
    Ahash,
}

/// Hashes keys to 64-bit values with a fixed, per-process deterministic state.
#[derive(Clone)]
pub struct KeyHasher {
    kind: HasherKind,
    ahash: ahash::RandomState,
}

impl KeyHasher {
    /// Creates a hasher of the given kind.
    pub fn new(kind: HasherKind) -> Self {
        let [k0, k1, k2, k3] = AHASH_SEEDS;
        Self {
            kind,
            ahash: ahash::RandomState::with_seeds(k0, k1, k2, k3),
        }
    }

    /// Returns the configured hash function.
    pub fn kind(&self) -> HasherKind {
        self.kind
    }

    /// Computes the 64-bit hash of `key`.
    pub fn hash64<K: Hash + ?Sized>(&self, key: &K) -> u64 {
        match self.kind {
            HasherKind::Sip13 => {
                let mut hasher = SipHasher13::new_with_keys(0, 0);
                key.hash(&mut hasher);
                hasher.finish()
            }
            HasherKind::Fx => {
                let mut hasher = FxHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
            HasherKind::Ahash => {
                let mut hasher = self.ahash.build_hasher();
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    /// Maps `key` onto one of `bucket_count` buckets.
    pub fn bucket_of<K: Hash + ?Sized>(&self, key: &K, bucket_count: usize) -> usize {
        bucket_index(self.hash64(key), bucket_count)
    }
}

impl Default for KeyHasher {
    fn default() -> Self {
        Self::new(HasherKind::default())
    }
}

impl std::fmt::Debug for KeyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyHasher").field("kind", &self.kind).finish()
    }
}

/// Reduces a 64-bit hash to a bucket index in `0..bucket_count`.
///
/// The hash is unsigned, so no sign correction is needed before the modulus.
pub fn bucket_index(hash: u64, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "bucket count must be positive");
    (hash % bucket_count as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_stable_across_instances() {
        for kind in [HasherKind::Sip13, HasherKind::Fx, HasherKind::Ahash] {
            let a = KeyHasher::new(kind);
            let b = KeyHasher::new(kind);
            assert_eq!(a.hash64("relation"), b.hash64("relation"), "{kind:?}");
            assert_eq!(a.hash64(&42u64), b.hash64(&42u64), "{kind:?}");
        }
    }

    #[test]
    fn sip13_matches_raw_siphasher() {
        let hasher = KeyHasher::new(HasherKind::Sip13);
        let mut raw = SipHasher13::new_with_keys(0, 0);
        7u32.hash(&mut raw);
        assert_eq!(hasher.hash64(&7u32), raw.finish());
    }

    #[test]
    fn bucket_index_stays_in_range() {
        for hash in [0, 1, 17, u64::MAX, u64::MAX - 3, 1 << 63] {
            for m in [1usize, 2, 3, 7, 64, 1000] {
                assert!(bucket_index(hash, m) < m);
            }
        }
        assert_eq!(bucket_index(10, 4), 2);
        assert_eq!(bucket_index(u64::MAX, 1), 0);
    }

    #[test]
    fn bucket_of_is_consistent_with_hash64() {
        let hasher = KeyHasher::default();
        let key = "x-value";
        assert_eq!(hasher.bucket_of(key, 13), bucket_index(hasher.hash64(key), 13));
    }

    #[test]
    fn hasher_kind_parses_lowercase_names() {
        #[derive(Deserialize)]
        struct Doc {
            hasher: HasherKind,
        }
        let doc: Doc = toml::from_str("hasher = \"fx\"").unwrap();
        assert_eq!(doc.hasher, HasherKind::Fx);
        let doc: Doc = toml::from_str("hasher = \"ahash\"").unwrap();
        assert_eq!(doc.hasher, HasherKind::Ahash);
        assert!(toml::from_str::<Doc>("hasher = \"md5\"").is_err());
    }
}
