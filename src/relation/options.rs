use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RelationError, Result};
use crate::primitives::hash::HasherKind;

/// Bucket count used when none is configured.
pub const DEFAULT_BUCKET_COUNT: usize = 64;

/// Load factor above which a one-time warning is logged.
pub const DEFAULT_WARN_LOAD_FACTOR: f64 = 4.0;

/// Configuration options supplied when building a [`super::HashRelation`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelationOptions {
    /// Number of buckets; fixed for the table's lifetime unless rehashed explicitly.
    pub bucket_count: usize,
    /// Hash function applied to X values.
    pub hasher: HasherKind,
    /// Pairs-per-bucket ratio that triggers a warning, or `None` to stay quiet.
    ///
    /// In TOML a number sets the threshold, `false` disables the warning and
    /// `true` selects [`DEFAULT_WARN_LOAD_FACTOR`].
    #[serde(with = "load_factor_setting")]
    pub warn_load_factor: Option<f64>,
}

mod load_factor_setting {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::DEFAULT_WARN_LOAD_FACTOR;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Setting {
        Threshold(f64),
        Enabled(bool),
    }

    pub(super) fn serialize<S>(value: &Option<f64>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(threshold) => Setting::Threshold(*threshold),
            None => Setting::Enabled(false),
        }
        .serialize(ser)
    }

    pub(super) fn deserialize<'de, D>(de: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Setting::deserialize(de)? {
            Setting::Threshold(threshold) => Some(threshold),
            Setting::Enabled(true) => Some(DEFAULT_WARN_LOAD_FACTOR),
            Setting::Enabled(false) => None,
        })
    }
}

impl Default for RelationOptions {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            hasher: HasherKind::default(),
            warn_load_factor: Some(DEFAULT_WARN_LOAD_FACTOR),
        }
    }
}

impl RelationOptions {
    /// Creates options with the given bucket count and defaults elsewhere.
    pub fn new(bucket_count: usize) -> Self {
        Self {
            bucket_count,
            ..Self::default()
        }
    }

    /// Sets the bucket count.
    pub fn bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Selects the hash function applied to X values.
    pub fn hasher(mut self, hasher: HasherKind) -> Self {
        self.hasher = hasher;
        self
    }

    /// Sets or disables the load-factor warning threshold.
    pub fn warn_load_factor(mut self, threshold: Option<f64>) -> Self {
        self.warn_load_factor = threshold;
        self
    }

    /// Checks that the options describe a usable table.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(RelationError::InvalidArgument(
                "bucket count must be positive".into(),
            ));
        }
        if let Some(threshold) = self.warn_load_factor {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(RelationError::InvalidArgument(format!(
                    "warn_load_factor must be a positive finite number, got {threshold}"
                )));
            }
        }
        Ok(())
    }

    /// Parses options from a TOML document; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let opts: Self = toml::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reads and parses options from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
