#![forbid(unsafe_code)]

use std::fs;

use hashrel::{HashRelation, HasherKind, RelationError, RelationOptions};
use tempfile::tempdir;

#[test]
fn relation_built_from_toml_file() {
    let dir = tempdir().expect("tmpdir");
    let path = dir.path().join("relation.toml");
    fs::write(&path, "bucket_count = 3\nhasher = \"ahash\"\nwarn_load_factor = 8.0\n")
        .expect("write options");

    let opts = RelationOptions::from_path(&path).expect("options");
    assert_eq!(opts.hasher, HasherKind::Ahash);
    let mut rel = HashRelation::with_options(opts).expect("relation");
    assert_eq!(rel.bucket_count(), 3);
    rel.extend([("alice", "admin"), ("bob", "admin"), ("alice", "dev")]);
    assert_eq!(rel.len(), 3);
    assert_eq!(rel.x_values_given_y(&"admin").len(), 2);
    assert_eq!(format!("{rel:?}").matches("Ahash").count(), 1);
}

#[test]
fn empty_document_uses_defaults() {
    let opts = RelationOptions::from_toml_str("").expect("options");
    assert_eq!(opts, RelationOptions::default());
    let rel: HashRelation<u8, u8> = HashRelation::with_options(opts).expect("relation");
    assert_eq!(rel.bucket_count(), hashrel::relation::DEFAULT_BUCKET_COUNT);
}

#[test]
fn malformed_document_is_config_error() {
    let err = RelationOptions::from_toml_str("bucket_count = \"many\"").unwrap_err();
    assert!(matches!(err, RelationError::Config(_)), "{err}");
}

#[test]
fn options_round_trip_through_toml() {
    for threshold in [Some(1.5), None] {
        let opts = RelationOptions::new(12)
            .hasher(HasherKind::Fx)
            .warn_load_factor(threshold);
        let text = toml::to_string(&opts).expect("serialize");
        assert_eq!(RelationOptions::from_toml_str(&text).expect("parse"), opts, "{text}");
    }
}
