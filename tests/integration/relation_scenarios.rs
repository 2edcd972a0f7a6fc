#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::thread;

use hashrel::{HashRelation, RelationError};

type StrRelation = HashRelation<i32, &'static str>;

fn scenario_a() -> StrRelation {
    let mut rel = HashRelation::new(4).expect("relation");
    rel.add_pair(1, "a");
    rel.add_pair(1, "b");
    rel.add_pair(2, "a");
    rel
}

#[test]
fn scenario_a_projections() {
    let rel = scenario_a();
    assert_eq!(rel.y_values_given_x(&1), BTreeSet::from(["a", "b"]));
    assert_eq!(rel.x_values_given_y(&"a"), BTreeSet::from([1, 2]));
}

#[test]
fn scenario_b_remove_all_given_x() {
    let mut rel = scenario_a();
    rel.remove_all_pairs_given_x(&1);
    assert!(!rel.contains_pair(&1, &"a"));
    assert!(!rel.contains_pair(&1, &"b"));
    assert!(rel.contains_pair(&2, &"a"));
}

#[test]
fn scenario_c_remove_all_given_y() {
    let mut rel = scenario_a();
    rel.remove_all_pairs_given_y(&"a");
    assert!(!rel.contains_pair(&1, &"a"));
    assert!(!rel.contains_pair(&2, &"a"));
    assert!(rel.contains_pair(&1, &"b"));
}

#[test]
fn scenario_d_empty_table_renders_m_lines() {
    let rel: StrRelation = HashRelation::new(4).expect("relation");
    for x in -3..3 {
        assert!(!rel.contains_pair(&x, &"a"));
    }
    let rendered = rel.render();
    assert_eq!(rendered.matches('\n').count(), 4);
    assert!(rendered.lines().all(str::is_empty));
}

#[test]
fn double_add_counts_once() {
    let mut rel = HashRelation::new(16).expect("relation");
    let before = rel.len();
    rel.add_pair("k".to_string(), 10u64);
    rel.add_pair("k".to_string(), 10u64);
    assert!(rel.contains_pair(&"k".to_string(), &10));
    assert_eq!(rel.len(), before + 1);
}

#[test]
fn add_contains_remove_round_trip() {
    let mut rel = HashRelation::new(3).expect("relation");
    for (x, y) in [(1u8, 'p'), (4, 'q'), (7, 'p')] {
        assert!(rel.add_pair(x, y));
        assert!(rel.contains_pair(&x, &y));
        assert!(rel.remove_pair(&x, &y));
        assert!(!rel.contains_pair(&x, &y));
    }
    assert!(rel.is_empty());
}

#[test]
fn clear_forgets_everything() {
    let mut rel = scenario_a();
    let keys: Vec<_> = rel.iter().map(|(x, y)| (*x, *y)).collect();
    rel.clear();
    for (x, y) in keys {
        assert!(!rel.contains_pair(&x, &y));
        assert!(rel.y_values_given_x(&x).is_empty());
        assert!(rel.x_values_given_y(&y).is_empty());
    }
}

#[test]
fn render_lists_each_bucket_on_its_own_line() {
    let rel = scenario_a();
    let rendered = rel.render();
    assert_eq!(rendered.lines().count(), 4);
    for pair in ["(1,a)", "(1,b)", "(2,a)"] {
        assert_eq!(rendered.matches(pair).count(), 1, "{pair} in {rendered:?}");
    }
    assert_eq!(rendered, rel.to_string());
}

#[test]
fn invalid_bucket_count_surfaces_to_caller() {
    match HashRelation::<String, String>::new(0) {
        Err(RelationError::InvalidArgument(msg)) => assert!(msg.contains("bucket")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn caller_serializes_shared_access() {
    let shared = Arc::new(Mutex::new(HashRelation::<u32, u32>::new(32).expect("relation")));
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..100u32 {
                    let mut rel = shared.lock().expect("lock");
                    rel.add_pair(i, t);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("join");
    }
    let rel = shared.lock().expect("lock");
    assert_eq!(rel.len(), 400);
    assert_eq!(rel.y_values_given_x(&42), BTreeSet::from([0, 1, 2, 3]));
}
