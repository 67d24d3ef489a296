// HashSet integration suite.
//
// Invariants exercised:
// - push then contains is true; pop then contains is false.
// - Pushing a present element is idempotent (len unchanged).
// - Same growth rule as HashTable: capacity doubles on the third fresh
//   element of a two-bucket set.
mod common;

use common::init_logger;
use reservoir::{ContainerError, HashSet, PolynomialState};
use std::hash::BuildHasher;

// Test: the reference int scenario.
#[test]
fn reference_scenario() {
    init_logger();
    let mut s: HashSet<i32> = HashSet::with_capacity(2).unwrap();
    assert_eq!(s.len(), 0);
    assert_eq!(s.capacity(), 2);

    assert!(s.push(100).unwrap());
    assert_eq!(s.len(), 1);
    assert!(s.push(200).unwrap());
    assert_eq!(s.len(), 2);

    assert!(s.contains(&100));
    assert!(s.contains(&200));
    assert!(!s.contains(&300));

    assert!(s.push(300).unwrap());
    assert_eq!(s.len(), 3);
    assert_eq!(s.capacity(), 4);
    assert!(s.contains(&300));

    assert!(s.pop(&200));
    assert_eq!(s.len(), 2);
    assert!(!s.contains(&200));

    assert!(s.pop(&100));
    assert_eq!(s.len(), 1);
    assert!(!s.contains(&100));
    s.destroy();
}

// Test: a duplicate push is a no-op and never resizes.
#[test]
fn duplicate_push_is_noop() {
    let mut s: HashSet<&'static str> = HashSet::with_capacity(2).unwrap();
    s.push("a").unwrap();
    s.push("b").unwrap();
    assert!(!s.push("b").unwrap());
    assert_eq!(s.len(), 2);
    assert_eq!(s.capacity(), 2);
}

#[test]
fn zero_capacity_is_error() {
    let r: Result<HashSet<u8>, _> = HashSet::with_capacity(0);
    assert_eq!(r.err(), Some(ContainerError::ZeroCapacity));
}

// Test: resize keeps every element at its bucket.
#[test]
fn resize_rehomes_elements() {
    let mut s: HashSet<String> = HashSet::with_capacity(3).unwrap();
    for i in 0..25 {
        s.push(format!("e{i}")).unwrap();
    }
    s.resize(11).unwrap();
    assert_eq!(s.capacity(), 11);
    let mut total = 0;
    for b in 0..11 {
        for e in s.bucket_elements(b) {
            assert_eq!(s.bucket_of(e), b);
            total += 1;
        }
    }
    assert_eq!(total, 25);
    assert!((0..25).all(|i| s.contains(format!("e{i}").as_str())));
}

// Test: get/take hand back the stored element.
#[test]
fn get_and_take() {
    let mut s: HashSet<String> = HashSet::with_capacity(4).unwrap();
    s.push("stored".to_string()).unwrap();
    assert_eq!(s.get("stored").map(String::as_str), Some("stored"));
    assert_eq!(s.take("stored"), Some("stored".to_string()));
    assert!(s.get("stored").is_none());
}

// Test: a failed resize reports OutOfMemory and leaves the set as it was.
#[test]
fn failed_resize_keeps_contents() {
    let mut s: HashSet<u64> = HashSet::with_capacity(4).unwrap();
    assert!(s.push(1).unwrap());
    assert_eq!(
        s.resize(usize::MAX),
        Err(ContainerError::OutOfMemory { slots: usize::MAX })
    );
    assert!(s.contains(&1));
    assert_eq!(s.len(), 1);
    assert_eq!(s.capacity(), 4);
    assert!(s.push(2).unwrap());
}

// Test: the set hashes with the builder it was given.
#[test]
fn hasher_is_the_configured_builder() {
    let s: HashSet<u32> = HashSet::with_capacity(8).unwrap();
    assert_eq!(*s.hasher(), PolynomialState);
    assert_eq!(s.bucket_of(&7), (s.hasher().hash_one(7u32) % 8) as usize);
}
