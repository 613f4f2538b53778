//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that the heap invariants are always maintained.

use classic_heaps::binary::BinaryHeap;
use classic_heaps::binomial::BinomialHeap;
use classic_heaps::fibonacci::FibonacciHeap;
use classic_heaps::hash_table::HashTable;
use classic_heaps::{FxBuildHasher, Heap, MergeableHeap};
use proptest::prelude::*;
use std::collections::HashMap;

/// Heaps that can check their own internal structure
trait Verified: MergeableHeap<i32> {
    fn verify(&self) -> bool;
}

impl Verified for BinaryHeap<i32> {
    fn verify(&self) -> bool {
        self.verify_structure()
    }
}

impl Verified for BinomialHeap<i32> {
    fn verify(&self) -> bool {
        self.verify_structure()
            && self.root_degrees().windows(2).all(|w| w[0] < w[1])
    }
}

impl Verified for FibonacciHeap<i32> {
    fn verify(&self) -> bool {
        self.verify_structure()
    }
}

/// Test that insert and extract_min keep the minimum and the structure
fn test_insert_extract_invariant<H: Verified>(ops: Vec<(bool, i32)>) -> Result<(), TestCaseError> {
    let mut heap = H::new();
    let mut inserted = Vec::new();

    for (should_extract, value) in ops {
        if should_extract {
            let popped = heap.extract_min();
            let expected = inserted.iter().min().copied();
            prop_assert_eq!(popped, expected);
            if let Some(key) = popped {
                let pos = inserted.iter().position(|&k| k == key).unwrap();
                inserted.swap_remove(pos);
            }
        } else {
            heap.insert(value);
            inserted.push(value);
        }

        prop_assert!(heap.verify(), "structure broken");
        prop_assert_eq!(heap.len(), inserted.len());
        prop_assert_eq!(heap.peek().copied(), inserted.iter().min().copied());
    }

    Ok(())
}

/// Test that all extracted keys come out in non-decreasing order
fn test_extract_order_invariant<H: Verified>(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = H::new();
    for &val in &values {
        heap.insert(val);
    }

    let mut drained = Vec::with_capacity(values.len());
    while let Some(key) = heap.extract_min() {
        drained.push(key);
    }

    let mut sorted = values;
    sorted.sort_unstable();
    prop_assert_eq!(drained, sorted);
    prop_assert!(heap.is_empty());

    Ok(())
}

/// Test merge: sizes add up, minimum is the smaller minimum, source empties
fn test_merge_invariant<H: Verified>(
    heap1_values: Vec<i32>,
    heap2_values: Vec<i32>,
    extract_before: usize,
) -> Result<(), TestCaseError> {
    let mut heap1 = H::new();
    let mut heap2 = H::new();

    for &val in &heap1_values {
        heap1.insert(val);
    }
    for &val in &heap2_values {
        heap2.insert(val);
    }
    // Give the linked heaps some non-trivial trees before merging
    for _ in 0..extract_before {
        heap1.extract_min();
    }

    let len1 = heap1.len();
    let len2 = heap2.len();
    let expected_min = match (heap1.peek().copied(), heap2.peek().copied()) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };

    heap1.append(&mut heap2);

    prop_assert!(heap2.is_empty());
    prop_assert_eq!(heap2.len(), 0);
    prop_assert_eq!(heap1.len(), len1 + len2);
    prop_assert_eq!(heap1.peek().copied(), expected_min);
    prop_assert!(heap1.verify(), "structure broken after merge");

    let mut last = i32::MIN;
    while let Some(key) = heap1.extract_min() {
        prop_assert!(key >= last, "extracted {} after {}", key, last);
        last = key;
        prop_assert!(heap1.verify(), "structure broken after extract");
    }

    Ok(())
}

#[derive(Debug, Clone)]
enum TableOp {
    Put(u8, i32),
    Get(u8),
    Remove(u8),
}

fn table_op() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        (any::<u8>(), any::<i32>()).prop_map(|(k, v)| TableOp::Put(k, v)),
        any::<u8>().prop_map(TableOp::Get),
        any::<u8>().prop_map(TableOp::Remove),
    ]
}

// Generate test cases for each heap implementation

proptest! {
    #[test]
    fn test_binary_insert_extract_invariant(ops in prop::collection::vec((prop::bool::weighted(0.3), -100i32..100), 0..200)) {
        test_insert_extract_invariant::<BinaryHeap<i32>>(ops)?;
    }

    #[test]
    fn test_binary_extract_order_invariant(values in prop::collection::vec(-100i32..100, 0..200)) {
        test_extract_order_invariant::<BinaryHeap<i32>>(values)?;
    }

    #[test]
    fn test_binary_merge_invariant(
        heap1 in prop::collection::vec(-100i32..100, 0..60),
        heap2 in prop::collection::vec(-100i32..100, 0..60),
        extract_before in 0usize..10,
    ) {
        test_merge_invariant::<BinaryHeap<i32>>(heap1, heap2, extract_before)?;
    }

    #[test]
    fn test_binomial_insert_extract_invariant(ops in prop::collection::vec((prop::bool::weighted(0.3), -100i32..100), 0..200)) {
        test_insert_extract_invariant::<BinomialHeap<i32>>(ops)?;
    }

    #[test]
    fn test_binomial_extract_order_invariant(values in prop::collection::vec(-100i32..100, 0..200)) {
        test_extract_order_invariant::<BinomialHeap<i32>>(values)?;
    }

    #[test]
    fn test_binomial_merge_invariant(
        heap1 in prop::collection::vec(-100i32..100, 0..60),
        heap2 in prop::collection::vec(-100i32..100, 0..60),
        extract_before in 0usize..10,
    ) {
        test_merge_invariant::<BinomialHeap<i32>>(heap1, heap2, extract_before)?;
    }

    #[test]
    fn test_fibonacci_insert_extract_invariant(ops in prop::collection::vec((prop::bool::weighted(0.3), -100i32..100), 0..200)) {
        test_insert_extract_invariant::<FibonacciHeap<i32>>(ops)?;
    }

    #[test]
    fn test_fibonacci_extract_order_invariant(values in prop::collection::vec(-100i32..100, 0..200)) {
        test_extract_order_invariant::<FibonacciHeap<i32>>(values)?;
    }

    #[test]
    fn test_fibonacci_merge_invariant(
        heap1 in prop::collection::vec(-100i32..100, 0..60),
        heap2 in prop::collection::vec(-100i32..100, 0..60),
        extract_before in 0usize..10,
    ) {
        test_merge_invariant::<FibonacciHeap<i32>>(heap1, heap2, extract_before)?;
    }

    #[test]
    fn test_hash_table_matches_hashmap(
        capacity in 1usize..32,
        ops in prop::collection::vec(table_op(), 0..300),
    ) {
        let mut table = HashTable::with_capacity_and_hasher(capacity, FxBuildHasher);
        let mut model: HashMap<u8, i32> = HashMap::new();

        for op in ops {
            match op {
                TableOp::Put(k, v) => {
                    prop_assert_eq!(table.put(k, v), model.insert(k, v));
                    prop_assert_eq!(table.get(&k), Some(&v));
                }
                TableOp::Get(k) => {
                    prop_assert_eq!(table.get(&k), model.get(&k));
                }
                TableOp::Remove(k) => {
                    prop_assert_eq!(table.remove(&k), model.remove(&k).is_some());
                    prop_assert_eq!(table.get(&k), None);
                }
            }
            prop_assert_eq!(table.len(), model.len());
            prop_assert_eq!(table.capacity(), capacity);
        }
    }
}
