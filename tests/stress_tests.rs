//! Stress tests that push the heaps through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use classic_heaps::binary::BinaryHeap;
use classic_heaps::binomial::BinomialHeap;
use classic_heaps::fibonacci::FibonacciHeap;
use classic_heaps::hash_table::HashTable;
use classic_heaps::{FxBuildHasher, Heap, MergeableHeap};

/// Linear congruential generator for reproducible key sequences
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next_key(&mut self) -> i32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 33) % 100_000) as i32
    }
}

/// Test massive numbers of inserts and extracts
fn test_massive_operations<H: Heap<i32>>() {
    let mut heap = H::new();

    for i in 0..10_000 {
        heap.insert(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.extract_min(), Some(i));
    }
    assert!(heap.is_empty());
}

/// Test reverse-ordered input
fn test_descending_input<H: Heap<i32>>() {
    let mut heap = H::new();
    for i in (0..5_000).rev() {
        heap.insert(i);
    }
    for i in 0..5_000 {
        assert_eq!(heap.extract_min(), Some(i));
    }
}

/// Test alternating insert and extract
fn test_alternating_ops<H: Heap<i32>>() {
    let mut heap = H::new();

    for i in 0..2_000 {
        heap.insert(i * 2);
        heap.insert(i * 2 + 1);
        assert!(heap.extract_min().is_some());
    }
    assert_eq!(heap.len(), 2_000);

    let mut last = i32::MIN;
    while let Some(key) = heap.extract_min() {
        assert!(key >= last);
        last = key;
    }
}

/// Test pseudo-random keys against a sorted copy
fn test_random_keys<H: Heap<i32>>() {
    let mut rng = Lcg::new(0x5eed);
    let mut heap = H::new();
    let mut expected = Vec::new();

    for _ in 0..20_000 {
        let key = rng.next_key();
        heap.insert(key);
        expected.push(key);
    }
    expected.sort_unstable();

    let drained: Vec<_> = std::iter::from_fn(|| heap.extract_min()).collect();
    assert_eq!(drained, expected);
}

/// Test many merges of small heaps into one
fn test_many_merges<H: MergeableHeap<i32>>() {
    let mut rng = Lcg::new(42);
    let mut total = H::new();
    let mut expected = Vec::new();

    for _ in 0..200 {
        let mut part = H::new();
        for _ in 0..25 {
            let key = rng.next_key();
            part.insert(key);
            expected.push(key);
        }
        // Extract once so the linked heaps merge consolidated trees
        if let Some(key) = part.extract_min() {
            let pos = expected.iter().rposition(|&k| k == key).unwrap();
            expected.swap_remove(pos);
        }
        total.merge(part);
    }

    expected.sort_unstable();
    assert_eq!(total.len(), expected.len());
    let drained: Vec<_> = std::iter::from_fn(|| total.extract_min()).collect();
    assert_eq!(drained, expected);
}

macro_rules! stress_tests {
    ($name:ident, $heap:ident) => {
        mod $name {
            use super::*;

            #[test]
            fn massive_operations() {
                test_massive_operations::<$heap<i32>>();
            }

            #[test]
            fn descending_input() {
                test_descending_input::<$heap<i32>>();
            }

            #[test]
            fn alternating_ops() {
                test_alternating_ops::<$heap<i32>>();
            }

            #[test]
            fn random_keys() {
                test_random_keys::<$heap<i32>>();
            }

            #[test]
            fn many_merges() {
                test_many_merges::<$heap<i32>>();
            }
        }
    };
}

stress_tests!(binary, BinaryHeap);
stress_tests!(binomial, BinomialHeap);
stress_tests!(fibonacci, FibonacciHeap);

#[test]
fn test_binomial_structure_under_load() {
    let mut rng = Lcg::new(7);
    let mut heap = BinomialHeap::new();
    for round in 0..50 {
        for _ in 0..40 {
            heap.insert(rng.next_key());
        }
        for _ in 0..(round % 30) {
            heap.extract_min();
        }
        assert!(heap.verify_structure());
    }
}

#[test]
fn test_fibonacci_structure_under_load() {
    let mut rng = Lcg::new(11);
    let mut heap = FibonacciHeap::new();
    for round in 0..50 {
        for _ in 0..40 {
            heap.insert(rng.next_key());
        }
        for _ in 0..(round % 30) {
            heap.extract_min();
        }
        assert!(heap.verify_structure());
    }
}

#[test]
fn test_hash_table_long_chains() {
    let mut table = HashTable::with_capacity_and_hasher(7, FxBuildHasher);
    for i in 0..10_000u32 {
        table.put(i, i.wrapping_mul(31));
    }
    assert_eq!(table.len(), 10_000);
    assert_eq!(table.capacity(), 7);
    assert!(table.longest_chain() >= 10_000 / 7);

    for i in (0..10_000u32).step_by(2) {
        assert!(table.remove(&i));
    }
    assert_eq!(table.len(), 5_000);
    for i in 0..10_000u32 {
        let expected = (i % 2 == 1).then(|| i.wrapping_mul(31));
        assert_eq!(table.get(&i).copied(), expected);
    }
}
