//! Property-based invariant tests for the pointer id pool.
//!
//! 1. Live leases never share an id
//! 2. Every acquire returns the smallest id not held by a live lease
//! 3. Dropping every lease empties the pool
//! 4. `in_use` mirrors exactly the set of live leases

use std::collections::BTreeSet;

use proptest::prelude::*;
use uimonkey_core::pointer::{PointerIdPool, PointerLease};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Acquire,
    /// Release the live lease at `index % live.len()`.
    Release(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Acquire),
        2 => any::<usize>().prop_map(Op::Release),
    ]
}

fn smallest_free(held: &BTreeSet<u32>) -> u32 {
    (0..).find(|id| !held.contains(id)).unwrap_or(0)
}

// ═══════════════════════════════════════════════════════════════════════
// 1 + 2 + 4. Uniqueness, smallest-free, in_use mirror
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ids_unique_and_smallest_free(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        let pool = PointerIdPool::new();
        let mut live: Vec<PointerLease> = Vec::new();
        let mut held: BTreeSet<u32> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Acquire => {
                    let expected = smallest_free(&held);
                    let lease = pool.acquire();
                    prop_assert_eq!(lease.id(), expected);
                    prop_assert!(held.insert(lease.id()), "duplicate id {}", lease.id());
                    live.push(lease);
                }
                Op::Release(index) => {
                    if live.is_empty() {
                        continue;
                    }
                    let lease = live.swap_remove(index % live.len());
                    held.remove(&lease.id());
                    lease.release();
                }
            }
            let in_use: BTreeSet<u32> = pool.in_use().into_iter().collect();
            prop_assert_eq!(&in_use, &held);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Dropping everything empties the pool
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dropping_all_leases_empties_pool(count in 0usize..64) {
        let pool = PointerIdPool::new();
        let leases: Vec<PointerLease> = (0..count).map(|_| pool.acquire()).collect();
        prop_assert_eq!(pool.in_use().len(), count);
        drop(leases);
        prop_assert!(pool.is_empty());
        prop_assert_eq!(pool.acquire().id(), 0);
    }
}
