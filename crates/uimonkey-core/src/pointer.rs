#![forbid(unsafe_code)]

//! Multi-touch pointer id allocation.
//!
//! Every live gesture owns one pointer id for its whole duration. The pool
//! hands out the smallest id not currently held, so equivalent scenarios
//! produce identical ids and simultaneous-touch ids stay small.
//!
//! # Invariants
//!
//! 1. No id is held by two live [`PointerLease`]s.
//! 2. `acquire` returns the smallest free id.
//! 3. Dropping a lease returns its id, on every exit path.
//!
//! The pool is a cheap cloneable handle over shared state owned by the run
//! context. It is single-threaded by construction; nested acquisition while
//! another lease is live is the expected reentrant case.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Registry of pointer ids held by live gestures.
#[derive(Clone, Default)]
pub struct PointerIdPool {
    in_use: Rc<RefCell<BTreeSet<u32>>>,
}

impl PointerIdPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the smallest free id.
    pub fn acquire(&self) -> PointerLease {
        let mut in_use = self.in_use.borrow_mut();
        let mut id = 0u32;
        for held in in_use.iter() {
            if *held != id {
                break;
            }
            id += 1;
        }
        in_use.insert(id);
        tracing::trace!(target: "uimonkey.pointer", pointer_id = id, "acquire");
        PointerLease {
            id,
            pool: self.clone(),
        }
    }

    fn release(&self, id: u32) {
        self.in_use.borrow_mut().remove(&id);
        tracing::trace!(target: "uimonkey.pointer", pointer_id = id, "release");
    }

    pub fn in_use(&self) -> Vec<u32> {
        self.in_use.borrow().iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.in_use.borrow().is_empty()
    }

    /// Forget every held id. Only for run/test boundaries.
    pub fn reset(&self) {
        self.in_use.borrow_mut().clear();
    }
}

impl fmt::Debug for PointerIdPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerIdPool")
            .field("in_use", &self.in_use())
            .finish()
    }
}

/// Ownership of one pointer id; the id is returned on drop.
pub struct PointerLease {
    id: u32,
    pool: PointerIdPool,
}

impl PointerLease {
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Return the id now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for PointerLease {
    fn drop(&mut self) {
        self.pool.release(self.id);
    }
}

impl fmt::Debug for PointerLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PointerLease").field(&self.id).finish()
    }
}
