//! An allocator bounded by a byte budget.

use std::{alloc::Layout, ptr::NonNull};

use growvec_budget_tracker::Budget;

use crate::{AllocError, Allocator, Global};

/// Wraps an inner allocator and charges every block against a [`Budget`].
///
/// A request larger than the remaining budget fails with
/// [`AllocError::BudgetExceeded`] before the inner allocator is consulted.
/// Released blocks are credited back. Clones share the same budget.
#[derive(Debug, Clone)]
pub struct BudgetAllocator<A = Global> {
    inner: A,
    budget: Budget,
}

impl BudgetAllocator<Global> {
    /// Creates a budget-bounded allocator on top of [`Global`].
    pub fn new(budget: Budget) -> Self {
        Self::with_inner(Global, budget)
    }
}

impl<A> BudgetAllocator<A> {
    pub fn with_inner(inner: A, budget: Budget) -> Self {
        BudgetAllocator { inner, budget }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

unsafe impl<A: Allocator> Allocator for BudgetAllocator<A> {
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.budget.try_withdraw(layout.size()).map_err(|e| {
            log::debug!("{e}");
            AllocError::from(e)
        })?;
        self.inner.allocate_bytes(layout).inspect_err(|_| {
            self.budget.deposit(layout.size());
        })
    }

    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.deallocate_bytes(ptr, layout) };
        self.budget.deposit(layout.size());
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        unsafe { self.inner.construct(slot, value) }
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        unsafe { self.inner.destroy(slot) }
    }
}
