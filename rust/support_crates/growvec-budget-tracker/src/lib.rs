//! A shared byte budget with RAII allocations.
//!
//! Used by `growvec-alloc` to put a hard ceiling on the memory an allocator may
//! hand out, so that allocation failure can be provoked deterministically.

use std::sync::Arc;

use counter::Counter;

pub mod counter;

/// Represents a budget that can be allocated from.
///
/// Cloning a `Budget` produces another handle to the same remaining amount.
#[derive(Clone)]
pub struct Budget(Arc<Counter>);

impl Budget {
    /// Creates a new budget with the given amount.
    pub fn new(amount: usize) -> Budget {
        Budget(Arc::new(Counter::new(amount)))
    }

    /// Returns the remaining amount in this budget.
    pub fn remaining(&self) -> usize {
        self.0.read()
    }

    /// Attempts to allocate the specified amount from the budget.
    ///
    /// The allocated amount is returned to the `Budget` when the `Allocation`
    /// is dropped.
    pub fn allocate(&self, amount: usize) -> Result<Allocation, AllocationError> {
        self.try_withdraw(amount)?;
        Ok(Allocation {
            budget: self.0.clone(),
            amount,
        })
    }

    /// Withdraws `amount` without tying it to an `Allocation`.
    ///
    /// The caller is responsible for returning it with [`Budget::deposit`].
    pub fn try_withdraw(&self, amount: usize) -> Result<(), AllocationError> {
        if self.0.withdraw(amount) {
            Ok(())
        } else {
            Err(AllocationError {
                requested: amount,
                remaining: self.remaining(),
            })
        }
    }

    /// Returns `amount` previously taken with [`Budget::try_withdraw`].
    pub fn deposit(&self, amount: usize) {
        if amount != 0 {
            self.0.deposit(amount);
        }
    }
}

impl std::fmt::Debug for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Budget")
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// An amount taken from a budget, handed back on drop.
pub struct Allocation {
    budget: Arc<Counter>,
    amount: usize,
}

impl Allocation {
    /// Currently allocated amount.
    pub fn amount(&self) -> usize {
        self.amount
    }

    /// Grows the allocation by the given amount.
    pub fn grow(&mut self, additional: usize) -> Result<(), AllocationError> {
        if !self.budget.withdraw(additional) {
            return Err(AllocationError {
                requested: additional,
                remaining: self.budget.read(),
            });
        }
        self.amount += additional;
        Ok(())
    }

    /// Shrinks the allocation to `amount`, releasing the difference.
    ///
    /// Does nothing if `amount` is not smaller than the current amount.
    pub fn shrink_to(&mut self, amount: usize) {
        if amount < self.amount {
            self.budget.deposit(self.amount - amount);
            self.amount = amount;
        }
    }
}

impl Drop for Allocation {
    fn drop(&mut self) {
        if self.amount != 0 {
            self.budget.deposit(self.amount);
        }
    }
}

impl std::fmt::Debug for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocation")
            .field("amount", &self.amount)
            .finish_non_exhaustive()
    }
}

/// An error that occurs when a budget allocation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocationError {
    /// Amount that was asked for.
    pub requested: usize,
    /// Amount left in the budget at the time of the request.
    pub remaining: usize,
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "budget exhausted: requested {}, remaining {}",
            self.requested, self.remaining
        )
    }
}

impl std::error::Error for AllocationError {}
