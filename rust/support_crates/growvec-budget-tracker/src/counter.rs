use std::sync::atomic::{AtomicUsize, Ordering};

/// A byte counter that can be withdrawn from and deposited into, never going below zero.
pub struct Counter(AtomicUsize);

impl Counter {
    /// Creates a new `Counter` holding `amount`.
    pub fn new(amount: usize) -> Counter {
        Counter(AtomicUsize::new(amount))
    }

    /// Withdraws `amount` if at least that much remains.
    ///
    /// Returns `false` and leaves the counter untouched when the remaining value
    /// is smaller than `amount`.
    pub fn withdraw(&self, amount: usize) -> bool {
        let mut current = self.0.load(Ordering::Relaxed);
        while current >= amount {
            match self.0.compare_exchange_weak(
                current,
                current - amount,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(updated) => current = updated,
            }
        }
        false
    }

    /// Adds `amount` back to the counter.
    pub fn deposit(&self, amount: usize) {
        self.0.fetch_add(amount, Ordering::Release);
    }

    /// Returns the current value.
    pub fn read(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}
