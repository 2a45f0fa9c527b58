//! Elements that record their own construction and destruction.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Shared tally of the [`Tracked`] values created from it.
///
/// `live()` is the number of values created but not yet dropped. A container
/// that leaks leaves it above zero after being dropped; one that destroys a
/// value twice trips the guard in `Tracked::drop`.
#[derive(Clone, Default)]
pub struct LiveCounter(Arc<Counts>);

#[derive(Default)]
struct Counts {
    created: AtomicUsize,
    dropped: AtomicUsize,
}

impl LiveCounter {
    pub fn new() -> LiveCounter {
        Default::default()
    }

    /// Wraps `value` so that its lifetime is counted.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        self.0.created.fetch_add(1, Ordering::Relaxed);
        Tracked {
            value,
            counter: self.clone(),
            state: Tracked::<T>::LIVE,
        }
    }

    pub fn created(&self) -> usize {
        self.0.created.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> usize {
        self.0.dropped.load(Ordering::Relaxed)
    }

    /// Values created and not dropped yet.
    pub fn live(&self) -> usize {
        let created = self.created();
        let dropped = self.dropped();
        assert!(dropped <= created, "dropped {dropped} of {created} values");
        created - dropped
    }
}

impl std::fmt::Debug for LiveCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveCounter")
            .field("created", &self.created())
            .field("dropped", &self.dropped())
            .finish()
    }
}

/// A value whose creation, clones and drop are reported to a [`LiveCounter`].
pub struct Tracked<T> {
    value: T,
    counter: LiveCounter,
    state: u64,
}

impl<T> Tracked<T> {
    const LIVE: u64 = 0x1157_ab1e_1157_ab1e;
    const DEAD: u64 = 0xdead_dead_dead_dead;

    pub fn get(&self) -> &T {
        assert_eq!(self.state, Self::LIVE, "use of a destroyed value");
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        assert_eq!(self.state, Self::LIVE, "use of a destroyed value");
        &mut self.value
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        assert_ne!(self.state, Self::DEAD, "value destroyed twice");
        self.state = Self::DEAD;
        self.counter.0.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        self.counter.track(self.get().clone())
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.value, f)
    }
}
