//! An allocator that counts the calls it receives.

use std::{
    alloc::Layout,
    ptr::NonNull,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use growvec_alloc::{AllocError, Allocator, Global};

/// Snapshot of the calls seen by a [`TrackingAllocator`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocStats {
    pub allocations: usize,
    pub deallocations: usize,
    pub constructs: usize,
    pub destroys: usize,
    pub bytes_outstanding: usize,
}

impl AllocStats {
    /// Blocks handed out and not yet released.
    pub fn blocks_outstanding(&self) -> usize {
        self.allocations - self.deallocations
    }

    /// Values constructed and not yet destroyed.
    pub fn values_outstanding(&self) -> usize {
        self.constructs - self.destroys
    }
}

#[derive(Default)]
struct Counters {
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    constructs: AtomicUsize,
    destroys: AtomicUsize,
    bytes_outstanding: AtomicUsize,
}

/// Forwards to an inner allocator while counting allocations, deallocations,
/// constructions and destructions. Clones share the same counters.
#[derive(Clone, Default)]
pub struct TrackingAllocator<A = Global> {
    inner: A,
    counters: Arc<Counters>,
}

impl TrackingAllocator<Global> {
    pub fn new() -> Self {
        Self::with_inner(Global)
    }
}

impl<A> TrackingAllocator<A> {
    pub fn with_inner(inner: A) -> Self {
        TrackingAllocator {
            inner,
            counters: Default::default(),
        }
    }

    pub fn stats(&self) -> AllocStats {
        let c = &self.counters;
        AllocStats {
            allocations: c.allocations.load(Ordering::Relaxed),
            deallocations: c.deallocations.load(Ordering::Relaxed),
            constructs: c.constructs.load(Ordering::Relaxed),
            destroys: c.destroys.load(Ordering::Relaxed),
            bytes_outstanding: c.bytes_outstanding.load(Ordering::Relaxed),
        }
    }
}

impl<A> std::fmt::Debug for TrackingAllocator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingAllocator")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

unsafe impl<A: Allocator> Allocator for TrackingAllocator<A> {
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = self.inner.allocate_bytes(layout)?;
        self.counters.allocations.fetch_add(1, Ordering::Relaxed);
        self.counters
            .bytes_outstanding
            .fetch_add(layout.size(), Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.deallocate_bytes(ptr, layout) };
        self.counters.deallocations.fetch_add(1, Ordering::Relaxed);
        self.counters
            .bytes_outstanding
            .fetch_sub(layout.size(), Ordering::Relaxed);
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        unsafe { self.inner.construct(slot, value) };
        self.counters.constructs.fetch_add(1, Ordering::Relaxed);
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        self.counters.destroys.fetch_add(1, Ordering::Relaxed);
        unsafe { self.inner.destroy(slot) };
    }
}
