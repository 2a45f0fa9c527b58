//! The storage block owned by a `GrowVec`.

use std::ptr::NonNull;

use growvec_alloc::{AllocError, Allocator};

/// An exclusively owned block of `cap` slots of `T`, together with the
/// allocator it came from.
///
/// `RawBlock` knows nothing about which slots are initialized: it never reads,
/// constructs or destroys elements. Dropping it only releases the memory.
///
/// The block is `None` iff `cap == 0`.
pub(crate) struct RawBlock<T, A: Allocator> {
    ptr: Option<NonNull<T>>,
    cap: usize,
    alloc: A,
}

impl<T, A: Allocator> RawBlock<T, A> {
    pub const fn new_in(alloc: A) -> Self {
        RawBlock {
            ptr: None,
            cap: 0,
            alloc,
        }
    }

    pub fn with_capacity_in(cap: usize, alloc: A) -> Result<Self, AllocError> {
        let mut block = Self::new_in(alloc);
        if cap != 0 {
            block.ptr = Some(block.alloc.allocate::<T>(cap)?);
            block.cap = cap;
        }
        Ok(block)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn has_storage(&self) -> bool {
        self.ptr.is_some()
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Base pointer of the block; dangling (but aligned) when there is no block.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Pointer to slot `index`.
    #[inline]
    pub fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(index < self.cap);
        let base = self.ptr.unwrap_or(NonNull::dangling());
        unsafe { base.add(index) }
    }

    /// Moves the first `live` slots into a freshly allocated block of
    /// `new_cap` slots and releases the old block.
    ///
    /// The new block is acquired before anything else happens; on failure the
    /// old block, its contents and the capacity are left as they were. The
    /// move is bitwise: afterwards the old slots are gone with the old block
    /// and must not be destroyed. `new_cap == 0` just releases the block.
    pub fn relocate(&mut self, new_cap: usize, live: usize) -> Result<(), AllocError> {
        debug_assert!(live <= new_cap && live <= self.cap);

        let new_ptr = if new_cap == 0 {
            None
        } else {
            Some(self.alloc.allocate::<T>(new_cap)?)
        };

        if let (Some(old), Some(new)) = (self.ptr, new_ptr) {
            unsafe { std::ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), live) };
        }

        log::trace!(
            "relocating block: {} -> {} slots, {} live",
            self.cap,
            new_cap,
            live
        );

        let old_ptr = std::mem::replace(&mut self.ptr, new_ptr);
        let old_cap = std::mem::replace(&mut self.cap, new_cap);
        if let Some(old) = old_ptr {
            unsafe { self.alloc.deallocate(old, old_cap) };
        }
        Ok(())
    }

    /// Releases the block, leaving no storage and zero capacity.
    ///
    /// Slots that still hold live values are not dropped.
    pub fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            log::trace!("releasing block of {} slots", self.cap);
            unsafe { self.alloc.deallocate(ptr, self.cap) };
        }
        self.cap = 0;
    }
}

impl<T, A: Allocator> Drop for RawBlock<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
