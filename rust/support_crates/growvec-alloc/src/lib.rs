//! The allocation capability used by `GrowVec`.
//!
//! An [`Allocator`] is responsible for two separate things:
//!
//! - sizing memory: handing out and taking back blocks of uninitialized slots
//!   ([`Allocator::allocate`], [`Allocator::deallocate`]);
//! - element lifetime within such a block: initializing one slot from a value
//!   ([`Allocator::construct`]) and running one slot's teardown without
//!   releasing memory ([`Allocator::destroy`]).
//!
//! Only the byte-level pair is required. The typed operations have default
//! implementations in terms of `std::ptr` and may be overridden, e.g. to count
//! or log element lifetimes.

use std::{alloc::Layout, ptr::NonNull};

pub mod budget;
pub mod global;

pub use budget::BudgetAllocator;
pub use global::Global;

/// Errors reported by an [`Allocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    #[error("capacity overflow: {slots} slots of {elem_size} bytes")]
    CapacityOverflow { slots: usize, elem_size: usize },

    #[error("failed to allocate {size} bytes (align {align})")]
    OutOfMemory { size: usize, align: usize },

    #[error("budget exhausted: requested {requested} bytes, remaining {remaining}")]
    BudgetExceeded { requested: usize, remaining: usize },
}

impl From<growvec_budget_tracker::AllocationError> for AllocError {
    fn from(e: growvec_budget_tracker::AllocationError) -> Self {
        AllocError::BudgetExceeded {
            requested: e.requested,
            remaining: e.remaining,
        }
    }
}

/// Raw memory and element lifetime management for a contiguous container.
///
/// # Safety
///
/// Implementors must guarantee that:
/// - a block returned by `allocate_bytes(layout)` is valid for reads and writes
///   of `layout.size()` bytes, is aligned to `layout.align()`, and stays valid
///   until it is passed to `deallocate_bytes` with the same layout;
/// - blocks handed out by one allocator value may be released through any
///   clone of that value.
pub unsafe trait Allocator {
    /// Allocates a block described by `layout`.
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block previously returned by `allocate_bytes`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate_bytes(layout)` on this allocator (or a clone)
    /// and must not have been released already.
    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout);

    /// Allocates a block of `n` uninitialized slots of `T`.
    ///
    /// For `n == 0` or zero-sized `T` no memory is requested and a dangling,
    /// well-aligned pointer is returned.
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        if n == 0 || size_of::<T>() == 0 {
            return Ok(NonNull::dangling());
        }
        let layout = array_layout::<T>(n)?;
        self.allocate_bytes(layout).map(NonNull::cast)
    }

    /// Releases a block of `n` slots. A no-op for an empty block.
    ///
    /// # Safety
    ///
    /// `block` must come from `allocate::<T>(n)` on this allocator (or a clone).
    /// Slots that still hold live values are not dropped.
    unsafe fn deallocate<T>(&self, block: NonNull<T>, n: usize) {
        if n == 0 || size_of::<T>() == 0 {
            return;
        }
        if let Ok(layout) = array_layout::<T>(n) {
            unsafe { self.deallocate_bytes(block.cast(), layout) }
        }
    }

    /// Initializes `slot` with `value`.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes and must not hold a live value.
    #[inline]
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        unsafe { slot.as_ptr().write(value) }
    }

    /// Runs the teardown of the value in `slot`, leaving the memory allocated.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value, which must not be used afterwards.
    #[inline]
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        unsafe { std::ptr::drop_in_place(slot.as_ptr()) }
    }
}

unsafe impl<A: Allocator> Allocator for &A {
    #[inline]
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate_bytes(layout)
    }

    #[inline]
    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate_bytes(ptr, layout) }
    }

    #[inline]
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        (**self).allocate(n)
    }

    #[inline]
    unsafe fn deallocate<T>(&self, block: NonNull<T>, n: usize) {
        unsafe { (**self).deallocate(block, n) }
    }

    #[inline]
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        unsafe { (**self).construct(slot, value) }
    }

    #[inline]
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        unsafe { (**self).destroy(slot) }
    }
}

/// Returns the layout of `n` consecutive slots of `T`.
pub fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow {
        slots: n,
        elem_size: size_of::<T>(),
    })
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_array_layout_overflow() {
        let err = array_layout::<u64>(usize::MAX / 4).unwrap_err();
        assert_eq!(
            err,
            AllocError::CapacityOverflow {
                slots: usize::MAX / 4,
                elem_size: 8
            }
        );
        assert_eq!(array_layout::<u64>(3).unwrap().size(), 24);
    }

    #[test]
    fn test_construct_and_destroy_non_trivial() {
        let alloc = Global;
        let marker = Rc::new(());
        let block = alloc.allocate::<Rc<()>>(2).unwrap();
        unsafe {
            alloc.construct(block, marker.clone());
            alloc.construct(block.add(1), marker.clone());
        }
        assert_eq!(Rc::strong_count(&marker), 3);
        unsafe {
            alloc.destroy(block.add(1));
            alloc.destroy(block);
            alloc.deallocate(block, 2);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_zero_sized_requests_do_not_allocate() {
        let budget = growvec_budget_tracker::Budget::new(0);
        let alloc = BudgetAllocator::new(budget.clone());
        let block = alloc.allocate::<u32>(0).unwrap();
        let units = alloc.allocate::<()>(1000).unwrap();
        unsafe {
            alloc.deallocate(block, 0);
            alloc.deallocate(units, 1000);
        }
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_allocator_by_reference() {
        let alloc = Global;
        let by_ref = &alloc;
        let block = by_ref.allocate::<u16>(4).unwrap();
        unsafe {
            by_ref.construct(block.add(3), 7u16);
            assert_eq!(*block.add(3).as_ptr(), 7);
            by_ref.deallocate(block, 4);
        }
    }
}
