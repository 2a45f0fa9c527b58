//! The process-wide allocator.

use std::{alloc::Layout, ptr::NonNull};

use crate::{AllocError, Allocator};

/// Allocates through `std::alloc`, i.e. the registered global allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(dangling_for(layout));
        }
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| {
            log::debug!(
                "global allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            );
            AllocError::OutOfMemory {
                size: layout.size(),
                align: layout.align(),
            }
        })
    }

    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
        }
    }
}

/// A non-null pointer aligned to `layout.align()`, not backed by memory.
fn dangling_for(layout: Layout) -> NonNull<u8> {
    // `align` is never zero.
    NonNull::new(std::ptr::without_provenance_mut(layout.align())).unwrap_or(NonNull::dangling())
}
