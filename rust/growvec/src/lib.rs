//! A contiguous, growable, bounds-checked sequence container with a pluggable
//! allocator.
//!
//! - [`GrowVec`] owns a single storage block and tracks its live length and
//!   capacity.
//! - [`growth`] holds the fixed capacity policy.
//! - The allocator capability lives in `growvec-alloc` and is re-exported here
//!   ([`Allocator`], [`Global`], [`BudgetAllocator`]).
//! - Failures are reported as [`Error`] with an [`ErrorKind`] of either
//!   `OutOfRange` or `AllocationFailure`.

pub mod growth;
mod macros;
mod raw_block;
pub mod vec;

pub use growvec_alloc::{AllocError, Allocator, BudgetAllocator, Global};
pub use growvec_common::{Error, ErrorKind, Result};
pub use vec::GrowVec;
