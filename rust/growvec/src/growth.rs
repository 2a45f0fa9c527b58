//! Capacity policy.
//!
//! Every capacity the container picks on its own comes from this module:
//!
//! - sized and literal construction of `n` elements reserves
//!   `n * HEADROOM_FACTOR` slots (so `with_len(10)` has capacity 20, and an
//!   empty literal allocates nothing);
//! - an append into a full container grows it to
//!   `max(MIN_GROW_CAPACITY, len * GROWTH_FACTOR)` slots, i.e. 8, 16, 32, ...
//!   starting from empty.
//!
//! `reserve(n)` and `shrink_to_fit()` bypass the policy and size the block
//! exactly.

/// Capacity of the first block allocated by an append.
pub const MIN_GROW_CAPACITY: usize = 8;

/// Multiplier applied to the length when an append finds the container full.
pub const GROWTH_FACTOR: usize = 2;

/// Multiplier applied to the element count by sized and literal construction.
pub const HEADROOM_FACTOR: usize = 2;

/// Capacity to grow to when appending to a full container of `len` elements.
///
/// Returns `None` on arithmetic overflow.
#[inline]
pub fn grown_capacity(len: usize) -> Option<usize> {
    len.checked_mul(GROWTH_FACTOR)
        .map(|cap| cap.max(MIN_GROW_CAPACITY))
}

/// Capacity reserved when constructing a container holding `n` elements.
///
/// Returns `None` on arithmetic overflow.
#[inline]
pub fn headroom_capacity(n: usize) -> Option<usize> {
    n.checked_mul(HEADROOM_FACTOR)
}
