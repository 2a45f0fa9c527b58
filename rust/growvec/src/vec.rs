//! `GrowVec`: a contiguous, growable, bounds-checked sequence.

use growvec_alloc::{AllocError, Allocator, Global};
use growvec_common::{Error, Result, verify_index};

use crate::{growth, raw_block::RawBlock};

/// A contiguous growable array with an explicit allocator.
///
/// Slots `[0, len)` hold live values, slots `[len, capacity)` are
/// uninitialized. Every value enters the live range through
/// [`Allocator::construct`] and leaves it through [`Allocator::destroy`]
/// (or by being moved out with [`GrowVec::take_back`]).
///
/// Capacities chosen by the container follow [`crate::growth`]: sized and
/// literal construction reserve twice the element count, and an append into
/// a full container grows it to `max(8, 2 * len)`.
///
/// Every element access is bounds-checked. [`GrowVec::at`] reports
/// [`ErrorKind::OutOfRange`](growvec_common::ErrorKind::OutOfRange); indexing
/// with `v[i]` panics with the same message.
///
/// # Examples
///
/// ```
/// use growvec::{GrowVec, growvec};
///
/// let mut v = growvec![1, 2, 3, 4]?;
/// assert_eq!(v.len(), 4);
/// assert_eq!(v[1], 2);
///
/// v.push_back(5)?;
/// assert_eq!(v[4], 5);
///
/// v.pop_back();
/// assert!(v.at(4).unwrap_err().is_out_of_range());
///
/// let sized = GrowVec::<i32>::with_len(10)?;
/// assert_eq!(sized.capacity(), 20);
/// # Ok::<(), growvec::Error>(())
/// ```
pub struct GrowVec<T, A: Allocator = Global> {
    block: RawBlock<T, A>,
    len: usize,
}

unsafe impl<T: Send, A: Allocator + Send> Send for GrowVec<T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for GrowVec<T, A> {}

impl<T> GrowVec<T> {
    /// Creates an empty container. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty container with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a container of `len` default values, with capacity `2 * len`.
    pub fn with_len(len: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::with_len_in(len, Global)
    }

    /// Creates a container of `len` copies of `value`, with capacity `2 * len`.
    pub fn from_elem(len: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Global)
    }

    /// Creates a container holding copies of `items`, with capacity
    /// `2 * items.len()`.
    pub fn from_slice(items: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_slice_in(items, Global)
    }

    /// Creates a container by moving in `items`, with capacity `2 * N`.
    pub fn from_array<const N: usize>(items: [T; N]) -> Result<Self> {
        Self::from_array_in(items, Global)
    }
}

impl<T, A: Allocator> GrowVec<T, A> {
    /// Creates an empty container using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        GrowVec {
            block: RawBlock::new_in(alloc),
            len: 0,
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        Self::allocate_in(capacity, alloc, "with_capacity")
    }

    pub fn with_len_in(len: usize, alloc: A) -> Result<Self>
    where
        T: Default,
    {
        let mut v = Self::allocate_in(headroom::<T>(len)?, alloc, "with_len")?;
        for _ in 0..len {
            unsafe { v.construct_back(T::default()) };
        }
        Ok(v)
    }

    pub fn from_elem_in(len: usize, value: T, alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let mut v = Self::allocate_in(headroom::<T>(len)?, alloc, "from_elem")?;
        if len != 0 {
            for _ in 1..len {
                unsafe { v.construct_back(value.clone()) };
            }
            unsafe { v.construct_back(value) };
        }
        Ok(v)
    }

    pub fn from_slice_in(items: &[T], alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let mut v = Self::allocate_in(headroom::<T>(items.len())?, alloc, "from_slice")?;
        for item in items {
            unsafe { v.construct_back(item.clone()) };
        }
        Ok(v)
    }

    pub fn from_array_in<const N: usize>(items: [T; N], alloc: A) -> Result<Self> {
        let mut v = Self::allocate_in(headroom::<T>(N)?, alloc, "from_array")?;
        for item in items {
            unsafe { v.construct_back(item) };
        }
        Ok(v)
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of slots the container can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the container owns a storage block, i.e. `capacity() > 0`.
    #[inline]
    pub fn has_storage(&self) -> bool {
        self.block.has_storage()
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        self.block.allocator()
    }

    /// Returns a slice over the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.block.as_ptr(), self.len) }
    }

    /// Returns a mutable slice over the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.block.as_ptr(), self.len) }
    }

    /// Returns the element at `index`, or `OutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        verify_index!(index, self.len);
        Ok(unsafe { self.block.slot(index).as_ref() })
    }

    /// Returns the element at `index` mutably, or `OutOfRange` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index!(index, self.len);
        Ok(unsafe { self.block.slot(index).as_mut() })
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Appends `value`, growing the block when the container is full.
    ///
    /// If growing fails the container is left untouched and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.len == self.capacity() {
            let new_cap = growth::grown_capacity(self.len).ok_or_else(|| {
                Error::allocation_failure("push_back", capacity_overflow::<T>(self.len))
            })?;
            self.relocate(new_cap, "push_back")?;
        }
        unsafe { self.construct_back(value) };
        Ok(())
    }

    /// Removes and destroys the last element. Does nothing when empty.
    pub fn pop_back(&mut self) {
        if self.len > 0 {
            self.len -= 1;
            let slot = self.block.slot(self.len);
            unsafe { self.block.allocator().destroy(slot) };
        }
    }

    /// Moves the last element out, or returns `None` when empty.
    pub fn take_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { self.block.slot(self.len).read() })
    }

    /// Destroys every element and releases the storage.
    ///
    /// Unlike `Vec::clear`, capacity drops to zero.
    pub fn clear(&mut self) {
        self.destroy_from(0);
        self.block.release();
    }

    /// Ensures room for at least `capacity` elements in total.
    ///
    /// Grows the block to exactly `capacity` slots when it is smaller; never
    /// shrinks. On failure the container is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity > self.capacity() {
            self.relocate(capacity, "reserve")?;
        }
        Ok(())
    }

    /// Reallocates the block to exactly `len()` slots.
    ///
    /// An empty container ends up without storage. On failure the container
    /// is unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.len < self.capacity() {
            self.relocate(self.len, "shrink_to_fit")?;
        }
        Ok(())
    }

    /// Exchanges contents, capacity and allocator with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Transfers the contents into a new container, leaving `self` empty and
    /// without storage. No element is copied.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.allocator().clone());
        std::mem::replace(self, empty)
    }

    /// Returns an independent copy, with the same capacity as `self`.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        A: Clone,
    {
        let mut v = Self::allocate_in(self.capacity(), self.allocator().clone(), "clone")?;
        for item in self.as_slice() {
            unsafe { v.construct_back(item.clone()) };
        }
        Ok(v)
    }

    /// Replaces the contents with copies of `src`'s elements.
    ///
    /// When the current capacity already fits `src.len()` the existing storage
    /// is reused: the common prefix is assigned in place, surplus elements are
    /// destroyed and missing ones constructed. Otherwise a full copy is built
    /// first and only then are the old elements destroyed, so an allocation
    /// failure leaves `self` unchanged.
    pub fn assign_from<B: Allocator>(&mut self, src: &GrowVec<T, B>) -> Result<()>
    where
        T: Clone,
        A: Clone,
    {
        if self.capacity() >= src.len() {
            let common = self.len.min(src.len());
            self.as_mut_slice()[..common].clone_from_slice(&src.as_slice()[..common]);
            self.destroy_from(src.len());
            for item in &src.as_slice()[common..] {
                unsafe { self.construct_back(item.clone()) };
            }
            return Ok(());
        }

        let mut fresh = Self::allocate_in(src.capacity(), self.allocator().clone(), "assign_from")?;
        for item in src.as_slice() {
            unsafe { fresh.construct_back(item.clone()) };
        }
        *self = fresh;
        Ok(())
    }

    /// Replaces the contents with `src`'s elements, leaving `src` empty and
    /// without storage.
    ///
    /// When the current capacity already fits `src.len()` the elements are
    /// moved into the existing storage and `src`'s block is released.
    /// Otherwise `src`'s block (and allocator) are adopted as a whole.
    pub fn move_from(&mut self, src: &mut Self)
    where
        A: Clone,
    {
        if self.capacity() < src.len() {
            self.clear();
            *self = src.take();
            return;
        }

        self.destroy_from(0);
        let count = src.len;
        if count != 0 {
            unsafe {
                std::ptr::copy_nonoverlapping(src.block.as_ptr(), self.block.as_ptr(), count)
            };
        }
        src.len = 0;
        self.len = count;
        src.block.release();
    }
}

impl<T, A: Allocator> GrowVec<T, A> {
    fn allocate_in(capacity: usize, alloc: A, context: &'static str) -> Result<Self> {
        let block = RawBlock::with_capacity_in(capacity, alloc).map_err(|e| {
            log::debug!("{context}: cannot allocate {capacity} slots: {e}");
            Error::allocation_failure(context, e)
        })?;
        Ok(GrowVec { block, len: 0 })
    }

    fn relocate(&mut self, new_cap: usize, context: &'static str) -> Result<()> {
        self.block.relocate(new_cap, self.len).map_err(|e| {
            log::debug!(
                "{context}: cannot relocate {} -> {new_cap} slots: {e}",
                self.capacity()
            );
            Error::allocation_failure(context, e)
        })
    }

    /// Constructs `value` in slot `len` and extends the live range.
    ///
    /// # Safety
    ///
    /// `len < capacity` must hold.
    #[inline]
    unsafe fn construct_back(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        let slot = self.block.slot(self.len);
        unsafe { self.block.allocator().construct(slot, value) };
        self.len += 1;
    }

    /// Destroys the live elements at positions `new_len..len`, front to back.
    fn destroy_from(&mut self, new_len: usize) {
        let old_len = self.len;
        if new_len >= old_len {
            return;
        }
        // Shorten first: a panicking destructor leaks the rest instead of
        // exposing destroyed slots.
        self.len = new_len;
        for index in new_len..old_len {
            let slot = self.block.slot(index);
            unsafe { self.block.allocator().destroy(slot) };
        }
    }
}

fn headroom<T>(n: usize) -> Result<usize> {
    growth::headroom_capacity(n)
        .ok_or_else(|| Error::allocation_failure("headroom", capacity_overflow::<T>(n)))
}

fn capacity_overflow<T>(len: usize) -> AllocError {
    AllocError::CapacityOverflow {
        slots: len,
        elem_size: size_of::<T>(),
    }
}

impl<T, A: Allocator> Drop for GrowVec<T, A> {
    fn drop(&mut self) {
        self.destroy_from(0);
    }
}

impl<T, A: Allocator> std::ops::Index<usize> for GrowVec<T, A> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, A: Allocator> std::ops::IndexMut<usize> for GrowVec<T, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for GrowVec<T, A> {
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the copy's storage; use
    /// [`GrowVec::try_clone`] to handle that case.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(e) = self.assign_from(source) {
            panic!("{e}");
        }
    }
}

impl<T, U, A, B> PartialEq<GrowVec<U, B>> for GrowVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &GrowVec<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for GrowVec<T, A> {}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for GrowVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, A> PartialEq<[U]> for GrowVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, A: Allocator + Default> Default for GrowVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: std::fmt::Debug, A: Allocator> std::fmt::Debug for GrowVec<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrowVec")
            .field("values", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .finish_non_exhaustive()
    }
}
