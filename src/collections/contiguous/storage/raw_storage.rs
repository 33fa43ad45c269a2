use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::util::error::{AllocError, CapacityOverflow, ReserveError};
use crate::util::result::ReserveResultExtension;

/// An owned, fixed-capacity block of uninitialized memory with room for `cap` values of `T`.
///
/// A RawStorage never contains live values as far as it is concerned. Whatever is constructed
/// inside of it is tracked (and destroyed) by its owner, usually a
/// [`DynamicArray`](crate::collections::contiguous::DynamicArray). Dropping a RawStorage only
/// releases the memory.
///
/// RawStorage is move-only: it implements neither [`Clone`] nor [`Copy`], because duplicating a
/// block without knowing which part of it is live can't be done correctly.
///
/// For zero-sized types (and a capacity of 0) nothing is allocated and the pointer is dangling.
pub struct RawStorage<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawStorage<T> {
    /// Creates an empty RawStorage with capacity 0, without allocating.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::RawStorage;
    /// let data: RawStorage<u8> = RawStorage::new();
    /// assert_eq!(data.capacity(), 0);
    /// ```
    pub const fn new() -> RawStorage<T> {
        RawStorage {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a RawStorage with room for exactly `cap` values of `T`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Errors
    /// In the event of an allocation error, this method calls [`alloc::handle_alloc_error`] rather
    /// than panicking. See [`RawStorage::try_with_capacity`] for a fallible version.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::RawStorage;
    /// let data: RawStorage<u32> = RawStorage::with_capacity(8);
    /// assert_eq!(data.capacity(), 8);
    /// ```
    pub fn with_capacity(cap: usize) -> RawStorage<T> {
        Self::try_with_capacity(cap).or_handle_alloc()
    }

    /// Allocates a RawStorage with room for exactly `cap` values of `T`, returning an error
    /// instead of panicking or aborting.
    ///
    /// # Errors
    /// Returns [`ReserveError::CapacityOverflow`] if the layout would exceed [`isize::MAX`] bytes
    /// and [`ReserveError::AllocFailed`] if the global allocator can't satisfy the request.
    pub fn try_with_capacity(cap: usize) -> Result<RawStorage<T>, ReserveError> {
        let layout = Self::make_layout(cap)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).ok_or(AllocError { layout })?
        };

        Ok(RawStorage {
            ptr,
            cap,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of values of `T` this block has room for.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the base address of the block.
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr().cast_const()
    }

    /// Returns the base address of the block.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns the address `offset` slots past the start of the block. An offset equal to the
    /// capacity is allowed and produces the one-past-the-end address.
    ///
    /// # Safety
    /// `offset` must be less than or equal to [`capacity`](RawStorage::capacity). This is only
    /// checked in debug builds.
    pub unsafe fn ptr_at(&self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.cap,
            "Offset {} exceeds storage capacity {}!",
            offset,
            self.cap
        );

        // SAFETY: The caller guarantees offset <= cap, so the result stays within (or one past)
        // the allocation, which is no larger than isize::MAX bytes.
        unsafe { self.ptr.add(offset).as_ptr() }
    }

    /// Takes the block out of `self`, leaving an empty RawStorage with capacity 0 in its place.
    /// Nothing is allocated or deallocated.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::RawStorage;
    /// let mut data: RawStorage<u8> = RawStorage::with_capacity(4);
    /// let stolen = data.take();
    /// assert_eq!(stolen.capacity(), 4);
    /// assert_eq!(data.capacity(), 0);
    /// ```
    pub const fn take(&mut self) -> RawStorage<T> {
        mem::replace(self, RawStorage::new())
    }

    /// Exchanges the blocks held by `self` and `other`. The memory contents aren't touched.
    pub const fn swap(&mut self, other: &mut RawStorage<T>) {
        mem::swap(self, other);
    }

    /// Creates the [`Layout`] for a block of `cap` values of `T`.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the layout size would exceed [`isize::MAX`].
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        // The layout was valid when allocated, so this can only fail for a block that was never
        // allocated in the first place.
        if let Ok(layout) = Self::make_layout(self.cap) {
            if layout.size() != 0 {
                // SAFETY: ptr was allocated in the global allocator with this exact layout.
                // Zero-sized layouts aren't allocated and are guarded against deallocation.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
            }
        }
    }
}

// SAFETY: A RawStorage uniquely owns its block, so it can be sent wherever T can.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: A shared RawStorage only hands out raw pointers. Any access through them is already
// unsafe and subject to the owner's synchronization.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> Debug for RawStorage<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}
