use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use super::guard::ConstructGuard;
use crate::collections::contiguous::RawStorage;
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, ReserveError};
use crate::util::result::{ReserveResultExtension, ResultExtension};

const MIN_CAP: usize = 1;

const GROWTH_FACTOR: usize = 2;

/// A growable contiguous collection, built on top of a [`RawStorage<T>`].
///
/// The elements at positions `0..len` are live and everything from `len` up to the capacity is
/// uninitialized memory. Only the DynamicArray knows where that boundary is, so it alone
/// constructs and destroys elements, while the RawStorage just holds on to the memory.
///
/// # Panic Safety
/// Element collaborators (`Default`, `Clone`, constructor closures and `Drop`) may panic. What the
/// DynamicArray looks like afterwards depends on the operation:
///
/// - Strong (left exactly as it was): [`with_len`](DynamicArray::with_len), [`clone`](Clone::clone),
///   [`reserve`](DynamicArray::reserve), [`push_back`](DynamicArray::push_back),
///   [`emplace_back_with`](DynamicArray::emplace_back_with), [`insert`](DynamicArray::insert),
///   [`emplace_with`](DynamicArray::emplace_with) and the reallocating path of
///   [`clone_from`](Clone::clone_from).
/// - Elements and length unchanged, capacity may have grown: the growing half of
///   [`resize`](DynamicArray::resize) and [`resize_with`](DynamicArray::resize_with).
/// - Basic (valid, nothing leaked, but possibly only partially updated): the in-place path of
///   [`clone_from`](Clone::clone_from) and [`erase`](DynamicArray::erase).
///
/// Moving a value in Rust is a bitwise copy that can't fail, so migrating elements into a new
/// block is always done by relocation and never needs to fall back to cloning.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DynamicArray.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `index` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push_back` | `O(1)`*, `O(n)` |
/// | `pop_back` | `O(1)` |
/// | `insert` | `O(n-i)`, `O(n)` |
/// | `erase` | `O(n-i)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `resize` | `O(n)` |
/// | `swap` | `O(1)` |
///
/// \* If the DynamicArray doesn't have enough capacity for the new element, `push_back` will take
/// `O(n)`. Capacity doubles every time, so `n` pushes relocate `O(n)` elements in total.
///
/// \** If the DynamicArray already has the requested capacity, `reserve` is `O(1)`.
pub struct DynamicArray<T> {
    pub(crate) data: RawStorage<T>,
    pub(crate) len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates a new DynamicArray with length and capacity 0. Memory will be allocated when the
    /// capacity changes.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let arr: DynamicArray<u8> = DynamicArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.cap(), 0);
    /// ```
    pub const fn new() -> DynamicArray<T> {
        DynamicArray {
            data: RawStorage::new(),
            len: 0,
        }
    }

    /// Creates a new DynamicArray with capacity exactly equal to the provided value and no
    /// elements.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<u8> = DynamicArray::with_cap(5);
    /// assert_eq!(arr.cap(), 5);
    /// arr.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(arr.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> DynamicArray<T> {
        DynamicArray {
            data: RawStorage::with_capacity(cap),
            len: 0,
        }
    }

    /// Creates a new DynamicArray of `len` elements, each produced by calling `f`, in order. The
    /// capacity is exactly `len`.
    ///
    /// If `f` panics, every element constructed so far is dropped and the storage is released
    /// before the panic continues.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut next = 0;
    /// let arr = DynamicArray::with_len_with(4, || { next += 2; next });
    /// assert_eq!(&*arr, &[2, 4, 6, 8]);
    /// ```
    pub fn with_len_with<F: FnMut() -> T>(len: usize, mut f: F) -> DynamicArray<T> {
        let mut arr = Self::with_cap(len);

        // SAFETY: arr has exactly len uninitialized slots starting at its base address.
        let mut guard = unsafe { ConstructGuard::new(arr.data.as_mut_ptr()) };
        for _ in 0..len {
            // SAFETY: At most len values are pushed.
            unsafe { guard.push(f()) };
        }
        arr.len = guard.commit();

        arr
    }

    /// Returns the length of the DynamicArray.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let arr: DynamicArray<_> = (1_u8..=3).collect();
    /// assert_eq!(arr.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the DynamicArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the DynamicArray, the number of elements it can hold
    /// without reallocating.
    pub const fn cap(&self) -> usize {
        self.data.capacity()
    }

    /// Returns a slice over all live elements.
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Returns a mutable slice over all live elements.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Returns the address of the first element.
    pub const fn begin(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Returns the address one past the last live element. Together with
    /// [`begin`](DynamicArray::begin), this bounds the live elements.
    pub fn end(&self) -> *const T {
        // SAFETY: len <= cap.
        unsafe { self.data.ptr_at(self.len).cast_const() }
    }

    /// Mutable counterpart of [`begin`](DynamicArray::begin).
    pub const fn begin_mut(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Mutable counterpart of [`end`](DynamicArray::end).
    pub fn end_mut(&mut self) -> *mut T {
        // SAFETY: len <= cap.
        unsafe { self.data.ptr_at(self.len) }
    }

    /// Ensures that the capacity is at least `new_cap`. If a reallocation is required, the new
    /// capacity is exactly `new_cap` and all elements are relocated into the new block.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = (0..3).collect();
    /// arr.reserve(10);
    /// assert_eq!(arr.cap(), 10);
    /// arr.reserve(2);
    /// assert_eq!(arr.cap(), 10);
    /// assert_eq!(&*arr, &[0, 1, 2]);
    /// ```
    pub fn reserve(&mut self, new_cap: usize) {
        self.try_reserve(new_cap).or_handle_alloc()
    }

    /// A fallible version of [`reserve`](DynamicArray::reserve). On error the DynamicArray is left
    /// untouched.
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if the new layout would exceed [`isize::MAX`] bytes or the
    /// allocation fails.
    pub fn try_reserve(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        if new_cap <= self.cap() {
            return Ok(());
        }

        let mut new_data = RawStorage::try_with_capacity(new_cap)?;
        // SAFETY: new_data has room for at least len elements and doesn't overlap self.data.
        unsafe { Self::relocate(self.data.as_ptr(), new_data.as_mut_ptr(), self.len) };
        self.data.swap(&mut new_data);

        Ok(())
    }

    /// Appends `value` to the end of the DynamicArray, doubling the capacity if it is full.
    /// Returns a reference to the stored value.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u8>::new();
    /// for i in 0..=5 {
    ///     arr.push_back(i);
    /// }
    /// assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5]);
    /// *arr.push_back(6) += 1;
    /// assert_eq!(arr[6], 7);
    /// ```
    pub fn push_back(&mut self, value: T) -> &mut T {
        self.emplace_back_with(|| value)
    }

    /// A fallible version of [`push_back`](DynamicArray::push_back). On error the value is
    /// dropped and the DynamicArray is left untouched.
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if growing fails.
    pub fn try_push_back(&mut self, value: T) -> Result<&mut T, ReserveError> {
        self.try_emplace_back_with(|| value)
    }

    /// Constructs a new element at the end of the DynamicArray by calling `f`. If the DynamicArray
    /// is full, the element is constructed directly into the new block before anything else is
    /// moved, so a panic in `f` leaves the DynamicArray exactly as it was.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub fn emplace_back_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.try_emplace_back_with(f).or_handle_alloc()
    }

    /// A fallible version of [`emplace_back_with`](DynamicArray::emplace_back_with). `f` isn't
    /// called if growing fails.
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if growing fails.
    pub fn try_emplace_back_with<F: FnOnce() -> T>(&mut self, f: F) -> Result<&mut T, ReserveError> {
        let index = self.len;
        self.try_emplace_at(index, f)?;

        // SAFETY: The element at index has just been constructed and index < len.
        Ok(unsafe { &mut *self.data.ptr_at(index) })
    }

    /// Destroys the last element of the DynamicArray.
    ///
    /// # Panics
    /// Panics if the DynamicArray is empty.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = (0..3).collect();
    /// arr.pop_back();
    /// assert_eq!(&*arr, &[0, 1]);
    /// ```
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            Err(IndexOutOfBounds {
                index: 0,
                len: 0,
            }).throw()
        }

        self.truncate(self.len - 1);
    }

    /// Pops the last value off the end of the DynamicArray, returning an owned value if the
    /// DynamicArray has length greater than 0.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = (0..5).collect();
    /// for i in (0..arr.len()).rev() {
    ///     assert_eq!(arr.pop(), Some(i));
    /// }
    /// assert_eq!(arr.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading, so the slot is no longer considered live.
            self.len -= 1;

            // SAFETY: The slot at the old last index was initialized and is now outside of the
            // live range, so the value is moved out exactly once.
            Some(unsafe { self.data.ptr_at(self.len).read() })
        }
    }

    /// Inserts `value` so that it ends up at `index`, shifting all following elements one place
    /// to the right. Returns the index of the inserted value.
    ///
    /// # Panics
    /// Panics if `index > len` or if the memory layout of the DynamicArray would have a size that
    /// exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = (0..3).collect();
    /// arr.insert(1, 100);
    /// arr.insert(1, 200);
    /// arr.insert(3, 300);
    /// assert_eq!(arr.insert(6, 400), 6);
    /// assert_eq!(&*arr, &[0, 200, 100, 300, 1, 2, 400]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.emplace_with(index, || value)
    }

    /// Constructs a new element at `index` by calling `f`, shifting all following elements one
    /// place to the right. Returns the index of the new element.
    ///
    /// `f` is always called before any existing element is moved, so if it panics the
    /// DynamicArray is left exactly as it was.
    ///
    /// # Panics
    /// Panics if `index > len` or if the memory layout of the DynamicArray would have a size that
    /// exceeds [`isize::MAX`].
    pub fn emplace_with<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> usize {
        self.check_position(index);

        if index == self.len {
            self.emplace_back_with(f);
        } else {
            self.try_emplace_at(index, f).or_handle_alloc();
        }

        index
    }

    /// Removes and drops the element at `index`, moving all following elements one place to the
    /// left. Returns `index`, which is now the position of the element that followed the erased
    /// one (or the end).
    ///
    /// The element is removed from the DynamicArray before it is dropped, so a panicking [`Drop`]
    /// still leaves the remaining elements in order.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = (0..4).collect();
    /// assert_eq!(arr.erase(1), 1);
    /// assert_eq!(&*arr, &[0, 2, 3]);
    /// ```
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = "Hello world!".chars().collect();
    /// assert_eq!(arr.remove(1), 'e');
    /// assert_eq!(arr.remove(4), ' ');
    /// assert_eq!(arr, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);

        // SAFETY: index < len, so the slot is initialized. The value is read out before its slot
        // is overwritten by the shift, and len is decremented straight after, so every value is
        // owned exactly once.
        unsafe {
            let hole = self.data.ptr_at(index);
            let value = hole.read();
            ptr::copy(hole.add(1), hole, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Changes the length of the DynamicArray to `new_len`, dropping trailing elements when
    /// shrinking and filling new slots with [`T::default()`](Default::default) when growing.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = [1, 9].into_iter().collect();
    /// arr.resize(5);
    /// assert_eq!(&*arr, &[1, 9, 0, 0, 0]);
    /// arr.resize(1);
    /// assert_eq!(&*arr, &[1]);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Changes the length of the DynamicArray to `new_len`, dropping trailing elements when
    /// shrinking and filling new slots with values returned by `f` when growing.
    ///
    /// When growing, the capacity is first raised to exactly `new_len` if needed. If `f` panics,
    /// the values it already produced are dropped and the length is left unchanged, but the raised
    /// capacity is kept.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len);

        // SAFETY: The slots from len up to new_len are within capacity and uninitialized.
        let mut guard = unsafe { ConstructGuard::new(self.data.ptr_at(self.len)) };
        for _ in self.len..new_len {
            // SAFETY: Exactly new_len - len values are pushed.
            unsafe { guard.push(f()) };
        }
        self.len += guard.commit();
    }

    /// Drops all elements from `new_len` onwards. Does nothing if `new_len >= len`. The capacity
    /// is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let old_len = self.len;
        // Shorten first, so a panicking Drop can't cause a double drop.
        self.len = new_len;

        // SAFETY: The range new_len..old_len was initialized and is no longer part of the live
        // range.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.data.ptr_at(new_len),
                old_len - new_len,
            ));
        }
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchanges the contents of `self` and `other` without moving any elements.
    ///
    /// This shadows `<[T]>::swap`, so exchanging two elements of the same DynamicArray goes
    /// through [`as_mut_slice`](DynamicArray::as_mut_slice) instead:
    /// `arr.as_mut_slice().swap(i, j)`.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let mut a: DynamicArray<_> = (0..2).collect();
    /// let mut b: DynamicArray<_> = (5..8).collect();
    /// a.swap(&mut b);
    /// assert_eq!(&*a, &[5, 6, 7]);
    /// assert_eq!(&*b, &[0, 1]);
    ///
    /// a.as_mut_slice().swap(0, 2);
    /// assert_eq!(&*a, &[7, 6, 5]);
    /// ```
    pub const fn swap(&mut self, other: &mut DynamicArray<T>) {
        self.data.swap(&mut other.data);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Constructs the value returned by `f` so that it ends up at `index`, which must be `<= len`.
    ///
    /// Nothing observable changes until the value exists: when the DynamicArray is full, the value
    /// is written into a fresh block and only then are the elements relocated around it. When
    /// there is room, the value is produced before the tail is shifted.
    fn try_emplace_at<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> Result<(), ReserveError> {
        debug_assert!(index <= self.len);

        if self.len == self.cap() {
            let mut new_data = self.try_alloc_grown()?;

            // SAFETY: The new capacity is greater than len, so index and every destination slot
            // below are in bounds of new_data, which doesn't overlap self.data. After relocating,
            // the old block holds no live values and is released by the swap.
            unsafe {
                new_data.ptr_at(index).write(f());
                Self::relocate(self.data.as_ptr(), new_data.as_mut_ptr(), index);
                Self::relocate(
                    self.data.ptr_at(index),
                    new_data.ptr_at(index + 1),
                    self.len - index,
                );
            }
            self.data.swap(&mut new_data);
        } else {
            let value = f();

            // SAFETY: len < cap, so shifting index..len one place right stays within capacity.
            unsafe {
                let slot = self.data.ptr_at(index);
                ptr::copy(slot, slot.add(1), self.len - index);
                slot.write(value);
            }
        }

        self.len += 1;
        Ok(())
    }

    /// Allocates a block for the next growth step, doubling the current capacity.
    fn try_alloc_grown(&self) -> Result<RawStorage<T>, ReserveError> {
        let new_cap = cmp::max(
            self.cap().checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?,
            MIN_CAP,
        );

        RawStorage::try_with_capacity(new_cap)
    }

    /// Relocates `count` values from `src` into the uninitialized slots at `dst`. Relocation is a
    /// bitwise move, so it can't fail. Afterwards the source slots are logically uninitialized.
    ///
    /// # Safety
    /// `src` must point to `count` initialized values, `dst` must be valid for `count` writes and
    /// the two ranges must not overlap.
    const unsafe fn relocate(src: *const T, dst: *mut T, count: usize) {
        // SAFETY: Upheld by the caller.
        unsafe { ptr::copy_nonoverlapping(src, dst, count) }
    }

    /// Checks that the provided index refers to a live element.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub(crate) fn check_index(&self, index: usize) {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
    }

    /// Checks that the provided index is a valid insertion position, from 0 up to and including
    /// len.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub(crate) fn check_position(&self, index: usize) {
        if index > self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
    }
}

impl<T: Default> DynamicArray<T> {
    /// Creates a new DynamicArray containing `len` default values, with capacity exactly `len`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::collections::contiguous::DynamicArray;
    /// let arr = DynamicArray::<u32>::with_len(3);
    /// assert_eq!(&*arr, &[0, 0, 0]);
    /// assert_eq!(arr.cap(), 3);
    /// ```
    pub fn with_len(len: usize) -> DynamicArray<T> {
        Self::with_len_with(len, T::default)
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        let wanted = self.len.saturating_add(iter.size_hint().0);
        if wanted > self.cap() {
            self.reserve(cmp::max(wanted, self.cap().saturating_mul(GROWTH_FACTOR)));
        }

        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut arr = DynamicArray::with_cap(iter.size_hint().0);

        for item in iter {
            arr.push_back(item);
        }

        arr
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and dropped exactly once here.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data.as_mut_ptr(), self.len));
        }

        // Implicitly drop self.data, which only deallocates the memory.
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Creates an independent copy with capacity equal to the number of elements, cloning them
    /// in order. If a clone panics, the clones made so far are dropped and the new storage is
    /// released.
    fn clone(&self) -> Self {
        let mut arr = Self::with_cap(self.len);

        // SAFETY: arr has exactly self.len uninitialized slots.
        let mut guard = unsafe { ConstructGuard::new(arr.data.as_mut_ptr()) };
        for item in self.iter() {
            // SAFETY: At most self.len values are pushed.
            unsafe { guard.push(item.clone()) };
        }
        arr.len = guard.commit();

        arr
    }

    /// Overwrites `self` with a copy of `source`.
    ///
    /// If `source` doesn't fit in the current capacity, a full copy is built first and swapped
    /// in, so a panicking clone leaves `self` untouched. Otherwise the existing elements are
    /// reused via [`Clone::clone_from`], the excess is dropped, and any extra elements are cloned
    /// into the spare capacity. A panic on this path leaves `self` valid but only partially
    /// overwritten.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.cap() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let shared = cmp::min(self.len, source.len);
        for (dst, src) in self.as_mut_slice()[..shared].iter_mut().zip(&source.as_slice()[..shared]) {
            dst.clone_from(src);
        }

        if source.len < self.len {
            self.truncate(source.len);
        } else {
            // SAFETY: source.len <= cap, so the slots from len up to source.len are in bounds and
            // uninitialized.
            let mut guard = unsafe { ConstructGuard::new(self.data.ptr_at(self.len)) };
            for item in &source.as_slice()[self.len..] {
                // SAFETY: Exactly source.len - len values are pushed.
                unsafe { guard.push(item.clone()) };
            }
            self.len += guard.commit();
        }
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: DynamicArray is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull, properly aligned and the range entirely contained within the
        // storage. The borrow checker enforces that self isn't mutated due to this function taking
        // a &self.
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: DynamicArray is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull, properly aligned and the range entirely contained within the
        // storage. The borrow checker enforces that self isn't accessed elsewhere due to this
        // function taking a &mut self.
        unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr(), self.len) }
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// # Panics
    /// Panics if the provided index is out of bounds.
    fn index(&self, index: usize) -> &Self::Output {
        self.check_index(index);
        // SAFETY: index < len, so the element is initialized.
        unsafe { &*self.data.ptr_at(index) }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    /// # Panics
    /// Panics if the provided index is out of bounds.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.check_index(index);
        // SAFETY: index < len, so the element is initialized, and self is borrowed mutably.
        unsafe { &mut *self.data.ptr_at(index) }
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for DynamicArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for DynamicArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for DynamicArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
