use std::mem;
use std::ptr;

/// Tracks a run of values being constructed into consecutive uninitialized slots.
///
/// If the guard is dropped before [`commit`](ConstructGuard::commit) is called (most likely
/// because a constructor panicked), every value written so far is destroyed again, leaving the
/// slots uninitialized like they were to begin with.
pub(crate) struct ConstructGuard<T> {
    start: *mut T,
    count: usize,
}

impl<T> ConstructGuard<T> {
    /// # Safety
    /// `start` must be valid for writes of however many values are later pushed, and those slots
    /// must be uninitialized.
    pub(crate) const unsafe fn new(start: *mut T) -> ConstructGuard<T> {
        ConstructGuard { start, count: 0 }
    }

    /// Writes `value` into the next slot.
    ///
    /// # Safety
    /// The next slot must lie within the range promised to [`ConstructGuard::new`].
    pub(crate) unsafe fn push(&mut self, value: T) {
        // SAFETY: The caller guarantees that the next slot is in range and uninitialized.
        unsafe { self.start.add(self.count).write(value) };
        self.count += 1;
    }

    /// Keeps all values constructed so far and returns how many there are.
    pub(crate) fn commit(self) -> usize {
        let count = self.count;
        mem::forget(self);
        count
    }
}

impl<T> Drop for ConstructGuard<T> {
    fn drop(&mut self) {
        // SAFETY: Exactly the first count slots have been initialized by push and nothing else
        // owns them yet.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start, self.count)) }
    }
}
