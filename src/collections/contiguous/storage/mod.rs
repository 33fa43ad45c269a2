//! A module containing [`RawStorage`], the untyped memory block that backs a
//! [`DynamicArray`](super::DynamicArray).
//!
//! [`RawStorage`] is also re-exported under the parent module.

mod raw_storage;

pub use raw_storage::*;
