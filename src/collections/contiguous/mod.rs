//! Contiguous collection types. Namely [`RawStorage`], an untyped block of memory, and
//! [`DynamicArray`], the growable sequence built on top of it.
#![warn(missing_docs)]

pub mod dynamic_array;
pub mod storage;

#[doc(inline)]
pub use dynamic_array::DynamicArray;
#[doc(inline)]
pub use storage::RawStorage;
