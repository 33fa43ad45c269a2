//! This crate is my attempt at writing a growable contiguous array from scratch, directly on top
//! of raw memory.
//!
//! # Purpose
//! Like the rest of my collections, this is a learning exercise, with no expectation for it to be
//! used in production. The interesting part of a dynamic array isn't the API, it's keeping three
//! things correct at once: amortized `O(1)` growth, constructing and destroying every element at
//! exactly the right address, and leaving things in a sane state when an element's constructor
//! panics halfway through an operation.
//!
//! # Method
//! The work is split over two layers:
//! - [`RawStorage`](collections::contiguous::RawStorage) owns a fixed-capacity block of
//!   uninitialized memory. It allocates and deallocates, and that's it.
//! - [`DynamicArray`](collections::contiguous::DynamicArray) owns exactly one RawStorage plus a
//!   length. It decides when to grow, constructs values into the block and destroys them again.
//!
//! Neither type uses [`Vec`] (or `Box<[T]>`) internally.
//!
//! # Error Handling
//! Like [`std`], most methods panic rather than return a [`Result`], because nobody wants to
//! handle a capacity overflow on every push. Indexing out of bounds or popping an empty
//! DynamicArray is a programming error and panics with an [`IndexOutOfBounds`]. Allocation
//! failures go through [`std::alloc::handle_alloc_error`], except for the `try_` methods, which
//! return a [`ReserveError`] instead.
//!
//! When this crate employs errors via [`Result`]s, it does so in a method that is strongly typed,
//! using enums for static dispatch rather than dynamic, with structs (often ZSTs) that implement
//! [`Error`](std::error::Error).
//!
//! # Dependencies
//! This crate depends on `derive_more` for its error enums, because it removes some very
//! repetitive programming.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;

pub use util::error::{AllocError, CapacityOverflow, IndexOutOfBounds, ReserveError};
