//! Base types for input source switching.
//!
//! This crate contains types and traits from [`switchkey`] that are platform independent. It is
//! intended to allow other crates to build abstractions around [`switchkey`] without pulling in
//! every platform backend, and to provide an interface for alternative registries (such as the
//! in-memory one used in tests).
//!
//! [`switchkey`]: https://docs.rs/switchkey

pub mod error;
pub mod icon;
pub mod input_source;
pub mod registry;

// `pub` so the macro can name it, hidden from the docs.
#[doc(hidden)]
pub mod as_any;
