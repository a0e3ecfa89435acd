//! calma-storage
//!
//! Local persistence. A small key-value abstraction over durable storage and
//! typed, validated record collections on top of it.

pub mod error;
pub mod records;
pub mod store;
