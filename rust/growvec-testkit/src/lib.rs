//! Test utilities for the growvec workspace.
//!
//! This crate provides:
//! - [`tracked`]: element types that account for every construction and drop,
//!   to catch leaks and double destruction
//! - [`tracking_alloc`]: an allocator that counts every call it receives
//! - [`data_gen`]: seeded generators for values and container operations
//!
//! It is intended for use as a dev-dependency only.

pub mod data_gen;
pub mod tracked;
pub mod tracking_alloc;

pub use tracked::{LiveCounter, Tracked};
pub use tracking_alloc::{AllocStats, TrackingAllocator};
