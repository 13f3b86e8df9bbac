//! In-memory adapter for single-process deployment and tests.
//!
//! This module provides an in-process implementation of:
//! - `LiveStreamRepository` for streams, platforms, broadcasts and analytics

mod error;
mod repository;
mod store;

pub use error::FixtureError;
pub use store::{Fixtures, MemoryRepository};
