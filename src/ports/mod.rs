//! Ports - Trait definitions implemented by adapters.

pub mod repository;
