//! Sanctuary - Church livestream backend
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (embed URLs, platforms, streams)
//! - ports/: Trait definitions
//! - adapters/: Concrete implementations (in-memory repository, JSON HTTP API)
//! - application/: Generic services
//! - config: Environment configuration
//! - logging: tracing subscriber setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;

// Re-exports for convenience
pub use adapters::memory::{Fixtures, MemoryRepository};
pub use application::LiveStreamService;
pub use config::ServerConfig;
pub use domain::embed::resolve as resolve_embed_url;
