//! Domain layer - Pure business logic.

pub mod embed;
pub mod livestream;
pub mod platform;
