//! Application layer - Generic services that use ports.

pub mod error;
pub mod livestream;

pub use error::{ServiceError, ServiceResult};
pub use livestream::LiveStreamService;
