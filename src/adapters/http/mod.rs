//! JSON HTTP inbound adapter.
//!
//! Exposes the livestream service under `/livestream/`. Every error is
//! rendered as `{"error": "..."}`, including extractor rejections and
//! unmatched routes.

pub mod error;
pub mod platforms;
pub mod status;
pub mod streams;

use crate::application::LiveStreamService;
use crate::ports::repository::LiveStreamRepository;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

pub type Shared<R> = Arc<LiveStreamService<R>>;

pub fn router<R>(service: Arc<LiveStreamService<R>>) -> Router
where
    R: LiveStreamRepository + 'static,
{
    Router::new()
        .route("/livestream/", get(streams::list::<R>))
        .route("/livestream/dashboard/", get(streams::dashboard::<R>))
        .route("/livestream/platforms/", get(platforms::list::<R>))
        .route("/livestream/:id/", get(streams::detail::<R>))
        .route(
            "/livestream/api/stream/:id/status/",
            get(status::show::<R>),
        )
        .route(
            "/livestream/api/stream/:id/update-status/",
            post(status::update::<R>).fallback(error::method_not_allowed),
        )
        .fallback(error::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
