use super::error::AppResult;
use super::Shared;
use crate::application::livestream::{Dashboard, StreamDetail, StreamFilter, StreamListing};
use crate::ports::repository::LiveStreamRepository;
use axum::extract::rejection::{HostRejection, PathRejection, QueryRejection};
use axum::extract::{Host, Path, Query, State};
use axum::Json;
use chrono::Utc;

pub async fn list<R: LiveStreamRepository>(
    State(service): State<Shared<R>>,
    query: Result<Query<StreamFilter>, QueryRejection>,
) -> AppResult<Json<StreamListing>> {
    let Query(filter) = query?;
    let listing = service.list_streams(&filter, Utc::now()).await?;
    Ok(Json(listing))
}

/// Stream page data. Embed URLs are built for the host the page is served on.
pub async fn detail<R: LiveStreamRepository>(
    State(service): State<Shared<R>>,
    path: Result<Path<u64>, PathRejection>,
    host: Result<Host, HostRejection>,
) -> AppResult<Json<StreamDetail>> {
    let Path(stream_id) = path?;
    let Host(host) = host?;
    let detail = service.stream_detail(stream_id, &host, Utc::now()).await?;
    Ok(Json(detail))
}

pub async fn dashboard<R: LiveStreamRepository>(
    State(service): State<Shared<R>>,
) -> AppResult<Json<Dashboard>> {
    let dashboard = service.dashboard(Utc::now()).await?;
    Ok(Json(dashboard))
}
