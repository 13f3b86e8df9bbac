use super::error::AppResult;
use super::Shared;
use crate::application::livestream::PlatformView;
use crate::ports::repository::LiveStreamRepository;
use axum::extract::State;
use axum::Json;

pub async fn list<R: LiveStreamRepository>(
    State(service): State<Shared<R>>,
) -> AppResult<Json<Vec<PlatformView>>> {
    let platforms = service.list_platforms().await?;
    Ok(Json(platforms))
}
