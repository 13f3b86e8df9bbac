use super::error::AppResult;
use super::Shared;
use crate::application::livestream::{StatusUpdate, StreamStatusView};
use crate::ports::repository::LiveStreamRepository;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::{Form, Json};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

pub async fn show<R: LiveStreamRepository>(
    State(service): State<Shared<R>>,
    path: Result<Path<u64>, PathRejection>,
) -> AppResult<Json<StreamStatusView>> {
    let Path(stream_id) = path?;
    let status = service.stream_status(stream_id).await?;
    Ok(Json(status))
}

// A missing or unreadable form is treated like a missing status field.
pub async fn update<R: LiveStreamRepository>(
    State(service): State<Shared<R>>,
    path: Result<Path<u64>, PathRejection>,
    form: Option<Form<StatusForm>>,
) -> AppResult<Json<StatusUpdate>> {
    let Path(stream_id) = path?;
    let status = form.and_then(|Form(form)| form.status);
    let update = service
        .update_status(stream_id, status.as_deref(), Utc::now())
        .await?;
    Ok(Json(update))
}
