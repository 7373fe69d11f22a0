use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::app_state::AppState;
use crate::routes::{ApiError, StatusResponse};
use crate::store::ContextInfo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contexts", get(list_contexts).post(create_context))
        // Route kept for clients of the original frontend.
        .route("/create_context", post(create_context))
}

#[instrument(skip(app_state))]
async fn list_contexts(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ContextInfo>>, ApiError> {
    let contexts = app_state.store.list().await?;
    Ok(Json(contexts))
}

#[derive(Debug, Deserialize)]
struct CreateContext {
    id: String,
    name: String,
}

#[instrument(skip(app_state))]
async fn create_context(
    State(app_state): State<AppState>,
    Json(request): Json<CreateContext>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("context name must not be empty"));
    }

    app_state.store.create(&request.id, request.name.trim()).await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::success("context created")),
    ))
}
