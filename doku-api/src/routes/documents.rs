use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use doku_core::Document;

use crate::app_state::AppState;
use crate::routes::{ApiError, StatusResponse};
use crate::store::DEFAULT_CONTEXT;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/load", get(load_default))
        .route("/load/:context", get(load_context))
        .route("/save", post(save_default))
        .route("/save/:context", post(save_context))
}

#[instrument(name = "load_document", skip(app_state))]
async fn load_default(State(app_state): State<AppState>) -> Result<Json<Document>, ApiError> {
    let document = app_state.store.load(DEFAULT_CONTEXT).await?;
    Ok(Json(document))
}

#[instrument(name = "load_document", skip(app_state))]
async fn load_context(
    State(app_state): State<AppState>,
    Path(context): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let document = app_state.store.load(&context).await?;
    Ok(Json(document))
}

#[instrument(name = "save_document", skip(app_state, document))]
async fn save_default(
    State(app_state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<Json<StatusResponse>, ApiError> {
    save(&app_state, DEFAULT_CONTEXT, document).await
}

#[instrument(name = "save_document", skip(app_state, document))]
async fn save_context(
    State(app_state): State<AppState>,
    Path(context): Path<String>,
    Json(document): Json<Document>,
) -> Result<Json<StatusResponse>, ApiError> {
    save(&app_state, &context, document).await
}

async fn save(
    app_state: &AppState,
    context: &str,
    mut document: Document,
) -> Result<Json<StatusResponse>, ApiError> {
    // Saving enforces the same invariants as loading, so a client can never
    // persist legacy or negative-time entries.
    document.normalize();
    app_state.store.save(context, &document).await?;

    Ok(Json(StatusResponse::success("saved")))
}
