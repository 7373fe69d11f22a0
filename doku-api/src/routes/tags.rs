use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use doku_core::Category;

use crate::app_state::AppState;
use crate::routes::{ApiError, StatusResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/edit_tag/:context", post(edit_tag))
        .route("/delete_tag/:context", post(delete_tag))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditTagRequest {
    old_name: String,
    new_name: String,
    new_category: Category,
}

#[instrument(skip(app_state))]
async fn edit_tag(
    State(app_state): State<AppState>,
    Path(context): Path<String>,
    Json(request): Json<EditTagRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let new_name = request.new_name.trim();
    if new_name.is_empty() {
        return Err(ApiError::bad_request("tag name must not be empty"));
    }

    let mut document = app_state.store.load(&context).await?;
    document.rename_tag(&request.old_name, new_name, request.new_category)?;
    app_state.store.save(&context, &document).await?;

    Ok(Json(StatusResponse::success("tag updated")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteTagRequest {
    tag_name: String,
}

#[instrument(skip(app_state))]
async fn delete_tag(
    State(app_state): State<AppState>,
    Path(context): Path<String>,
    Json(request): Json<DeleteTagRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let mut document = app_state.store.load(&context).await?;
    document.delete_tag(&request.tag_name)?;
    app_state.store.save(&context, &document).await?;

    Ok(Json(StatusResponse::success("tag deleted")))
}
