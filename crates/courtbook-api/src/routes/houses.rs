//! Routes for browsing the great houses.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use courtbook_coterie::application::query_handlers::{self, HouseView};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
async fn list_houses(State(state): State<AppState>) -> Result<Json<Vec<HouseView>>, ApiError> {
    let views = query_handlers::list_houses(&*state.houses).await?;
    Ok(Json(views))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_house(
    State(state): State<AppState>,
    Path(house_id): Path<Uuid>,
) -> Result<Json<HouseView>, ApiError> {
    let view = query_handlers::get_house_by_id(house_id, &*state.houses).await?;
    Ok(Json(view))
}

/// Returns the router for the houses.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_houses))
        .route("/{id}", get(get_house))
}
