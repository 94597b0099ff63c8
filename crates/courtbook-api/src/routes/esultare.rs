//! Routes for the Esultare standings.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use courtbook_coterie::application::command_handlers;
use courtbook_coterie::domain::commands;
use courtbook_coterie::domain::esultare::Esultare;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /setup.
#[derive(Debug, Default, Deserialize)]
pub struct SetupEsultareRequest {
    /// The house the players belong to, seated last.
    pub player_house_id: Option<Uuid>,
}

/// POST /setup
#[instrument(skip(state, request), fields(player_house_id = ?request.player_house_id))]
async fn setup_esultare(
    State(state): State<AppState>,
    Json(request): Json<SetupEsultareRequest>,
) -> Result<Json<Esultare>, ApiError> {
    let command = commands::SetupEsultare {
        correlation_id: Uuid::new_v4(),
        player_house_id: request.player_house_id,
    };

    info!(correlation_id = %command.correlation_id, "handling setup_esultare command");

    let esultare =
        command_handlers::handle_setup_esultare(&command, &*state.houses, &state.rng).await?;
    Ok(Json(esultare))
}

/// Returns the router for the Esultare standings.
pub fn router() -> Router<AppState> {
    Router::new().route("/setup", post(setup_esultare))
}
