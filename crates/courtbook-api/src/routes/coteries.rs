//! Routes for the Coterie context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use courtbook_coterie::application::command_handlers::{self, TrackAdvanceOutcome};
use courtbook_coterie::application::query_handlers::{self, CoterieView};
use courtbook_coterie::domain::commands;
use courtbook_coterie::domain::coterie::{CoterieType, TrackName};
use courtbook_coterie::domain::features::SpecialAbility;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateCoterieRequest {
    /// The coterie name.
    pub name: String,
    /// The patron house, if any.
    pub house_id: Option<Uuid>,
    /// The coterie type, if any.
    #[serde(rename = "type")]
    pub coterie_type: Option<CoterieType>,
}

/// Request body for POST /{id}/tracks/{track}/advance.
#[derive(Debug, Deserialize)]
pub struct AdvanceTrackRequest {
    /// Signed number of segments to move.
    pub amount: i32,
}

/// Request body for POST /{id}/abilities.
#[derive(Debug, Deserialize)]
pub struct AddAbilityRequest {
    /// The ability name.
    pub name: String,
    /// What the ability does.
    #[serde(default)]
    pub description: String,
}

/// Response body for POST /{id}/abilities.
#[derive(Debug, Serialize)]
pub struct AddAbilityResponse {
    /// Whether the ability was new to the coterie.
    pub added: bool,
}

/// POST /
#[instrument(skip(state, request), fields(name = %request.name))]
async fn create_coterie(
    State(state): State<AppState>,
    Json(request): Json<CreateCoterieRequest>,
) -> Result<(StatusCode, Json<CoterieView>), ApiError> {
    let command = commands::CreateCoterie {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        house_id: request.house_id,
        coterie_type: request.coterie_type,
    };

    info!(correlation_id = %command.correlation_id, "handling create_coterie command");

    let created =
        command_handlers::handle_create_coterie(&command, &*state.houses, &*state.coteries)
            .await?;
    let (coterie_id, coterie) = created.into_parts();

    Ok((
        StatusCode::CREATED,
        Json(CoterieView::new(coterie_id, coterie)),
    ))
}

/// GET /
async fn list_coteries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CoterieView>>, ApiError> {
    let views = query_handlers::list_coteries(&*state.coteries).await?;
    Ok(Json(views))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_coterie(
    State(state): State<AppState>,
    Path(coterie_id): Path<Uuid>,
) -> Result<Json<CoterieView>, ApiError> {
    let view = query_handlers::get_coterie_by_id(coterie_id, &*state.coteries).await?;
    Ok(Json(view))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_coterie(
    State(state): State<AppState>,
    Path(coterie_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteCoterie {
        correlation_id: Uuid::new_v4(),
        coterie_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_coterie command");

    let removed = command_handlers::handle_delete_coterie(&command, &*state.coteries).await?;
    Ok(if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_MODIFIED
    })
}

/// POST /{id}/tracks/{track}/advance
#[instrument(skip(state, request), fields(amount = request.amount))]
async fn advance_track(
    State(state): State<AppState>,
    Path((coterie_id, track)): Path<(Uuid, String)>,
    Json(request): Json<AdvanceTrackRequest>,
) -> Result<Json<TrackAdvanceOutcome>, ApiError> {
    let command = commands::AdvanceCoterieTrack {
        correlation_id: Uuid::new_v4(),
        coterie_id,
        track: track.parse::<TrackName>()?,
        amount: request.amount,
    };

    info!(correlation_id = %command.correlation_id, "handling advance_coterie_track command");

    let outcome =
        command_handlers::handle_advance_coterie_track(&command, &*state.coteries).await?;
    Ok(Json(outcome))
}

/// POST /{id}/abilities
#[instrument(skip(state, request), fields(ability = %request.name))]
async fn add_ability(
    State(state): State<AppState>,
    Path(coterie_id): Path<Uuid>,
    Json(request): Json<AddAbilityRequest>,
) -> Result<Json<AddAbilityResponse>, ApiError> {
    let command = commands::AddCoterieAbility {
        correlation_id: Uuid::new_v4(),
        coterie_id,
        ability: SpecialAbility::new(request.name, request.description),
    };

    info!(correlation_id = %command.correlation_id, "handling add_coterie_ability command");

    let added = command_handlers::handle_add_coterie_ability(&command, &*state.coteries).await?;
    Ok(Json(AddAbilityResponse { added }))
}

/// Returns the router for the coterie context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_coterie).get(list_coteries))
        .route("/{id}", get(get_coterie).delete(delete_coterie))
        .route("/{id}/tracks/{track}/advance", post(advance_track))
        .route("/{id}/abilities", post(add_ability))
}
