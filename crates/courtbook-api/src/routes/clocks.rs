//! Routes for the Clock context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use courtbook_clock::application::command_handlers::{self, AdvanceOutcome};
use courtbook_clock::application::query_handlers::{self, ClockView};
use courtbook_clock::domain::commands::{self, ClockTypeRef};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateClockRequest {
    /// The clock name.
    #[serde(default)]
    pub name: String,
    /// Starting position.
    #[serde(default)]
    pub current: i32,
    /// Upper bound.
    #[serde(alias = "max")]
    pub maximum: i32,
    /// Catalog name or inline type description.
    #[serde(rename = "type")]
    pub clock_type: Option<ClockTypeRef>,
    /// Explicit enabled flag.
    pub enabled: Option<bool>,
}

/// Request body for PUT /{id}.
#[derive(Debug, Deserialize)]
pub struct ReviseClockRequest {
    /// New name.
    pub name: Option<String>,
    /// New position.
    pub current: Option<i32>,
    /// New upper bound.
    #[serde(alias = "max")]
    pub maximum: Option<i32>,
    /// New type.
    #[serde(rename = "type")]
    pub clock_type: Option<ClockTypeRef>,
}

/// Request body for POST /{id}/advance.
#[derive(Debug, Deserialize)]
pub struct AdvanceClockRequest {
    /// Signed number of segments to move.
    pub amount: i32,
}

/// Request body for POST /{id}/enabled.
#[derive(Debug, Deserialize)]
pub struct SetEnabledRequest {
    /// The new flag.
    pub enabled: bool,
}

/// POST /
#[instrument(skip(state, request), fields(name = %request.name))]
async fn create_clock(
    State(state): State<AppState>,
    Json(request): Json<CreateClockRequest>,
) -> Result<(StatusCode, Json<ClockView>), ApiError> {
    let command = commands::CreateClock {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        current: request.current,
        maximum: request.maximum,
        clock_type: request.clock_type,
        enabled: request.enabled,
    };

    info!(correlation_id = %command.correlation_id, "handling create_clock command");

    let created =
        command_handlers::handle_create_clock(&command, &state.catalog, &*state.clocks).await?;
    let (clock_id, clock) = created.into_parts();

    Ok((
        StatusCode::CREATED,
        Json(ClockView::new(clock_id, clock.snapshot())),
    ))
}

/// GET /
async fn list_clocks(State(state): State<AppState>) -> Result<Json<Vec<ClockView>>, ApiError> {
    let views = query_handlers::list_clocks(&*state.clocks).await?;
    Ok(Json(views))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_clock(
    State(state): State<AppState>,
    Path(clock_id): Path<Uuid>,
) -> Result<Json<ClockView>, ApiError> {
    let view = query_handlers::get_clock_by_id(clock_id, &*state.clocks).await?;
    Ok(Json(view))
}

/// PUT /{id}
#[instrument(skip(state, request))]
async fn revise_clock(
    State(state): State<AppState>,
    Path(clock_id): Path<Uuid>,
    Json(request): Json<ReviseClockRequest>,
) -> Result<Json<ClockView>, ApiError> {
    let command = commands::ReviseClock {
        correlation_id: Uuid::new_v4(),
        clock_id,
        name: request.name,
        current: request.current,
        maximum: request.maximum,
        clock_type: request.clock_type,
    };

    info!(correlation_id = %command.correlation_id, "handling revise_clock command");

    let clock =
        command_handlers::handle_revise_clock(&command, &state.catalog, &*state.clocks).await?;
    Ok(Json(ClockView::new(clock_id, clock.snapshot())))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_clock(
    State(state): State<AppState>,
    Path(clock_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteClock {
        correlation_id: Uuid::new_v4(),
        clock_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_clock command");

    let removed = command_handlers::handle_delete_clock(&command, &*state.clocks).await?;
    Ok(if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_MODIFIED
    })
}

/// POST /{id}/advance
#[instrument(skip(state, request), fields(amount = request.amount))]
async fn advance_clock(
    State(state): State<AppState>,
    Path(clock_id): Path<Uuid>,
    Json(request): Json<AdvanceClockRequest>,
) -> Result<Json<AdvanceOutcome>, ApiError> {
    let command = commands::AdvanceClock {
        correlation_id: Uuid::new_v4(),
        clock_id,
        amount: request.amount,
    };

    info!(correlation_id = %command.correlation_id, "handling advance_clock command");

    let outcome = command_handlers::handle_advance_clock(&command, &*state.clocks).await?;
    Ok(Json(outcome))
}

/// POST /{id}/enabled
#[instrument(skip(state, request), fields(enabled = request.enabled))]
async fn set_clock_enabled(
    State(state): State<AppState>,
    Path(clock_id): Path<Uuid>,
    Json(request): Json<SetEnabledRequest>,
) -> Result<Json<ClockView>, ApiError> {
    let command = commands::SetClockEnabled {
        correlation_id: Uuid::new_v4(),
        clock_id,
        enabled: request.enabled,
    };

    info!(correlation_id = %command.correlation_id, "handling set_clock_enabled command");

    let clock = command_handlers::handle_set_clock_enabled(&command, &*state.clocks).await?;
    Ok(Json(ClockView::new(clock_id, clock.snapshot())))
}

/// Returns the router for the clock context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_clock).get(list_clocks))
        .route(
            "/{id}",
            get(get_clock).put(revise_clock).delete(delete_clock),
        )
        .route("/{id}/advance", post(advance_clock))
        .route("/{id}/enabled", post(set_clock_enabled))
}
