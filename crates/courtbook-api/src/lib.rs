//! Courtbook API: the axum HTTP boundary of the campaign bookkeeper.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router over `state`.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/clock-types", routes::clock_types::router())
        .nest("/api/v1/clocks", routes::clocks::router())
        .nest("/api/v1/coteries", routes::coteries::router())
        .nest("/api/v1/houses", routes::houses::router())
        .nest("/api/v1/esultare", routes::esultare::router())
        .with_state(state)
}
