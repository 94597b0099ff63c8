//! Routes for browsing the clock-type catalog.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use courtbook_clock::application::query_handlers;
use courtbook_clock::domain::clock_type::ClockType;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
async fn list_clock_types(State(state): State<AppState>) -> Json<Vec<Arc<ClockType>>> {
    Json(query_handlers::list_clock_types(&state.catalog))
}

/// GET /{name}
#[instrument(skip(state))]
async fn get_clock_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Arc<ClockType>>, ApiError> {
    let clock_type = query_handlers::get_clock_type(&state.catalog, &name)?;
    Ok(Json(clock_type))
}

/// Returns the router for the clock-type catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clock_types))
        .route("/{name}", get(get_clock_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use courtbook_clock::domain::catalog::ClockTypeCatalog;
    use courtbook_test_support::MockRng;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app_state() -> AppState {
        AppState::in_memory(
            ClockTypeCatalog::built_in().clone(),
            Arc::new(Mutex::new(MockRng)),
        )
    }

    #[tokio::test]
    async fn test_get_clock_type_returns_traits_by_name() {
        // Arrange
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .uri("/Long%20Term%20Project")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["name"], "Long Term Project");
        assert_eq!(
            json["traits"],
            serde_json::json!(["progress", "completes-full"])
        );
    }

    #[tokio::test]
    async fn test_get_unknown_clock_type_returns_404() {
        // Arrange
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .uri("/Nope")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["error"], "not_found");
    }
}
