//! Query handlers for the Clock context.
//!
//! These return read-only views; nothing here writes to storage.

use std::sync::Arc;

use courtbook_core::error::DomainError;
use courtbook_core::service::fetch_required;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::ClockService;
use crate::domain::catalog::ClockTypeCatalog;
use crate::domain::clock::ClockData;
use crate::domain::clock_type::ClockType;

/// Read-only view of a stored clock.
#[derive(Debug, Serialize)]
pub struct ClockView {
    /// The clock identifier.
    pub clock_id: Uuid,
    /// The serialized clock.
    pub clock: ClockData,
    /// Whether the clock sits on a meaningful maximum.
    pub completed: bool,
    /// Whether the clock sits on a meaningful zero.
    pub depleted: bool,
}

impl ClockView {
    /// Builds the view from a clock's state.
    #[must_use]
    pub fn new(clock_id: Uuid, clock: ClockData) -> Self {
        Self {
            clock_id,
            completed: clock.is_completed(),
            depleted: clock.is_depleted(),
            clock,
        }
    }
}

/// Retrieves a clock by its identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no clock is stored under `clock_id`.
pub async fn get_clock_by_id(
    clock_id: Uuid,
    service: &ClockService,
) -> Result<ClockView, DomainError> {
    let clock = fetch_required(service, clock_id).await?;
    Ok(ClockView::new(clock_id, clock.snapshot()))
}

/// Lists every stored clock, ordered by name.
///
/// # Errors
///
/// Returns the service's error if listing fails.
pub async fn list_clocks(service: &ClockService) -> Result<Vec<ClockView>, DomainError> {
    let mut views: Vec<ClockView> = service
        .fetch_all()
        .await?
        .into_iter()
        .map(|entity| {
            let (clock_id, clock) = entity.into_parts();
            ClockView::new(clock_id, clock.snapshot())
        })
        .collect();
    views.sort_by(|a, b| {
        a.clock
            .name()
            .cmp(b.clock.name())
            .then(a.clock_id.cmp(&b.clock_id))
    });
    Ok(views)
}

/// Lists the clock types of `catalog` in declaration order.
#[must_use]
pub fn list_clock_types(catalog: &ClockTypeCatalog) -> Vec<Arc<ClockType>> {
    catalog.iter().cloned().collect()
}

/// Retrieves a clock type by name.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the catalog has no such type.
pub fn get_clock_type(catalog: &ClockTypeCatalog, name: &str) -> Result<Arc<ClockType>, DomainError> {
    catalog
        .get(name)
        .ok_or_else(|| DomainError::NotFound(format!("clock type {name}")))
}
