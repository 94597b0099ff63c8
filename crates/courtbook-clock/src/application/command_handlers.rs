//! Command handlers for the Clock context.
//!
//! Each handler that changes a stored clock applies the domain operation
//! through `Service::modify`, so concurrent commands on one clock never
//! overwrite each other.

use courtbook_core::error::DomainError;
use courtbook_core::identified::IdentifiedEntity;
use courtbook_core::service::{Service, modify_required};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::catalog::ClockTypeCatalog;
use crate::domain::clock::Clock;
use crate::domain::commands::{
    AdvanceClock, CreateClock, DeleteClock, ReviseClock, SetClockEnabled,
};
use crate::domain::events::{ClockEvent, ClockEventKind};

/// Storage collaborator for clocks.
pub type ClockService = dyn Service<Uuid, Clock>;

/// Result of advancing a clock.
#[derive(Debug, Serialize)]
pub struct AdvanceOutcome {
    /// The clock identifier.
    pub clock_id: Uuid,
    /// The part of the amount that could not be applied.
    pub unused: i32,
    /// Movement and boundary events, in that order.
    pub events: Vec<ClockEvent>,
    /// The clock after the advance.
    pub clock: Clock,
}

/// Handles the `CreateClock` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidArgument` if the type is missing or unknown,
/// or the service's error if storing fails.
pub async fn handle_create_clock(
    command: &CreateClock,
    catalog: &ClockTypeCatalog,
    service: &ClockService,
) -> Result<IdentifiedEntity<Uuid, Clock>, DomainError> {
    let clock_type = command
        .clock_type
        .as_ref()
        .map(|type_ref| type_ref.resolve(catalog))
        .transpose()?;
    let clock = Clock::try_new(
        command.name.clone(),
        command.current,
        command.maximum,
        clock_type,
        command.enabled,
    )?;

    let clock_id = service.create(clock.clone()).await?;
    debug!(%clock_id, "clock stored");
    Ok(IdentifiedEntity::new(clock_id, clock))
}

/// Handles the `AdvanceClock` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the clock does not exist, or the
/// service's error if loading or storing fails.
pub async fn handle_advance_clock(
    command: &AdvanceClock,
    service: &ClockService,
) -> Result<AdvanceOutcome, DomainError> {
    let (clock, (unused, events)) =
        modify_required(service, command.clock_id, |clock: &mut Clock| {
            Ok(clock.advance_with_events(command.amount))
        })
        .await?;
    debug!(
        clock_id = %command.clock_id,
        amount = command.amount,
        unused,
        events = events.len(),
        "clock advanced"
    );
    for event in &events {
        if matches!(
            event.kind(),
            ClockEventKind::Completed | ClockEventKind::Depleted
        ) {
            info!(
                correlation_id = %command.correlation_id,
                clock_id = %command.clock_id,
                excess = event.excess(),
                "{}",
                event.event_name()
            );
        }
    }

    Ok(AdvanceOutcome {
        clock_id: command.clock_id,
        unused,
        events,
        clock,
    })
}

/// Handles the `SetClockEnabled` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the clock does not exist, or the
/// service's error if loading or storing fails.
pub async fn handle_set_clock_enabled(
    command: &SetClockEnabled,
    service: &ClockService,
) -> Result<Clock, DomainError> {
    let (clock, ()) = modify_required(service, command.clock_id, |clock: &mut Clock| {
        clock.set_enabled(command.enabled);
        Ok(())
    })
    .await?;
    Ok(clock)
}

/// Handles the `ReviseClock` command. A new type is resolved before any
/// field changes, so a rejected revision leaves the clock untouched.
///
/// # Errors
///
/// Returns `DomainError::InvalidArgument` if a named type is unknown,
/// `DomainError::NotFound` if the clock does not exist, or the service's
/// error if loading or storing fails.
pub async fn handle_revise_clock(
    command: &ReviseClock,
    catalog: &ClockTypeCatalog,
    service: &ClockService,
) -> Result<Clock, DomainError> {
    let clock_type = command
        .clock_type
        .as_ref()
        .map(|type_ref| type_ref.resolve(catalog))
        .transpose()?;
    let (clock, ()) = modify_required(service, command.clock_id, |clock: &mut Clock| {
        if let Some(name) = &command.name {
            clock.set_name(name.clone());
        }
        if let Some(maximum) = command.maximum {
            clock.set_maximum(maximum);
        }
        if let Some(current) = command.current {
            clock.set_current(current);
        }
        if let Some(clock_type) = clock_type {
            clock.set_clock_type(clock_type);
        }
        Ok(())
    })
    .await?;
    Ok(clock)
}

/// Handles the `DeleteClock` command. Returns whether a clock was removed.
///
/// # Errors
///
/// Returns the service's error if deleting fails.
pub async fn handle_delete_clock(
    command: &DeleteClock,
    service: &ClockService,
) -> Result<bool, DomainError> {
    service.delete(command.clock_id).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use courtbook_core::error::DomainError;
    use courtbook_core::identified::Identified;
    use courtbook_core::service::fetch_required;
    use courtbook_store::MemoryService;
    use courtbook_test_support::{EmptyService, FailingService, RecordingService};
    use uuid::Uuid;

    use super::*;
    use crate::domain::catalog::{progress, warring};
    use crate::domain::commands::ClockTypeRef;

    #[tokio::test]
    async fn test_handle_create_clock_stores_clock_of_named_type() {
        // Arrange
        let service: MemoryService<Clock> = MemoryService::new("clock");
        let command = CreateClock {
            correlation_id: Uuid::new_v4(),
            name: "Escape".to_owned(),
            current: 0,
            maximum: 6,
            clock_type: Some(ClockTypeRef::Named("Warring".to_owned())),
            enabled: None,
        };

        // Act
        let created = handle_create_clock(&command, ClockTypeCatalog::built_in(), &service)
            .await
            .unwrap();

        // Assert
        let stored = fetch_required(&service, *created.id().unwrap())
            .await
            .unwrap();
        assert_eq!(stored, *created.content());
        assert_eq!(stored.clock_type().name(), "Warring");
        assert!(stored.is_disabled());
    }

    #[tokio::test]
    async fn test_handle_create_clock_without_type_is_invalid_argument() {
        // Arrange
        let command = CreateClock {
            correlation_id: Uuid::new_v4(),
            name: "Escape".to_owned(),
            current: 0,
            maximum: 6,
            clock_type: None,
            enabled: None,
        };

        // Act
        let result = handle_create_clock(&command, ClockTypeCatalog::built_in(), &EmptyService).await;

        // Assert
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[tokio::test]
    async fn test_handle_advance_clock_persists_clock_and_returns_events() {
        // Arrange
        let clock_id = Uuid::new_v4();
        let service = RecordingService::holding(clock_id, Clock::progress("Escape", 4, 6));
        let command = AdvanceClock {
            correlation_id: Uuid::new_v4(),
            clock_id,
            amount: 3,
        };

        // Act
        let outcome = handle_advance_clock(&command, &service).await.unwrap();

        // Assert
        assert_eq!(outcome.unused, 1);
        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.events[1].kind(), ClockEventKind::Completed);
        let updates = service.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, clock_id);
        assert_eq!(updates[0].1.current(), 6);
    }

    #[tokio::test]
    async fn test_handle_advance_clock_returns_not_found_for_unknown_clock() {
        // Arrange
        let clock_id = Uuid::new_v4();
        let command = AdvanceClock {
            correlation_id: Uuid::new_v4(),
            clock_id,
            amount: 1,
        };

        // Act
        let result = handle_advance_clock(&command, &EmptyService).await;

        // Assert
        match result.unwrap_err() {
            DomainError::NotFound(id) => assert_eq!(id, clock_id.to_string()),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_advance_clock_propagates_infrastructure_error() {
        // Arrange
        let command = AdvanceClock {
            correlation_id: Uuid::new_v4(),
            clock_id: Uuid::new_v4(),
            amount: 1,
        };

        // Act
        let result = handle_advance_clock(&command, &FailingService).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_handle_set_clock_enabled_updates_flag() {
        // Arrange
        let clock_id = Uuid::new_v4();
        let service = RecordingService::holding(clock_id, Clock::progress("Escape", 6, 6));
        let command = SetClockEnabled {
            correlation_id: Uuid::new_v4(),
            clock_id,
            enabled: true,
        };

        // Act
        let clock = handle_set_clock_enabled(&command, &service).await.unwrap();

        // Assert
        assert!(clock.is_enabled());
        assert!(service.updates()[0].1.is_enabled());
    }

    #[tokio::test]
    async fn test_handle_revise_clock_applies_given_fields_only() {
        // Arrange
        let clock_id = Uuid::new_v4();
        let service = RecordingService::holding(clock_id, Clock::progress("Escape", 2, 6));
        let command = ReviseClock {
            correlation_id: Uuid::new_v4(),
            clock_id,
            name: None,
            current: None,
            maximum: Some(8),
            clock_type: Some(ClockTypeRef::Named("Warring".to_owned())),
        };

        // Act
        let clock = handle_revise_clock(&command, ClockTypeCatalog::built_in(), &service)
            .await
            .unwrap();

        // Assert
        assert_eq!(clock.name(), "Escape");
        assert_eq!(clock.current(), 2);
        assert_eq!(clock.maximum(), 8);
        assert_eq!(clock.clock_type(), warring());
    }

    #[tokio::test]
    async fn test_handle_revise_clock_with_unknown_type_changes_nothing() {
        // Arrange
        let clock_id = Uuid::new_v4();
        let service = RecordingService::holding(clock_id, Clock::progress("Escape", 2, 6));
        let command = ReviseClock {
            correlation_id: Uuid::new_v4(),
            clock_id,
            name: Some("Flight".to_owned()),
            current: None,
            maximum: None,
            clock_type: Some(ClockTypeRef::Named("Nope".to_owned())),
        };

        // Act
        let result = handle_revise_clock(&command, ClockTypeCatalog::built_in(), &service).await;

        // Assert
        assert!(result.unwrap_err().is_invalid_argument());
        assert!(service.updates().is_empty());
        let stored = fetch_required(&service, clock_id).await.unwrap();
        assert_eq!(stored.name(), "Escape");
        assert_eq!(stored.clock_type(), progress());
    }

    #[tokio::test]
    async fn test_handle_delete_clock_reports_missing_clock() {
        // Arrange
        let command = DeleteClock {
            correlation_id: Uuid::new_v4(),
            clock_id: Uuid::new_v4(),
        };

        // Act
        let removed = handle_delete_clock(&command, &EmptyService).await.unwrap();

        // Assert
        assert!(!removed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_advances_on_one_clock_are_all_kept() {
        // Arrange
        let service: Arc<MemoryService<Clock>> = Arc::new(MemoryService::new("clock"));
        let clock_id = service
            .create(Clock::progress("Long Night", 0, 1_000))
            .await
            .unwrap();

        // Act
        let handles: Vec<_> = (0..400)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let command = AdvanceClock {
                        correlation_id: Uuid::new_v4(),
                        clock_id,
                        amount: 1,
                    };
                    handle_advance_clock(&command, &*service).await.unwrap()
                })
            })
            .collect();
        for handle in handles {
            let outcome = handle.await.unwrap();
            assert_eq!(outcome.unused, 0);
        }

        // Assert
        let stored = fetch_required(&*service, clock_id).await.unwrap();
        assert_eq!(stored.current(), 400);
    }
}
