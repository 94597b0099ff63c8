//! Command handlers for the Coterie context.

use std::sync::Mutex;

use courtbook_clock::domain::events::{ClockEvent, ClockEventKind};
use courtbook_core::error::DomainError;
use courtbook_core::identified::IdentifiedEntity;
use courtbook_core::rng::DeterministicRng;
use courtbook_core::service::{Service, fetch_required, modify_required};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::abilities::SpecialAbilityContainer;
use crate::domain::commands::{
    AddCoterieAbility, AdvanceCoterieTrack, CreateCoterie, DeleteCoterie, SetupEsultare,
};
use crate::domain::coterie::{Coterie, TrackName};
use crate::domain::esultare::Esultare;
use crate::domain::house::HouseModel;

/// Storage collaborator for coteries.
pub type CoterieService = dyn Service<Uuid, Coterie>;

/// Storage collaborator for houses.
pub type HouseService = dyn Service<Uuid, HouseModel>;

/// Result of moving a coterie track.
#[derive(Debug, Serialize)]
pub struct TrackAdvanceOutcome {
    /// The coterie identifier.
    pub coterie_id: Uuid,
    /// The track that moved.
    pub track: TrackName,
    /// The part of the amount that could not be applied.
    pub unused: i32,
    /// Movement and boundary events, in that order.
    pub events: Vec<ClockEvent>,
}

/// Handles the `CreateCoterie` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidArgument` if the name is blank,
/// `DomainError::NotFound` if the patron house does not exist, or the
/// service's error if storing fails.
pub async fn handle_create_coterie(
    command: &CreateCoterie,
    houses: &HouseService,
    coteries: &CoterieService,
) -> Result<IdentifiedEntity<Uuid, Coterie>, DomainError> {
    if command.name.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "coterie name must not be empty",
        ));
    }

    let mut coterie = Coterie::new(command.name.clone());
    if let Some(house_id) = command.house_id {
        coterie = coterie.with_house(fetch_required(houses, house_id).await?);
    }
    if let Some(coterie_type) = &command.coterie_type {
        coterie = coterie.with_type(coterie_type.clone());
    }

    let coterie_id = coteries.create(coterie.clone()).await?;
    debug!(%coterie_id, "coterie stored");
    Ok(IdentifiedEntity::new(coterie_id, coterie))
}

/// Handles the `AdvanceCoterieTrack` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the coterie does not exist, or the
/// service's error if loading or storing fails.
pub async fn handle_advance_coterie_track(
    command: &AdvanceCoterieTrack,
    coteries: &CoterieService,
) -> Result<TrackAdvanceOutcome, DomainError> {
    let (_, (unused, events)) =
        modify_required(coteries, command.coterie_id, |coterie: &mut Coterie| {
            Ok(coterie.advance_track(command.track, command.amount))
        })
        .await?;
    for event in events.iter().filter(|e| {
        matches!(e.kind(), ClockEventKind::Completed | ClockEventKind::Depleted)
    }) {
        info!(
            correlation_id = %command.correlation_id,
            coterie_id = %command.coterie_id,
            track = %command.track,
            "{}",
            event.event_name()
        );
    }

    Ok(TrackAdvanceOutcome {
        coterie_id: command.coterie_id,
        track: command.track,
        unused,
        events,
    })
}

/// Handles the `AddCoterieAbility` command. Returns whether the ability was
/// new to the coterie.
///
/// # Errors
///
/// Returns `DomainError::InvalidArgument` for an ability with a blank name,
/// `DomainError::NotFound` if the coterie does not exist, or the service's
/// error if loading or storing fails.
pub async fn handle_add_coterie_ability(
    command: &AddCoterieAbility,
    coteries: &CoterieService,
) -> Result<bool, DomainError> {
    let (_, added) = modify_required(coteries, command.coterie_id, |coterie: &mut Coterie| {
        coterie.add_special_ability(command.ability.clone())
    })
    .await?;
    Ok(added)
}

/// Handles the `DeleteCoterie` command. Returns whether a coterie was
/// removed.
///
/// # Errors
///
/// Returns the service's error if deleting fails.
pub async fn handle_delete_coterie(
    command: &DeleteCoterie,
    coteries: &CoterieService,
) -> Result<bool, DomainError> {
    coteries.delete(command.coterie_id).await
}

/// Handles the `SetupEsultare` command over every stored house.
///
/// Houses are put in name order before shuffling so the outcome depends on
/// `rng` alone. The `Mutex` is locked only around the seating itself, after
/// every await.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the player's house does not exist,
/// `DomainError::Infrastructure` if the RNG lock is poisoned, or the
/// service's error if loading fails.
pub async fn handle_setup_esultare(
    command: &SetupEsultare,
    houses: &HouseService,
    rng: &Mutex<dyn DeterministicRng>,
) -> Result<Esultare, DomainError> {
    let player_house = match command.player_house_id {
        Some(house_id) => Some(fetch_required(houses, house_id).await?),
        None => None,
    };
    let mut court: Vec<HouseModel> = houses
        .fetch_all()
        .await?
        .into_iter()
        .map(|entity| entity.into_parts().1)
        .collect();
    court.sort_by(|a, b| a.name().cmp(b.name()));

    let esultare = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        Esultare::setup(&court, player_house.as_ref(), &mut *rng_guard)
    };
    debug!(seats = esultare.positions().len(), "esultare seated");
    Ok(esultare)
}
