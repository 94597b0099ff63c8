//! Query handlers for the Coterie context.

use courtbook_core::error::DomainError;
use courtbook_core::service::fetch_required;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::{CoterieService, HouseService};
use crate::domain::coterie::Coterie;
use crate::domain::features::CoterieUpgrade;
use crate::domain::house::HouseModel;

/// Read-only view of a stored coterie.
#[derive(Debug, Serialize)]
pub struct CoterieView {
    /// The coterie identifier.
    pub coterie_id: Uuid,
    /// The coterie itself.
    pub coterie: Coterie,
    /// Upgrades offered by the patron house and the coterie type.
    pub available_upgrades: Vec<CoterieUpgrade>,
}

impl CoterieView {
    /// Builds the view from a stored coterie.
    #[must_use]
    pub fn new(coterie_id: Uuid, coterie: Coterie) -> Self {
        let available_upgrades = coterie.available_upgrades().into_iter().cloned().collect();
        Self {
            coterie_id,
            coterie,
            available_upgrades,
        }
    }
}

/// Read-only view of a stored house.
#[derive(Debug, Serialize)]
pub struct HouseView {
    /// The house identifier.
    pub house_id: Uuid,
    /// The house itself.
    pub house: HouseModel,
}

/// Retrieves a coterie by its identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no coterie is stored under `coterie_id`.
pub async fn get_coterie_by_id(
    coterie_id: Uuid,
    coteries: &CoterieService,
) -> Result<CoterieView, DomainError> {
    let coterie = fetch_required(coteries, coterie_id).await?;
    Ok(CoterieView::new(coterie_id, coterie))
}

/// Lists every stored coterie, ordered by name.
///
/// # Errors
///
/// Returns the service's error if listing fails.
pub async fn list_coteries(coteries: &CoterieService) -> Result<Vec<CoterieView>, DomainError> {
    let mut views: Vec<CoterieView> = coteries
        .fetch_all()
        .await?
        .into_iter()
        .map(|entity| {
            let (coterie_id, coterie) = entity.into_parts();
            CoterieView::new(coterie_id, coterie)
        })
        .collect();
    views.sort_by(|a, b| {
        a.coterie
            .name()
            .cmp(b.coterie.name())
            .then(a.coterie_id.cmp(&b.coterie_id))
    });
    Ok(views)
}

/// Retrieves a house by its identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no house is stored under `house_id`.
pub async fn get_house_by_id(
    house_id: Uuid,
    houses: &HouseService,
) -> Result<HouseView, DomainError> {
    let house = fetch_required(houses, house_id).await?;
    Ok(HouseView { house_id, house })
}

/// Lists every stored house, ordered by name.
///
/// # Errors
///
/// Returns the service's error if listing fails.
pub async fn list_houses(houses: &HouseService) -> Result<Vec<HouseView>, DomainError> {
    let mut views: Vec<HouseView> = houses
        .fetch_all()
        .await?
        .into_iter()
        .map(|entity| {
            let (house_id, house) = entity.into_parts();
            HouseView { house_id, house }
        })
        .collect();
    views.sort_by(|a, b| a.house.name().cmp(b.house.name()));
    Ok(views)
}
