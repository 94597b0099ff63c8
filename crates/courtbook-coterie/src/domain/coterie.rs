//! Coteries: the player group, its standing and its tracks.

use std::fmt;
use std::str::FromStr;

use courtbook_clock::domain::catalog;
use courtbook_clock::domain::events::ClockEvent;
use courtbook_clock::domain::track::Track;
use courtbook_core::error::DomainError;
use serde::{Deserialize, Serialize};

use super::abilities::SpecialAbilityContainer;
use super::features::{CoterieUpgrade, CoterieUpgradeSource, SpecialAbility};
use super::house::HouseModel;

/// A kind of coterie, offering its own upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoterieType {
    /// Type name.
    pub name: String,
    /// Upgrades this type offers.
    #[serde(default)]
    pub coterie_upgrades: Vec<CoterieUpgrade>,
}

impl CoterieType {
    /// Creates a coterie type with the given upgrades.
    #[must_use]
    pub fn new(name: impl Into<String>, coterie_upgrades: Vec<CoterieUpgrade>) -> Self {
        Self {
            name: name.into(),
            coterie_upgrades,
        }
    }
}

impl CoterieUpgradeSource for CoterieType {
    fn coterie_upgrades(&self) -> &[CoterieUpgrade] {
        &self.coterie_upgrades
    }
}

/// The four tracks of a coterie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackName {
    /// Standing at court; can be won or lost.
    Influence,
    /// How much attention the coterie draws.
    Exposure,
    /// Disgrace.
    Shame,
    /// Coterie experience.
    Experience,
}

impl TrackName {
    /// Every track, in display order.
    pub const ALL: [Self; 4] = [Self::Influence, Self::Exposure, Self::Shame, Self::Experience];

    /// Lowercase tag used in paths and JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Influence => "influence",
            Self::Exposure => "exposure",
            Self::Shame => "shame",
            Self::Experience => "experience",
        }
    }

    fn fresh_track(self) -> Track {
        match self {
            Self::Influence => Track::with_type("Influence", 3, 6, catalog::warring()),
            Self::Exposure => Track::empty("Exposure", 6),
            Self::Shame => Track::empty("Shame", 4),
            Self::Experience => Track::empty("Experience", 8),
        }
    }
}

impl FromStr for TrackName {
    type Err = DomainError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == tag)
            .ok_or_else(|| DomainError::invalid_argument(format!("unknown track: {tag}")))
    }
}

impl fmt::Display for TrackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tracks a coterie carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoterieTracks {
    influence: Track,
    exposure: Track,
    shame: Track,
    experience: Track,
}

impl Default for CoterieTracks {
    fn default() -> Self {
        Self {
            influence: TrackName::Influence.fresh_track(),
            exposure: TrackName::Exposure.fresh_track(),
            shame: TrackName::Shame.fresh_track(),
            experience: TrackName::Experience.fresh_track(),
        }
    }
}

impl CoterieTracks {
    /// The track called `name`.
    #[must_use]
    pub fn get(&self, name: TrackName) -> &Track {
        match name {
            TrackName::Influence => &self.influence,
            TrackName::Exposure => &self.exposure,
            TrackName::Shame => &self.shame,
            TrackName::Experience => &self.experience,
        }
    }
}

/// A coterie of player characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coterie {
    name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    coterie_type: Option<CoterieType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    house: Option<HouseModel>,
    #[serde(default)]
    upgrades: Vec<CoterieUpgrade>,
    #[serde(default, rename = "abilities")]
    special_abilities: Vec<SpecialAbility>,
    #[serde(default)]
    tracks: CoterieTracks,
}

impl Coterie {
    /// A new coterie with fresh tracks and nothing else.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coterie_type: None,
            house: None,
            upgrades: Vec::new(),
            special_abilities: Vec::new(),
            tracks: CoterieTracks::default(),
        }
    }

    /// Sets the patron house.
    #[must_use]
    pub fn with_house(mut self, house: HouseModel) -> Self {
        self.house = Some(house);
        self
    }

    /// Sets the coterie type.
    #[must_use]
    pub fn with_type(mut self, coterie_type: CoterieType) -> Self {
        self.coterie_type = Some(coterie_type);
        self
    }

    /// The coterie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the coterie.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The coterie type, if chosen.
    #[must_use]
    pub fn coterie_type(&self) -> Option<&CoterieType> {
        self.coterie_type.as_ref()
    }

    /// Changes the coterie type.
    pub fn set_coterie_type(&mut self, coterie_type: Option<CoterieType>) {
        self.coterie_type = coterie_type;
    }

    /// The patron house, if any.
    #[must_use]
    pub fn house(&self) -> Option<&HouseModel> {
        self.house.as_ref()
    }

    /// Changes the patron house.
    pub fn set_house(&mut self, house: Option<HouseModel>) {
        self.house = house;
    }

    /// Upgrades the coterie owns.
    #[must_use]
    pub fn upgrades(&self) -> &[CoterieUpgrade] {
        &self.upgrades
    }

    /// Replaces the owned upgrades.
    pub fn set_upgrades(&mut self, upgrades: Vec<CoterieUpgrade>) {
        self.upgrades = upgrades;
    }

    /// Upgrades on offer from the house and the type, without duplicates.
    #[must_use]
    pub fn available_upgrades(&self) -> Vec<&CoterieUpgrade> {
        let house = self.house.iter().flat_map(|h| h.coterie_upgrades());
        let kind = self.coterie_type.iter().flat_map(|t| t.coterie_upgrades());
        let mut available: Vec<&CoterieUpgrade> = Vec::new();
        for upgrade in house.chain(kind) {
            if !available.contains(&upgrade) {
                available.push(upgrade);
            }
        }
        available
    }

    /// All tracks.
    #[must_use]
    pub fn tracks(&self) -> &CoterieTracks {
        &self.tracks
    }

    /// The track called `name`.
    #[must_use]
    pub fn track(&self, name: TrackName) -> &Track {
        self.tracks.get(name)
    }

    /// Advances the track called `name`; returns the unused amount and the
    /// events, as [`Clock::advance_with_events`] does.
    ///
    /// [`Clock::advance_with_events`]: courtbook_clock::domain::clock::Clock::advance_with_events
    pub fn advance_track(&self, name: TrackName, amount: i32) -> (i32, Vec<ClockEvent>) {
        self.track(name).advance_with_events(amount)
    }
}

impl SpecialAbilityContainer for Coterie {
    fn special_abilities(&self) -> &[SpecialAbility] {
        &self.special_abilities
    }

    fn special_abilities_mut(&mut self) -> Result<&mut Vec<SpecialAbility>, DomainError> {
        Ok(&mut self.special_abilities)
    }
}
