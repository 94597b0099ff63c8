//! Great houses of the court.

use serde::{Deserialize, Serialize};

use super::abilities::SpecialAbilityContainer;
use super::features::{CoterieUpgrade, CoterieUpgradeSource, SpecialAbility, SpecialFeature, XpTrigger};

/// A domain of influence a house is strong in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Secrets and spies.
    Intelligence,
    /// The arcane.
    Magic,
    /// Coin.
    Wealth,
    /// Roads, ships and carriages.
    Transport,
    /// Soldiers.
    Force,
    /// Goods and provisions.
    Supply,
}

/// The kind of healer a house keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealerType {
    /// Heals magical harm.
    Grace,
    /// Heals physical harm.
    Physician,
}

impl HealerType {
    /// The harm type this healer specialises in.
    #[must_use]
    pub fn specialized_harm_type(self) -> &'static str {
        match self {
            Self::Grace => "Magical",
            Self::Physician => "Physical",
        }
    }
}

/// A great house.
///
/// Read-only through [`SpecialAbilityContainer`]: its abilities are part of
/// the house description, not something play changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseModel {
    name: String,
    strengths: Vec<Resource>,
    healer: HealerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unique_xp_trigger: Option<XpTrigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    special_feature: Option<SpecialFeature>,
    #[serde(default)]
    special_abilities: Vec<SpecialAbility>,
    #[serde(default)]
    coterie_upgrades: Vec<CoterieUpgrade>,
}

impl HouseModel {
    /// A house with one strength, its primary domain.
    #[must_use]
    pub fn new(name: impl Into<String>, primary_domain: Resource, healer: HealerType) -> Self {
        Self {
            name: name.into(),
            strengths: vec![primary_domain],
            healer,
            unique_xp_trigger: None,
            special_feature: None,
            special_abilities: Vec::new(),
            coterie_upgrades: Vec::new(),
        }
    }

    /// Adds a further strength.
    #[must_use]
    pub fn with_strength(mut self, strength: Resource) -> Self {
        if !self.strengths.contains(&strength) {
            self.strengths.push(strength);
        }
        self
    }

    /// Sets the unique XP trigger.
    #[must_use]
    pub fn with_xp_trigger(mut self, trigger: XpTrigger) -> Self {
        self.unique_xp_trigger = Some(trigger);
        self
    }

    /// Sets the special feature.
    #[must_use]
    pub fn with_special_feature(mut self, feature: SpecialFeature) -> Self {
        self.special_feature = Some(feature);
        self
    }

    /// Sets the special abilities.
    #[must_use]
    pub fn with_special_abilities(mut self, abilities: Vec<SpecialAbility>) -> Self {
        self.special_abilities = abilities;
        self
    }

    /// Sets the coterie upgrades on offer.
    #[must_use]
    pub fn with_coterie_upgrades(mut self, upgrades: Vec<CoterieUpgrade>) -> Self {
        self.coterie_upgrades = upgrades;
        self
    }

    /// The house name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All strengths, primary domain first.
    #[must_use]
    pub fn strengths(&self) -> &[Resource] {
        &self.strengths
    }

    /// The primary domain.
    #[must_use]
    pub fn primary_domain(&self) -> Option<Resource> {
        self.strengths.first().copied()
    }

    /// The house healer.
    #[must_use]
    pub fn healer(&self) -> HealerType {
        self.healer
    }

    /// The unique XP trigger, if any.
    #[must_use]
    pub fn unique_xp_trigger(&self) -> Option<&XpTrigger> {
        self.unique_xp_trigger.as_ref()
    }

    /// The special feature, if any.
    #[must_use]
    pub fn special_feature(&self) -> Option<&SpecialFeature> {
        self.special_feature.as_ref()
    }
}

impl SpecialAbilityContainer for HouseModel {
    fn special_abilities(&self) -> &[SpecialAbility] {
        &self.special_abilities
    }
}

impl CoterieUpgradeSource for HouseModel {
    fn coterie_upgrades(&self) -> &[CoterieUpgrade] {
        &self.coterie_upgrades
    }
}
