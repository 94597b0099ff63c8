//! Named, described game records: abilities, features, XP triggers and
//! coterie upgrades.

use courtbook_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A special ability of a coterie or a house.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialAbility {
    /// Ability name; lookups match it exactly.
    pub name: String,
    /// Rules text.
    #[serde(default)]
    pub description: String,
}

impl SpecialAbility {
    /// Creates an ability.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A house's special feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialFeature {
    /// Feature name.
    pub name: String,
    /// Rules text.
    #[serde(default)]
    pub description: String,
}

impl SpecialFeature {
    /// Creates a feature.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A condition that earns experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpTrigger {
    /// Trigger name.
    pub name: String,
    /// When it fires.
    #[serde(default)]
    pub description: String,
}

impl XpTrigger {
    /// Creates a trigger.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

fn default_cost() -> i32 {
    1
}

/// An upgrade a coterie can buy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UpgradeRecord")]
pub struct CoterieUpgrade {
    name: String,
    description: String,
    cost: i32,
}

#[derive(Deserialize)]
struct UpgradeRecord {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_cost")]
    cost: i32,
}

impl TryFrom<UpgradeRecord> for CoterieUpgrade {
    type Error = DomainError;

    fn try_from(record: UpgradeRecord) -> Result<Self, Self::Error> {
        Self::new(record.name, record.description).with_cost(record.cost)
    }
}

impl CoterieUpgrade {
    /// Creates an upgrade costing one.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cost: default_cost(),
        }
    }

    /// Sets the cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `cost` is negative.
    pub fn with_cost(mut self, cost: i32) -> Result<Self, DomainError> {
        self.set_cost(cost)?;
        Ok(self)
    }

    /// The upgrade name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The cost in upgrade points.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Changes the cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `cost` is negative; the cost
    /// is left unchanged.
    pub fn set_cost(&mut self, cost: i32) -> Result<(), DomainError> {
        if cost < 0 {
            return Err(DomainError::invalid_argument(
                "negative cost is not allowed",
            ));
        }
        self.cost = cost;
        Ok(())
    }
}

/// Something that offers coterie upgrades.
pub trait CoterieUpgradeSource {
    /// The upgrades on offer.
    fn coterie_upgrades(&self) -> &[CoterieUpgrade];
}
