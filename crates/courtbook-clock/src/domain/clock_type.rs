//! Clock types: named, described sets of behavioural traits.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::clock_trait::ClockTrait;

/// An immutable tag describing how a clock behaves at its boundaries.
///
/// A clock type holds no counter state; many clocks share one type through
/// an `Arc`. Two types are equal when their names and trait sets are equal;
/// the description is commentary only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockType {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    traits: BTreeSet<ClockTrait>,
}

impl ClockType {
    /// Creates a clock type with the given traits. Duplicates collapse.
    #[must_use]
    pub fn new<T>(
        name: impl Into<String>,
        description: impl Into<String>,
        traits: impl IntoIterator<Item = T>,
    ) -> Self
    where
        T: Into<ClockTrait>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            traits: traits.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a plain progress clock type that completes when full.
    #[must_use]
    pub fn progressive(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            [ClockTrait::Progress, ClockTrait::CompletesFull],
        )
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The trait set, in canonical order.
    #[must_use]
    pub fn traits(&self) -> &BTreeSet<ClockTrait> {
        &self.traits
    }

    /// Does the type carry `clock_trait`.
    #[must_use]
    pub fn has_trait(&self, clock_trait: &ClockTrait) -> bool {
        self.traits.contains(clock_trait)
    }

    /// Does the type carry the trait spelled `tag`.
    #[must_use]
    pub fn has_trait_named(&self, tag: &str) -> bool {
        self.has_trait(&ClockTrait::from(tag))
    }

    /// Does the type carry every one of `traits`. True for an empty list.
    #[must_use]
    pub fn has_traits(&self, traits: &[ClockTrait]) -> bool {
        traits.iter().all(|t| self.has_trait(t))
    }

    /// Does the type carry at least one of `traits`. False for an empty list.
    #[must_use]
    pub fn has_any_trait(&self, traits: &[ClockTrait]) -> bool {
        traits.iter().any(|t| self.has_trait(t))
    }

    /// Is reaching the maximum a meaningful endpoint for this type.
    #[must_use]
    pub fn completes_at_maximum(&self) -> bool {
        self.has_any_trait(&[ClockTrait::TugOfWar, ClockTrait::CompletesFull])
    }

    /// Is reaching zero a meaningful endpoint for this type.
    #[must_use]
    pub fn depletes_at_minimum(&self) -> bool {
        self.has_any_trait(&[ClockTrait::TugOfWar, ClockTrait::DepletesEmpty])
    }
}

impl PartialEq for ClockType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.traits == other.traits
    }
}

impl Eq for ClockType {}

impl Hash for ClockType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.traits.hash(state);
    }
}
