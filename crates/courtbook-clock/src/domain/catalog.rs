//! The catalog of well-known clock types.
//!
//! The built-in types are created once, on first use, and handed out as
//! shared `Arc`s. Deployments can merge extra types from a YAML table over
//! the built-ins.

use std::sync::{Arc, LazyLock};

use courtbook_core::error::DomainError;

use super::clock_trait::ClockTrait;
use super::clock_type::ClockType;

/// Name of the standard progress clock type.
pub const PROGRESS: &str = "Progress";
/// Name of the tug-of-war clock type.
pub const WARRING: &str = "Warring";
/// Name of the linked clock type.
pub const LINKED: &str = "Linked";
/// Name of the danger clock type.
pub const DANGER: &str = "Danger";
/// Name of the racing clock type.
pub const RACING: &str = "Racing";
/// Name of the romance clock type.
pub const ROMANCE: &str = "Romance";
/// Name of the long-term project clock type.
pub const LONG_TERM: &str = "Long Term Project";
/// Name of the regress clock type.
pub const REGRESS: &str = "Regress";

static BUILT_IN: LazyLock<ClockTypeCatalog> = LazyLock::new(|| {
    use ClockTrait::{Chained, CompletesFull, DepletesEmpty, Linked, Regress, TugOfWar};

    ClockTypeCatalog::from_types([
        ClockType::progressive(
            PROGRESS,
            "A standard progress clock with something happening at the end.",
        ),
        ClockType::new(
            WARRING,
            "A clock which may progress or regress with a condition on both ends.",
            [TugOfWar],
        ),
        ClockType::new(
            LINKED,
            "A clock unlocking another clock on completion.",
            [Linked, Chained, CompletesFull],
        ),
        ClockType::progressive(DANGER, "A clock triggering something dangerous on completion."),
        ClockType::new(
            RACING,
            "One of a group of clocks representing a race only one clock may win.",
            [Linked, Chained, CompletesFull],
        ),
        ClockType::new(
            ROMANCE,
            "A warring clock indicating progress to win a paramour.",
            [TugOfWar],
        ),
        ClockType::progressive(
            LONG_TERM,
            "A progress clock representing a long term project usually advanced with downtime activities.",
        ),
        ClockType::new(
            REGRESS,
            "A regress clock starts at some tick amount, and ends when empty.",
            [Regress, DepletesEmpty],
        ),
    ])
});

/// An ordered, name-addressed table of clock types.
#[derive(Debug, Clone, Default)]
pub struct ClockTypeCatalog {
    types: Vec<Arc<ClockType>>,
}

impl ClockTypeCatalog {
    /// The process-wide built-in catalog.
    #[must_use]
    pub fn built_in() -> &'static Self {
        &BUILT_IN
    }

    /// Builds a catalog from `types`; a later type replaces an earlier one of
    /// the same name.
    #[must_use]
    pub fn from_types(types: impl IntoIterator<Item = ClockType>) -> Self {
        let mut catalog = Self::default();
        catalog.merge(types);
        catalog
    }

    /// Parses a YAML list of clock types.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the YAML is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DomainError> {
        let types: Vec<ClockType> = serde_yaml::from_str(yaml).map_err(|e| {
            DomainError::invalid_argument(format!("invalid clock type catalog: {e}"))
        })?;
        Ok(Self::from_types(types))
    }

    /// Adds `types`, replacing same-named entries in place and appending new
    /// ones in order.
    pub fn merge(&mut self, types: impl IntoIterator<Item = ClockType>) {
        for clock_type in types {
            let clock_type = Arc::new(clock_type);
            match self
                .types
                .iter_mut()
                .find(|existing| existing.name() == clock_type.name())
            {
                Some(slot) => *slot = clock_type,
                None => self.types.push(clock_type),
            }
        }
    }

    /// Looks up a type by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ClockType>> {
        self.types.iter().find(|t| t.name() == name).cloned()
    }

    /// Looks up a type by name, failing with `InvalidArgument` when absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if no type has that name.
    pub fn require(&self, name: &str) -> Result<Arc<ClockType>, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::invalid_argument(format!("unknown clock type: {name}")))
    }

    /// Iterates the types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClockType>> {
        self.types.iter()
    }

    /// Number of types in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Is the catalog empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Looks up a built-in type. Built-in names always resolve.
fn built_in(name: &str) -> Arc<ClockType> {
    ClockTypeCatalog::built_in()
        .get(name)
        .unwrap_or_else(|| Arc::new(ClockType::progressive(name, "")))
}

/// The standard progress clock type.
#[must_use]
pub fn progress() -> Arc<ClockType> {
    built_in(PROGRESS)
}

/// The tug-of-war clock type.
#[must_use]
pub fn warring() -> Arc<ClockType> {
    built_in(WARRING)
}

/// The linked clock type.
#[must_use]
pub fn linked() -> Arc<ClockType> {
    built_in(LINKED)
}

/// The danger clock type.
#[must_use]
pub fn danger() -> Arc<ClockType> {
    built_in(DANGER)
}

/// The racing clock type.
#[must_use]
pub fn racing() -> Arc<ClockType> {
    built_in(RACING)
}

/// The romance clock type.
#[must_use]
pub fn romance() -> Arc<ClockType> {
    built_in(ROMANCE)
}

/// The long-term project clock type.
#[must_use]
pub fn long_term() -> Arc<ClockType> {
    built_in(LONG_TERM)
}

/// The regress clock type.
#[must_use]
pub fn regress() -> Arc<ClockType> {
    built_in(REGRESS)
}
