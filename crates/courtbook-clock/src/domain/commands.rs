//! Commands for the Clock context.

use std::sync::Arc;

use courtbook_core::command::Command;
use courtbook_core::error::DomainError;
use serde::Deserialize;
use uuid::Uuid;

use super::catalog::ClockTypeCatalog;
use super::clock_type::ClockType;

/// A clock type given either by catalog name or in full.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClockTypeRef {
    /// Name of a catalog entry.
    Named(String),
    /// A complete type description.
    Inline(ClockType),
}

impl ClockTypeRef {
    /// Resolves the reference against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if a named type is not in the
    /// catalog.
    pub fn resolve(&self, catalog: &ClockTypeCatalog) -> Result<Arc<ClockType>, DomainError> {
        match self {
            Self::Named(name) => catalog.require(name),
            Self::Inline(clock_type) => Ok(Arc::new(clock_type.clone())),
        }
    }
}

/// Command to create a new clock.
#[derive(Debug, Clone)]
pub struct CreateClock {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clock name.
    pub name: String,
    /// Starting position.
    pub current: i32,
    /// Upper bound.
    pub maximum: i32,
    /// The clock type. Required.
    pub clock_type: Option<ClockTypeRef>,
    /// Explicit enabled flag; derived from the position when absent.
    pub enabled: Option<bool>,
}

impl Command for CreateClock {
    fn command_type(&self) -> &'static str {
        "clock.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to advance (or, with a negative amount, regress) a clock.
#[derive(Debug, Clone)]
pub struct AdvanceClock {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clock identifier.
    pub clock_id: Uuid,
    /// Signed number of segments to move.
    pub amount: i32,
}

impl Command for AdvanceClock {
    fn command_type(&self) -> &'static str {
        "clock.advance"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.clock_id)
    }
}

/// Command to enable or disable a clock.
#[derive(Debug, Clone)]
pub struct SetClockEnabled {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clock identifier.
    pub clock_id: Uuid,
    /// The new flag.
    pub enabled: bool,
}

impl Command for SetClockEnabled {
    fn command_type(&self) -> &'static str {
        "clock.set_enabled"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.clock_id)
    }
}

/// Command to change any of a clock's settable fields.
#[derive(Debug, Clone)]
pub struct ReviseClock {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clock identifier.
    pub clock_id: Uuid,
    /// New name.
    pub name: Option<String>,
    /// New position, applied without clamping.
    pub current: Option<i32>,
    /// New upper bound.
    pub maximum: Option<i32>,
    /// New type.
    pub clock_type: Option<ClockTypeRef>,
}

impl Command for ReviseClock {
    fn command_type(&self) -> &'static str {
        "clock.revise"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.clock_id)
    }
}

/// Command to delete a clock.
#[derive(Debug, Clone)]
pub struct DeleteClock {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clock identifier.
    pub clock_id: Uuid,
}

impl Command for DeleteClock {
    fn command_type(&self) -> &'static str {
        "clock.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.clock_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_parses_name_or_inline_type() {
        let named: ClockTypeRef = serde_json::from_str(r#""Warring""#).unwrap();
        let inline: ClockTypeRef =
            serde_json::from_str(r#"{"name":"Siege","traits":["tug-of-war"]}"#).unwrap();

        let catalog = ClockTypeCatalog::built_in();
        assert_eq!(named.resolve(catalog).unwrap().name(), "Warring");
        assert_eq!(inline.resolve(catalog).unwrap().name(), "Siege");
    }

    #[test]
    fn test_unknown_named_type_is_invalid_argument() {
        let named = ClockTypeRef::Named("Nope".to_owned());

        let result = named.resolve(ClockTypeCatalog::built_in());

        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_advance_command_describes_its_target() {
        let clock_id = Uuid::new_v4();
        let command = AdvanceClock {
            correlation_id: Uuid::new_v4(),
            clock_id,
            amount: 2,
        };

        assert_eq!(command.describe(), format!("clock.advance({clock_id})"));
    }
}
