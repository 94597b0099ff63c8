//! Clock events: transient records of movement and boundary crossings.

use std::fmt;
use std::sync::{Mutex, Weak};

use courtbook_core::error::DomainError;
use serde::Serialize;

use super::clock::{Clock, ClockData};

/// What happened to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEventKind {
    /// The clock reached a meaningful maximum. Excess is never negative.
    Completed,
    /// The clock reached a meaningful zero. Excess is never positive.
    Depleted,
    /// The clock moved forward. Excess is never negative.
    Advanced,
    /// The clock moved backward. Excess is never positive.
    Regressed,
}

impl ClockEventKind {
    /// Does `excess` have an acceptable sign for this kind.
    #[must_use]
    pub fn accepts(self, excess: i32) -> bool {
        match self {
            Self::Completed | Self::Advanced => excess >= 0,
            Self::Depleted | Self::Regressed => excess <= 0,
        }
    }

    /// Past-tense verb used in default event names.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Depleted => "depleted",
            Self::Advanced => "advanced",
            Self::Regressed => "regressed",
        }
    }
}

impl fmt::Display for ClockEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// An event produced by a clock.
///
/// The event refers back to its clock without keeping it alive.
#[derive(Debug, Clone, Serialize)]
pub struct ClockEvent {
    kind: ClockEventKind,
    #[serde(rename = "name")]
    event_name: String,
    excess: i32,
    #[serde(skip)]
    target: Weak<Mutex<ClockData>>,
}

impl ClockEvent {
    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `excess` has the wrong sign
    /// for `kind`.
    pub fn new(
        kind: ClockEventKind,
        target: &Clock,
        event_name: impl Into<String>,
        excess: i32,
    ) -> Result<Self, DomainError> {
        check_excess(kind, excess)?;
        Ok(Self::derived(kind, target.downgrade(), event_name.into(), excess))
    }

    /// Builds an event whose excess was computed from the clock's own state.
    pub(crate) fn derived(
        kind: ClockEventKind,
        target: Weak<Mutex<ClockData>>,
        event_name: String,
        excess: i32,
    ) -> Self {
        debug_assert!(kind.accepts(excess));
        Self {
            kind,
            event_name,
            excess,
            target,
        }
    }

    /// A completed event for `clock`, with the excess over its maximum.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the clock is below its
    /// maximum.
    pub fn completed_clock(clock: &Clock) -> Result<Self, DomainError> {
        let data = clock.snapshot();
        let excess = data.current().saturating_sub(data.maximum());
        Self::new(
            ClockEventKind::Completed,
            clock,
            format!("{} completed", data.display_name()),
            excess,
        )
        .map_err(|e| DomainError::invalid_argument_caused_by("invalid completed clock", e))
    }

    /// A depleted event for `clock`, with the excess below its minimum.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the clock is above its
    /// minimum.
    pub fn depleted_clock(clock: &Clock) -> Result<Self, DomainError> {
        let data = clock.snapshot();
        let excess = data.current().saturating_sub(data.minimum());
        Self::new(
            ClockEventKind::Depleted,
            clock,
            format!("{} depleted", data.display_name()),
            excess,
        )
        .map_err(|e| DomainError::invalid_argument_caused_by("invalid depleted clock", e))
    }

    /// A boundary event chosen by the sign of `excess`: completed when it is
    /// zero or more, depleted otherwise.
    #[must_use]
    pub fn from_excess(target: &Clock, event_name: impl Into<String>, excess: i32) -> Self {
        let kind = if excess >= 0 {
            ClockEventKind::Completed
        } else {
            ClockEventKind::Depleted
        };
        Self::derived(kind, target.downgrade(), event_name.into(), excess)
    }

    /// The event kind.
    #[must_use]
    pub fn kind(&self) -> ClockEventKind {
        self.kind
    }

    /// The event name.
    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// The signed excess.
    #[must_use]
    pub fn excess(&self) -> i32 {
        self.excess
    }

    /// Replaces the excess.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` and leaves the event unchanged
    /// if `excess` has the wrong sign for this kind.
    pub fn set_excess(&mut self, excess: i32) -> Result<(), DomainError> {
        check_excess(self.kind, excess)?;
        self.excess = excess;
        Ok(())
    }

    /// The clock that produced the event, if it still exists.
    #[must_use]
    pub fn target(&self) -> Option<Clock> {
        self.target.upgrade().map(Clock::from_shared)
    }
}

impl PartialEq for ClockEvent {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.event_name == other.event_name
            && self.excess == other.excess
            && self.target.ptr_eq(&other.target)
    }
}

fn check_excess(kind: ClockEventKind, excess: i32) -> Result<(), DomainError> {
    if kind.accepts(excess) {
        Ok(())
    } else {
        Err(DomainError::invalid_argument(format!(
            "invalid excess {excess} for a {kind} event"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::warring;

    #[test]
    fn test_new_rejects_wrong_sign_per_kind() {
        let clock = Clock::progress("Escape", 3, 6);

        assert!(ClockEvent::new(ClockEventKind::Completed, &clock, "c", -1).is_err());
        assert!(ClockEvent::new(ClockEventKind::Advanced, &clock, "a", -1).is_err());
        assert!(ClockEvent::new(ClockEventKind::Depleted, &clock, "d", 1).is_err());
        assert!(ClockEvent::new(ClockEventKind::Regressed, &clock, "r", 1).is_err());
        assert!(ClockEvent::new(ClockEventKind::Completed, &clock, "c", 0).is_ok());
        assert!(ClockEvent::new(ClockEventKind::Depleted, &clock, "d", 0).is_ok());
    }

    #[test]
    fn test_set_excess_keeps_old_value_on_rejection() {
        let clock = Clock::progress("Escape", 6, 6);
        let mut event = ClockEvent::completed_clock(&clock).unwrap();

        let result = event.set_excess(-3);

        assert!(result.unwrap_err().is_invalid_argument());
        assert_eq!(event.excess(), 0);
        event.set_excess(2).unwrap();
        assert_eq!(event.excess(), 2);
    }

    #[test]
    fn test_completed_clock_computes_excess_over_maximum() {
        let clock = Clock::progress("Escape", 8, 6);

        let event = ClockEvent::completed_clock(&clock).unwrap();

        assert_eq!(event.kind(), ClockEventKind::Completed);
        assert_eq!(event.excess(), 2);
        assert_eq!(event.event_name(), "Escape completed");
    }

    #[test]
    fn test_completed_clock_on_unfinished_clock_is_invalid_argument_with_cause() {
        let clock = Clock::progress("Escape", 3, 6);

        let error = ClockEvent::completed_clock(&clock).unwrap_err();

        assert!(error.is_invalid_argument());
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_depleted_clock_requires_clock_at_or_below_zero() {
        let empty = Clock::new("Feud", -1, 6, warring());
        let half = Clock::new("Feud", 3, 6, warring());

        let event = ClockEvent::depleted_clock(&empty).unwrap();

        assert_eq!(event.kind(), ClockEventKind::Depleted);
        assert_eq!(event.excess(), -1);
        assert_eq!(event.event_name(), "Feud depleted");
        assert!(ClockEvent::depleted_clock(&half).is_err());
    }

    #[test]
    fn test_from_excess_picks_kind_by_sign() {
        let clock = Clock::progress("", 0, 6);

        assert_eq!(
            ClockEvent::from_excess(&clock, "x", 0).kind(),
            ClockEventKind::Completed
        );
        assert_eq!(
            ClockEvent::from_excess(&clock, "x", -2).kind(),
            ClockEventKind::Depleted
        );
    }

    #[test]
    fn test_unnamed_clock_events_use_generic_name() {
        let clock = Clock::progress("", 6, 6);

        let event = ClockEvent::completed_clock(&clock).unwrap();

        assert_eq!(event.event_name(), "Clock completed");
    }

    #[test]
    fn test_target_does_not_keep_clock_alive() {
        let clock = Clock::progress("Escape", 6, 6);
        let event = clock.clock_events().next().unwrap();

        assert!(event.target().is_some());
        drop(clock);
        assert!(event.target().is_none());
    }

    #[test]
    fn test_serialized_event_omits_target() {
        let clock = Clock::progress("Escape", 6, 6);
        let event = ClockEvent::completed_clock(&clock).unwrap();

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"kind": "completed", "name": "Escape completed", "excess": 0})
        );
    }
}
