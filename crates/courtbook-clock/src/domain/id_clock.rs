//! Clocks addressed by a stable identifier.

use std::fmt;
use std::sync::Arc;

use courtbook_core::error::DomainError;
use courtbook_core::identified::Identified;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::clock_type::ClockType;
use super::events::ClockEvent;

/// Where an [`IdClock`] keeps its state.
#[derive(Debug)]
pub enum ClockRef {
    /// The id clock owns its state.
    Owned(Clock),
    /// All reads and writes go to a clock held elsewhere.
    ///
    /// The handle is shared, not weak: the wrapped state stays alive as long
    /// as the id clock does, even after every other handle is dropped.
    /// Events keep the weak back-reference instead.
    Delegated(Clock),
}

impl ClockRef {
    /// The clock that holds the state.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        match self {
            Self::Owned(clock) | Self::Delegated(clock) => clock,
        }
    }

    /// Is the state held elsewhere.
    #[must_use]
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::Delegated(_))
    }
}

/// A clock with an identifier.
///
/// An id clock either owns its state or wraps another clock. A wrapping id
/// clock forwards every accessor and mutator, so changes through either
/// handle are visible through the other.
pub struct IdClock<Id> {
    id: Option<Id>,
    clock: ClockRef,
    validator: fn(&Id) -> bool,
}

fn accept_any<Id>(_: &Id) -> bool {
    true
}

impl<Id> IdClock<Id> {
    /// An id clock with its own fresh state.
    #[must_use]
    pub fn new(
        id: Option<Id>,
        name: impl Into<String>,
        current: i32,
        maximum: i32,
        clock_type: Arc<ClockType>,
    ) -> Self {
        Self::owning(id, Clock::new(name, current, maximum, clock_type))
    }

    /// An id clock taking ownership of `clock`.
    #[must_use]
    pub fn owning(id: Option<Id>, clock: Clock) -> Self {
        Self {
            id,
            clock: ClockRef::Owned(clock),
            validator: accept_any,
        }
    }

    /// An id clock viewing the state of `clock`. The id clock shares
    /// ownership of that state.
    #[must_use]
    pub fn wrapping(id: Option<Id>, clock: &Clock) -> Self {
        Self {
            id,
            clock: ClockRef::Delegated(clock.share()),
            validator: accept_any,
        }
    }

    /// Installs an identifier validity check.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the current identifier does
    /// not pass the new check.
    pub fn with_validator(mut self, validator: fn(&Id) -> bool) -> Result<Self, DomainError> {
        if self.id.as_ref().is_some_and(|id| !validator(id)) {
            return Err(DomainError::invalid_argument("invalid identifier"));
        }
        self.validator = validator;
        Ok(self)
    }

    /// Where the state is kept.
    #[must_use]
    pub fn clock_ref(&self) -> &ClockRef {
        &self.clock
    }

    /// The clock holding the state.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        self.clock.clock()
    }

    /// The clock name.
    #[must_use]
    pub fn name(&self) -> String {
        self.clock().name()
    }

    /// Renames the clock.
    pub fn set_name(&self, name: impl Into<String>) {
        self.clock().set_name(name);
    }

    /// The current position.
    #[must_use]
    pub fn current(&self) -> i32 {
        self.clock().current()
    }

    /// Moves the position without clamping.
    pub fn set_current(&self, current: i32) {
        self.clock().set_current(current);
    }

    /// The upper bound.
    #[must_use]
    pub fn maximum(&self) -> i32 {
        self.clock().maximum()
    }

    /// Changes the upper bound.
    pub fn set_maximum(&self, maximum: i32) {
        self.clock().set_maximum(maximum);
    }

    /// The lower bound.
    #[must_use]
    pub fn minimum(&self) -> i32 {
        self.clock().minimum()
    }

    /// The clock type.
    #[must_use]
    pub fn clock_type(&self) -> Arc<ClockType> {
        self.clock().clock_type()
    }

    /// Changes the clock type.
    pub fn set_clock_type(&self, clock_type: Arc<ClockType>) {
        self.clock().set_clock_type(clock_type);
    }

    /// Is the clock enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.clock().is_enabled()
    }

    /// Is the clock disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.clock().is_disabled()
    }

    /// Sets the enabled flag.
    pub fn set_enabled(&self, enabled: bool) {
        self.clock().set_enabled(enabled);
    }

    /// Has the clock completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.clock().is_completed()
    }

    /// Has the clock depleted.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.clock().is_depleted()
    }

    /// May the clock advance past its maximum.
    #[must_use]
    pub fn advance_beyond_maximum(&self) -> bool {
        self.clock().advance_beyond_maximum()
    }

    /// May the clock regress below its minimum.
    #[must_use]
    pub fn regress_beyond_minimum(&self) -> bool {
        self.clock().regress_beyond_minimum()
    }

    /// Moves the position; returns the unused part.
    pub fn advance(&self, amount: i32) -> i32 {
        self.clock().advance(amount)
    }

    /// Advances and derives events under one lock.
    pub fn advance_with_events(&self, amount: i32) -> (i32, Vec<ClockEvent>) {
        self.clock().advance_with_events(amount)
    }

    /// The boundary event for the current state, if any.
    pub fn clock_events(&self) -> std::option::IntoIter<ClockEvent> {
        self.clock().clock_events()
    }

    /// Splits into the identifier and the clock handle.
    #[must_use]
    pub fn into_parts(self) -> (Option<Id>, Clock) {
        match self.clock {
            ClockRef::Owned(clock) | ClockRef::Delegated(clock) => (self.id, clock),
        }
    }
}

impl<Id: PartialEq> Identified<Id> for IdClock<Id> {
    fn valid_id(&self, id: &Id) -> bool {
        (self.validator)(id)
    }

    fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Id) -> Result<bool, DomainError> {
        if !self.valid_id(&id) {
            return Err(DomainError::invalid_argument("invalid identifier"));
        }
        if self.id.as_ref() == Some(&id) {
            return Ok(false);
        }
        self.id = Some(id);
        Ok(true)
    }
}

impl<Id> PartialEq for IdClock<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.clock() == other.clock()
    }
}

impl<Id: fmt::Debug> fmt::Debug for IdClock<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdClock")
            .field("id", &self.id)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct IdClockOut<'a, Id> {
    id: Option<&'a Id>,
    #[serde(flatten)]
    clock: &'a Clock,
}

#[derive(Deserialize)]
struct IdClockIn<Id> {
    id: Option<Id>,
    #[serde(flatten)]
    clock: Clock,
}

impl<Id: Serialize> Serialize for IdClock<Id> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IdClockOut {
            id: self.id.as_ref(),
            clock: self.clock(),
        }
        .serialize(serializer)
    }
}

impl<'de, Id: Deserialize<'de>> Deserialize<'de> for IdClock<Id> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let IdClockIn { id, clock } = IdClockIn::deserialize(deserializer)?;
        Ok(Self::owning(id, clock))
    }
}
