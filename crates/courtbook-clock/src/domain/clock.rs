//! The clock: a bounded counter whose boundary behaviour comes from its type.
//!
//! [`ClockData`] is the plain state and owns the advance algorithm.
//! [`Clock`] is a synchronized handle onto that state: every accessor takes
//! the per-clock lock for its own duration only. Use
//! [`Clock::advance_with_events`] when the advance and the event derivation
//! must observe the same state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use courtbook_core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::catalog;
use super::clock_type::ClockType;
use super::events::{ClockEvent, ClockEventKind};

/// The lower bound of every clock.
pub const MINIMUM: i32 = 0;

/// Serialized field set of a clock, as accepted on input.
#[derive(Deserialize)]
struct ClockRecord {
    #[serde(default)]
    name: String,
    current: i32,
    max: i32,
    #[serde(rename = "type")]
    clock_type: Option<ClockType>,
    enabled: Option<bool>,
}

/// Plain clock state.
///
/// Equality covers maximum, current, type and the enabled flag. The name is
/// deliberately left out so renamed copies still compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ClockRecord")]
pub struct ClockData {
    name: String,
    current: i32,
    #[serde(rename = "max")]
    maximum: i32,
    #[serde(rename = "type")]
    clock_type: Arc<ClockType>,
    enabled: bool,
}

impl ClockData {
    /// Creates clock state. Without an explicit `enabled` the clock starts
    /// enabled unless it is already completed or depleted.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        current: i32,
        maximum: i32,
        clock_type: Arc<ClockType>,
        enabled: Option<bool>,
    ) -> Self {
        let mut data = Self {
            name: name.into(),
            current,
            maximum,
            clock_type,
            enabled: true,
        };
        data.enabled = enabled.unwrap_or_else(|| !data.is_completed() && !data.is_depleted());
        data
    }

    /// The clock name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current position.
    #[must_use]
    pub fn current(&self) -> i32 {
        self.current
    }

    /// The inclusive upper bound.
    #[must_use]
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// The lower bound, always [`MINIMUM`].
    #[must_use]
    pub fn minimum(&self) -> i32 {
        MINIMUM
    }

    /// The shared clock type.
    #[must_use]
    pub fn clock_type(&self) -> &Arc<ClockType> {
        &self.clock_type
    }

    /// The caller-managed enabled flag.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Has the clock completed: the type makes the maximum meaningful and
    /// the position is at or past it.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.clock_type.completes_at_maximum() && self.current >= self.maximum
    }

    /// Has the clock depleted: the type makes zero meaningful and the
    /// position is at or below it.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.clock_type.depletes_at_minimum() && self.current <= self.minimum()
    }

    /// May the clock advance past its maximum. No current type allows it.
    #[must_use]
    pub fn advance_beyond_maximum(&self) -> bool {
        false
    }

    /// May the clock regress below its minimum. No current type allows it.
    #[must_use]
    pub fn regress_beyond_minimum(&self) -> bool {
        false
    }

    /// Moves the position by `amount` and returns the part that could not be
    /// applied.
    ///
    /// Movement from inside the bounds is clamped at the boundary it heads
    /// for. A clock already at or past that boundary is not clamped: the
    /// amount is added as is and nothing is reported unused.
    pub fn advance(&mut self, amount: i32) -> i32 {
        let minimum = self.minimum();
        if amount >= 0 && !self.advance_beyond_maximum() && self.current < self.maximum {
            let target = i64::from(self.current) + i64::from(amount);
            let excess = target - i64::from(self.maximum);
            if excess > 0 {
                self.current = self.maximum;
                return i32::try_from(excess).unwrap_or(i32::MAX);
            }
            self.current += amount;
            return 0;
        }
        if amount < 0 && !self.regress_beyond_minimum() && self.current > minimum {
            let target = self.current.saturating_add(amount);
            if target < minimum {
                self.current = minimum;
                return target;
            }
            self.current = target;
            return 0;
        }
        self.current = self.current.saturating_add(amount);
        0
    }

    /// The boundary the clock currently sits on, with its signed excess.
    /// Completion wins when both apply.
    #[must_use]
    pub fn boundary(&self) -> Option<(ClockEventKind, i32)> {
        if self.is_completed() {
            Some((
                ClockEventKind::Completed,
                self.current.saturating_sub(self.maximum),
            ))
        } else if self.is_depleted() {
            Some((
                ClockEventKind::Depleted,
                self.current.saturating_sub(self.minimum()),
            ))
        } else {
            None
        }
    }

    /// Name used in event names; unnamed clocks are called "Clock".
    pub(crate) fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Clock"
        } else {
            &self.name
        }
    }
}

impl TryFrom<ClockRecord> for ClockData {
    type Error = DomainError;

    fn try_from(record: ClockRecord) -> Result<Self, Self::Error> {
        let clock_type = record
            .clock_type
            .ok_or_else(|| DomainError::invalid_argument("clock type must be specified"))?;
        Ok(Self::new(
            record.name,
            record.current,
            record.max,
            Arc::new(clock_type),
            record.enabled,
        ))
    }
}

impl PartialEq for ClockData {
    fn eq(&self, other: &Self) -> bool {
        self.maximum == other.maximum
            && self.current == other.current
            && self.clock_type == other.clock_type
            && self.enabled == other.enabled
    }
}

impl Eq for ClockData {}

/// A synchronized handle onto clock state.
///
/// `Clone` copies the state into a new, independent clock. Use
/// [`Clock::share`] for a second handle onto the same state.
#[derive(Debug)]
pub struct Clock {
    inner: Arc<Mutex<ClockData>>,
}

impl Clock {
    /// Creates a clock of the given type.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        current: i32,
        maximum: i32,
        clock_type: Arc<ClockType>,
    ) -> Self {
        Self::from(ClockData::new(name, current, maximum, clock_type, None))
    }

    /// Creates a standard progress clock.
    #[must_use]
    pub fn progress(name: impl Into<String>, current: i32, maximum: i32) -> Self {
        Self::new(name, current, maximum, catalog::progress())
    }

    /// Creates a clock from optional parts, as they arrive from outside.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `clock_type` is absent.
    pub fn try_new(
        name: impl Into<String>,
        current: i32,
        maximum: i32,
        clock_type: Option<Arc<ClockType>>,
        enabled: Option<bool>,
    ) -> Result<Self, DomainError> {
        let clock_type = clock_type.ok_or_else(|| {
            DomainError::invalid_argument_caused_by(
                "invalid clock type",
                DomainError::invalid_argument("type must be specified"),
            )
        })?;
        Ok(Self::from(ClockData::new(
            name, current, maximum, clock_type, enabled,
        )))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ClockData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<Mutex<ClockData>> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn from_shared(inner: Arc<Mutex<ClockData>>) -> Self {
        Self { inner }
    }

    /// Another handle onto the same state.
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Do both handles point at the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ClockData {
        self.lock().clone()
    }

    /// The clock name.
    #[must_use]
    pub fn name(&self) -> String {
        self.lock().name.clone()
    }

    /// Renames the clock.
    pub fn set_name(&self, name: impl Into<String>) {
        self.lock().name = name.into();
    }

    /// The current position.
    #[must_use]
    pub fn current(&self) -> i32 {
        self.lock().current
    }

    /// Moves the position without clamping.
    pub fn set_current(&self, current: i32) {
        self.lock().current = current;
    }

    /// The inclusive upper bound.
    #[must_use]
    pub fn maximum(&self) -> i32 {
        self.lock().maximum
    }

    /// Changes the upper bound. The position is left alone.
    pub fn set_maximum(&self, maximum: i32) {
        self.lock().maximum = maximum;
    }

    /// The lower bound, always [`MINIMUM`].
    #[must_use]
    pub fn minimum(&self) -> i32 {
        MINIMUM
    }

    /// The clock type.
    #[must_use]
    pub fn clock_type(&self) -> Arc<ClockType> {
        Arc::clone(&self.lock().clock_type)
    }

    /// Changes the clock type.
    pub fn set_clock_type(&self, clock_type: Arc<ClockType>) {
        self.lock().clock_type = clock_type;
    }

    /// Is the clock enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Is the clock disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        !self.is_enabled()
    }

    /// Sets the enabled flag.
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    /// See [`ClockData::is_completed`].
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.lock().is_completed()
    }

    /// See [`ClockData::is_depleted`].
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.lock().is_depleted()
    }

    /// See [`ClockData::advance_beyond_maximum`].
    #[must_use]
    pub fn advance_beyond_maximum(&self) -> bool {
        self.lock().advance_beyond_maximum()
    }

    /// See [`ClockData::regress_beyond_minimum`].
    #[must_use]
    pub fn regress_beyond_minimum(&self) -> bool {
        self.lock().regress_beyond_minimum()
    }

    /// Moves the position by `amount`; returns the unused part.
    /// See [`ClockData::advance`].
    pub fn advance(&self, amount: i32) -> i32 {
        self.lock().advance(amount)
    }

    /// The boundary event for the current state, if any.
    ///
    /// Recomputed on every call. Yields at most one event, and prefers
    /// completion over depletion.
    pub fn clock_events(&self) -> std::option::IntoIter<ClockEvent> {
        let data = self.lock();
        self.boundary_event(&data).into_iter()
    }

    /// Advances and derives events under one lock.
    ///
    /// Returns the unused amount and the events: an `Advanced` or
    /// `Regressed` event for the applied movement (when there was any),
    /// followed by the boundary event (when there is one).
    pub fn advance_with_events(&self, amount: i32) -> (i32, Vec<ClockEvent>) {
        let mut data = self.lock();
        let before = data.current;
        let unused = data.advance(amount);
        let moved = data.current.saturating_sub(before);

        let mut events = Vec::with_capacity(2);
        if moved > 0 {
            events.push(self.event(&data, ClockEventKind::Advanced, moved));
        } else if moved < 0 {
            events.push(self.event(&data, ClockEventKind::Regressed, moved));
        }
        events.extend(self.boundary_event(&data));
        (unused, events)
    }

    fn boundary_event(&self, data: &ClockData) -> Option<ClockEvent> {
        data.boundary()
            .map(|(kind, excess)| self.event(data, kind, excess))
    }

    fn event(&self, data: &ClockData, kind: ClockEventKind, excess: i32) -> ClockEvent {
        ClockEvent::derived(
            kind,
            self.downgrade(),
            format!("{} {}", data.display_name(), kind.verb()),
            excess,
        )
    }
}

impl From<ClockData> for Clock {
    fn from(data: ClockData) -> Self {
        Self {
            inner: Arc::new(Mutex::new(data)),
        }
    }
}

impl Clone for Clock {
    fn clone(&self) -> Self {
        Self::from(self.snapshot())
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let mine = self.snapshot();
        *other.lock() == mine
    }
}

impl Eq for Clock {}

impl Serialize for Clock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Clock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ClockData::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::domain::catalog::{progress, regress, warring};

    #[test]
    fn test_new_clock_is_enabled_unless_at_a_boundary() {
        let fresh = Clock::progress("Escape", 3, 6);
        let full = Clock::progress("Escape", 6, 6);
        let empty_warring = Clock::new("Feud", 0, 6, warring());

        assert!(fresh.is_enabled());
        assert!(full.is_disabled());
        assert!(empty_warring.is_disabled());
    }

    #[test]
    fn test_explicit_enabled_overrides_default() {
        let clock = Clock::try_new("Escape", 6, 6, Some(progress()), Some(true)).unwrap();

        assert!(clock.is_completed());
        assert!(clock.is_enabled());
    }

    #[test]
    fn test_try_new_without_type_is_invalid_argument() {
        let result = Clock::try_new("Escape", 0, 6, None, None);

        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_advance_within_bounds_clamps_at_maximum() {
        for amount in 0..10 {
            let clock = Clock::progress("Escape", 2, 6);

            let unused = clock.advance(amount);

            assert_eq!(clock.current(), (2 + amount).min(6));
            assert_eq!(unused, (2 + amount - 6).max(0));
        }
    }

    #[test]
    fn test_regress_within_bounds_clamps_at_minimum() {
        for amount in -10..0 {
            let clock = Clock::new("Feud", 4, 6, warring());

            let unused = clock.advance(amount);

            assert_eq!(clock.current(), (4 + amount).max(0));
            let expected = if 4 + amount < 0 { 4 + amount } else { 0 };
            assert_eq!(unused, expected);
        }
    }

    #[test]
    fn test_advance_by_zero_is_a_no_op() {
        for current in [-2, 0, 3, 6, 9] {
            let clock = Clock::progress("Escape", current, 6);

            assert_eq!(clock.advance(0), 0);
            assert_eq!(clock.current(), current);
        }
    }

    #[test]
    fn test_advance_at_or_past_boundary_adds_without_clamping() {
        let full = Clock::progress("Escape", 6, 6);
        let empty = Clock::new("Feud", 0, 6, warring());

        assert_eq!(full.advance(3), 0);
        assert_eq!(full.current(), 9);
        assert_eq!(empty.advance(-2), 0);
        assert_eq!(empty.current(), -2);
    }

    #[test]
    fn test_advance_saturates_instead_of_overflowing() {
        let clock = Clock::progress("Forever", i32::MAX - 1, 6);

        clock.advance(5);

        assert_eq!(clock.current(), i32::MAX);
    }

    #[test]
    fn test_advance_by_integer_limit_reports_whole_excess_as_unused() {
        let clock = Clock::progress("Escape", 2, 6);

        let unused = clock.advance(i32::MAX);

        assert_eq!(clock.current(), 6);
        assert_eq!(unused, i32::MAX - 4);
    }

    #[test]
    fn test_completion_requires_a_completing_trait() {
        let regressing = Clock::new("Fade", 100, 10, regress());

        assert!(!regressing.is_completed());
        assert_eq!(regressing.clock_events().count(), 0);
    }

    #[test]
    fn test_warring_clock_reports_completion_then_depletion() {
        let clock = Clock::new("Feud", 3, 6, warring());

        clock.set_current(6);
        let completed: Vec<ClockEvent> = clock.clock_events().collect();
        clock.set_current(0);
        let depleted: Vec<ClockEvent> = clock.clock_events().collect();

        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].kind(), ClockEventKind::Completed);
        assert_eq!(completed[0].excess(), 0);
        assert_eq!(depleted.len(), 1);
        assert_eq!(depleted[0].kind(), ClockEventKind::Depleted);
        assert_eq!(depleted[0].excess(), 0);
    }

    #[test]
    fn test_completion_wins_when_both_boundaries_apply() {
        let clock = Clock::new("Stalemate", 0, 0, warring());

        let events: Vec<ClockEvent> = clock.clock_events().collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), ClockEventKind::Completed);
    }

    #[test]
    fn test_events_are_recomputed_on_each_call() {
        let clock = Clock::progress("Escape", 5, 6);

        assert_eq!(clock.clock_events().count(), 0);
        clock.advance(1);
        assert_eq!(clock.clock_events().count(), 1);
        clock.set_maximum(8);
        assert_eq!(clock.clock_events().count(), 0);
    }

    #[test]
    fn test_advance_with_events_reports_movement_and_boundary() {
        let clock = Clock::progress("Escape", 4, 6);

        let (unused, events) = clock.advance_with_events(5);

        assert_eq!(unused, 3);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), ClockEventKind::Advanced);
        assert_eq!(events[0].excess(), 2);
        assert_eq!(events[0].event_name(), "Escape advanced");
        assert_eq!(events[1].kind(), ClockEventKind::Completed);
        assert_eq!(events[1].event_name(), "Escape completed");
        assert!(events[1].target().unwrap().ptr_eq(&clock));
    }

    #[test]
    fn test_advance_with_events_without_movement_has_no_movement_event() {
        let clock = Clock::new("Feud", 3, 6, warring());

        let (unused, events) = clock.advance_with_events(0);

        assert_eq!(unused, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_equality_ignores_name() {
        let a = Clock::progress("Escape", 3, 6);
        let b = Clock::progress("Flight", 3, 6);
        let c = Clock::progress("Escape", 4, 6);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_is_independent_and_share_is_not() {
        let original = Clock::progress("Escape", 3, 6);
        let copy = original.clone();
        let shared = original.share();

        original.advance(1);

        assert_eq!(copy.current(), 3);
        assert_eq!(shared.current(), 4);
        assert!(shared.ptr_eq(&original));
        assert!(!copy.ptr_eq(&original));
    }

    #[test]
    fn test_serialized_form_uses_max_and_type_fields() {
        let clock = Clock::progress("Escape", 3, 6);

        let json = serde_json::to_value(&clock).unwrap();

        assert_eq!(json["name"], "Escape");
        assert_eq!(json["current"], 3);
        assert_eq!(json["max"], 6);
        assert_eq!(json["enabled"], true);
        assert_eq!(json["type"]["name"], "Progress");
        assert_eq!(
            json["type"]["traits"],
            serde_json::json!(["progress", "completes-full"])
        );
    }

    #[test]
    fn test_serialized_clock_round_trips_to_equal_clock() {
        let clock = Clock::progress("Escape", 3, 6);

        let json = serde_json::to_string(&clock).unwrap();
        let back: Clock = serde_json::from_str(&json).unwrap();

        assert_eq!(back, clock);
        assert_eq!(back.name(), "Escape");
    }

    #[test]
    fn test_deserialize_without_type_fails() {
        let result: Result<Clock, _> =
            serde_json::from_str(r#"{"name":"Escape","current":3,"max":6}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_without_enabled_derives_it() {
        let clock: Clock = serde_json::from_str(
            r#"{"name":"Escape","current":6,"max":6,"type":{"name":"Progress","traits":["complete-full"]}}"#,
        )
        .unwrap();

        assert!(clock.is_completed());
        assert!(clock.is_disabled());
    }

    #[test]
    fn test_concurrent_advances_are_each_atomic() {
        let clock = Clock::progress("Siege", 0, 1000);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = clock.share();
                thread::spawn(move || {
                    for _ in 0..100 {
                        clock.advance(1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(clock.current(), 800);
    }
}
