//! Tracks: clocks drawn as a row of boxes.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog;
use super::clock::Clock;
use super::clock_type::ClockType;

/// A clock in the role of a simple progress meter.
///
/// Behaves exactly like the clock it wraps; only the construction defaults
/// differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track(Clock);

impl Track {
    /// A named progress track.
    #[must_use]
    pub fn new(name: impl Into<String>, current: i32, maximum: i32) -> Self {
        Self(Clock::progress(name, current, maximum))
    }

    /// A named track of the given type.
    #[must_use]
    pub fn with_type(
        name: impl Into<String>,
        current: i32,
        maximum: i32,
        clock_type: Arc<ClockType>,
    ) -> Self {
        Self(Clock::new(name, current, maximum, clock_type))
    }

    /// An empty progress track of length `maximum`.
    #[must_use]
    pub fn empty(name: impl Into<String>, maximum: i32) -> Self {
        Self::with_type(name, 0, maximum, catalog::progress())
    }

    /// The underlying clock.
    #[must_use]
    pub fn as_clock(&self) -> &Clock {
        &self.0
    }

    /// Unwraps the underlying clock.
    #[must_use]
    pub fn into_clock(self) -> Clock {
        self.0
    }
}

impl Deref for Track {
    type Target = Clock;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Clock> for Track {
    fn from(clock: Clock) -> Self {
        Self(clock)
    }
}
