//! The Clock context of the Court of Blades bookkeeper.
//!
//! Clocks are bounded counters that track narrative progress and danger.
//! A clock's type decides whether reaching either end means anything; the
//! clock reports that as events for the rest of the game to react to.

pub mod application;
pub mod domain;
