//! The Coterie context of the Court of Blades bookkeeper.
//!
//! Coteries, the great houses and the Esultare. These aggregate clocks and
//! tracks from the Clock context; the only behaviour of their own is
//! bookkeeping around abilities, upgrades and house seating.

pub mod application;
pub mod domain;
