//! Domain layer for the Clock context.

pub mod catalog;
pub mod clock;
pub mod clock_trait;
pub mod clock_type;
pub mod commands;
pub mod events;
pub mod id_clock;
pub mod track;
