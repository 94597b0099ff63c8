//! Domain layer for the Coterie context.

pub mod abilities;
pub mod commands;
pub mod coterie;
pub mod default_houses;
pub mod esultare;
pub mod features;
pub mod house;
