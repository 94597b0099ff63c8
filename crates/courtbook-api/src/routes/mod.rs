//! Route modules organized by bounded context.

pub mod clock_types;
pub mod clocks;
pub mod coteries;
pub mod esultare;
pub mod health;
pub mod houses;
