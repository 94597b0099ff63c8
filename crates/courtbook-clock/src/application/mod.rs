//! Application layer for the Clock context.

pub mod command_handlers;
pub mod query_handlers;
