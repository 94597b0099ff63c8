//! Application layer for the Coterie context.

pub mod command_handlers;
pub mod query_handlers;
