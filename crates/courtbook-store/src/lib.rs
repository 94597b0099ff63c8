//! Entity storage for the Court of Blades campaign bookkeeper.
//!
//! Implements the `Service` contract from `courtbook-core`. Only an
//! in-memory backend exists; it is what the API server runs on.

mod memory_service;

pub use memory_service::MemoryService;
