//! Courtbook Core: shared domain abstractions.
//!
//! This crate defines the error type, the storage and identity contracts,
//! and the command/RNG seams that every bounded context depends on. It
//! contains no infrastructure code.

pub mod command;
pub mod error;
pub mod identified;
pub mod rng;
pub mod service;
