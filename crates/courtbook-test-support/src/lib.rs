//! Shared test mocks for the Court of Blades campaign bookkeeper.

mod rng;
mod service;

pub use rng::{MockRng, SequenceRng};
pub use service::{EmptyService, FailingService, RecordingService};
