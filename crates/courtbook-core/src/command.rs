//! Command abstractions.

use uuid::Uuid;

/// A request to change bookkeeping state, routed to one application handler.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name of the command, e.g. `clock.advance`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the logs.
    fn correlation_id(&self) -> Uuid;

    /// The entity the command addresses, when it addresses an existing one.
    fn target_id(&self) -> Option<Uuid> {
        None
    }

    /// Short label for log lines: the command type, plus the target when known.
    fn describe(&self) -> String {
        match self.target_id() {
            Some(id) => format!("{}({id})", self.command_type()),
            None => self.command_type().to_owned(),
        }
    }
}
