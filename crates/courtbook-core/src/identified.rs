//! Identity contract for values that carry a stable identifier.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A value that may carry an identifier of type `Id`.
pub trait Identified<Id> {
    /// Is `id` acceptable as this value's identifier. Accepts everything by
    /// default.
    fn valid_id(&self, _id: &Id) -> bool {
        true
    }

    /// The current identifier; `None` when the value has none.
    fn id(&self) -> Option<&Id>;

    /// Replaces the identifier and reports whether it actually changed.
    ///
    /// The default implementation is for immutable views: it validates `id`
    /// and then refuses the change.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `valid_id` rejects `id`,
    /// `DomainError::Unsupported` if the identifier cannot be changed.
    fn set_id(&mut self, id: Id) -> Result<bool, DomainError> {
        if self.valid_id(&id) {
            Err(DomainError::unsupported(
                "immutable value does not support setting its identifier",
            ))
        } else {
            Err(DomainError::invalid_argument("invalid identifier"))
        }
    }
}

/// An immutable `(id, content)` pair, e.g. the answer to a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedEntity<Id, E> {
    id: Id,
    content: E,
}

impl<Id, E> IdentifiedEntity<Id, E> {
    /// Pairs `content` with the identifier it is stored under.
    #[must_use]
    pub fn new(id: Id, content: E) -> Self {
        Self { id, content }
    }

    /// The wrapped content.
    #[must_use]
    pub fn content(&self) -> &E {
        &self.content
    }

    /// Splits the pair back into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Id, E) {
        (self.id, self.content)
    }
}

impl<Id, E> Identified<Id> for IdentifiedEntity<Id, E> {
    fn id(&self) -> Option<&Id> {
        Some(&self.id)
    }
}
