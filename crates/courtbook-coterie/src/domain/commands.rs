//! Commands for the Coterie context.

use courtbook_core::command::Command;
use uuid::Uuid;

use super::coterie::{CoterieType, TrackName};
use super::features::SpecialAbility;

/// Command to found a coterie.
#[derive(Debug, Clone)]
pub struct CreateCoterie {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The coterie name.
    pub name: String,
    /// The patron house, by stored house id.
    pub house_id: Option<Uuid>,
    /// The coterie type.
    pub coterie_type: Option<CoterieType>,
}

impl Command for CreateCoterie {
    fn command_type(&self) -> &'static str {
        "coterie.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move one of a coterie's tracks.
#[derive(Debug, Clone)]
pub struct AdvanceCoterieTrack {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The coterie identifier.
    pub coterie_id: Uuid,
    /// Which track.
    pub track: TrackName,
    /// Signed number of segments to move.
    pub amount: i32,
}

impl Command for AdvanceCoterieTrack {
    fn command_type(&self) -> &'static str {
        "coterie.advance_track"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.coterie_id)
    }
}

/// Command to grant a coterie a special ability.
#[derive(Debug, Clone)]
pub struct AddCoterieAbility {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The coterie identifier.
    pub coterie_id: Uuid,
    /// The ability to add.
    pub ability: SpecialAbility,
}

impl Command for AddCoterieAbility {
    fn command_type(&self) -> &'static str {
        "coterie.add_ability"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.coterie_id)
    }
}

/// Command to disband a coterie.
#[derive(Debug, Clone)]
pub struct DeleteCoterie {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The coterie identifier.
    pub coterie_id: Uuid,
}

impl Command for DeleteCoterie {
    fn command_type(&self) -> &'static str {
        "coterie.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.coterie_id)
    }
}

/// Command to seat the houses of the Esultare.
#[derive(Debug, Clone)]
pub struct SetupEsultare {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player's house, by stored house id.
    pub player_house_id: Option<Uuid>,
}

impl Command for SetupEsultare {
    fn command_type(&self) -> &'static str {
        "esultare.setup"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
