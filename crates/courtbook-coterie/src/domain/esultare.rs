//! The Esultare: the standing of the great houses.
//!
//! Each house has a 12-segment clock. Setup seats the houses in a random
//! order with the player's house last and hands out starting positions.

use std::cmp::Reverse;
use std::sync::{Arc, LazyLock};

use courtbook_clock::domain::clock::Clock;
use courtbook_clock::domain::clock_type::ClockType;
use courtbook_clock::domain::events::ClockEvent;
use courtbook_core::error::DomainError;
use courtbook_core::rng::{DeterministicRng, shuffle};
use serde::{Deserialize, Serialize};

use super::house::HouseModel;

/// Segments on every Esultare clock.
pub const SEGMENTS: i32 = 12;

/// Starting positions by seat.
pub const DEFAULT_POSITIONS: [i32; 6] = [11, 9, 7, 5, 3, 1];

/// The house the court favours: one extra segment unless seated last.
pub const POPULAR_HOUSE: &str = "Bastien";

static ESULTARE_TYPE: LazyLock<Arc<ClockType>> = LazyLock::new(|| {
    Arc::new(ClockType::progressive(
        "Esultare",
        "A racing clock of the Esultare houses",
    ))
});

/// One house's clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsultareClock {
    house: String,
    #[serde(flatten)]
    clock: Clock,
}

impl EsultareClock {
    /// A clock for `house` at `position`.
    #[must_use]
    pub fn new(house: impl Into<String>, position: i32) -> Self {
        let house = house.into();
        let clock = Clock::new(house.clone(), position, SEGMENTS, Arc::clone(&ESULTARE_TYPE));
        Self { house, clock }
    }

    /// The house name.
    #[must_use]
    pub fn house(&self) -> &str {
        &self.house
    }

    /// The underlying clock.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

/// The ranked house clocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Esultare {
    positions: Vec<EsultareClock>,
    size: usize,
}

fn is_popular(house: &HouseModel, seat: usize) -> bool {
    seat != DEFAULT_POSITIONS.len() - 1 && house.name() == POPULAR_HOUSE
}

impl Esultare {
    /// Seats `houses` and assigns starting positions.
    ///
    /// The other houses are shuffled with `rng`. The player's house, when
    /// given, is removed from `houses` and seated last among the scored
    /// seats. Seats past the last starting position begin at zero.
    pub fn setup(
        houses: &[HouseModel],
        player_house: Option<&HouseModel>,
        rng: &mut dyn DeterministicRng,
    ) -> Self {
        let mut seating: Vec<&HouseModel> = houses
            .iter()
            .filter(|house| player_house.is_none_or(|player| player.name() != house.name()))
            .collect();
        shuffle(&mut seating, rng);

        let mut size = DEFAULT_POSITIONS.len();
        if let Some(player) = player_house {
            size = (seating.len() + 1).min(DEFAULT_POSITIONS.len());
            seating.insert(size - 1, player);
        }

        let positions = seating
            .into_iter()
            .enumerate()
            .map(|(seat, house)| {
                let start = DEFAULT_POSITIONS
                    .get(seat)
                    .map_or(0, |p| p + i32::from(is_popular(house, seat)));
                EsultareClock::new(house.name(), start)
            })
            .collect();
        Self { positions, size }
    }

    /// The house clocks in ranking order.
    #[must_use]
    pub fn positions(&self) -> &[EsultareClock] {
        &self.positions
    }

    /// Number of scored seats.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The seat of `house`, counting from zero.
    #[must_use]
    pub fn seat_of(&self, house: &str) -> Option<usize> {
        self.positions.iter().position(|c| c.house == house)
    }

    /// Advances the clock of `house`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the house is not seated.
    pub fn advance_house(
        &self,
        house: &str,
        amount: i32,
    ) -> Result<(i32, Vec<ClockEvent>), DomainError> {
        self.positions
            .iter()
            .find(|c| c.house == house)
            .map(|c| c.clock.advance_with_events(amount))
            .ok_or_else(|| DomainError::invalid_argument(format!("house not seated: {house}")))
    }

    /// Re-ranks the houses by clock position, highest first. Ties keep their
    /// current order.
    pub fn update_positions(&mut self) {
        self.positions
            .sort_by_key(|c| Reverse(c.clock.current()));
    }
}
