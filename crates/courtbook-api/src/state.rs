//! Shared application state.

use std::sync::{Arc, Mutex};

use courtbook_clock::domain::catalog::ClockTypeCatalog;
use courtbook_clock::domain::clock::Clock;
use courtbook_core::rng::DeterministicRng;
use courtbook_core::service::Service;
use courtbook_coterie::domain::coterie::Coterie;
use courtbook_coterie::domain::default_houses;
use courtbook_coterie::domain::house::HouseModel;
use courtbook_store::MemoryService;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// `DeterministicRng` backed by an OS-seeded `StdRng`.
#[derive(Debug)]
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Seeds a new generator from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// A generator with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random()
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock types addressable by name.
    pub catalog: Arc<ClockTypeCatalog>,
    /// Storage for clocks.
    pub clocks: Arc<dyn Service<Uuid, Clock>>,
    /// Storage for coteries.
    pub coteries: Arc<dyn Service<Uuid, Coterie>>,
    /// Storage for the great houses.
    pub houses: Arc<dyn Service<Uuid, HouseModel>>,
    /// Randomness for Esultare seating.
    pub rng: Arc<Mutex<dyn DeterministicRng>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        catalog: Arc<ClockTypeCatalog>,
        clocks: Arc<dyn Service<Uuid, Clock>>,
        coteries: Arc<dyn Service<Uuid, Coterie>>,
        houses: Arc<dyn Service<Uuid, HouseModel>>,
        rng: Arc<Mutex<dyn DeterministicRng>>,
    ) -> Self {
        Self {
            catalog,
            clocks,
            coteries,
            houses,
            rng,
        }
    }

    /// State over empty in-memory clock and coterie stores, with the
    /// default houses already seated in the house store.
    #[must_use]
    pub fn in_memory(catalog: ClockTypeCatalog, rng: Arc<Mutex<dyn DeterministicRng>>) -> Self {
        Self::new(
            Arc::new(catalog),
            Arc::new(MemoryService::<Clock>::new("clock")),
            Arc::new(MemoryService::<Coterie>::new("coterie")),
            Arc::new(default_house_service()),
            rng,
        )
    }
}

/// An in-memory house store seeded with the default houses.
#[must_use]
pub fn default_house_service() -> MemoryService<HouseModel> {
    MemoryService::seeded(
        "house",
        default_houses::houses()
            .iter()
            .cloned()
            .map(|house| (Uuid::new_v4(), house)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_stays_within_inclusive_range() {
        let mut rng = SeededRng::with_seed(7);

        for _ in 0..100 {
            let value = rng.next_u32_range(2, 4);
            assert!((2..=4).contains(&value));
        }
        assert_eq!(rng.next_u32_range(5, 5), 5);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut first = SeededRng::with_seed(42);
        let mut second = SeededRng::with_seed(42);

        let a: Vec<u32> = (0..8).map(|_| first.next_u32_range(0, 100)).collect();
        let b: Vec<u32> = (0..8).map(|_| second.next_u32_range(0, 100)).collect();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_in_memory_state_seeds_default_houses() {
        let state = AppState::in_memory(
            ClockTypeCatalog::built_in().clone(),
            Arc::new(Mutex::new(SeededRng::with_seed(1))),
        );

        let houses = state.houses.fetch_all().await.unwrap();

        assert_eq!(houses.len(), 6);
    }
}
