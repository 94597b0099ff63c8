//! The six great houses every campaign starts with.

use std::sync::LazyLock;

use tracing::warn;

use super::house::{HealerType, HouseModel, Resource};

/// Seating order of the houses.
const HOUSE_NAMES: [&str; 6] = ["Corvetto", "Bastien", "Battalia", "Erlanda", "Lovell", "Al-Mari"];

/// Name, primary domain and healer of each house.
const HOUSE_DATA: [(&str, Resource, HealerType); 6] = [
    ("Corvetto", Resource::Magic, HealerType::Grace),
    ("Al-Mari", Resource::Supply, HealerType::Physician),
    ("Lovell", Resource::Intelligence, HealerType::Grace),
    ("Bastien", Resource::Transport, HealerType::Grace),
    ("Battalia", Resource::Force, HealerType::Physician),
    ("Erlanda", Resource::Wealth, HealerType::Physician),
];

static HOUSES: LazyLock<Vec<HouseModel>> = LazyLock::new(|| build(&HOUSE_NAMES, &HOUSE_DATA));

fn build(names: &[&str], data: &[(&str, Resource, HealerType)]) -> Vec<HouseModel> {
    names
        .iter()
        .filter_map(|name| {
            let row = data.iter().find(|(house, _, _)| house == name);
            if row.is_none() {
                warn!(house = *name, "house without data skipped");
            }
            row.map(|&(house, domain, healer)| HouseModel::new(house, domain, healer))
        })
        .collect()
}

/// The default houses in seating order.
#[must_use]
pub fn houses() -> &'static [HouseModel] {
    &HOUSES
}

/// The default house called `name`.
#[must_use]
pub fn house(name: &str) -> Option<&'static HouseModel> {
    HOUSES.iter().find(|house| house.name() == name)
}

/// The primary domain of the default house called `name`.
#[must_use]
pub fn primary_domain(name: &str) -> Option<Resource> {
    house(name).and_then(HouseModel::primary_domain)
}

/// The healer of the default house called `name`.
#[must_use]
pub fn healer_type(name: &str) -> Option<HealerType> {
    house(name).map(HouseModel::healer)
}
