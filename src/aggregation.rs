// 🔢 Aggregation - salon and city counters per entity
//
// Counters are explicit accumulator maps keyed by entity id, returned by
// value. Nothing is written back onto the entities. Each pass starts from
// empty maps and only ever increments.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::resolver::ResolvedDataset;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub city_salons: BTreeMap<String, usize>,
    pub state_salons: BTreeMap<String, usize>,
    pub state_cities: BTreeMap<String, usize>,
    pub category_salons: BTreeMap<String, usize>,
}

impl Counts {
    pub fn city_salon_count(&self, city_id: &str) -> usize {
        self.city_salons.get(city_id).copied().unwrap_or(0)
    }

    pub fn state_salon_count(&self, state_id: &str) -> usize {
        self.state_salons.get(state_id).copied().unwrap_or(0)
    }

    pub fn state_city_count(&self, state_id: &str) -> usize {
        self.state_cities.get(state_id).copied().unwrap_or(0)
    }

    pub fn category_salon_count(&self, category_id: &str) -> usize {
        self.category_salons.get(category_id).copied().unwrap_or(0)
    }
}

fn increment(counter: &mut BTreeMap<String, usize>, id: &str) {
    *counter.entry(id.to_string()).or_insert(0) += 1;
}

/// Count salons per city/state/category and cities per state
///
/// A business that did not resolve a dimension contributes nothing to it.
/// A category listed twice on one business counts once.
pub fn aggregate(resolved: &ResolvedDataset) -> Counts {
    let mut counts = Counts::default();

    for business in &resolved.businesses {
        if let Some(city) = resolved.city_of(business) {
            increment(&mut counts.city_salons, &city.id);
        }
        if let Some(state) = resolved.state_of(business) {
            increment(&mut counts.state_salons, &state.id);
        }

        let category_ids: BTreeSet<String> = business.category_list().into_iter().collect();
        for category_id in &category_ids {
            if let Some(category) = resolved.categories.find_by_id(category_id) {
                increment(&mut counts.category_salons, &category.id);
            }
        }
    }

    for city in resolved.cities.iter() {
        if let Some(state) = resolved.state_of_city(city) {
            increment(&mut counts.state_cities, &state.id);
        }
    }

    debug!(
        cities = counts.city_salons.len(),
        states = counts.state_salons.len(),
        categories = counts.category_salons.len(),
        "Aggregated counters"
    );

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Business, Category, City, State};
    use crate::loader::Dataset;
    use crate::resolver::resolve;

    fn create_dataset() -> Dataset {
        Dataset {
            businesses: vec![
                Business::new("1", "Glow").with_city_id("9").with_categories("1,2"),
                Business::new("2", "Polished").with_city_id("9").with_categories("2,2"),
                Business::new("3", "Lost").with_categories("404"),
                Business::new("4", "Upstate").with_state("NY1", "New York"),
            ],
            cities: vec![
                City::new("9", "Springfield", Some("IL1")),
                City::new("10", "Peoria", Some("IL1")),
                City::new("11", "Albany", Some("NY1")),
                City::new("12", "Nowhere", None),
            ],
            states: vec![
                State { id: "IL1".to_string(), state: "Illinois".to_string() },
                State { id: "NY1".to_string(), state: "New York".to_string() },
                State { id: "TX1".to_string(), state: "Texas".to_string() },
            ],
            categories: vec![Category::new("1", "Hair Salon"), Category::new("2", "Nail Salon")],
        }
    }

    #[test]
    fn test_salon_counts() {
        let counts = aggregate(&resolve(&create_dataset()));

        assert_eq!(counts.city_salon_count("9"), 2);
        assert_eq!(counts.city_salon_count("10"), 0);
        assert_eq!(counts.state_salon_count("IL1"), 2);
        assert_eq!(counts.state_salon_count("NY1"), 1);
        assert_eq!(counts.state_salon_count("TX1"), 0);
    }

    #[test]
    fn test_category_counts_exact() {
        let counts = aggregate(&resolve(&create_dataset()));

        assert_eq!(counts.category_salon_count("1"), 1);
        // Listed twice on one business, still one business
        assert_eq!(counts.category_salon_count("2"), 2);
        // Unknown category ids are not counted anywhere
        assert!(!counts.category_salons.contains_key("404"));
    }

    #[test]
    fn test_city_counts_per_state() {
        let dataset = create_dataset();
        let counts = aggregate(&resolve(&dataset));

        for state in &dataset.states {
            let expected = dataset
                .cities
                .iter()
                .filter(|c| c.state_id.as_deref() == Some(state.id.as_str()))
                .count();
            assert_eq!(counts.state_city_count(&state.id), expected);
        }
    }

    #[test]
    fn test_fresh_counters_each_pass() {
        let resolved = resolve(&create_dataset());
        assert_eq!(aggregate(&resolved), aggregate(&resolved));
    }
}
