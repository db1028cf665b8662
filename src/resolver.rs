// 🧭 Resolver - fill in missing city/state keys from the same batch
//
// Fixed stage order, one forward pass each:
//   1. cities get their state's display name
//   2. businesses get city/state from city_id, else from the address text
//
// Inputs are never mutated. Lookups go through registries built once up
// front, and every resolved record is a fresh copy. Misses are not errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::entities::{
    non_blank, Business, CategoryRegistry, City, CityRegistry, State, StateRegistry,
};
use crate::loader::Dataset;

// ============================================================================
// RESOLUTION OUTCOMES
// ============================================================================

/// Where a business's city came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitySource {
    /// `city_id` resolved directly
    Key,
    /// Third-to-last address segment matched a city name
    Address,
    Unresolved,
}

/// Where a business's state came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateSource {
    /// Taken from the resolved city (authoritative)
    City,
    /// The business's own `state_id` already resolved
    Key,
    /// Two-letter abbreviation in the address matched a state name
    Abbreviation,
    /// Adopted from a city matched by address
    AddressCity,
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub city: CitySource,
    pub state: StateSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStats {
    pub city_by_key: usize,
    pub city_by_address: usize,
    pub city_unresolved: usize,
    pub state_by_city: usize,
    pub state_by_key: usize,
    pub state_by_abbreviation: usize,
    pub state_by_address_city: usize,
    pub state_unresolved: usize,
}

impl ResolutionStats {
    fn record(&mut self, resolution: &Resolution) {
        match resolution.city {
            CitySource::Key => self.city_by_key += 1,
            CitySource::Address => self.city_by_address += 1,
            CitySource::Unresolved => self.city_unresolved += 1,
        }
        match resolution.state {
            StateSource::City => self.state_by_city += 1,
            StateSource::Key => self.state_by_key += 1,
            StateSource::Abbreviation => self.state_by_abbreviation += 1,
            StateSource::AddressCity => self.state_by_address_city += 1,
            StateSource::Unresolved => self.state_unresolved += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "city: {} by key, {} by address, {} unresolved; state: {} via city, {} by key, {} by abbreviation, {} via address city, {} unresolved",
            self.city_by_key,
            self.city_by_address,
            self.city_unresolved,
            self.state_by_city,
            self.state_by_key,
            self.state_by_abbreviation,
            self.state_by_address_city,
            self.state_unresolved
        )
    }
}

// ============================================================================
// RESOLVED DATASET
// ============================================================================

/// Output of [`resolve`]: new copies with keys filled in, plus lookups
#[derive(Debug, Clone)]
pub struct ResolvedDataset {
    pub businesses: Vec<Business>,
    /// Per-business outcome, same order as `businesses`
    pub resolutions: Vec<Resolution>,
    pub cities: CityRegistry,
    pub states: StateRegistry,
    pub categories: CategoryRegistry,
    pub stats: ResolutionStats,
}

impl ResolvedDataset {
    /// City a business resolved to, if any
    pub fn city_of(&self, business: &Business) -> Option<&City> {
        business.city_key().and_then(|id| self.cities.find_by_id(id))
    }

    /// State a business resolved to, if any
    pub fn state_of(&self, business: &Business) -> Option<&State> {
        business.state_key().and_then(|id| self.states.find_by_id(id))
    }

    /// State a city resolved to, if any
    pub fn state_of_city(&self, city: &City) -> Option<&State> {
        non_blank(&city.state_id).and_then(|id| self.states.find_by_id(id))
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolve a raw dataset. Pure: the same input always yields the same output.
pub fn resolve(raw: &Dataset) -> ResolvedDataset {
    let states = StateRegistry::new(raw.states.clone());

    // Stage 1: state names onto cities
    let cities = CityRegistry::new(
        raw.cities
            .iter()
            .map(|city| backfill_city_state(city, &states))
            .collect(),
    );

    // Stage 2: city/state onto businesses
    let mut stats = ResolutionStats::default();
    let mut businesses = Vec::with_capacity(raw.businesses.len());
    let mut resolutions = Vec::with_capacity(raw.businesses.len());

    for business in &raw.businesses {
        let (resolved, resolution) = resolve_business(business, &cities, &states);
        stats.record(&resolution);
        businesses.push(resolved);
        resolutions.push(resolution);
    }

    debug!("Resolved {} businesses: {}", businesses.len(), stats.summary());

    ResolvedDataset {
        businesses,
        resolutions,
        cities,
        states,
        categories: CategoryRegistry::new(raw.categories.clone()),
        stats,
    }
}

/// Copy a city, setting `state_name` only when its `state_id` resolves
pub fn backfill_city_state(city: &City, states: &StateRegistry) -> City {
    let mut resolved = city.clone();
    resolved.state_name = non_blank(&city.state_id)
        .and_then(|id| states.find_by_id(id))
        .map(|state| state.state.clone());
    resolved
}

/// Resolve one business against already-resolved cities
pub fn resolve_business(
    business: &Business,
    cities: &CityRegistry,
    states: &StateRegistry,
) -> (Business, Resolution) {
    let mut resolved = business.clone();
    let mut city_source = CitySource::Unresolved;
    let mut state_source = StateSource::Unresolved;

    // Own state key counts as resolved; normalize the name to the registry's
    if let Some(state) = resolved.state_key().and_then(|id| states.find_by_id(id)) {
        adopt_state(&mut resolved, state);
        state_source = StateSource::Key;
    }

    if let Some(city) = resolved.city_key().and_then(|id| cities.find_by_id(id)) {
        // 2a: city key resolves, its state overrides whatever was there
        resolved.city_id = Some(city.id.clone());
        resolved.city_name = Some(city.city.clone());
        city_source = CitySource::Key;

        if let Some(state) = non_blank(&city.state_id).and_then(|id| states.find_by_id(id)) {
            adopt_state(&mut resolved, state);
            state_source = StateSource::City;
        }
    } else if state_source == StateSource::Unresolved {
        // 2b: two-letter abbreviation in the address
        match resolved.address().and_then(|address| infer_state(address, states)) {
            Some(state) => {
                adopt_state(&mut resolved, state);
                state_source = StateSource::Abbreviation;
            }
            None => trace!(business = %business.id, "No state abbreviation match"),
        }
    }

    if city_source == CitySource::Unresolved {
        // 2c: city name from the address, never overriding a known state
        match resolved.address().and_then(|address| infer_city(address, cities)) {
            Some(city) => {
                resolved.city_id = Some(city.id.clone());
                resolved.city_name = Some(city.city.clone());
                city_source = CitySource::Address;

                if state_source == StateSource::Unresolved {
                    if let Some(state) =
                        non_blank(&city.state_id).and_then(|id| states.find_by_id(id))
                    {
                        adopt_state(&mut resolved, state);
                        state_source = StateSource::AddressCity;
                    }
                }
            }
            None => trace!(business = %business.id, "No city name match in address"),
        }
    }

    (
        resolved,
        Resolution {
            city: city_source,
            state: state_source,
        },
    )
}

fn adopt_state(business: &mut Business, state: &State) {
    business.state_id = Some(state.id.clone());
    business.state_name = Some(state.state.clone());
}

// ============================================================================
// ADDRESS HEURISTICS
// ============================================================================

/// Last whitespace token of a segment, if it is exactly two characters
fn two_letter_token(segment: &str) -> Option<String> {
    let token = segment.split_whitespace().last()?;
    if token.chars().count() == 2 {
        Some(token.to_uppercase())
    } else {
        None
    }
}

/// Two-letter state abbreviation found in an address
///
/// Second-to-last comma segment first ("…, IL, USA"), then the last one
/// ("…, New York, NY").
pub fn state_abbreviation(address: &str) -> Option<String> {
    let segments: Vec<&str> = address.split(',').collect();
    if segments.len() < 2 {
        return None;
    }
    two_letter_token(segments[segments.len() - 2])
        .or_else(|| two_letter_token(segments[segments.len() - 1]))
}

/// Infer a state from an address abbreviation
///
/// Matches against the first two letters of each state name, then against
/// the initials of multi-word names. First match in load order wins.
pub fn infer_state<'a>(address: &str, states: &'a StateRegistry) -> Option<&'a State> {
    let token = state_abbreviation(address)?;

    states
        .iter()
        .find(|state| state.name_prefix() == token)
        .or_else(|| {
            states
                .iter()
                .find(|state| state.initials().as_deref() == Some(token.as_str()))
        })
}

/// Candidate city name: third-to-last comma segment, trimmed
pub fn city_candidate(address: &str) -> Option<&str> {
    let segments: Vec<&str> = address.split(',').collect();
    if segments.len() < 3 {
        return None;
    }
    Some(segments[segments.len() - 3].trim()).filter(|candidate| !candidate.is_empty())
}

/// Infer a city by exact, case-insensitive name match on the address
pub fn infer_city<'a>(address: &str, cities: &'a CityRegistry) -> Option<&'a City> {
    city_candidate(address).and_then(|candidate| cities.find_by_name(candidate))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;

    fn create_state(id: &str, name: &str) -> State {
        State {
            id: id.to_string(),
            state: name.to_string(),
        }
    }

    fn create_dataset(businesses: Vec<Business>) -> Dataset {
        Dataset {
            businesses,
            cities: vec![
                City::new("9", "Springfield", Some("IL1")),
                City::new("10", "Albany", Some("NY1")),
                City::new("11", "Nowhere", Some("ZZ9")),
            ],
            states: vec![create_state("IL1", "Illinois"), create_state("NY1", "New York")],
            categories: vec![Category::new("1", "Hair Salon")],
        }
    }

    #[test]
    fn test_city_state_name_backfill() {
        let resolved = resolve(&create_dataset(vec![]));

        assert_eq!(
            resolved.cities.find_by_id("9").unwrap().state_name.as_deref(),
            Some("Illinois")
        );
        // Dangling state_id keeps no name
        assert_eq!(resolved.cities.find_by_id("11").unwrap().state_name, None);
    }

    #[test]
    fn test_city_key_state_overrides_business_state() {
        let business = Business::new("1", "Glow")
            .with_city_id("9")
            .with_state("NY1", "New York");
        let resolved = resolve(&create_dataset(vec![business]));

        let glow = &resolved.businesses[0];
        assert_eq!(glow.city_name.as_deref(), Some("Springfield"));
        assert_eq!(glow.state_id.as_deref(), Some("IL1"));
        assert_eq!(glow.state_name.as_deref(), Some("Illinois"));
        assert_eq!(resolved.resolutions[0].state, StateSource::City);
    }

    #[test]
    fn test_city_key_with_dangling_city_state_keeps_own_state() {
        let business = Business::new("1", "Glow")
            .with_city_id("11")
            .with_state("NY1", "New York");
        let resolved = resolve(&create_dataset(vec![business]));

        assert_eq!(resolved.businesses[0].city_name.as_deref(), Some("Nowhere"));
        assert_eq!(resolved.businesses[0].state_id.as_deref(), Some("NY1"));
        assert_eq!(resolved.resolutions[0].state, StateSource::Key);
    }

    #[test]
    fn test_address_city_inference() {
        let mut business =
            Business::new("5", "Glow").with_address("123 Main St, Springfield, IL, USA");
        business.city_id = Some(String::new());
        let resolved = resolve(&create_dataset(vec![business]));

        let glow = &resolved.businesses[0];
        assert_eq!(glow.city_id.as_deref(), Some("9"));
        assert_eq!(glow.city_name.as_deref(), Some("Springfield"));
        assert_eq!(glow.state_id.as_deref(), Some("IL1"));
        assert_eq!(resolved.resolutions[0].city, CitySource::Address);
        // "IL" already matched Illinois by abbreviation before the city step
        assert_eq!(resolved.resolutions[0].state, StateSource::Abbreviation);
    }

    #[test]
    fn test_address_state_abbreviation_initials() {
        let business = Business::new("6", "Polished").with_address("1 A St, Suite 2, New York, NY");
        let resolved = resolve(&create_dataset(vec![business]));

        let polished = &resolved.businesses[0];
        assert_eq!(polished.state_id.as_deref(), Some("NY1"));
        assert_eq!(polished.state_name.as_deref(), Some("New York"));
        assert_eq!(polished.city_id, None);
        assert_eq!(resolved.resolutions[0].city, CitySource::Unresolved);
    }

    #[test]
    fn test_address_city_does_not_override_inferred_state() {
        // Abbreviation says Illinois, address city is Albany (New York)
        let business = Business::new("7", "Mixed").with_address("5 Elm, Albany, IL, USA");
        let resolved = resolve(&create_dataset(vec![business]));

        let mixed = &resolved.businesses[0];
        assert_eq!(mixed.city_id.as_deref(), Some("10"));
        assert_eq!(mixed.state_id.as_deref(), Some("IL1"));
    }

    #[test]
    fn test_address_city_supplies_state_when_abbreviation_misses() {
        let business =
            Business::new("8", "Up North").with_address("5 Elm, Albany, New York 12207, USA");
        let resolved = resolve(&create_dataset(vec![business]));

        let up_north = &resolved.businesses[0];
        assert_eq!(up_north.city_id.as_deref(), Some("10"));
        assert_eq!(up_north.state_id.as_deref(), Some("NY1"));
        assert_eq!(resolved.resolutions[0].state, StateSource::AddressCity);
    }

    #[test]
    fn test_unresolvable_business_is_not_an_error() {
        let business = Business::new("9", "Lost").with_address("somewhere");
        let resolved = resolve(&create_dataset(vec![business, Business::new("10", "Bare")]));

        assert_eq!(resolved.businesses[0].city_id, None);
        assert_eq!(resolved.businesses[0].state_id, None);
        assert_eq!(resolved.stats.city_unresolved, 2);
        assert_eq!(resolved.stats.state_unresolved, 2);
    }

    #[test]
    fn test_dangling_keys_fall_through_to_address() {
        let business = Business::new("12", "Stray")
            .with_city_id("404")
            .with_state("ZZ", "Nowhere")
            .with_address("1 A St, Springfield, IL, USA");
        let resolved = resolve(&create_dataset(vec![business]));

        let stray = &resolved.businesses[0];
        assert_eq!(stray.city_id.as_deref(), Some("9"));
        assert_eq!(stray.city_name.as_deref(), Some("Springfield"));
        assert_eq!(stray.state_id.as_deref(), Some("IL1"));
        assert_eq!(stray.state_name.as_deref(), Some("Illinois"));
        assert_eq!(
            resolved.resolutions[0],
            Resolution {
                city: CitySource::Address,
                state: StateSource::Abbreviation,
            }
        );
    }

    #[test]
    fn test_dangling_keys_without_address_stay_unresolved() {
        let business = Business::new("13", "Ghost")
            .with_city_id("404")
            .with_state("ZZ", "Nowhere")
            .with_categories("1");
        let resolved = resolve(&create_dataset(vec![business]));

        assert_eq!(resolved.resolutions[0].city, CitySource::Unresolved);
        assert_eq!(resolved.resolutions[0].state, StateSource::Unresolved);
        assert!(resolved.city_of(&resolved.businesses[0]).is_none());
        assert!(resolved.state_of(&resolved.businesses[0]).is_none());

        let counts = crate::aggregation::aggregate(&resolved);
        assert!(counts.city_salons.is_empty());
        assert!(counts.state_salons.is_empty());
        // Category membership does not depend on location
        assert_eq!(counts.category_salon_count("1"), 1);
    }

    #[test]
    fn test_input_not_mutated() {
        let raw = create_dataset(vec![Business::new("1", "Glow").with_city_id("9")]);
        let before = raw.clone();
        let _ = resolve(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_state_abbreviation_segments() {
        assert_eq!(state_abbreviation("123 Main St, Springfield, IL, USA"), Some("IL".to_string()));
        assert_eq!(state_abbreviation("1 A St, New York, NY"), Some("NY".to_string()));
        assert_eq!(state_abbreviation("1 A St, Springfield, IL 62701"), None);
        assert_eq!(state_abbreviation("no commas here"), None);
    }

    #[test]
    fn test_prefix_match_beats_initials() {
        // "NE" is New York's prefix, so Nebraska loses even though it is
        // the better answer: first-match-wins is kept as is
        let states = StateRegistry::new(vec![
            create_state("NY1", "New York"),
            create_state("NE1", "Nebraska"),
        ]);
        assert_eq!(infer_state("1 Rd, Omaha, NE, USA", &states).unwrap().id, "NY1");
    }

    #[test]
    fn test_city_candidate() {
        assert_eq!(city_candidate("123 Main St, Springfield, IL, USA"), Some("Springfield"));
        assert_eq!(city_candidate("Springfield, IL"), None);
        assert_eq!(city_candidate(" , IL, USA"), None);
    }
}
