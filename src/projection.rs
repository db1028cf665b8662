// 🪞 Projection Builder - public shape of each entity
//
// Derived from the resolved dataset and the counters; never fed back into
// resolution. Every projection gets a URL slug and back-reference id lists
// in business/city load order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::aggregation::Counts;
use crate::entities::{non_blank, Business, Category, City, State};
use crate::resolver::ResolvedDataset;
use crate::slug::{slugify, slugify_parts};

/// Stand-in state label for businesses whose state never resolved
pub const UNKNOWN_STATE_LABEL: &str = "unknown";

/// Stand-in for a city/state/category name with no sluggable characters
pub const UNNAMED_LABEL: &str = "unnamed";

// ============================================================================
// PROJECTION RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedBusiness {
    pub id: String,
    pub title: String,
    pub slug: String,

    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,

    pub city_id: Option<String>,
    pub city_name: Option<String>,
    pub city_slug: Option<String>,
    pub state_id: Option<String>,
    pub state_name: Option<String>,
    pub state_slug: Option<String>,

    pub category_ids: Vec<String>,
    pub amenity_ids: Vec<String>,
    pub payment_ids: Vec<String>,
    pub detail_keys: Vec<String>,
    pub detail_values: Vec<String>,
    pub details: Vec<Detail>,
    pub images: Vec<String>,

    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub working_hours: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedCity {
    pub id: String,
    pub city: String,
    pub slug: String,
    pub state_id: Option<String>,
    pub state_name: Option<String>,
    pub salon_count: usize,
    pub business_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedState {
    pub id: String,
    pub state: String,
    pub slug: String,
    pub city_count: usize,
    pub salon_count: usize,
    pub city_ids: Vec<String>,
    pub business_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedCategory {
    pub id: String,
    pub category: String,
    pub slug: String,
    pub salon_count: usize,
    pub business_ids: Vec<String>,
}

/// The four projection sequences handed to rendering and snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projections {
    pub businesses: Vec<ProcessedBusiness>,
    pub cities: Vec<ProcessedCity>,
    pub states: Vec<ProcessedState>,
    pub categories: Vec<ProcessedCategory>,
}

impl Projections {
    pub fn business(&self, id: &str) -> Option<&ProcessedBusiness> {
        self.businesses.iter().find(|b| b.id == id)
    }

    pub fn city(&self, id: &str) -> Option<&ProcessedCity> {
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn state(&self, id: &str) -> Option<&ProcessedState> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&ProcessedCategory> {
        self.categories.iter().find(|c| c.id == id)
    }
}

// ============================================================================
// SLUGS
// ============================================================================

/// `city-state-title-id`; city omitted when unknown, state falls back to
/// [`UNKNOWN_STATE_LABEL`]. The embedded id keeps it unique.
pub fn business_slug(business: &Business) -> String {
    let city = non_blank(&business.city_name).unwrap_or("");
    let state = non_blank(&business.state_name).unwrap_or(UNKNOWN_STATE_LABEL);
    slugify_parts(&[city, state, &business.title, &business.id])
}

/// `unnamed-<id>` when nothing of the name survived slugification
fn or_unnamed(slug: String, id: &str) -> String {
    if slug.is_empty() {
        slugify_parts(&[UNNAMED_LABEL, id])
    } else {
        slug
    }
}

pub fn city_slug(city: &City) -> String {
    let slug = slugify_parts(&[&city.city, non_blank(&city.state_id).unwrap_or("")]);
    or_unnamed(slug, &city.id)
}

pub fn state_slug(state: &State) -> String {
    or_unnamed(slugify(&state.state), &state.id)
}

pub fn category_slug(category: &Category) -> String {
    or_unnamed(slugify(&category.category), &category.id)
}

// ============================================================================
// BACK-REFERENCE INDEX
// ============================================================================

/// Positions grouped by a string key, in insertion order
#[derive(Default)]
struct PositionIndex {
    positions: HashMap<String, Vec<usize>>,
}

impl PositionIndex {
    fn insert(&mut self, key: Option<&str>, position: usize) {
        if let Some(key) = key {
            self.positions.entry(key.to_string()).or_default().push(position);
        }
    }

    fn collect_into(&self, key: &str, into: &mut BTreeSet<usize>) {
        if let Some(found) = self.positions.get(key) {
            into.extend(found.iter().copied());
        }
    }
}

fn lower(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

// ============================================================================
// PROJECTION BUILD
// ============================================================================

/// Build all four projection sequences
pub fn project(resolved: &ResolvedDataset, counts: &Counts) -> Projections {
    let businesses = &resolved.businesses;
    let cities = resolved.cities.all();

    // business positions keyed every way a back-reference can match
    let mut business_by_city_id = PositionIndex::default();
    let mut business_by_city_name = PositionIndex::default();
    let mut business_by_state_id = PositionIndex::default();
    let mut business_by_state_name = PositionIndex::default();
    let mut business_by_city_state = PositionIndex::default();
    let mut business_by_category = PositionIndex::default();

    for (position, business) in businesses.iter().enumerate() {
        business_by_city_id.insert(business.city_key(), position);
        business_by_city_name.insert(lower(non_blank(&business.city_name)).as_deref(), position);
        business_by_state_id.insert(business.state_key(), position);
        business_by_state_name.insert(lower(non_blank(&business.state_name)).as_deref(), position);
        if let Some(city) = resolved.city_of(business) {
            business_by_city_state.insert(non_blank(&city.state_id), position);
        }
        let category_ids: BTreeSet<String> = business.category_list().into_iter().collect();
        for category_id in &category_ids {
            business_by_category.insert(Some(category_id.as_str()), position);
        }
    }

    let mut city_by_state_id = PositionIndex::default();
    let mut city_by_state_name = PositionIndex::default();
    for (position, city) in cities.iter().enumerate() {
        city_by_state_id.insert(non_blank(&city.state_id), position);
        city_by_state_name.insert(lower(non_blank(&city.state_name)).as_deref(), position);
    }

    let business_ids = |positions: BTreeSet<usize>| -> Vec<String> {
        positions.into_iter().map(|p| businesses[p].id.clone()).collect()
    };
    let city_ids = |positions: BTreeSet<usize>| -> Vec<String> {
        positions.into_iter().map(|p| cities[p].id.clone()).collect()
    };

    let processed_businesses = businesses
        .iter()
        .map(|business| project_business(resolved, business))
        .collect();

    let processed_cities = cities
        .iter()
        .map(|city| {
            let mut matched = BTreeSet::new();
            business_by_city_id.collect_into(city.id.trim(), &mut matched);
            business_by_city_name.collect_into(&city.city.trim().to_lowercase(), &mut matched);

            ProcessedCity {
                id: city.id.clone(),
                city: city.city.clone(),
                slug: city_slug(city),
                state_id: city.state_id.clone(),
                state_name: city.state_name.clone(),
                salon_count: counts.city_salon_count(&city.id),
                business_ids: business_ids(matched),
            }
        })
        .collect();

    let processed_states = resolved
        .states
        .iter()
        .map(|state| {
            let id = state.id.trim();
            let name = state.state.trim().to_lowercase();

            let mut matched_cities = BTreeSet::new();
            city_by_state_id.collect_into(id, &mut matched_cities);
            city_by_state_name.collect_into(&name, &mut matched_cities);

            let mut matched_businesses = BTreeSet::new();
            business_by_state_id.collect_into(id, &mut matched_businesses);
            business_by_state_name.collect_into(&name, &mut matched_businesses);
            business_by_city_state.collect_into(id, &mut matched_businesses);

            ProcessedState {
                id: state.id.clone(),
                state: state.state.clone(),
                slug: state_slug(state),
                city_count: counts.state_city_count(&state.id),
                salon_count: counts.state_salon_count(&state.id),
                city_ids: city_ids(matched_cities),
                business_ids: business_ids(matched_businesses),
            }
        })
        .collect();

    let processed_categories = resolved
        .categories
        .iter()
        .map(|category| {
            let mut matched = BTreeSet::new();
            business_by_category.collect_into(category.id.trim(), &mut matched);

            ProcessedCategory {
                id: category.id.clone(),
                category: category.category.clone(),
                slug: category_slug(category),
                salon_count: counts.category_salon_count(&category.id),
                business_ids: business_ids(matched),
            }
        })
        .collect();

    Projections {
        businesses: processed_businesses,
        cities: processed_cities,
        states: processed_states,
        categories: processed_categories,
    }
}

fn project_business(resolved: &ResolvedDataset, business: &Business) -> ProcessedBusiness {
    let details = business
        .details()
        .into_iter()
        .map(|(key, value)| Detail { key, value })
        .collect();

    ProcessedBusiness {
        id: business.id.clone(),
        title: business.title.clone(),
        slug: business_slug(business),
        website: non_blank(&business.website).map(str::to_string),
        phone: non_blank(&business.phone).map(str::to_string),
        email: non_blank(&business.email).map(str::to_string),
        address: business.address().map(str::to_string),
        postal_code: non_blank(&business.postal_code).map(str::to_string),
        latitude: non_blank(&business.latitude).map(str::to_string),
        longitude: non_blank(&business.longitude).map(str::to_string),
        city_id: business.city_key().map(str::to_string),
        city_name: non_blank(&business.city_name).map(str::to_string),
        city_slug: resolved.city_of(business).map(city_slug),
        state_id: business.state_key().map(str::to_string),
        state_name: non_blank(&business.state_name).map(str::to_string),
        state_slug: resolved.state_of(business).map(state_slug),
        category_ids: business.category_list(),
        amenity_ids: business.amenity_list(),
        payment_ids: business.payment_list(),
        detail_keys: crate::entities::split_list(&business.detail_keys),
        detail_values: crate::entities::split_list(&business.detail_values),
        details,
        images: business.image_list(),
        rating: parse_rating(&business.rating),
        reviews: non_blank(&business.reviews).and_then(|r| r.replace(',', "").parse().ok()),
        working_hours: non_blank(&business.working_hours).map(str::to_string),
        description: non_blank(&business.description).map(str::to_string),
    }
}

/// Lenient rating parse; anything outside 0–5 or non-numeric is dropped
fn parse_rating(value: &Option<String>) -> Option<f64> {
    non_blank(value)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|rating| rating.is_finite() && (0.0..=5.0).contains(rating))
}

// ============================================================================
// TESTS
// ============================================================================
