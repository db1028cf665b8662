// Entity Models - the four tabular record kinds in a directory dataset
//
// Each entity has:
// - Stable identity (`id`) taken verbatim from the dataset, never rewritten
// - Flat optional columns exactly as loaded
// - An immutable registry for id and display-name lookups

pub mod business;
pub mod category;
pub mod city;
pub mod registry;
pub mod state;

pub use business::Business;
pub use category::Category;
pub use city::City;
pub use registry::{Entity, Registry};
pub use state::State;

pub type CityRegistry = Registry<City>;
pub type StateRegistry = Registry<State>;
pub type CategoryRegistry = Registry<Category>;

// ============================================================================
// FIELD HELPERS
// ============================================================================

/// Trimmed value of an optional column, `None` when absent or blank
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Split a comma-delimited relational column into trimmed, non-empty pieces
///
/// Example: `" 3, 7,,12 "` → `["3", "7", "12"]`; absent or `""` → `[]`
pub fn split_list(value: &Option<String>) -> Vec<String> {
    match non_blank(value) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
