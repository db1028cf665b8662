use serde::{Deserialize, Serialize};

use super::registry::Entity;

/// City record from `cities.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: String,

    /// Display name, e.g. "Springfield"
    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state_id: Option<String>,

    /// Filled from the State registry during resolution, never loaded
    #[serde(default, skip_deserializing)]
    pub state_name: Option<String>,
}

impl Entity for City {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.city
    }
}

impl City {
    pub fn new(id: &str, city: &str, state_id: Option<&str>) -> Self {
        City {
            id: id.to_string(),
            city: city.to_string(),
            state_id: state_id.map(str::to_string),
            state_name: None,
        }
    }
}
