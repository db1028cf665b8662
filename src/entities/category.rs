// 🏷️ Category Entity - service categories a salon is listed under
//
// Assignment only ever comes from a business's `category_ids` column;
// there is no free-text source to fall back on.

use serde::{Deserialize, Serialize};

use super::registry::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,

    /// Display name, e.g. "Nail Salon"
    #[serde(default)]
    pub category: String,
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.category
    }
}

impl Category {
    pub fn new(id: &str, category: &str) -> Self {
        Category {
            id: id.to_string(),
            category: category.to_string(),
        }
    }
}
