// 💇 Business Entity - one salon listing from `salons.csv`
//
// Every column except `id` is optional. Relational keys (`city_id`,
// `state_id`) may be blank or dangling on load; the resolver fills them in
// on a copy, never on the loaded record.

use serde::{Deserialize, Serialize};

use super::registry::Entity;
use super::{non_blank, split_list};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Business {
    // ========================================================================
    // IDENTITY
    // ========================================================================
    pub id: String,
    pub title: String,

    // ========================================================================
    // CONTACT
    // ========================================================================
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,

    // ========================================================================
    // LOCATION KEYS (any subset may be absent on load)
    // ========================================================================
    pub city_id: Option<String>,
    pub city_name: Option<String>,
    pub state_id: Option<String>,
    pub state_name: Option<String>,

    // ========================================================================
    // COMMA-DELIMITED RELATIONAL COLUMNS
    // ========================================================================
    pub category_ids: Option<String>,
    pub amenity_ids: Option<String>,
    pub payment_ids: Option<String>,
    pub detail_keys: Option<String>,
    pub detail_values: Option<String>,
    pub images: Option<String>,

    // ========================================================================
    // LISTING EXTRAS
    // ========================================================================
    pub rating: Option<String>,
    pub reviews: Option<String>,
    /// JSON object: `{"Monday": "9AM-5PM", "Tuesday": ["9AM-12PM", "1PM-5PM"]}`
    pub working_hours: Option<String>,
    pub description: Option<String>,
}

impl Entity for Business {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

impl Business {
    /// Create a business with only identity set
    pub fn new(id: &str, title: &str) -> Self {
        Business {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Builder pattern: set free-text address
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Builder pattern: set city key
    pub fn with_city_id(mut self, city_id: &str) -> Self {
        self.city_id = Some(city_id.to_string());
        self
    }

    /// Builder pattern: set state key and name
    pub fn with_state(mut self, state_id: &str, state_name: &str) -> Self {
        self.state_id = Some(state_id.to_string());
        self.state_name = Some(state_name.to_string());
        self
    }

    /// Builder pattern: set comma-delimited category ids
    pub fn with_categories(mut self, category_ids: &str) -> Self {
        self.category_ids = Some(category_ids.to_string());
        self
    }

    pub fn address(&self) -> Option<&str> {
        non_blank(&self.address)
    }

    pub fn city_key(&self) -> Option<&str> {
        non_blank(&self.city_id)
    }

    pub fn state_key(&self) -> Option<&str> {
        non_blank(&self.state_id)
    }

    pub fn category_list(&self) -> Vec<String> {
        split_list(&self.category_ids)
    }

    pub fn amenity_list(&self) -> Vec<String> {
        split_list(&self.amenity_ids)
    }

    pub fn payment_list(&self) -> Vec<String> {
        split_list(&self.payment_ids)
    }

    pub fn image_list(&self) -> Vec<String> {
        split_list(&self.images)
    }

    /// Zip `detail_keys` with `detail_values` positionally
    ///
    /// Extra keys get an empty value; extra values are dropped.
    pub fn details(&self) -> Vec<(String, String)> {
        let values = split_list(&self.detail_values);
        split_list(&self.detail_keys)
            .into_iter()
            .enumerate()
            .map(|(i, key)| (key, values.get(i).cloned().unwrap_or_default()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list_split() {
        let business = Business::new("1", "Glow").with_categories("4, 9,4");
        assert_eq!(business.category_list(), vec!["4", "9", "4"]);
        assert!(Business::new("2", "Bare").category_list().is_empty());
    }

    #[test]
    fn test_details_zip_uneven() {
        let mut business = Business::new("1", "Glow");
        business.detail_keys = Some("Parking,Wifi,Kids".to_string());
        business.detail_values = Some("Street,Free".to_string());

        assert_eq!(
            business.details(),
            vec![
                ("Parking".to_string(), "Street".to_string()),
                ("Wifi".to_string(), "Free".to_string()),
                ("Kids".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_blank_keys_are_absent() {
        let mut business = Business::new("1", "Glow");
        business.city_id = Some("  ".to_string());
        assert_eq!(business.city_key(), None);
        assert_eq!(business.with_city_id("9").city_key(), Some("9"));
    }
}
