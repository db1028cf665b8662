use serde::{Deserialize, Serialize};

use super::registry::Entity;

/// State record, loaded verbatim from `states.csv`
///
/// Derived counters (`city_count`, `salon_count`) live in
/// [`crate::aggregation::Counts`], not on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: String,

    /// Display name, e.g. "Illinois"
    #[serde(default)]
    pub state: String,
}

impl Entity for State {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.state
    }
}

impl State {
    /// First two characters of the display name, upper-cased
    pub fn name_prefix(&self) -> String {
        self.state.trim().chars().take(2).collect::<String>().to_uppercase()
    }

    /// Initials of a multi-word display name ("New York" → "NY")
    ///
    /// Single-word names have no initials.
    pub fn initials(&self) -> Option<String> {
        let words: Vec<&str> = self.state.split_whitespace().collect();
        if words.len() < 2 {
            return None;
        }
        Some(
            words
                .iter()
                .filter_map(|word| word.chars().next())
                .collect::<String>()
                .to_uppercase(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_state(name: &str) -> State {
        State {
            id: "S1".to_string(),
            state: name.to_string(),
        }
    }

    #[test]
    fn test_name_prefix() {
        assert_eq!(create_state("Illinois").name_prefix(), "IL");
        assert_eq!(create_state(" new york").name_prefix(), "NE");
        assert_eq!(create_state("").name_prefix(), "");
    }

    #[test]
    fn test_initials() {
        assert_eq!(create_state("New York").initials(), Some("NY".to_string()));
        assert_eq!(create_state("district of columbia").initials(), Some("DOC".to_string()));
        assert_eq!(create_state("Texas").initials(), None);
    }
}
