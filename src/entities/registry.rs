// 🗂️ Entity Registry - immutable id → entity lookup
//
// Built once per run from the loader output. Storage keeps load order,
// which is the tie-breaker for every "first match wins" lookup.

use std::collections::HashMap;

/// Anything with a stable id and a human-readable display name
pub trait Entity {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
}

/// Read-only registry of one entity kind
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    by_id: HashMap<String, usize>,
}

impl<T: Entity> Registry<T> {
    /// Build the registry. When an id repeats, the first record keeps it.
    pub fn new(items: Vec<T>) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let id = item.id().trim();
            if id.is_empty() {
                continue;
            }
            by_id.entry(id.to_string()).or_insert(index);
        }
        Registry { items, by_id }
    }

    /// Find an entity by id (trimmed; blank ids never resolve)
    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Find the first entity whose display name equals `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.display_name().trim().to_lowercase() == wanted)
    }

    /// All entities in load order
    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::State;

    fn create_state(id: &str, name: &str) -> State {
        State {
            id: id.to_string(),
            state: name.to_string(),
        }
    }

    #[test]
    fn test_find_by_id() {
        let registry = Registry::new(vec![
            create_state("IL1", "Illinois"),
            create_state("NY1", "New York"),
        ]);

        assert_eq!(registry.find_by_id("NY1").map(|s| s.state.as_str()), Some("New York"));
        assert_eq!(registry.find_by_id(" IL1 ").map(|s| s.state.as_str()), Some("Illinois"));
        assert!(registry.find_by_id("TX1").is_none());
        assert!(registry.find_by_id("").is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let registry = Registry::new(vec![
            create_state("IL1", "Illinois"),
            create_state("IL1", "Illinois (dup)"),
        ]);

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.find_by_id("IL1").unwrap().state, "Illinois");
    }

    #[test]
    fn test_find_by_name_case_insensitive_first_wins() {
        let registry = Registry::new(vec![
            create_state("A", "Georgia"),
            create_state("B", "GEORGIA"),
        ]);

        assert_eq!(registry.find_by_name("georgia").unwrap().id, "A");
        assert!(registry.find_by_name("  ").is_none());
    }
}
