//! crates/skincare_core/src/profile.rs
//!
//! Mutation rules for a session profile. Every mutator returns `true` when the
//! profile actually changed.

use crate::domain::{Profile, SkinType};

/// Maximum number of remembered search queries.
pub const SEARCH_HISTORY_LIMIT: usize = 10;

fn push_unique(list: &mut Vec<String>, value: String) -> bool {
    if value.is_empty() || list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}

fn remove_value(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|v| v != value);
    list.len() != before
}

impl Profile {
    pub fn set_skin_type(&mut self, skin_type: SkinType) -> bool {
        let changed = self.skin_type != skin_type;
        self.skin_type = skin_type;
        changed
    }

    /// Partial update of the contact details; `None` leaves a field untouched.
    pub fn update_details(&mut self, name: Option<String>, email: Option<String>) -> bool {
        let mut changed = false;
        if let Some(name) = name.filter(|n| *n != self.name) {
            self.name = name;
            changed = true;
        }
        if let Some(email) = email.filter(|e| *e != self.email) {
            self.email = email;
            changed = true;
        }
        changed
    }

    pub fn add_concern(&mut self, concern: &str) -> bool {
        push_unique(&mut self.concerns, concern.trim().to_string())
    }

    pub fn remove_concern(&mut self, concern: &str) -> bool {
        remove_value(&mut self.concerns, concern.trim())
    }

    /// Allergies are stored lower-cased.
    pub fn add_allergy(&mut self, allergy: &str) -> bool {
        push_unique(&mut self.allergies, allergy.trim().to_lowercase())
    }

    pub fn remove_allergy(&mut self, allergy: &str) -> bool {
        remove_value(&mut self.allergies, &allergy.trim().to_lowercase())
    }

    pub fn add_favorite(&mut self, product_id: &str) -> bool {
        push_unique(&mut self.favorite_products, product_id.trim().to_string())
    }

    pub fn remove_favorite(&mut self, product_id: &str) -> bool {
        remove_value(&mut self.favorite_products, product_id.trim())
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.favorite_products.iter().any(|id| id == product_id)
    }

    /// Moves the query to the front of the history, dropping any earlier copy
    /// and anything past [`SEARCH_HISTORY_LIMIT`]. Blank queries are ignored.
    pub fn record_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.search_history.first().map(String::as_str) == Some(query) {
            return false;
        }
        self.search_history.retain(|q| q != query);
        self.search_history.insert(0, query.to_string());
        self.search_history.truncate(SEARCH_HISTORY_LIMIT);
        true
    }

    pub fn clear_search_history(&mut self) -> bool {
        let changed = !self.search_history.is_empty();
        self.search_history.clear();
        changed
    }
}
