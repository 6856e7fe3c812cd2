//! Category metadata for the storefront navigation.

use serde::{Deserialize, Serialize};

/// Authored display metadata for a product category.
///
/// Products reference categories by `name`; product counts are computed
/// from the catalog rather than authored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Category name, matched exactly against `Product::category`.
    pub name: String,
    /// Emoji icon shown on category tiles.
    pub icon: String,
    /// Banner image URI.
    pub image: String,
    /// Short marketing description.
    pub description: String,
}

impl CategoryInfo {
    /// Create a category with no icon or image.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            image: String::new(),
            description: description.into(),
        }
    }

    /// Check if a raw value names this category (exact, case-sensitive).
    pub fn matches(&self, value: &str) -> bool {
        self.name == value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_sensitive() {
        let cat = CategoryInfo::new("Mobile", "Phones");
        assert!(cat.matches("Mobile"));
        assert!(!cat.matches("mobile"));
        assert!(!cat.matches("Mob"));
    }
}
