//! Built-in food catalog.
//!
//! Energy densities are per 100 g of the food as eaten. Users extend the
//! catalog through `[[foods.custom]]` in the config file.

use crate::{Error, FoodItem, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<FoodCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static FoodCatalog {
    &DEFAULT_CATALOG
}

const BUILTIN_FOODS: &[(&str, f64)] = &[
    ("米饭", 116.0),
    ("rice", 116.0),
    ("馒头", 223.0),
    ("面条", 110.0),
    ("鸡蛋", 144.0),
    ("egg", 144.0),
    ("鸡胸肉", 133.0),
    ("chicken breast", 133.0),
    ("牛奶", 54.0),
    ("milk", 54.0),
    ("苹果", 53.0),
    ("apple", 53.0),
    ("香蕉", 93.0),
    ("banana", 93.0),
    ("西兰花", 36.0),
    ("broccoli", 36.0),
    ("燕麦", 377.0),
    ("oats", 377.0),
    ("豆腐", 82.0),
    ("tofu", 82.0),
];

/// Foods keyed by lowercase name
#[derive(Clone, Debug, Default)]
pub struct FoodCatalog {
    foods: HashMap<String, FoodItem>,
}

/// Builds the catalog of built-in foods
///
/// Prefer [`get_default_catalog`] unless custom foods need merging.
pub fn build_default_catalog() -> FoodCatalog {
    let mut catalog = FoodCatalog::default();
    for (name, kcal) in BUILTIN_FOODS {
        catalog.insert(FoodItem {
            name: (*name).to_string(),
            kcal_per_100g: *kcal,
        });
    }
    catalog
}

impl FoodCatalog {
    /// Built-in foods overlaid with `custom`; custom entries win on name clashes
    pub fn with_custom(custom: &[FoodItem]) -> Self {
        let mut catalog = get_default_catalog().clone();
        for item in custom {
            if catalog.insert(item.clone()).is_some() {
                tracing::debug!("Custom food {:?} overrides built-in entry", item.name);
            }
        }
        catalog
    }

    /// Insert a food, returning any entry it replaced
    pub fn insert(&mut self, item: FoodItem) -> Option<FoodItem> {
        self.foods.insert(normalize(&item.name), item)
    }

    /// Case-insensitive lookup by exact name
    pub fn lookup(&self, name: &str) -> Option<&FoodItem> {
        self.foods.get(&normalize(name))
    }

    /// Like [`lookup`](Self::lookup) but errors on a miss
    pub fn require(&self, name: &str) -> Result<&FoodItem> {
        self.lookup(name)
            .ok_or_else(|| Error::UnknownFood(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// All foods sorted by name
    pub fn items(&self) -> Vec<&FoodItem> {
        let mut items: Vec<_> = self.foods.values().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    /// Validate catalog entries, returning every problem found
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for item in self.items() {
            if item.name.trim().is_empty() {
                errors.push("Food with empty name".to_string());
            }
            if !item.kcal_per_100g.is_finite() || item.kcal_per_100g < 0.0 {
                errors.push(format!(
                    "Food '{}' has invalid energy density {}",
                    item.name, item.kcal_per_100g
                ));
            }
        }

        errors
    }
}

/// Validate a list of foods before merging, catching duplicates the map would hide
pub fn validate_custom(custom: &[FoodItem]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for item in custom {
        if !seen.insert(normalize(&item.name)) {
            errors.push(format!("Duplicate custom food '{}'", item.name));
        }
    }

    let mut catalog = FoodCatalog::default();
    for item in custom {
        catalog.insert(item.clone());
    }
    errors.extend(catalog.validate());
    errors
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_valid() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.len(), BUILTIN_FOODS.len());
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let catalog = get_default_catalog();
        let item = catalog.lookup("  Chicken Breast ").unwrap();
        assert_eq!(item.kcal_per_100g, 133.0);
        assert!(catalog.lookup("米饭").is_some());
        assert!(catalog.lookup("pizza").is_none());
    }

    #[test]
    fn test_require_unknown_food() {
        let catalog = get_default_catalog();
        match catalog.require("pizza") {
            Err(Error::UnknownFood(name)) => assert_eq!(name, "pizza"),
            other => panic!("Expected UnknownFood, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_overrides_builtin() {
        let custom = vec![
            FoodItem {
                name: "RICE".into(),
                kcal_per_100g: 130.0,
            },
            FoodItem {
                name: "protein bar".into(),
                kcal_per_100g: 380.0,
            },
        ];
        let catalog = FoodCatalog::with_custom(&custom);

        assert_eq!(catalog.lookup("rice").unwrap().kcal_per_100g, 130.0);
        assert!(catalog.lookup("protein bar").is_some());
        assert_eq!(catalog.len(), BUILTIN_FOODS.len() + 1);
        // cached default stays untouched
        assert_eq!(get_default_catalog().lookup("rice").unwrap().kcal_per_100g, 116.0);
    }

    #[test]
    fn test_validate_custom_reports_problems() {
        let custom = vec![
            FoodItem {
                name: "soup".into(),
                kcal_per_100g: 40.0,
            },
            FoodItem {
                name: "Soup".into(),
                kcal_per_100g: f64::NAN,
            },
            FoodItem {
                name: " ".into(),
                kcal_per_100g: -1.0,
            },
        ];
        let errors = validate_custom(&custom);
        assert!(errors.iter().any(|e| e.contains("Duplicate")));
        assert!(errors.iter().any(|e| e.contains("empty name")));
        assert!(errors.iter().any(|e| e.contains("invalid energy density")));
    }
}
