//! Data model for the save's `Products.json` index.
//!
//! The index is the single source of truth for which product identifiers
//! exist. Identifiers are also referenced from mix recipes, price entries,
//! and the favourites list, so an identifier change has to be rewritten in
//! all four places. Unknown fields written by the game are carried through
//! untouched via flattened ordered maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `Products.json` index for one save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductIndex {
    /// Every product identifier known to the save, in discovery order.
    #[serde(rename = "DiscoveredProducts", default)]
    pub discovered: Vec<String>,

    /// Mix recipes; each references up to three product identifiers.
    #[serde(rename = "MixRecipes", default)]
    pub mix_recipes: Vec<MixRecipe>,

    /// Per-product price entries, keyed by identifier.
    #[serde(rename = "ProductPrices", default)]
    pub prices: Vec<PriceEntry>,

    /// Identifiers the player has favourited; a subset of `discovered`.
    #[serde(rename = "FavouritedProducts", default)]
    pub favourites: Vec<String>,

    /// Fields we don't model, preserved verbatim on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One mix recipe inside the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixRecipe {
    #[serde(rename = "Product")]
    pub product: String,

    #[serde(rename = "Mixer")]
    pub mixer: String,

    #[serde(rename = "Output")]
    pub output: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One price entry inside the index. The identifier lives in a field the
/// game calls `String`; the price itself is unmodeled numeric data in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(rename = "String")]
    pub key: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductIndex {
    /// Whether `id` is a known (discovered) product identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.discovered.iter().any(|p| p == id)
    }

    /// Rewrite every reference to `old_id` across all four collections.
    ///
    /// Returns the number of references rewritten. Does not persist;
    /// the caller owns flushing the index back to disk.
    pub fn rewrite_identifier(&mut self, old_id: &str, new_id: &str) -> usize {
        let mut rewritten = 0;

        for product in &mut self.discovered {
            if *product == old_id {
                *product = new_id.to_string();
                rewritten += 1;
            }
        }

        for recipe in &mut self.mix_recipes {
            for field in [&mut recipe.product, &mut recipe.mixer, &mut recipe.output] {
                if *field == old_id {
                    *field = new_id.to_string();
                    rewritten += 1;
                }
            }
        }

        for entry in &mut self.prices {
            if entry.key == old_id {
                entry.key = new_id.to_string();
                rewritten += 1;
            }
        }

        for product in &mut self.favourites {
            if *product == old_id {
                *product = new_id.to_string();
                rewritten += 1;
            }
        }

        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_index() -> ProductIndex {
        serde_json::from_value(json!({
            "DiscoveredProducts": ["ogkush", "meth", "ogkush"],
            "MixRecipes": [
                {"Product": "ogkush", "Mixer": "cuke", "Output": "ogkush"},
                {"Product": "meth", "Mixer": "ogkush", "Output": "supermeth"}
            ],
            "ProductPrices": [
                {"String": "ogkush", "Int": 42},
                {"String": "meth", "Int": 70}
            ],
            "FavouritedProducts": ["ogkush"]
        }))
        .unwrap()
    }

    #[test]
    fn test_contains() {
        let index = sample_index();
        assert!(index.contains("ogkush"));
        assert!(index.contains("meth"));
        assert!(!index.contains("granddaddy"));
    }

    #[test]
    fn test_rewrite_identifier_touches_all_collections() {
        let mut index = sample_index();
        let rewritten = index.rewrite_identifier("ogkush", "granddaddy");

        // 2 discovered + 3 recipe fields + 1 price + 1 favourite
        assert_eq!(rewritten, 7);
        assert_eq!(index.discovered, vec!["granddaddy", "meth", "granddaddy"]);
        assert_eq!(index.mix_recipes[0].product, "granddaddy");
        assert_eq!(index.mix_recipes[0].output, "granddaddy");
        assert_eq!(index.mix_recipes[1].mixer, "granddaddy");
        assert_eq!(index.prices[0].key, "granddaddy");
        assert_eq!(index.favourites, vec!["granddaddy"]);
    }

    #[test]
    fn test_rewrite_identifier_leaves_others_alone() {
        let mut index = sample_index();
        index.rewrite_identifier("ogkush", "granddaddy");

        assert!(index.contains("meth"));
        assert_eq!(index.mix_recipes[1].product, "meth");
        assert_eq!(index.mix_recipes[1].output, "supermeth");
        assert_eq!(index.prices[1].key, "meth");
    }

    #[test]
    fn test_rewrite_identifier_no_match() {
        let mut index = sample_index();
        let before = index.clone();
        assert_eq!(index.rewrite_identifier("nosuch", "other"), 0);
        assert_eq!(index, before);
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let raw = json!({
            "DiscoveredProducts": ["ogkush"],
            "MixRecipes": [
                {"Product": "ogkush", "Mixer": "cuke", "Output": "ogkush", "Quality": 3}
            ],
            "ProductPrices": [{"String": "ogkush", "Int": 42, "Float": 1.5}],
            "FavouritedProducts": [],
            "GenerationVersion": 7
        });

        let index: ProductIndex = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(index.extra.get("GenerationVersion"), Some(&json!(7)));
        assert_eq!(index.mix_recipes[0].extra.get("Quality"), Some(&json!(3)));
        assert_eq!(index.prices[0].extra.get("Int"), Some(&json!(42)));

        let back = serde_json::to_value(&index).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let index: ProductIndex = serde_json::from_value(json!({
            "DiscoveredProducts": ["ogkush"]
        }))
        .unwrap();

        assert!(index.mix_recipes.is_empty());
        assert!(index.prices.is_empty());
        assert!(index.favourites.is_empty());
    }
}
