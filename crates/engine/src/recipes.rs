//! The recipe book: the per-product bill of materials.
//!
//! A product exists iff it has a (possibly empty) recipe; there is no
//! separate product catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Maps each product to the ingredient quantities required per unit produced.
///
/// The book is structurally loose: it never looks at the ingredient registry.
/// Cross-collection rules (line validation, pruning on ingredient deletion)
/// live in the engine, which sees both sides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeBook {
    products: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        Self { products }
    }

    /// Upsert one line. The product is created on first use.
    pub fn set_line(&mut self, product: &str, ingredient: &str, per_unit: f64) -> ResultEngine<()> {
        if !per_unit.is_finite() || per_unit <= 0.0 {
            return Err(EngineError::InvalidQuantity(format!(
                "\"{product}\" needs a positive quantity per unit of \"{ingredient}\""
            )));
        }
        self.products
            .entry(product.to_string())
            .or_default()
            .insert(ingredient.to_string(), per_unit);
        Ok(())
    }

    /// Remove one line. No-op when the product or line is absent.
    pub fn remove_line(&mut self, product: &str, ingredient: &str) {
        if let Some(lines) = self.products.get_mut(product) {
            lines.remove(ingredient);
        }
    }

    /// Empty a product's lines. The product itself remains (an empty recipe
    /// is feasible but unproductive), and is created when unknown.
    pub fn clear(&mut self, product: &str) {
        self.products.insert(product.to_string(), BTreeMap::new());
    }

    pub fn lines(&self, product: &str) -> Option<&BTreeMap<String, f64>> {
        self.products.get(product)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, f64>)> {
        self.products.iter()
    }

    /// Drop `ingredient` from every recipe referencing it. Invoked by the
    /// engine when the ingredient is deleted from the registry.
    pub fn purge_ingredient(&mut self, ingredient: &str) {
        for lines in self.products.values_mut() {
            lines.remove(ingredient);
        }
    }
}
