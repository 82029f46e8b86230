//! Raw-ingredient stock. Every quantity change in the system goes through
//! [`Registry::adjust`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Unit of measure for an ingredient.
///
/// The common units get a closed variant; anything else is carried verbatim.
/// Serializes as its short code ("g", "ml", "u") or the free-form label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Grams,
    Milliliters,
    Pieces,
    Other(String),
}

impl Unit {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Grams => "g",
            Self::Milliliters => "ml",
            Self::Pieces => "u",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        match value.as_str() {
            "g" => Self::Grams,
            "ml" => Self::Milliliters,
            "u" => Self::Pieces,
            _ => Self::Other(value),
        }
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named raw material with a unit of measure and current stock quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub unit: Unit,
    pub quantity: f64,
}

/// The set of known ingredients, keyed by case-sensitive name.
///
/// Iteration is always name-lexicographic so listings stay stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    items: BTreeMap<String, Ingredient>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Ingredient>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|ingredient| (ingredient.name.clone(), ingredient))
                .collect(),
        }
    }

    pub fn add(&mut self, name: &str, unit: Unit, quantity: f64) -> ResultEngine<()> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(EngineError::InvalidQuantity(format!(
                "initial stock for \"{name}\" must be a non-negative number"
            )));
        }
        if self.items.contains_key(name) {
            return Err(EngineError::DuplicateName(name.to_string()));
        }
        self.items.insert(
            name.to_string(),
            Ingredient {
                name: name.to_string(),
                unit,
                quantity,
            },
        );
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> ResultEngine<Ingredient> {
        self.items
            .remove(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    /// Apply a signed delta to an ingredient's stock. The sole mutation path
    /// for quantities: the check happens before any state changes.
    pub fn adjust(&mut self, name: &str, delta: f64) -> ResultEngine<f64> {
        if !delta.is_finite() {
            return Err(EngineError::InvalidQuantity(format!(
                "adjustment for \"{name}\" must be finite"
            )));
        }
        let ingredient = self
            .items
            .get_mut(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
        let new = ingredient.quantity + delta;
        if new < 0.0 {
            return Err(EngineError::NegativeStock(name.to_string()));
        }
        ingredient.quantity = new;
        Ok(new)
    }

    /// Lookup used by display and reporting layers; absence is not an error.
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.items.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.items.values()
    }

    pub fn to_vec(&self) -> Vec<Ingredient> {
        self.items.values().cloned().collect()
    }
}
