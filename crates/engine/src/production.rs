//! Feasibility primitives for production runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ingredients::Unit;

/// A recipe line that current stock cannot cover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub ingredient: String,
    /// Total amount the run needs, `per_unit * units`.
    pub required: f64,
    /// Display unit; absent when the ingredient is not in the registry.
    pub unit: Option<Unit>,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} ({} {})", self.ingredient, self.required, unit),
            None => write!(f, "{} ({})", self.ingredient, self.required),
        }
    }
}

/// Outcome of a feasibility check: `ok` iff no line falls short.
///
/// Shortfalls come back in recipe-line order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feasibility {
    pub ok: bool,
    pub shortfalls: Vec<Shortfall>,
}

impl Feasibility {
    pub fn new(shortfalls: Vec<Shortfall>) -> Self {
        Self {
            ok: shortfalls.is_empty(),
            shortfalls,
        }
    }
}
