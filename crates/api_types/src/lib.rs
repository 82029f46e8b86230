use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod ingredient {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientNew {
        pub name: String,
        /// Short unit code ("g", "ml", "u") or any free-form label.
        pub unit: String,
        pub quantity: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientAdjust {
        pub ingredient: String,
        pub kind: AdjustmentKind,
        pub amount: f64,
        pub sign: Sign,
        pub note: Option<String>,
    }

    /// Audit label for a manual adjustment; the stock math is the same for
    /// all three.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AdjustmentKind {
        Purchase,
        Adjust,
        Waste,
    }

    impl AdjustmentKind {
        /// Returns the canonical kind string used by the engine and ledger.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Purchase => "purchase",
                Self::Adjust => "adjust",
                Self::Waste => "waste",
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Sign {
        #[serde(rename = "+")]
        Plus,
        #[serde(rename = "-")]
        Minus,
    }

    impl Sign {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Plus => "+",
                Self::Minus => "-",
            }
        }
    }
}

pub mod recipe {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeLineSet {
        pub product: String,
        pub ingredient: String,
        /// Quantity required per unit produced.
        pub quantity: f64,
    }
}

pub mod production {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductionRun {
        pub product: String,
        /// Accepted as any number; the server floors it and clamps to >= 1.
        pub units: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeasibilityQuery {
        pub product: String,
        pub units: f64,
    }
}

pub mod activity {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivityList {
        /// Newest-first window size; the server defaults to 20.
        pub limit: Option<usize>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: Uuid,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatsQuery {
        /// Window start; defaults to the first day of the current month.
        pub from: Option<DateTime<FixedOffset>>,
        /// Window end; defaults to now.
        pub to: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivitySummary {
        pub from: DateTime<Utc>,
        pub to: DateTime<Utc>,
        pub units_produced: u64,
        pub units_sold: u64,
        /// Rendered "name (count)" list, or "—" when nothing qualified.
        pub top_products: String,
        /// Rendered "name: amount" list, or "—" when nothing qualified.
        pub top_ingredients: String,
    }
}
