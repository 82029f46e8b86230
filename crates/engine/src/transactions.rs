//! Ledger primitives.
//!
//! A [`Transaction`] is an immutable record of one stock-affecting event; the
//! [`Ledger`] is the append-only, time-ordered log of all of them. Entries
//! reference ingredients and products by name, not by handle, so a record
//! stays interpretable after the thing it names is deleted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label for a manual stock adjustment.
///
/// Audit metadata only: every kind follows identical stock math.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Purchase,
    Adjust,
    Waste,
}

impl AdjustmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Adjust => "adjust",
            Self::Waste => "waste",
        }
    }
}

/// Direction of a manual adjustment.
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

    /// Turn a positive amount into the signed delta it stands for.
    pub fn apply(self, amount: f64) -> f64 {
        match self {
            Self::Plus => amount,
            Self::Minus => -amount,
        }
    }
}

/// One immutable ledger record.
///
/// A closed set: everything that interprets the ledger matches exhaustively,
/// so a new record kind is a compile-time-visible change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    /// Manual stock correction: a purchase, correction or waste write-off.
    Adjustment {
        id: Uuid,
        kind: AdjustmentKind,
        ingredient: String,
        amount: f64,
        sign: Sign,
        note: String,
        occurred_at: DateTime<Utc>,
    },
    /// A production run. `consumed` holds the exact per-ingredient debit and
    /// is the only bridge reporting has to ingredient usage.
    Production {
        id: Uuid,
        product: String,
        units: u32,
        consumed: BTreeMap<String, f64>,
        occurred_at: DateTime<Utc>,
    },
    /// Disposal of finished units. Never touches ingredient stock.
    Sale {
        id: Uuid,
        product: String,
        units: u32,
        occurred_at: DateTime<Utc>,
    },
}

impl Transaction {
    pub(crate) fn adjustment(
        kind: AdjustmentKind,
        ingredient: &str,
        amount: f64,
        sign: Sign,
        note: &str,
    ) -> Self {
        Self::Adjustment {
            id: Uuid::new_v4(),
            kind,
            ingredient: ingredient.to_string(),
            amount,
            sign,
            note: note.to_string(),
            occurred_at: Utc::now(),
        }
    }

    pub(crate) fn production(product: &str, units: u32, consumed: BTreeMap<String, f64>) -> Self {
        Self::Production {
            id: Uuid::new_v4(),
            product: product.to_string(),
            units,
            consumed,
            occurred_at: Utc::now(),
        }
    }

    pub(crate) fn sale(product: &str, units: u32) -> Self {
        Self::Sale {
            id: Uuid::new_v4(),
            product: product.to_string(),
            units,
            occurred_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Adjustment { id, .. } | Self::Production { id, .. } | Self::Sale { id, .. } => {
                *id
            }
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Adjustment { occurred_at, .. }
            | Self::Production { occurred_at, .. }
            | Self::Sale { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Append-only, insertion-ordered log of every stock-affecting event.
///
/// Timestamps are stamped by the engine right before appending, so insertion
/// order is also chronological. Entries are never edited or removed
/// individually; [`Ledger::clear`] is the one explicit, irreversible reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Transaction>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, entry: Transaction) -> Uuid {
        let id = entry.id();
        self.entries.push(entry);
        id
    }

    pub fn history(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(Transaction::sale("Humita", 5));
        ledger.append(Transaction::sale("Caprese", 2));

        let products: Vec<&str> = ledger
            .history()
            .iter()
            .map(|entry| match entry {
                Transaction::Sale { product, .. } => product.as_str(),
                _ => panic!("unexpected entry kind"),
            })
            .collect();
        assert_eq!(products, ["Humita", "Caprese"]);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut ledger = Ledger::new();
        ledger.append(Transaction::sale("Humita", 5));
        ledger.clear();

        assert!(ledger.is_empty());
    }

    #[test]
    fn serde_tags_every_kind() {
        let entries = vec![
            Transaction::adjustment(AdjustmentKind::Waste, "Queso", 10.0, Sign::Minus, "vencido"),
            Transaction::production("Carne", 2, BTreeMap::from([("Harina".to_string(), 100.0)])),
            Transaction::sale("Carne", 1),
        ];

        let json = serde_json::to_string(&entries).unwrap();
        assert!(json.contains("\"type\":\"adjustment\""));
        assert!(json.contains("\"type\":\"production\""));
        assert!(json.contains("\"type\":\"sale\""));
        assert!(json.contains("\"sign\":\"-\""));

        let back: Vec<Transaction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entries);
    }
}
