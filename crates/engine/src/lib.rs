//! This module is the core of the application. The [`Engine`] keeps the
//! ingredient registry, the recipe book and the transaction ledger, and runs
//! every business operation against them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use error::EngineError;
pub use ingredients::{Ingredient, Registry, Unit};
pub use production::{Feasibility, Shortfall};
pub use recipes::RecipeBook;
pub use statistics::{ActivityReport, month_start};
pub use store::{MemoryStore, Snapshot, SnapshotStore, StoreError};
pub use transactions::{AdjustmentKind, Ledger, Sign, Transaction};

mod error;
mod ingredients;
mod production;
mod recipes;
mod seed;
mod statistics;
mod store;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// Handles ingredient stock, recipes and the activity ledger.
///
/// Every operation is one synchronous check-then-commit call with no partial
/// effect on failure. The engine itself is single-writer by construction;
/// callers that share one across tasks must keep each operation behind a
/// single lock, notably `produce`'s check-then-debit sequence.
#[derive(Debug)]
pub struct Engine {
    ingredients: Registry,
    recipes: RecipeBook,
    ledger: Ledger,
    store: Option<Box<dyn SnapshotStore>>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Ingredients in name-lexicographic order.
    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter()
    }

    /// Resolve one ingredient. Display layers use this to look up units;
    /// absence is not an error.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(name)
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Recipe lines for a product; empty when the product is unknown.
    pub fn recipe_lines(&self, product: &str) -> BTreeMap<String, f64> {
        self.recipes.lines(product).cloned().unwrap_or_default()
    }

    pub fn history(&self) -> &[Transaction] {
        self.ledger.history()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ingredients: self.ingredients.to_vec(),
            recipes: self.recipes.clone(),
            ledger: self.ledger.history().to_vec(),
        }
    }

    pub fn add_ingredient(&mut self, name: &str, unit: Unit, quantity: f64) -> ResultEngine<()> {
        self.ingredients.add(name, unit, quantity)?;
        self.persist();
        Ok(())
    }

    /// Remove an ingredient and prune it from every recipe referencing it.
    ///
    /// The cross-collection rule lives here: the recipe book never looks at
    /// the registry on its own.
    pub fn remove_ingredient(&mut self, name: &str) -> ResultEngine<()> {
        self.ingredients.remove(name)?;
        self.recipes.purge_ingredient(name);
        self.persist();
        Ok(())
    }

    /// Manual stock adjustment. Appends one `Adjustment` entry on success; a
    /// rejected adjustment leaves the ledger untouched, so the log never
    /// records an operation that did not actually change stock.
    pub fn adjust_ingredient(
        &mut self,
        name: &str,
        amount: f64,
        sign: Sign,
        kind: AdjustmentKind,
        note: &str,
    ) -> ResultEngine<Uuid> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidQuantity(format!(
                "adjustment amount for \"{name}\" must be > 0"
            )));
        }
        self.ingredients.adjust(name, sign.apply(amount))?;
        let id = self
            .ledger
            .append(Transaction::adjustment(kind, name, amount, sign, note));
        self.persist();
        Ok(id)
    }

    /// Upsert one recipe line. The ingredient must exist in the registry:
    /// lines are validated at write time instead of surfacing later as a
    /// permanent shortfall.
    pub fn set_recipe_line(
        &mut self,
        product: &str,
        ingredient: &str,
        per_unit: f64,
    ) -> ResultEngine<()> {
        if self.ingredients.get(ingredient).is_none() {
            return Err(EngineError::NotFound(ingredient.to_string()));
        }
        self.recipes.set_line(product, ingredient, per_unit)?;
        self.persist();
        Ok(())
    }

    pub fn remove_recipe_line(&mut self, product: &str, ingredient: &str) {
        self.recipes.remove_line(product, ingredient);
        self.persist();
    }

    pub fn clear_recipe(&mut self, product: &str) {
        self.recipes.clear(product);
        self.persist();
    }

    /// Pure stock check for producing `units` of `product`. Also exactly the
    /// check `produce` runs right before debiting.
    pub fn check_feasibility(&self, product: &str, units: u32) -> Feasibility {
        let mut shortfalls = Vec::new();
        if let Some(lines) = self.recipes.lines(product) {
            for (ingredient, per_unit) in lines {
                let required = per_unit * f64::from(units);
                match self.ingredients.get(ingredient) {
                    Some(stock) if stock.quantity >= required => {}
                    found => shortfalls.push(Shortfall {
                        ingredient: ingredient.clone(),
                        required,
                        unit: found.map(|ingredient| ingredient.unit.clone()),
                    }),
                }
            }
        }
        Feasibility::new(shortfalls)
    }

    /// Convert ingredient stock into `units` finished units of `product`.
    ///
    /// All-or-nothing: the feasibility check and the debits run against the
    /// same state with no suspension point in between, so either every line
    /// is debited by exactly `per_unit * units` and one `Production` entry
    /// is appended, or nothing changes.
    pub fn produce(&mut self, product: &str, units: u32) -> ResultEngine<Uuid> {
        if units == 0 {
            return Err(EngineError::InvalidQuantity(
                "production units must be >= 1".to_string(),
            ));
        }
        let Some(lines) = self.recipes.lines(product) else {
            return Err(EngineError::NotFound(product.to_string()));
        };

        // Captured before any debit; this map is the only bridge reporting
        // has to ingredient usage.
        let consumed: BTreeMap<String, f64> = lines
            .iter()
            .map(|(ingredient, per_unit)| (ingredient.clone(), per_unit * f64::from(units)))
            .collect();

        let check = self.check_feasibility(product, units);
        if !check.ok {
            return Err(EngineError::InsufficientStock(check.shortfalls));
        }

        for (ingredient, required) in &consumed {
            // Cannot fail: the feasibility check above ran against this same
            // state.
            self.ingredients.adjust(ingredient, -*required)?;
        }

        let id = self
            .ledger
            .append(Transaction::production(product, units, consumed));
        self.persist();
        Ok(id)
    }

    /// Record a sale. Sales never touch ingredient stock: the recipe was
    /// consumed at production time, and no finished-goods inventory exists.
    pub fn sell(&mut self, product: &str, units: u32) -> ResultEngine<Uuid> {
        if units == 0 {
            return Err(EngineError::InvalidQuantity(
                "sale units must be >= 1".to_string(),
            ));
        }
        let id = self.ledger.append(Transaction::sale(product, units));
        self.persist();
        Ok(id)
    }

    /// Drop the whole activity history. Separate from [`Engine::reset`]:
    /// stock and recipes are left alone.
    pub fn clear_ledger(&mut self) {
        self.ledger.clear();
        self.persist();
    }

    /// Restore the seed dataset, replacing all three collections at once.
    pub fn reset(&mut self) {
        self.ingredients = Registry::from_items(seed::ingredients());
        self.recipes = seed::recipes();
        self.ledger = Ledger::new();
        self.persist();
    }

    /// Aggregate activity over the closed `[from, to]` window.
    pub fn report(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> ActivityReport {
        statistics::aggregate(self.ledger.history(), from, to)
    }

    /// Report over the default window: start of the current month to now.
    pub fn report_current_month(&self) -> ActivityReport {
        let now = Utc::now();
        self.report(month_start(now), now)
    }

    fn persist(&self) {
        let Some(store) = &self.store else { return };
        if let Err(err) = store.save(&self.snapshot()) {
            tracing::error!("failed to persist snapshot: {err}");
        }
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Box<dyn SnapshotStore>>,
}

impl EngineBuilder {
    /// Attach the persistence collaborator.
    pub fn store<S: SnapshotStore + 'static>(mut self, store: S) -> EngineBuilder {
        self.store = Some(Box::new(store));
        self
    }

    /// Construct `Engine` from the stored snapshot when one loads in full,
    /// otherwise from the seed dataset.
    pub fn build(self) -> Engine {
        match self.store.as_ref().and_then(|store| store.load()) {
            Some(snapshot) => Engine {
                ingredients: Registry::from_items(snapshot.ingredients),
                recipes: snapshot.recipes,
                ledger: Ledger::from_entries(snapshot.ledger),
                store: self.store,
            },
            None => {
                let engine = Engine {
                    ingredients: Registry::from_items(seed::ingredients()),
                    recipes: seed::recipes(),
                    ledger: Ledger::new(),
                    store: self.store,
                };
                engine.persist();
                engine
            }
        }
    }
}
