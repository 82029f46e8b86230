//! The illustrative dataset loaded when no usable snapshot exists.

use std::collections::BTreeMap;

use crate::ingredients::{Ingredient, Unit};
use crate::recipes::RecipeBook;

pub(crate) fn ingredients() -> Vec<Ingredient> {
    [
        ("Harina", Unit::Grams, 5000.0),
        ("Carne", Unit::Grams, 3000.0),
        ("Pollo", Unit::Grams, 3000.0),
        ("Queso", Unit::Grams, 2000.0),
        ("Jamón", Unit::Grams, 1500.0),
        ("Cebolla", Unit::Grams, 1200.0),
        ("Choclo", Unit::Grams, 1000.0),
        ("Huevo", Unit::Pieces, 30.0),
        ("Aceitunas", Unit::Pieces, 50.0),
        ("Leche", Unit::Milliliters, 1000.0),
    ]
    .into_iter()
    .map(|(name, unit, quantity)| Ingredient {
        name: name.to_string(),
        unit,
        quantity,
    })
    .collect()
}

// Quantities are per produced unit.
pub(crate) fn recipes() -> RecipeBook {
    let mut products = BTreeMap::new();
    for (product, lines) in [
        (
            "Carne",
            vec![
                ("Harina", 50.0),
                ("Carne", 60.0),
                ("Cebolla", 20.0),
                ("Huevo", 0.1),
                ("Aceitunas", 0.2),
            ],
        ),
        (
            "Pollo",
            vec![
                ("Harina", 50.0),
                ("Pollo", 60.0),
                ("Cebolla", 15.0),
                ("Leche", 10.0),
            ],
        ),
        (
            "Jamón y Queso",
            vec![("Harina", 50.0), ("Jamón", 30.0), ("Queso", 40.0)],
        ),
        (
            "Humita",
            vec![
                ("Harina", 50.0),
                ("Choclo", 70.0),
                ("Cebolla", 10.0),
                ("Leche", 15.0),
            ],
        ),
        (
            "Cordero Patagónico",
            vec![("Harina", 55.0), ("Carne", 70.0), ("Cebolla", 20.0)],
        ),
        ("Caprese", vec![("Harina", 50.0), ("Queso", 40.0)]),
    ] {
        let lines: BTreeMap<String, f64> = lines
            .into_iter()
            .map(|(ingredient, per_unit)| (ingredient.to_string(), per_unit))
            .collect();
        products.insert(product.to_string(), lines);
    }
    RecipeBook::from_products(products)
}
