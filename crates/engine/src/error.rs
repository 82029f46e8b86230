//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`DuplicateName`] thrown when adding an ingredient whose name is taken.
//! - [`NotFound`] thrown when an ingredient or product does not exist where
//!     existence is required.
//! - [`InvalidQuantity`] thrown when a non-positive or non-finite quantity is
//!     supplied where a positive one is required.
//! - [`NegativeStock`] thrown when an adjustment or debit would drive stock
//!     below zero. State is left unchanged and no ledger entry is written.
//! - [`InsufficientStock`] thrown when a production run is infeasible. No
//!     debits occur.
//!
//!  [`DuplicateName`]: EngineError::DuplicateName
//!  [`NotFound`]: EngineError::NotFound
//!  [`InvalidQuantity`]: EngineError::InvalidQuantity
//!  [`NegativeStock`]: EngineError::NegativeStock
//!  [`InsufficientStock`]: EngineError::InsufficientStock
use thiserror::Error;

use crate::production::Shortfall;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("\"{0}\" already present!")]
    DuplicateName(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("stock for \"{0}\" cannot go below zero")]
    NegativeStock(String),
    #[error("insufficient stock: {}", shortfall_list(.0))]
    InsufficientStock(Vec<Shortfall>),
}

fn shortfall_list(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
