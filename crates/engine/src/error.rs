//! The module contains the error the engine can throw.
//!
//! Every variant is an internal-consistency failure: malformed split
//! configurations are rejected by the validation layer before they reach the
//! engine, so anything surfacing here means corrupted or unvalidated input
//! slipped through. Callers should treat these as unrecoverable internal
//! errors, never as user-facing validation messages.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Mixed split methods: {0}")]
    MixedSplitMethods(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("Invalid settlement: {0}")]
    InvalidSettlement(String),
    #[error("Unbalanced expense: unmatched paid {paid_cents} cents, unmatched owed {owed_cents} cents")]
    UnbalancedExpense { paid_cents: i64, owed_cents: i64 },
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MixedSplitMethods(a), Self::MixedSplitMethods(b)) => a == b,
            (Self::InvalidSplit(a), Self::InvalidSplit(b)) => a == b,
            (Self::InvalidSettlement(a), Self::InvalidSettlement(b)) => a == b,
            (
                Self::UnbalancedExpense {
                    paid_cents: a_paid,
                    owed_cents: a_owed,
                },
                Self::UnbalancedExpense {
                    paid_cents: b_paid,
                    owed_cents: b_owed,
                },
            ) => a_paid == b_paid && a_owed == b_owed,
            _ => false,
        }
    }
}
