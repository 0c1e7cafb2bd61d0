//! Settlement engine for groups sharing monetary obligations.
//!
//! The engine answers two questions, both in exact integer cents:
//!
//! - for a single expense, how much each participant contributed and owes,
//!   under even, fixed and percentage splits ([`allocation`]);
//! - across a whole history of expenses and recorded settlements, the
//!   pairwise debts between members and each member's net balance
//!   ([`Ledger`]).
//!
//! Everything is a pure function over caller-supplied snapshots; nothing
//! is persisted and no state is shared between calls. Inputs are assumed
//! to have passed
//! the validation layer; the invariants the engine still asserts
//! defensively surface as [`EngineError`], which callers must treat as
//! internal failures rather than user errors.
pub use error::EngineError;
pub use expense::{BPS_SCALE, Charge, Expense, ExpenseAmounts, Participant, Settlement, Split};
pub use ledger::Ledger;

pub mod allocation;
mod distribute;
mod error;
mod expense;
mod ledger;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
