//! The module contains the domain model for shared expenses.
//!
//! Amounts are stored as integer cents (`i64`). Percentages are integer
//! basis points, where [`BPS_SCALE`] (10000) is 100.00%. Floating point is
//! never used, so totals stay exact under every split.
//!
//! The upstream validation layer guarantees, before anything reaches the
//! engine, that participants of one expense share a single split method,
//! that percentage splits sum to 10000 bps and that fixed splits sum to the
//! expected total. The engine asserts those invariants defensively but does
//! not own the user-facing rejection.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Basis points in a whole (100.00%).
pub const BPS_SCALE: i64 = 10_000;

/// An extra charge on top of an expense's base amount (tax or tip).
///
/// The charge amount is present exactly when its kind is: a fixed charge
/// carries cents, a percentage charge carries basis points applied to the
/// base amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charge {
    Fixed(i64),
    Percentage(i64),
}

impl Charge {
    /// Cents this charge contributes on top of `base_cents`.
    #[must_use]
    pub fn contribution_cents(self, base_cents: i64) -> i64 {
        match self {
            Charge::Fixed(cents) => cents,
            Charge::Percentage(bps) => crate::util::mul_div_round(base_cents, bps, BPS_SCALE),
        }
    }
}

/// The monetary shape of a single expense: a base amount plus optional tax
/// and tip charges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseAmounts {
    pub base_cents: i64,
    pub tax: Option<Charge>,
    pub tip: Option<Charge>,
}

impl ExpenseAmounts {
    /// Base amount with no tax or tip.
    #[must_use]
    pub const fn base_only(base_cents: i64) -> Self {
        Self {
            base_cents,
            tax: None,
            tip: None,
        }
    }

    /// Full amount of the expense: base plus tax and tip contributions.
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.base_cents + self.surcharge_cents()
    }

    /// Combined tax and tip contribution, 0 when both are absent.
    #[must_use]
    pub fn surcharge_cents(&self) -> i64 {
        let tax = self
            .tax
            .map_or(0, |charge| charge.contribution_cents(self.base_cents));
        let tip = self
            .tip
            .map_or(0, |charge| charge.contribution_cents(self.base_cents));
        tax + tip
    }
}

/// How one participant's share of an expense is expressed.
///
/// The value is fused into the variant: `Even` needs none, `Fixed` carries
/// cents, `Percentage` carries basis points. A participant list is valid
/// only when every entry uses the same variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Even,
    Fixed(i64),
    Percentage(i64),
}

/// A member taking part in one side of an expense, either as a payer or as
/// an ower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub member_id: Uuid,
    pub split: Split,
}

impl Participant {
    #[must_use]
    pub const fn new(member_id: Uuid, split: Split) -> Self {
        Self { member_id, split }
    }
}

/// One expense snapshot: its amounts, who paid and who owes.
///
/// Payer and ower lists are ordered; the order is the tie-break used when
/// equal shares compete for a rounding remainder, so it is part of the
/// input, not an implementation detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub amounts: ExpenseAmounts,
    pub payers: Vec<Participant>,
    pub owers: Vec<Participant>,
}

/// A recorded payment from one member to another, reducing an existing
/// debt.
///
/// Invariants (validated upstream, asserted defensively by the ledger):
/// `from != to` and `amount_cents > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: Uuid,
    pub to: Uuid,
    pub amount_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_without_charges_is_base() {
        let amounts = ExpenseAmounts::base_only(1234);
        assert_eq!(amounts.total_cents(), 1234);
        assert_eq!(amounts.surcharge_cents(), 0);
    }

    #[test]
    fn percentage_tip_contributes_rounded_share_of_base() {
        // 10% tip on 10.00: round(1000 * 1000 / 10000) = 100.
        let amounts = ExpenseAmounts {
            base_cents: 1000,
            tax: None,
            tip: Some(Charge::Percentage(1000)),
        };
        assert_eq!(amounts.surcharge_cents(), 100);
        assert_eq!(amounts.total_cents(), 1100);
    }

    #[test]
    fn fixed_and_percentage_charges_combine() {
        let amounts = ExpenseAmounts {
            base_cents: 2000,
            tax: Some(Charge::Fixed(150)),
            tip: Some(Charge::Percentage(500)),
        };
        // 150 fixed tax + round(2000 * 500 / 10000) = 100 tip.
        assert_eq!(amounts.surcharge_cents(), 250);
        assert_eq!(amounts.total_cents(), 2250);
    }
}
