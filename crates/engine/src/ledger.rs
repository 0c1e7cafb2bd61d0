//! The module contains the pairwise debt ledger.
//!
//! A [`Ledger`] maps creditor → debtor → cents owed, accumulated across an
//! arbitrary history of expenses and recorded settlements. Every stored
//! amount is strictly positive and no member ever owes themselves; entries
//! that reach zero are pruned on the spot. The ledger nets self-loops per
//! expense (a payer consuming part of their own expense) but does not
//! simplify chains across three or more members.
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    allocation::{ower_amounts, payer_amounts},
    expense::{Expense, Settlement},
};

/// Accumulated pairwise debts: creditor → debtor → cents.
///
/// Ordered maps keep iteration, and therefore [`Ledger::balances`] and any
/// rendering done by callers, deterministic across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: BTreeMap<Uuid, BTreeMap<Uuid, i64>>,
}

impl Ledger {
    /// Builds the ledger for a whole expense history, then applies the
    /// recorded settlements.
    ///
    /// Each expense is folded independently: per-expense paid/owed maps are
    /// self-netted, matched pairwise and merged into the running ledger.
    /// The only failure modes are internal-consistency violations
    /// ([`EngineError::UnbalancedExpense`] and friends); zero expenses and
    /// zero settlements simply yield an empty ledger.
    pub fn accumulate(expenses: &[Expense], settlements: &[Settlement]) -> ResultEngine<Ledger> {
        let mut ledger = Ledger::default();
        for expense in expenses {
            ledger.fold_expense(expense)?;
            trace!(total_cents = expense.amounts.total_cents(), "folded expense");
        }
        for settlement in settlements {
            ledger.apply_settlement(settlement)?;
        }
        debug!(
            expenses = expenses.len(),
            settlements = settlements.len(),
            entries = ledger.iter().count(),
            "accumulated ledger"
        );
        Ok(ledger)
    }

    /// Cents `debtor` owes `creditor`, 0 when no entry exists.
    #[must_use]
    pub fn amount_owed(&self, creditor: Uuid, debtor: Uuid) -> i64 {
        self.entries
            .get(&creditor)
            .and_then(|debts| debts.get(&debtor))
            .copied()
            .unwrap_or(0)
    }

    /// All `(creditor, debtor, cents)` triples in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Uuid, Uuid, i64)> + '_ {
        self.entries.iter().flat_map(|(&creditor, debts)| {
            debts
                .iter()
                .map(move |(&debtor, &cents)| (creditor, debtor, cents))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Net balance per member: positive = owed to the member, negative =
    /// the member owes. The balances of any ledger sum to zero.
    #[must_use]
    pub fn balances(&self) -> BTreeMap<Uuid, i64> {
        let mut balances = BTreeMap::new();
        for (creditor, debtor, cents) in self.iter() {
            *balances.entry(creditor).or_insert(0) += cents;
            *balances.entry(debtor).or_insert(0) -= cents;
        }
        balances
    }

    /// Computes one expense's paid/owed maps and merges them in as pairwise
    /// debts.
    fn fold_expense(&mut self, expense: &Expense) -> ResultEngine<()> {
        let mut paid = payer_amounts(&expense.amounts, &expense.payers)?;
        let mut owed = ower_amounts(&expense.amounts, &expense.owers)?;

        // Self-netting: a member on both sides consumed part of what they
        // paid for; only the difference needs matching against others.
        let owed_index: HashMap<Uuid, usize> = owed
            .iter()
            .enumerate()
            .map(|(index, &(member, _))| (member, index))
            .collect();
        for (member, paid_cents) in &mut paid {
            if let Some(&index) = owed_index.get(member) {
                let netted = (*paid_cents).min(owed[index].1);
                if netted > 0 {
                    *paid_cents -= netted;
                    owed[index].1 -= netted;
                }
            }
        }

        // Greedy pairwise matching: both sides sorted by amount descending
        // (stable, so ties keep participant order), walked with independent
        // cursors, transferring min(paid, owed) at each step.
        paid.sort_by(|a, b| b.1.cmp(&a.1));
        owed.sort_by(|a, b| b.1.cmp(&a.1));

        let mut payer_cursor = 0;
        let mut ower_cursor = 0;
        while payer_cursor < paid.len() && ower_cursor < owed.len() {
            let (payer, paid_cents) = paid[payer_cursor];
            let (ower, owed_cents) = owed[ower_cursor];
            if paid_cents <= 0 {
                payer_cursor += 1;
                continue;
            }
            if owed_cents <= 0 {
                ower_cursor += 1;
                continue;
            }

            let transfer = paid_cents.min(owed_cents);
            self.add_debt(payer, ower, transfer);
            paid[payer_cursor].1 -= transfer;
            owed[ower_cursor].1 -= transfer;
            if paid[payer_cursor].1 == 0 {
                payer_cursor += 1;
            }
            if owed[ower_cursor].1 == 0 {
                ower_cursor += 1;
            }
        }

        // Total paid must equal total owed for any single expense; a
        // residual on either side means unvalidated input got this far.
        let paid_residual: i64 = paid[payer_cursor..].iter().map(|&(_, cents)| cents).sum();
        let owed_residual: i64 = owed[ower_cursor..].iter().map(|&(_, cents)| cents).sum();
        if paid_residual != 0 || owed_residual != 0 {
            return Err(EngineError::UnbalancedExpense {
                paid_cents: paid_residual,
                owed_cents: owed_residual,
            });
        }

        Ok(())
    }

    /// Applies one recorded payment: `from` paying `to` reduces what `to`
    /// is owed by `from`.
    ///
    /// Overpaying flips the entry instead of clamping it: the overshoot is
    /// stored as a debt in the opposite direction, which keeps the ledger's
    /// balances zero-sum.
    fn apply_settlement(&mut self, settlement: &Settlement) -> ResultEngine<()> {
        if settlement.from == settlement.to {
            return Err(EngineError::InvalidSettlement(format!(
                "member {} settling with themselves",
                settlement.from
            )));
        }
        if settlement.amount_cents <= 0 {
            return Err(EngineError::InvalidSettlement(format!(
                "non-positive amount {} cents",
                settlement.amount_cents
            )));
        }

        let remaining = self.amount_owed(settlement.to, settlement.from) - settlement.amount_cents;
        self.remove_debt(settlement.to, settlement.from);
        if remaining > 0 {
            self.add_debt(settlement.to, settlement.from, remaining);
        } else if remaining < 0 {
            self.add_debt(settlement.from, settlement.to, -remaining);
        }
        Ok(())
    }

    fn add_debt(&mut self, creditor: Uuid, debtor: Uuid, cents: i64) {
        debug_assert_ne!(creditor, debtor);
        debug_assert!(cents > 0);
        *self
            .entries
            .entry(creditor)
            .or_default()
            .entry(debtor)
            .or_insert(0) += cents;
    }

    fn remove_debt(&mut self, creditor: Uuid, debtor: Uuid) {
        if let Some(debts) = self.entries.get_mut(&creditor) {
            debts.remove(&debtor);
            if debts.is_empty() {
                self.entries.remove(&creditor);
            }
        }
    }
}
