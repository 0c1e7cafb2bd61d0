//! The module contains the per-expense allocation math.
//!
//! Given one expense it answers two questions: how much did each payer put
//! in, and how much does each ower owe. Both answers sum exactly to
//! [`ExpenseAmounts::total_cents`] and are returned as participant-ordered
//! `(member, cents)` pairs because the order is the rounding tie-break.
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    distribute::distribute,
    expense::{ExpenseAmounts, Participant, Split},
};

/// Splits `total_cents` among `participants` according to their shared
/// split method.
///
/// - `Even`: every participant weighs the same.
/// - `Percentage`: basis-point values are the weights (validated upstream
///   to sum to 10000).
/// - `Fixed`: each participant's amount is passed through untouched; the
///   validation layer guarantees the amounts sum to `total_cents`.
///
/// An empty participant list yields an empty result, not an error. A list
/// mixing split methods is a programmer error upstream and is rejected with
/// [`EngineError::MixedSplitMethods`].
pub fn amounts_for(
    total_cents: i64,
    participants: &[Participant],
) -> ResultEngine<Vec<(Uuid, i64)>> {
    let Some(first) = participants.first() else {
        return Ok(Vec::new());
    };

    let weights: Vec<(Uuid, i64)> = match first.split {
        Split::Even => {
            ensure_uniform(participants, |split| matches!(split, Split::Even))?;
            participants
                .iter()
                .map(|participant| (participant.member_id, 1))
                .collect()
        }
        Split::Percentage(_) => {
            ensure_uniform(participants, |split| matches!(split, Split::Percentage(_)))?;
            participants
                .iter()
                .map(|participant| match participant.split {
                    Split::Percentage(bps) => (participant.member_id, bps),
                    Split::Even | Split::Fixed(_) => unreachable!("uniformity checked above"),
                })
                .collect()
        }
        Split::Fixed(_) => {
            ensure_uniform(participants, |split| matches!(split, Split::Fixed(_)))?;
            return Ok(participants
                .iter()
                .map(|participant| match participant.split {
                    Split::Fixed(cents) => (participant.member_id, cents),
                    Split::Even | Split::Percentage(_) => unreachable!("uniformity checked above"),
                })
                .collect());
        }
    };

    ensure_positive_weight(&weights)?;
    Ok(distribute(total_cents, &weights))
}

/// How much each payer contributed: payers split the full total, tax and
/// tip included, among themselves.
pub fn payer_amounts(
    amounts: &ExpenseAmounts,
    payers: &[Participant],
) -> ResultEngine<Vec<(Uuid, i64)>> {
    amounts_for(amounts.total_cents(), payers)
}

/// How much each ower owes, as a two-stage cascade.
///
/// The base amount is split by the owers' declared method first; tax and
/// tip are then distributed **in proportion to each ower's base share**,
/// not the original split weights. Two owers with equal percentage weights
/// but different fixed base shares therefore get different tax shares: the
/// surcharge tracks what each person actually consumed.
///
/// When every base share is zero (a zero base with a fixed surcharge) the
/// surcharge falls back to an even split so the exact-sum guarantee holds.
pub fn ower_amounts(
    amounts: &ExpenseAmounts,
    owers: &[Participant],
) -> ResultEngine<Vec<(Uuid, i64)>> {
    let base_shares = amounts_for(amounts.base_cents, owers)?;
    let surcharge = amounts.surcharge_cents();
    if surcharge == 0 || base_shares.is_empty() {
        return Ok(base_shares);
    }

    let surcharge_shares = if base_shares.iter().any(|&(_, cents)| cents > 0) {
        distribute(surcharge, &base_shares)
    } else {
        let even: Vec<(Uuid, i64)> = base_shares.iter().map(|&(member, _)| (member, 1)).collect();
        distribute(surcharge, &even)
    };

    Ok(base_shares
        .into_iter()
        .zip(surcharge_shares)
        .map(|((member, base), (_, extra))| (member, base + extra))
        .collect())
}

fn ensure_uniform(
    participants: &[Participant],
    expected: impl Fn(Split) -> bool,
) -> ResultEngine<()> {
    for participant in participants {
        if !expected(participant.split) {
            return Err(EngineError::MixedSplitMethods(format!(
                "participant {} does not match the expense split method",
                participant.member_id
            )));
        }
    }
    Ok(())
}

fn ensure_positive_weight(weights: &[(Uuid, i64)]) -> ResultEngine<()> {
    if weights.iter().any(|&(_, weight)| weight > 0) {
        Ok(())
    } else {
        Err(EngineError::InvalidSplit(
            "split weights sum to zero".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Charge;

    fn member(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn even(n: u128) -> Participant {
        Participant::new(member(n), Split::Even)
    }

    fn sum(shares: &[(Uuid, i64)]) -> i64 {
        shares.iter().map(|&(_, cents)| cents).sum()
    }

    #[test]
    fn even_split_covers_total_exactly() {
        let shares = amounts_for(1000, &[even(1), even(2), even(3)]).unwrap();
        assert_eq!(
            shares,
            vec![(member(1), 333), (member(2), 333), (member(3), 334)]
        );
    }

    #[test]
    fn percentage_split_uses_basis_points_as_weights() {
        let participants = [
            Participant::new(member(1), Split::Percentage(2500)),
            Participant::new(member(2), Split::Percentage(7500)),
        ];
        let shares = amounts_for(1000, &participants).unwrap();
        assert_eq!(shares, vec![(member(1), 250), (member(2), 750)]);
    }

    #[test]
    fn fixed_split_passes_amounts_through() {
        let participants = [
            Participant::new(member(1), Split::Fixed(700)),
            Participant::new(member(2), Split::Fixed(300)),
        ];
        let shares = amounts_for(1000, &participants).unwrap();
        assert_eq!(shares, vec![(member(1), 700), (member(2), 300)]);
    }

    #[test]
    fn empty_participants_yield_empty_shares() {
        assert_eq!(amounts_for(1000, &[]).unwrap(), Vec::new());
    }

    #[test]
    fn mixed_split_methods_are_rejected() {
        let participants = [even(1), Participant::new(member(2), Split::Fixed(500))];
        let err = amounts_for(1000, &participants).unwrap_err();
        assert!(matches!(err, EngineError::MixedSplitMethods(_)));
    }

    #[test]
    fn zero_percentage_weights_are_rejected() {
        let participants = [
            Participant::new(member(1), Split::Percentage(0)),
            Participant::new(member(2), Split::Percentage(0)),
        ];
        let err = amounts_for(1000, &participants).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }

    #[test]
    fn payers_split_the_full_total() {
        let amounts = ExpenseAmounts {
            base_cents: 1000,
            tax: Some(Charge::Fixed(100)),
            tip: Some(Charge::Percentage(1000)),
        };
        let shares = payer_amounts(&amounts, &[even(1), even(2)]).unwrap();
        assert_eq!(sum(&shares), 1200);
    }

    #[test]
    fn surcharge_follows_fixed_base_shares() {
        // 700/300 fixed base shares of 1000, fixed tax 100: the tax splits
        // 70/30 with the base shares, not evenly.
        let amounts = ExpenseAmounts {
            base_cents: 1000,
            tax: Some(Charge::Fixed(100)),
            tip: None,
        };
        let owers = [
            Participant::new(member(1), Split::Fixed(700)),
            Participant::new(member(2), Split::Fixed(300)),
        ];
        let shares = ower_amounts(&amounts, &owers).unwrap();
        assert_eq!(shares, vec![(member(1), 770), (member(2), 330)]);
    }

    #[test]
    fn ower_total_matches_expense_total() {
        let amounts = ExpenseAmounts {
            base_cents: 997,
            tax: Some(Charge::Percentage(825)),
            tip: Some(Charge::Fixed(150)),
        };
        let shares = ower_amounts(&amounts, &[even(1), even(2), even(3)]).unwrap();
        assert_eq!(sum(&shares), amounts.total_cents());
    }

    #[test]
    fn zero_base_with_fixed_surcharge_splits_evenly() {
        let amounts = ExpenseAmounts {
            base_cents: 0,
            tax: None,
            tip: Some(Charge::Fixed(90)),
        };
        let shares = ower_amounts(&amounts, &[even(1), even(2), even(3)]).unwrap();
        assert_eq!(
            shares,
            vec![(member(1), 30), (member(2), 30), (member(3), 30)]
        );
    }
}
