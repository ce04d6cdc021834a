//! Property tests for journal validation.

use mizan_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::{SplitDirection, SplitInput};
use super::validation::{validate_split_amounts, validate_splits};

/// Strategy for generating positive decimal amounts with 4 decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

fn split(direction: SplitDirection, amount: Decimal) -> SplitInput {
    SplitInput {
        account_id: AccountId::new(),
        direction,
        amount,
        memo: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any entry built by mirroring each debit with an equal credit validates.
    #[test]
    fn prop_mirrored_entries_balance(amounts in prop::collection::vec(amount_strategy(), 1..8)) {
        let mut splits = Vec::with_capacity(amounts.len() * 2);
        for amount in &amounts {
            splits.push(split(SplitDirection::Debit, *amount));
            splits.push(split(SplitDirection::Credit, *amount));
        }

        let totals = validate_splits(&splits).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.difference(), Decimal::ZERO);
    }

    /// Perturbing one side of a balanced entry always rejects.
    #[test]
    fn prop_perturbed_entries_reject(
        amount in amount_strategy(),
        delta in 1i64..1_000_000i64,
    ) {
        let splits = vec![
            split(SplitDirection::Debit, amount + Decimal::new(delta, 4)),
            split(SplitDirection::Credit, amount),
        ];
        prop_assert!(validate_splits(&splits).is_err());
    }

    /// Valid persisted pairs always have exactly one positive side.
    #[test]
    fn prop_split_exclusivity(amount in amount_strategy()) {
        prop_assert!(validate_split_amounts(amount, Decimal::ZERO).is_ok());
        prop_assert!(validate_split_amounts(Decimal::ZERO, amount).is_ok());
        prop_assert!(validate_split_amounts(amount, amount).is_err());
    }

    /// Totals returned by validation equal the direction-partitioned sums.
    #[test]
    fn prop_totals_match_inputs(amounts in prop::collection::vec(amount_strategy(), 1..6)) {
        let mut splits = Vec::new();
        let mut expected: Decimal = Decimal::ZERO;
        for amount in &amounts {
            splits.push(split(SplitDirection::Debit, *amount));
            splits.push(split(SplitDirection::Credit, *amount));
            expected += *amount;
        }

        let totals = validate_splits(&splits).unwrap();
        prop_assert_eq!(totals.debit_total, expected);
        prop_assert_eq!(totals.credit_total, expected);
    }
}
